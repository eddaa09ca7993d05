//! Tracing macros for convenient event emission

/// Emit an effect request record
///
/// The operation and outcome are given as bare variant names.
///
/// # Example
///
/// ```
/// use rumble_tracing::{TracingManager, trace_effect};
///
/// let manager = TracingManager::new();
/// trace_effect!(manager, Erase, 4, UnknownEffectId);
/// assert_eq!(manager.metrics().rejected_requests, 1);
/// ```
#[macro_export]
macro_rules! trace_effect {
    ($tracer:expr, $operation:ident, $effect_id:expr, $outcome:ident) => {
        $tracer.emit_effect_event($crate::EffectTraceEvent::new(
            $crate::EffectOperation::$operation,
            $effect_id,
            $crate::EffectOutcome::$outcome,
        ));
    };
}

/// Emit a tick summary
///
/// # Example
///
/// ```
/// use rumble_tracing::{TracingManager, trace_tick};
///
/// let manager = TracingManager::new();
/// trace_tick!(manager, 1, 2, 100, 200);
/// assert_eq!(manager.metrics().tick_events_emitted, 1);
/// ```
#[macro_export]
macro_rules! trace_tick {
    ($tracer:expr, $tick_count:expr, $active_effects:expr, $weak:expr, $strong:expr) => {
        $tracer.emit_tick_event($crate::TickTraceEvent {
            tick_count: $tick_count,
            active_effects: $active_effects,
            weak_magnitude: $weak,
            strong_magnitude: $strong,
        });
    };
}

/// Emit an output failure lifecycle event
///
/// # Example
///
/// ```
/// use rumble_tracing::{TracingManager, trace_output_failed};
///
/// let manager = TracingManager::new();
/// trace_output_failed!(manager, "pad0", "EPIPE");
/// assert_eq!(manager.metrics().output_failures, 1);
/// ```
#[macro_export]
macro_rules! trace_output_failed {
    ($tracer:expr, $device_id:expr, $message:expr) => {
        $tracer.emit_device_event($crate::DeviceTraceEvent::OutputFailed {
            device_id: $device_id.to_string(),
            message: $message.to_string(),
        });
    };
}
