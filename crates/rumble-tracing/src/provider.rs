//! Tracing provider trait definition

use crate::{DeviceTraceEvent, EffectTraceEvent, TickTraceEvent, TracingError, TracingMetrics};

/// Destination for diagnostics events
///
/// # Hot path requirements
///
/// [`emit_effect_event`](TracingProvider::emit_effect_event) and
/// [`emit_tick_event`](TracingProvider::emit_tick_event) are called while the
/// device lock is held:
///
/// - Must not allocate after [`initialize`](TracingProvider::initialize)
/// - Must not block on I/O
/// - Must complete in bounded time
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` as the provider may be shared by a
/// device and the worker that drives it.
pub trait TracingProvider: Send + Sync {
    /// Initialize the tracing provider
    ///
    /// Called once before events are emitted. May allocate.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be initialized.
    fn initialize(&mut self) -> Result<(), TracingError>;

    /// Emit an effect request record
    fn emit_effect_event(&self, event: EffectTraceEvent);

    /// Emit a tick summary
    fn emit_tick_event(&self, event: TickTraceEvent);

    /// Emit a device lifecycle event
    ///
    /// Not on the hot path. May allocate.
    fn emit_device_event(&self, event: DeviceTraceEvent);

    /// Get current tracing metrics
    fn metrics(&self) -> TracingMetrics;

    /// Check if the provider is enabled
    fn is_enabled(&self) -> bool {
        true
    }

    /// Shutdown the provider
    fn shutdown(&mut self);
}
