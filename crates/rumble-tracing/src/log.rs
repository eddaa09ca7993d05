//! Structured-logging provider

use parking_lot::Mutex;

use crate::{
    DeviceTraceEvent, EffectTraceEvent, TickTraceEvent, TracingError, TracingMetrics,
    TracingProvider,
};

/// Provider that forwards every record to `tracing` structured logs
///
/// Accepted effect requests log at `debug`, rejections at `warn`, tick
/// summaries at `trace`. Installing a subscriber is left to the host.
pub struct LogProvider {
    metrics: Mutex<TracingMetrics>,
}

impl Default for LogProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LogProvider {
    /// Create a new log provider
    pub fn new() -> Self {
        Self {
            metrics: Mutex::new(TracingMetrics::default()),
        }
    }
}

impl TracingProvider for LogProvider {
    fn initialize(&mut self) -> Result<(), TracingError> {
        tracing::debug!("Using structured log tracing provider");
        Ok(())
    }

    fn emit_effect_event(&self, event: EffectTraceEvent) {
        self.metrics.lock().record_effect_event(&event);
        if event.is_rejection() {
            tracing::warn!(
                operation = event.operation.as_str(),
                effect_id = event.effect_id,
                outcome = event.outcome.as_str(),
                "Effect request rejected"
            );
        } else {
            tracing::debug!(
                operation = event.operation.as_str(),
                effect_id = event.effect_id,
                outcome = event.outcome.as_str(),
                "Effect request"
            );
        }
    }

    fn emit_tick_event(&self, event: TickTraceEvent) {
        self.metrics.lock().record_tick_event();
        tracing::trace!(
            tick_count = event.tick_count,
            active_effects = event.active_effects,
            weak = event.weak_magnitude,
            strong = event.strong_magnitude,
            "Tick"
        );
    }

    fn emit_device_event(&self, event: DeviceTraceEvent) {
        self.metrics.lock().record_device_event(event.is_error());
        match &event {
            DeviceTraceEvent::DeviceOpened {
                device_id,
                max_effects,
            } => {
                tracing::info!(device_id = %device_id, max_effects, "Device opened");
            }
            DeviceTraceEvent::DeviceClosed { device_id, reason } => {
                tracing::info!(device_id = %device_id, reason = %reason, "Device closed");
            }
            DeviceTraceEvent::ConfigApplied { device_id, summary } => {
                tracing::info!(device_id = %device_id, config = %summary, "Configuration applied");
            }
            DeviceTraceEvent::OutputFailed { device_id, message } => {
                tracing::warn!(device_id = %device_id, error = %message, "Device output failed");
            }
        }
    }

    fn metrics(&self) -> TracingMetrics {
        self.metrics.lock().clone()
    }

    fn shutdown(&mut self) {
        tracing::debug!("Structured log tracing provider shutdown");
    }
}

impl core::fmt::Debug for LogProvider {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LogProvider")
            .field("metrics", &*self.metrics.lock())
            .finish()
    }
}
