//! Tracing manager for coordinating trace event emission

use crate::{
    DeviceTraceEvent, EffectTraceEvent, LogProvider, TickTraceEvent, TracingError,
    TracingMetrics, TracingProvider,
};

/// Owner of the active tracing provider
///
/// Devices hold one manager and emit every request record and tick summary
/// through it. Disabling the manager drops events before they reach the
/// provider.
///
/// # Example
///
/// ```
/// use rumble_tracing::{EffectOperation, EffectOutcome, EffectTraceEvent, TracingManager};
///
/// let mut manager = TracingManager::new();
/// manager.initialize()?;
///
/// manager.emit_effect_event(EffectTraceEvent::new(
///     EffectOperation::Upload,
///     0,
///     EffectOutcome::Applied,
/// ));
/// assert_eq!(manager.metrics().effect_events_emitted, 1);
///
/// manager.shutdown();
/// # Ok::<(), rumble_tracing::TracingError>(())
/// ```
pub struct TracingManager {
    provider: Box<dyn TracingProvider>,
    enabled: bool,
}

impl TracingManager {
    /// Create a manager backed by [`LogProvider`]
    pub fn new() -> Self {
        Self::with_provider(Box::new(LogProvider::new()))
    }

    /// Create a manager with a custom provider
    pub fn with_provider(provider: Box<dyn TracingProvider>) -> Self {
        Self {
            provider,
            enabled: true,
        }
    }

    /// Initialize the tracing provider
    ///
    /// # Errors
    ///
    /// Returns an error if initialization fails.
    pub fn initialize(&mut self) -> Result<(), TracingError> {
        self.provider.initialize()
    }

    /// Enable or disable tracing
    ///
    /// When disabled, events are silently dropped.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Check if tracing is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled && self.provider.is_enabled()
    }

    /// Emit an effect request record
    #[inline]
    pub fn emit_effect_event(&self, event: EffectTraceEvent) {
        if self.enabled {
            self.provider.emit_effect_event(event);
        }
    }

    /// Emit a tick summary
    #[inline]
    pub fn emit_tick_event(&self, event: TickTraceEvent) {
        if self.enabled {
            self.provider.emit_tick_event(event);
        }
    }

    /// Emit a device lifecycle event
    pub fn emit_device_event(&self, event: DeviceTraceEvent) {
        if self.enabled {
            self.provider.emit_device_event(event);
        }
    }

    /// Get current tracing metrics
    pub fn metrics(&self) -> TracingMetrics {
        self.provider.metrics()
    }

    /// Shutdown the tracing provider
    pub fn shutdown(&mut self) {
        self.provider.shutdown();
    }
}

impl core::fmt::Debug for TracingManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TracingManager")
            .field("enabled", &self.enabled)
            .field(
                "provider_type",
                &core::any::type_name_of_val(&*self.provider),
            )
            .finish()
    }
}

impl Default for TracingManager {
    fn default() -> Self {
        Self::new()
    }
}
