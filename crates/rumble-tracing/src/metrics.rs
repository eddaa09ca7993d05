//! Tracing metrics for observability

use crate::EffectTraceEvent;

/// Counters collected by tracing providers
///
/// All counters are monotonically increasing and saturate instead of
/// wrapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TracingMetrics {
    /// Total number of effect records emitted
    pub effect_events_emitted: u64,

    /// Total number of tick summaries emitted
    pub tick_events_emitted: u64,

    /// Total number of lifecycle events emitted
    pub device_events_emitted: u64,

    /// Effect records whose outcome was a rejection
    pub rejected_requests: u64,

    /// Effects that ran their full length
    pub completions: u64,

    /// Number of records evicted because a buffer was full
    pub events_dropped: u64,

    /// Number of hardware output failures reported
    pub output_failures: u64,
}

impl TracingMetrics {
    /// Create new metrics with zero values
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an effect record emission
    #[inline]
    pub fn record_effect_event(&mut self, event: &EffectTraceEvent) {
        self.effect_events_emitted = self.effect_events_emitted.saturating_add(1);
        if event.is_rejection() {
            self.rejected_requests = self.rejected_requests.saturating_add(1);
        }
        if event.operation == crate::EffectOperation::Complete {
            self.completions = self.completions.saturating_add(1);
        }
    }

    /// Record a tick summary emission
    #[inline]
    pub fn record_tick_event(&mut self) {
        self.tick_events_emitted = self.tick_events_emitted.saturating_add(1);
    }

    /// Record a lifecycle event emission
    #[inline]
    pub fn record_device_event(&mut self, is_error: bool) {
        self.device_events_emitted = self.device_events_emitted.saturating_add(1);
        if is_error {
            self.output_failures = self.output_failures.saturating_add(1);
        }
    }

    /// Record a dropped record
    #[inline]
    pub fn record_dropped_event(&mut self) {
        self.events_dropped = self.events_dropped.saturating_add(1);
    }

    /// Total records emitted across all kinds
    pub fn total_emitted(&self) -> u64 {
        self.effect_events_emitted
            .saturating_add(self.tick_events_emitted)
            .saturating_add(self.device_events_emitted)
    }

    /// Fraction of emitted records that were later dropped
    pub fn drop_rate(&self) -> f64 {
        let total = self.total_emitted();
        if total == 0 {
            return 0.0;
        }
        (self.events_dropped as f64) / (total as f64)
    }

    /// Fraction of effect requests that were rejected
    pub fn rejection_rate(&self) -> f64 {
        if self.effect_events_emitted == 0 {
            return 0.0;
        }
        (self.rejected_requests as f64) / (self.effect_events_emitted as f64)
    }

    /// Check if health indicators are within acceptable bounds
    pub fn is_healthy(&self) -> bool {
        self.drop_rate() < 0.01 && self.output_failures == 0
    }

    /// Reset all metrics to zero
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Merge metrics from another instance
    pub fn merge(&mut self, other: &TracingMetrics) {
        self.effect_events_emitted = self
            .effect_events_emitted
            .saturating_add(other.effect_events_emitted);
        self.tick_events_emitted = self
            .tick_events_emitted
            .saturating_add(other.tick_events_emitted);
        self.device_events_emitted = self
            .device_events_emitted
            .saturating_add(other.device_events_emitted);
        self.rejected_requests = self
            .rejected_requests
            .saturating_add(other.rejected_requests);
        self.completions = self.completions.saturating_add(other.completions);
        self.events_dropped = self.events_dropped.saturating_add(other.events_dropped);
        self.output_failures = self.output_failures.saturating_add(other.output_failures);
    }
}

impl core::fmt::Display for TracingMetrics {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "TracingMetrics(effects={}, ticks={}, device={}, rejected={}, completed={}, dropped={}, drop_rate={:.4}%)",
            self.effect_events_emitted,
            self.tick_events_emitted,
            self.device_events_emitted,
            self.rejected_requests,
            self.completions,
            self.events_dropped,
            self.drop_rate() * 100.0
        )
    }
}
