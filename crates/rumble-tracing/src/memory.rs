//! Bounded in-memory provider

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    DeviceTraceEvent, EffectTraceEvent, TickTraceEvent, TraceRecord, TracingError,
    TracingMetrics, TracingProvider,
};

#[derive(Debug)]
struct Ring {
    records: VecDeque<TraceRecord>,
    capacity: usize,
    metrics: TracingMetrics,
}

impl Ring {
    fn push(&mut self, record: TraceRecord) {
        if self.records.len() >= self.capacity {
            self.records.pop_front();
            self.metrics.record_dropped_event();
        }
        self.records.push_back(record);
    }
}

/// Provider that keeps the most recent records in a fixed-size ring
///
/// The ring is allocated up front; once full, the oldest record is evicted
/// and counted in [`TracingMetrics::events_dropped`]. Clones share the same
/// ring, so a test can hand one clone to a [`TracingManager`](crate::TracingManager)
/// and inspect another.
///
/// # Example
///
/// ```
/// use rumble_tracing::{EffectOperation, EffectOutcome, EffectTraceEvent, MemoryProvider, TracingProvider};
///
/// let provider = MemoryProvider::new(2)?;
/// for id in 0..3 {
///     provider.emit_effect_event(EffectTraceEvent::new(EffectOperation::Play, id, EffectOutcome::Applied));
/// }
/// assert_eq!(provider.len(), 2);
/// assert_eq!(provider.metrics().events_dropped, 1);
/// # Ok::<(), rumble_tracing::TracingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MemoryProvider {
    ring: Arc<Mutex<Ring>>,
}

impl MemoryProvider {
    /// Create a provider retaining at most `capacity` records
    ///
    /// # Errors
    ///
    /// Returns [`TracingError::InvalidConfiguration`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, TracingError> {
        if capacity == 0 {
            return Err(TracingError::invalid_config(
                "memory provider capacity must be non-zero",
            ));
        }
        Ok(Self {
            ring: Arc::new(Mutex::new(Ring {
                records: VecDeque::with_capacity(capacity),
                capacity,
                metrics: TracingMetrics::default(),
            })),
        })
    }

    /// Number of retained records
    pub fn len(&self) -> usize {
        self.ring.lock().records.len()
    }

    /// Returns true if no records are retained
    pub fn is_empty(&self) -> bool {
        self.ring.lock().records.is_empty()
    }

    /// Snapshot of all retained records, oldest first
    pub fn records(&self) -> Vec<TraceRecord> {
        self.ring.lock().records.iter().cloned().collect()
    }

    /// Snapshot of retained effect records, oldest first
    pub fn effect_events(&self) -> Vec<EffectTraceEvent> {
        self.ring
            .lock()
            .records
            .iter()
            .filter_map(|r| match r {
                TraceRecord::Effect(e) => Some(*e),
                _ => None,
            })
            .collect()
    }

    /// Snapshot of retained tick summaries, oldest first
    pub fn tick_events(&self) -> Vec<TickTraceEvent> {
        self.ring
            .lock()
            .records
            .iter()
            .filter_map(|r| match r {
                TraceRecord::Tick(e) => Some(*e),
                _ => None,
            })
            .collect()
    }

    /// Remove all retained records, keeping the metrics
    pub fn clear(&self) {
        self.ring.lock().records.clear();
    }

    /// Fail if any record has been evicted
    ///
    /// # Errors
    ///
    /// Returns [`TracingError::BufferOverflow`] with the number of lost records.
    pub fn ensure_no_drops(&self) -> Result<(), TracingError> {
        match self.ring.lock().metrics.events_dropped {
            0 => Ok(()),
            lost => Err(TracingError::BufferOverflow(lost)),
        }
    }
}

impl TracingProvider for MemoryProvider {
    fn initialize(&mut self) -> Result<(), TracingError> {
        let mut ring = self.ring.lock();
        ring.records.clear();
        ring.metrics.reset();
        Ok(())
    }

    fn emit_effect_event(&self, event: EffectTraceEvent) {
        let mut ring = self.ring.lock();
        ring.metrics.record_effect_event(&event);
        ring.push(TraceRecord::Effect(event));
    }

    fn emit_tick_event(&self, event: TickTraceEvent) {
        let mut ring = self.ring.lock();
        ring.metrics.record_tick_event();
        ring.push(TraceRecord::Tick(event));
    }

    fn emit_device_event(&self, event: DeviceTraceEvent) {
        let mut ring = self.ring.lock();
        ring.metrics.record_device_event(event.is_error());
        ring.push(TraceRecord::Device(event));
    }

    fn metrics(&self) -> TracingMetrics {
        self.ring.lock().metrics.clone()
    }

    fn shutdown(&mut self) {}
}
