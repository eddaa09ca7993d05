//! Output sinks for worker tests.

use std::sync::Arc;

use parking_lot::Mutex;
use rumble_engine::OutputSink;
use rumble_errors::TransportError;
use rumble_ffb::DeviceOutput;

/// Sink that keeps every output it is given
///
/// Clones share the same log, so a test can keep one clone while the worker
/// owns the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    outputs: Arc<Mutex<Vec<DeviceOutput>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outputs(&self) -> Vec<DeviceOutput> {
        self.outputs.lock().clone()
    }

    pub fn last(&self) -> Option<DeviceOutput> {
        self.outputs.lock().last().copied()
    }

    pub fn len(&self) -> usize {
        self.outputs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.lock().is_empty()
    }

    /// True if any write had a non-zero motor level
    pub fn saw_activity(&self) -> bool {
        self.outputs.lock().iter().any(|o| !o.is_zero())
    }
}

impl OutputSink for RecordingSink {
    fn write_output(&mut self, output: DeviceOutput) -> Result<(), TransportError> {
        self.outputs.lock().push(output);
        Ok(())
    }
}

/// Sink whose writes fail, optionally only after some successes
#[derive(Debug, Clone)]
pub struct FailingSink {
    device: String,
    succeed_first: usize,
    attempts: Arc<Mutex<usize>>,
}

impl FailingSink {
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            succeed_first: 0,
            attempts: Arc::new(Mutex::new(0)),
        }
    }

    /// Let the first `count` writes succeed
    pub fn after(mut self, count: usize) -> Self {
        self.succeed_first = count;
        self
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock()
    }
}

impl OutputSink for FailingSink {
    fn write_output(&mut self, _output: DeviceOutput) -> Result<(), TransportError> {
        let mut attempts = self.attempts.lock();
        *attempts = attempts.saturating_add(1);
        if *attempts <= self.succeed_first {
            return Ok(());
        }
        Err(TransportError::write_failed(self.device.clone(), "broken pipe"))
    }
}
