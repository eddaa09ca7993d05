//! Port traits between the playback engine and hardware
//!
//! The worker only knows how to hand a [`DeviceOutput`] to something. What
//! that something does with it (an HID report, an `EV_FF` write, a test
//! recorder) lives behind [`OutputSink`].

use rumble_errors::TransportError;
use rumble_ffb::DeviceOutput;

/// Destination for motor levels
///
/// Called from the worker task once per tick. Implementations must not
/// block for long; a slow sink delays the next tick.
pub trait OutputSink: Send + 'static {
    /// Write motor levels to the hardware
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the device rejected the write or is
    /// gone. The worker logs it and keeps running.
    fn write_output(&mut self, output: DeviceOutput) -> Result<(), TransportError>;
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    fn write_output(&mut self, output: DeviceOutput) -> Result<(), TransportError> {
        (**self).write_output(output)
    }
}

/// Sink that discards every write
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl OutputSink for NullSink {
    fn write_output(&mut self, _output: DeviceOutput) -> Result<(), TransportError> {
        Ok(())
    }
}
