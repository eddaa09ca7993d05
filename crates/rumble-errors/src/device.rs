//! Output transport errors.
//!
//! Raised by the hardware sink that receives each tick's magnitudes. The
//! engine logs them and keeps ticking; the device session survives.

use crate::common::ErrorSeverity;

/// Errors writing device output to the actuator link.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The actuator link went away
    #[error("Device disconnected: {0}")]
    Disconnected(String),

    /// A single write failed
    #[error("Failed to write output to device {device}: {message}")]
    WriteFailed {
        /// Device identifier
        device: String,
        /// Error message
        message: String,
    },
}

impl TransportError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TransportError::Disconnected(_) => ErrorSeverity::Critical,
            TransportError::WriteFailed { .. } => ErrorSeverity::Warning,
        }
    }

    /// Create a disconnected error.
    pub fn disconnected(device: impl Into<String>) -> Self {
        TransportError::Disconnected(device.into())
    }

    /// Create a write failure error.
    pub fn write_failed(device: impl Into<String>, message: impl Into<String>) -> Self {
        TransportError::WriteFailed {
            device: device.into(),
            message: message.into(),
        }
    }

    /// Check if further writes are pointless.
    pub fn is_device_unavailable(&self) -> bool {
        matches!(self, TransportError::Disconnected(_))
    }
}
