//! Engine error types

use rumble_errors::{RegistryError, RumbleError};

/// Errors returned by a [`DeviceHandle`](crate::DeviceHandle)
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The worker has shut down or its task ended
    #[error("Device worker is closed")]
    WorkerClosed,

    /// The device rejected the request
    #[error(transparent)]
    Request(#[from] RegistryError),

    /// The device could not be opened
    #[error(transparent)]
    Setup(#[from] RumbleError),
}

impl EngineError {
    /// True if the worker is gone and further requests will fail
    pub fn is_closed(&self) -> bool {
        matches!(self, EngineError::WorkerClosed)
    }

    /// The registry error behind a rejected request
    pub fn registry_error(&self) -> Option<&RegistryError> {
        match self {
            EngineError::Request(err) => Some(err),
            _ => None,
        }
    }
}

/// Result alias for engine operations
pub type EngineResult<T = ()> = Result<T, EngineError>;
