//! Tracing error types

use core::fmt;

/// Tracing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TracingError {
    /// Provider initialization failed
    #[error("Tracing provider initialization failed: {0}")]
    InitializationFailed(String),

    /// Buffer overflow
    #[error("Trace buffer overflow: {0} events lost")]
    BufferOverflow(u64),

    /// Invalid configuration
    #[error("Invalid tracing configuration: {0}")]
    InvalidConfiguration(String),
}

impl TracingError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            TracingError::BufferOverflow(_) => true,
            TracingError::InitializationFailed(_) => false,
            TracingError::InvalidConfiguration(_) => false,
        }
    }

    /// Create an initialization error with context
    pub fn init_failed(context: impl fmt::Display) -> Self {
        TracingError::InitializationFailed(context.to_string())
    }

    /// Create a configuration error with context
    pub fn invalid_config(context: impl fmt::Display) -> Self {
        TracingError::InvalidConfiguration(context.to_string())
    }
}
