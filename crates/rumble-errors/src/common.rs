//! Top-level error type, classification and context helpers.
//!
//! [`RumbleError`] wraps every sub-error so hosts can propagate with `?` and
//! still classify failures by [`ErrorCategory`] and [`ErrorSeverity`].

use core::fmt;

use crate::{ConversionError, DecodeError, RegistryError, TransportError, ValidationError};

/// Top-level error type that can wrap all rumble sub-errors.
#[derive(Debug, thiserror::Error)]
pub enum RumbleError {
    /// Descriptor normalization errors
    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// Registry and playback errors
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Wire record decoding errors
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Output transport errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl RumbleError {
    /// Get the error category for classification.
    pub fn category(&self) -> ErrorCategory {
        match self {
            RumbleError::Conversion(_) => ErrorCategory::Conversion,
            RumbleError::Registry(_) => ErrorCategory::Registry,
            RumbleError::Decode(_) => ErrorCategory::Decode,
            RumbleError::Transport(_) => ErrorCategory::Transport,
            RumbleError::Validation(_) => ErrorCategory::Validation,
            RumbleError::Io(_) => ErrorCategory::IO,
            RumbleError::Config(_) => ErrorCategory::Config,
            RumbleError::Other(_) => ErrorCategory::Other,
        }
    }

    /// Get the error severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RumbleError::Conversion(e) => e.severity(),
            RumbleError::Registry(e) => e.severity(),
            RumbleError::Decode(e) => e.severity(),
            RumbleError::Transport(e) => e.severity(),
            RumbleError::Validation(e) => e.severity(),
            RumbleError::Io(_) => ErrorSeverity::Error,
            RumbleError::Config(_) => ErrorSeverity::Error,
            RumbleError::Other(_) => ErrorSeverity::Error,
        }
    }

    /// Check if this error is recoverable.
    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::Critical
    }

    /// Create a configuration error with a message.
    pub fn config(msg: impl Into<String>) -> Self {
        RumbleError::Config(msg.into())
    }

    /// Create a generic error with a message.
    pub fn other(msg: impl Into<String>) -> Self {
        RumbleError::Other(msg.into())
    }
}

impl From<std::io::Error> for RumbleError {
    fn from(e: std::io::Error) -> Self {
        RumbleError::Io(e)
    }
}

/// Error category for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Descriptor normalization errors
    Conversion = 0,
    /// Registry and playback errors
    Registry = 1,
    /// Wire record decoding errors
    Decode = 2,
    /// Output transport errors
    Transport = 3,
    /// Configuration errors
    Config = 4,
    /// I/O errors
    IO = 5,
    /// Validation errors
    Validation = 6,
    /// Other errors
    Other = 255,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Conversion => write!(f, "Conversion"),
            ErrorCategory::Registry => write!(f, "Registry"),
            ErrorCategory::Decode => write!(f, "Decode"),
            ErrorCategory::Transport => write!(f, "Transport"),
            ErrorCategory::Config => write!(f, "Config"),
            ErrorCategory::IO => write!(f, "IO"),
            ErrorCategory::Validation => write!(f, "Validation"),
            ErrorCategory::Other => write!(f, "Other"),
        }
    }
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Informational, no action required
    Info = 0,
    /// Warning, the request was ignored
    Warning = 1,
    /// Error, the request was rejected
    Error = 2,
    /// Critical, the device link is unusable
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Context information for errors.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// The operation that was being performed
    pub operation: String,
    /// Additional context key-value pairs
    pub context: Vec<(String, String)>,
    /// Source location (file:line)
    pub location: Option<String>,
}

impl ErrorContext {
    /// Create a new error context for an operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            context: Vec::new(),
            location: None,
        }
    }

    /// Add a context key-value pair.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Set the source location.
    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.location = Some(format!("{}:{}", file.into(), line));
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operation: {}", self.operation)?;
        for (key, value) in &self.context {
            write!(f, ", {key}: {value}")?;
        }
        if let Some(ref loc) = self.location {
            write!(f, " at {loc}")?;
        }
        Ok(())
    }
}

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, ctx: ErrorContext) -> Result<T, RumbleError>;

    /// Add context with an operation name.
    fn with_context(self, operation: impl Into<String>) -> Result<T, RumbleError>;
}

impl<T, E: Into<RumbleError>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, ctx: ErrorContext) -> Result<T, RumbleError> {
        self.map_err(|e| {
            let err: RumbleError = e.into();
            RumbleError::Other(format!("{ctx}: {err}"))
        })
    }

    fn with_context(self, operation: impl Into<String>) -> Result<T, RumbleError> {
        self.context(ErrorContext::new(operation))
    }
}
