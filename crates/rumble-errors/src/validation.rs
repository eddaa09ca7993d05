//! Configuration validation errors.

use core::fmt;

use crate::common::ErrorSeverity;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Value out of range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Field name
        field: String,
        /// The invalid value
        value: String,
        /// Minimum allowed value
        min: String,
        /// Maximum allowed value
        max: String,
    },

    /// Invalid format
    #[error("Invalid format for field '{field}': {reason}")]
    InvalidFormat {
        /// Field name
        field: String,
        /// Reason for the format error
        reason: String,
    },

    /// Constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl ValidationError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }

    /// Create an out of range error for a numeric value.
    pub fn out_of_range<T: fmt::Debug>(field: impl Into<String>, value: T, min: T, max: T) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            value: format!("{value:?}"),
            min: format!("{min:?}"),
            max: format!("{max:?}"),
        }
    }

    /// Create an invalid format error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a constraint violation error.
    pub fn constraint(msg: impl Into<String>) -> Self {
        ValidationError::ConstraintViolation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_out_of_range() {
        let err = ValidationError::out_of_range("max_effects", 0usize, 1, 256);
        assert_eq!(
            err.to_string(),
            "max_effects value 0 is out of range [1, 256]"
        );
    }

    #[test]
    fn test_validation_error_invalid_format() {
        let err = ValidationError::invalid_format("config", "expected a mapping");
        assert!(err.to_string().contains("expected a mapping"));
    }

    #[test]
    fn test_validation_error_severity() {
        assert_eq!(
            ValidationError::constraint("min > max").severity(),
            ErrorSeverity::Error
        );
    }

    #[test]
    fn test_validation_error_equality() {
        assert_eq!(
            ValidationError::constraint("a"),
            ValidationError::constraint("a")
        );
    }
}
