//! Errors raised on the effect path: conversion, registry bookkeeping and
//! decoding of host effect records.
//!
//! These are expected traffic from an untrusted or buggy host subsystem, so
//! every variant is recoverable and local to the failing call.

use crate::common::ErrorSeverity;

/// Failure to normalize an effect descriptor.
///
/// # Examples
///
/// ```
/// use rumble_errors::{ConversionError, ErrorSeverity};
///
/// let err = ConversionError::UnsupportedEffectKind { kind: "spring" };
/// assert_eq!(err.to_string(), "Unsupported effect kind: spring");
/// assert_eq!(err.severity(), ErrorSeverity::Warning);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ConversionError {
    /// The effect kind has no rumble representation (physical-model effects)
    #[error("Unsupported effect kind: {kind}")]
    UnsupportedEffectKind {
        /// Name of the rejected kind
        kind: &'static str,
    },

    /// A magnitude in the descriptor lies outside the device's actuator range
    #[error("{field} magnitude {value} is outside the device range [{min}, {max}]")]
    InvalidMagnitudeRange {
        /// Descriptor field holding the value
        field: &'static str,
        /// The offending value
        value: i32,
        /// Smallest accepted magnitude
        min: u16,
        /// Largest accepted magnitude
        max: u16,
    },
}

impl ConversionError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ConversionError::UnsupportedEffectKind { .. } => ErrorSeverity::Warning,
            ConversionError::InvalidMagnitudeRange { .. } => ErrorSeverity::Error,
        }
    }

    /// Create an unsupported kind error.
    pub fn unsupported(kind: &'static str) -> Self {
        ConversionError::UnsupportedEffectKind { kind }
    }

    /// Create a magnitude range error.
    pub fn magnitude(field: &'static str, value: i32, min: u16, max: u16) -> Self {
        ConversionError::InvalidMagnitudeRange {
            field,
            value,
            min,
            max,
        }
    }
}

/// Registry and playback bookkeeping errors.
///
/// # Examples
///
/// ```
/// use rumble_errors::{ConversionError, RegistryError};
///
/// let err: RegistryError = ConversionError::unsupported("damper").into();
/// assert!(matches!(err, RegistryError::ConversionFailed(_)));
///
/// let err = RegistryError::UnknownEffectId(7);
/// assert_eq!(err.to_string(), "Unknown effect id 7");
/// assert_eq!(err.effect_id(), Some(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum RegistryError {
    /// The descriptor could not be normalized
    #[error("Effect conversion failed: {0}")]
    ConversionFailed(#[from] ConversionError),

    /// The registry already holds `capacity` effects
    #[error("Effect capacity exceeded: device holds at most {capacity} effects")]
    CapacityExceeded {
        /// Fixed capacity of the device
        capacity: usize,
    },

    /// No effect (or no playback) is registered under this id
    #[error("Unknown effect id {0}")]
    UnknownEffectId(u16),
}

impl RegistryError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RegistryError::ConversionFailed(e) => e.severity(),
            RegistryError::CapacityExceeded { .. } => ErrorSeverity::Error,
            RegistryError::UnknownEffectId(_) => ErrorSeverity::Warning,
        }
    }

    /// The effect id named by the error, if any.
    pub fn effect_id(&self) -> Option<u16> {
        match self {
            RegistryError::UnknownEffectId(id) => Some(*id),
            _ => None,
        }
    }

    /// Check if the host asked for something the device cannot hold.
    pub fn is_capacity(&self) -> bool {
        matches!(self, RegistryError::CapacityExceeded { .. })
    }
}

/// Errors decoding a raw host effect record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum DecodeError {
    /// The record is shorter than the fixed layout
    #[error("Truncated effect record: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Required length in bytes
        expected: usize,
        /// Received length in bytes
        actual: usize,
    },

    /// The effect type code is not part of the host effect model
    #[error("Unknown effect type code {0:#06x}")]
    UnknownEffectType(u16),

    /// The periodic waveform code is not part of the host effect model
    #[error("Unknown periodic waveform code {0:#06x}")]
    UnknownWaveform(u16),

    /// Effect ids assigned by the host must be non-negative
    #[error("Invalid effect id {0}")]
    InvalidEffectId(i16),
}

impl DecodeError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }
}
