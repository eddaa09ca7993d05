//! Error taxonomy for the rumble force-feedback effect engine
//!
//! Every failure the engine can report is local to the call that produced it:
//! a rejected upload, an unknown effect id, a malformed wire record. None of
//! them terminate a device session, so every type here is cheap to construct
//! and carries enough context to be logged and dropped.
//!
//! # Architecture
//!
//! - [`common`]: top-level [`RumbleError`], classification and context helpers
//! - [`effect`]: conversion, registry and wire-decoding errors on the effect path
//! - [`device`]: output transport errors reported by hardware sinks
//! - [`validation`]: configuration validation errors
//!
//! # Hot path
//!
//! [`ConversionError`] and [`RegistryError`] are `Copy`: reporting them from
//! the tick or upload path never allocates.
//!
//! # Example
//!
//! ```
//! use rumble_errors::prelude::*;
//!
//! fn check_gain(value: u32) -> Result<u16> {
//!     if value > u32::from(u16::MAX) {
//!         return Err(ValidationError::out_of_range("gain", value, 0, u32::from(u16::MAX)).into());
//!     }
//!     Ok(value as u16)
//! }
//!
//! assert!(check_gain(70_000).is_err());
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod common;
pub mod device;
pub mod effect;
pub mod prelude;
pub mod validation;

pub use common::{ErrorCategory, ErrorContext, ErrorSeverity, ResultExt, RumbleError};
pub use device::TransportError;
pub use effect::{ConversionError, DecodeError, RegistryError};
pub use validation::ValidationError;

/// A specialized `Result` type for rumble operations.
pub type Result<T> = std::result::Result<T, RumbleError>;

/// A specialized `Result` type for registry and playback operations.
pub type EffectResult<T = ()> = std::result::Result<T, RegistryError>;
