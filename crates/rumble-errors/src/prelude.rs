//! Prelude module for convenient error handling imports.
//!
//! # Example
//!
//! ```
//! use rumble_errors::prelude::*;
//!
//! fn lookup(id: u16, known: &[u16]) -> EffectResult {
//!     if known.contains(&id) {
//!         Ok(())
//!     } else {
//!         Err(RegistryError::UnknownEffectId(id))
//!     }
//! }
//!
//! assert!(lookup(3, &[1, 2]).is_err());
//! ```

pub use crate::{
    EffectResult, Result,
    common::{ErrorCategory, ErrorContext, ErrorSeverity, ResultExt, RumbleError},
    device::TransportError,
    effect::{ConversionError, DecodeError, RegistryError},
    validation::ValidationError,
};

/// Macro for creating an error with context.
///
/// # Example
///
/// ```
/// use rumble_errors::error_context;
///
/// let ctx = error_context!("load_config", "path" => "pad.yaml");
/// assert!(ctx.to_string().contains("pad.yaml"));
/// ```
#[macro_export]
macro_rules! error_context {
    ($operation:expr, $($key:expr => $value:expr),* $(,)?) => {
        {
            let mut ctx = $crate::ErrorContext::new($operation);
            $(
                ctx = ctx.with($key, $value);
            )*
            ctx
        }
    };
}

/// Return early with `$error` unless `$condition` holds.
#[macro_export]
macro_rules! validate {
    ($condition:expr, $error:expr) => {
        if !$condition {
            return Err($error.into());
        }
    };
}

/// Return early with an out of range validation error.
#[macro_export]
macro_rules! validate_range {
    ($field:expr, $value:expr, $min:expr, $max:expr) => {
        if $value < $min || $value > $max {
            return Err($crate::ValidationError::out_of_range($field, $value, $min, $max).into());
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_context_macro() {
        let ctx = error_context!(
            "upload",
            "effect_id" => "3",
            "kind" => "rumble"
        );
        assert!(ctx.to_string().contains("upload"));
        assert!(ctx.to_string().contains("effect_id"));
    }

    #[test]
    fn test_validate_macro() {
        fn check() -> Result<()> {
            validate!(false, ValidationError::constraint("always fails"));
            Ok(())
        }
        assert!(matches!(check(), Err(RumbleError::Validation(_))));
    }

    #[test]
    fn test_validate_range_macro() {
        fn check(max_effects: usize) -> Result<()> {
            validate_range!("max_effects", max_effects, 1usize, 256usize);
            Ok(())
        }
        assert!(matches!(check(16), Ok(())));
        assert!(matches!(check(0), Err(RumbleError::Validation(_))));
        assert!(matches!(check(257), Err(RumbleError::Validation(_))));
    }
}
