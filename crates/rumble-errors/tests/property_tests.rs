//! Property-based tests for error composition and context preservation.

use rumble_errors::{
    ConversionError, ErrorCategory, ErrorContext, ErrorSeverity, RegistryError, ResultExt,
    RumbleError, ValidationError,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_error_severity_ordering(a in 0u8..=3, b in 0u8..=3) {
        let to_severity = |v: u8| match v {
            0 => ErrorSeverity::Info,
            1 => ErrorSeverity::Warning,
            2 => ErrorSeverity::Error,
            _ => ErrorSeverity::Critical,
        };

        prop_assert_eq!(a.cmp(&b), to_severity(a).cmp(&to_severity(b)));
    }

    #[test]
    fn test_unknown_id_preserved(id in any::<u16>()) {
        let err = RegistryError::UnknownEffectId(id);
        prop_assert_eq!(err.effect_id(), Some(id));
        prop_assert!(err.to_string().contains(&id.to_string()));

        let wrapped: RumbleError = err.into();
        prop_assert_eq!(wrapped.category(), ErrorCategory::Registry);
        prop_assert!(wrapped.is_recoverable());
    }

    #[test]
    fn test_magnitude_error_mentions_value(value in any::<i16>(), max in 1u16..) {
        let err = ConversionError::magnitude("level", i32::from(value), 0, max);
        let msg = err.to_string();
        prop_assert!(msg.contains(&value.to_string()));
        prop_assert!(msg.contains(&max.to_string()));
    }

    #[test]
    fn test_error_context_preserves_operation(operation in "[a-z_]{1,24}") {
        let ctx = ErrorContext::new(&operation);
        prop_assert!(ctx.to_string().contains(&operation));
    }

    #[test]
    fn test_with_context_keeps_source_message(capacity in 1usize..=256) {
        let result: Result<(), RegistryError> = Err(RegistryError::CapacityExceeded { capacity });
        let err = match result.with_context("upload") {
            Err(err) => err,
            Ok(()) => return Err(TestCaseError::fail("context swallowed the error")),
        };
        let msg = err.to_string();
        prop_assert!(msg.contains("upload"));
        prop_assert!(msg.contains(&capacity.to_string()));
    }

    #[test]
    fn test_validation_range_message(field in "[a-z_]{1,16}", value in any::<u32>()) {
        let err = ValidationError::out_of_range(&field, value, 1, 1000);
        prop_assert!(err.to_string().contains(&field));
        prop_assert!(err.to_string().contains(&value.to_string()));
    }
}
