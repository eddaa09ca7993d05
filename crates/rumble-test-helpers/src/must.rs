//! Unwrap helpers with good error messages.
//!
//! These replace `unwrap()` and `expect()` in test code, with
//! `#[track_caller]` so panics point at the call site.

use std::fmt::Debug;

/// Unwrap a `Result`, panicking with the error value on `Err`.
///
/// # Example
///
/// ```rust
/// use rumble_test_helpers::must;
///
/// let result: Result<i32, &str> = Ok(42);
/// assert_eq!(must(result), 42);
/// ```
///
/// # Panics
///
/// Panics if the result is `Err`.
#[track_caller]
pub fn must<T, E: Debug>(result: Result<T, E>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must: unexpected Err: {e:?}"),
    }
}

/// Unwrap an `Option`, panicking with `msg` if `None`.
///
/// # Example
///
/// ```rust
/// use rumble_test_helpers::must_some;
///
/// assert_eq!(must_some(Some(7), "expected a value"), 7);
/// ```
///
/// # Panics
///
/// Panics if the option is `None`.
#[track_caller]
pub fn must_some<T>(option: Option<T>, msg: &str) -> T {
    match option {
        Some(v) => v,
        None => panic!("must_some: {msg}"),
    }
}

/// Unwrap a `Result`, panicking with `context` and the error on `Err`.
///
/// # Example
///
/// ```rust
/// use rumble_test_helpers::must_with;
///
/// let result: Result<u16, String> = Ok(3);
/// assert_eq!(must_with(result, "uploading effect"), 3);
/// ```
///
/// # Panics
///
/// Panics if the result is `Err`.
#[track_caller]
pub fn must_with<T, E: Debug>(result: Result<T, E>, context: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must_with: {context}: {e:?}"),
    }
}

/// Unwrap the `Err` of a `Result`, panicking if it is `Ok`.
///
/// # Example
///
/// ```rust
/// use rumble_test_helpers::must_err;
///
/// let result: Result<(), &str> = Err("full");
/// assert_eq!(must_err(result), "full");
/// ```
///
/// # Panics
///
/// Panics if the result is `Ok`.
#[track_caller]
pub fn must_err<T: Debug, E>(result: Result<T, E>) -> E {
    match result {
        Ok(v) => panic!("must_err: unexpected Ok: {v:?}"),
        Err(e) => e,
    }
}
