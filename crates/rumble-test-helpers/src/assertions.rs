//! Assertion macros for floating-point levels.

/// Assert that two floating-point values are within `tolerance`.
///
/// # Example
///
/// ```rust
/// use rumble_test_helpers::assert_approx_eq;
///
/// assert_approx_eq!(0.5_f64, 0.5000001_f64, 1e-6);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr $(,)?) => {
        let left = $left;
        let right = $right;
        let tolerance = $tolerance;
        let diff = (left - right).abs();
        if diff > tolerance {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`,\n  tolerance: `{:?}`",
                left, right, diff, tolerance
            );
        }
    };
}

/// Assert that a value lies within an inclusive range.
///
/// # Example
///
/// ```rust
/// use rumble_test_helpers::assert_in_range;
///
/// assert_in_range!(0.25, 0.0, 1.0);
/// ```
#[macro_export]
macro_rules! assert_in_range {
    ($value:expr, $min:expr, $max:expr $(,)?) => {
        let value = $value;
        let min = $min;
        let max = $max;
        if value < min || value > max {
            panic!(
                "assertion failed: `{:?}` is outside `{:?}..={:?}`",
                value, min, max
            );
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_approx_eq_passes() {
        assert_approx_eq!(1.0_f64, 1.0001, 0.001);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_approx_eq_fails() {
        assert_approx_eq!(1.0_f64, 2.0, 0.5);
    }

    #[test]
    fn test_in_range() {
        assert_in_range!(5u16, 0, 10);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_out_of_range() {
        assert_in_range!(1.5_f64, 0.0, 1.0);
    }
}
