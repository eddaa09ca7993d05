//! Convenience re-exports for common test utilities.
//!
//! ```rust,ignore
//! use rumble_test_helpers::prelude::*;
//! ```

pub use crate::must::{must, must_err, must_some, must_with};

#[cfg(feature = "tracking")]
pub use crate::tracking::{AllocationGuard, AllocationReport, TrackingAllocator, track};

#[cfg(feature = "fixtures")]
pub use crate::fixtures::{
    all_descriptors, constant, convertible_descriptors, periodic, ramp, reference_rumble, rumble,
    unsupported_descriptors,
};

#[cfg(feature = "mock")]
pub use crate::mock::{FailingSink, RecordingSink};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
