//! Shared test utilities for the rumble workspace.
//!
//! # Modules
//!
//! - [`mod@must`] - Unwrap helpers with good error messages and `#[track_caller]`
//! - [`assertions`] - Assertion macros for level and factor comparisons
//! - [`tracking`] - Allocation tracking for tick-path tests
//! - [`fixtures`] - Effect descriptor fixtures
//! - [`mock`] - Output sinks that record or fail
//! - [`prelude`] - Convenience re-exports
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! rumble-test-helpers = { workspace = true }
//! ```
//!
//! ```rust,ignore
//! use rumble_test_helpers::prelude::*;
//! ```
//!
//! Tests that use [`track`] must install the allocator in their binary:
//!
//! ```rust,ignore
//! #[global_allocator]
//! static GLOBAL: rumble_test_helpers::tracking::TrackingAllocator =
//!     rumble_test_helpers::tracking::TrackingAllocator;
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::unwrap_used, clippy::panic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod assertions;
pub mod must;
pub mod prelude;

#[cfg(feature = "tracking")]
#[cfg_attr(docsrs, doc(cfg(feature = "tracking")))]
pub mod tracking;

#[cfg(all(test, feature = "tracking"))]
#[global_allocator]
static GLOBAL_TEST: tracking::TrackingAllocator = tracking::TrackingAllocator;

#[cfg(feature = "fixtures")]
#[cfg_attr(docsrs, doc(cfg(feature = "fixtures")))]
pub mod fixtures;

#[cfg(feature = "mock")]
#[cfg_attr(docsrs, doc(cfg(feature = "mock")))]
pub mod mock;

pub use must::*;

#[cfg(feature = "tracking")]
pub use tracking::track;
