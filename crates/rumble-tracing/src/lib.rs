//! Diagnostics for the rumble force-feedback effect engine
//!
//! Every state-changing call on a device is observable as an
//! [`EffectTraceEvent`] record `{operation, effect_id, outcome}`, and every
//! tick as a [`TickTraceEvent`]. Records are routed through a pluggable
//! [`TracingProvider`]:
//!
//! - [`LogProvider`]: forwards to `tracing` structured logs (the default)
//! - [`MemoryProvider`]: bounded in-memory ring for inspection and tests
//!
//! # Hot path
//!
//! [`EffectTraceEvent`] and [`TickTraceEvent`] are `Copy` and emitting them
//! never allocates. [`DeviceTraceEvent`] carries owned strings and is meant
//! for lifecycle events only.
//!
//! # Example
//!
//! ```
//! use rumble_tracing::{MemoryProvider, TracingManager, trace_effect};
//!
//! let provider = MemoryProvider::new(16)?;
//! let manager = TracingManager::with_provider(Box::new(provider.clone()));
//!
//! trace_effect!(manager, Upload, 3, Applied);
//! assert_eq!(provider.effect_events().len(), 1);
//! # Ok::<(), rumble_tracing::TracingError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod events;
pub mod log;
pub mod macros;
pub mod manager;
pub mod memory;
pub mod metrics;
pub mod prelude;
pub mod provider;

pub use error::TracingError;
pub use events::{
    DeviceTraceEvent, EffectOperation, EffectOutcome, EffectTraceEvent, TickTraceEvent,
    TraceCategory, TraceRecord,
};
pub use log::LogProvider;
pub use manager::TracingManager;
pub use memory::MemoryProvider;
pub use metrics::TracingMetrics;
pub use provider::TracingProvider;
