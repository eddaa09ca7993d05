//! Async driver for rumble force-feedback devices
//!
//! [`spawn_device_worker`] moves a [`ForceFeedbackDevice`](rumble_ffb::ForceFeedbackDevice)
//! onto a tokio task that owns it exclusively. The task applies queued host
//! requests, ticks playback on an interval and writes each
//! [`DeviceOutput`](rumble_ffb::DeviceOutput) to an [`OutputSink`]. Sink
//! failures are logged and traced but never stop the worker.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use rumble_engine::{NullSink, WorkerConfig, spawn_device_worker};
//! use rumble_ffb::{DeviceConfig, EffectDescriptor, EffectId, EffectKind, ForceFeedbackDevice};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let device = ForceFeedbackDevice::from_config("pad0", &DeviceConfig::default())?;
//! let (handle, worker) =
//!     spawn_device_worker(device, NullSink, WorkerConfig::new(Duration::from_millis(8)));
//!
//! let id = EffectId::new(0);
//! handle
//!     .upload(id, EffectDescriptor::new(EffectKind::Rumble {
//!         strong_magnitude: 200,
//!         weak_magnitude: 100,
//!     }))
//!     .await?;
//! handle.play(id).await?;
//!
//! handle.shutdown("example done").await?;
//! let summary = worker.await?;
//! assert_eq!(summary.requests, 2);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod error;
pub mod ports;
pub mod worker;

pub use error::{EngineError, EngineResult};
pub use ports::{NullSink, OutputSink};
pub use worker::{
    DEFAULT_QUEUE_DEPTH, DeviceHandle, DeviceWorker, TickClock, WorkerConfig, WorkerSummary,
    spawn_device_worker, spawn_from_config,
};
