//! Force-feedback effect engine for dual-motor rumble devices
//!
//! Hosts speak the Linux input force-feedback model: they upload effect
//! descriptors under ids, then play, stop and erase them. Rumble hardware
//! only has two motors, so this crate reduces every supported descriptor to
//! start/end levels for the weak and strong motor, keeps them in a
//! fixed-capacity registry and mixes whatever is playing into one
//! [`DeviceOutput`] per tick.
//!
//! - [`descriptor`]: the host effect model
//! - [`convert`]: descriptor to [`NormalizedEffect`] normalization
//! - [`envelope`]: attack/fade evaluation
//! - [`registry`] and [`scheduler`]: storage and playback
//! - [`device`]: one device session with logging and diagnostics
//! - [`config`]: YAML/JSON device configuration
//! - [`wire`]: binary `ff_effect` records and `EV_FF` events
//!
//! # Example
//!
//! ```
//! use rumble_ffb::{
//!     DeviceConfig, DeviceOutput, EffectDescriptor, EffectId, EffectKind, ForceFeedbackDevice,
//!     Replay,
//! };
//!
//! let mut device = ForceFeedbackDevice::from_config("pad0", &DeviceConfig::default())?;
//! let id = EffectId::new(0);
//!
//! device.upload(
//!     id,
//!     &EffectDescriptor::new(EffectKind::Rumble {
//!         strong_magnitude: 200,
//!         weak_magnitude: 100,
//!     })
//!     .with_replay(Replay::new(1000, 0)),
//! )?;
//! device.play(id)?;
//!
//! assert_eq!(device.tick(500), DeviceOutput::new(100, 200));
//! assert_eq!(device.tick(600), DeviceOutput::ZERO);
//! # Ok::<(), rumble_errors::RumbleError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod config;
pub mod constants;
pub mod convert;
pub mod descriptor;
pub mod device;
pub mod envelope;
pub mod normalized;
pub mod registry;
pub mod scheduler;
pub mod wire;

pub use config::{DeviceConfig, MagnitudeRange};
pub use convert::{EffectConverter, convert};
pub use descriptor::{
    Condition, EffectDescriptor, EffectId, EffectKind, Envelope, Replay, Trigger, Waveform,
};
pub use device::{FfRequest, ForceFeedbackDevice, SharedDevice};
pub use normalized::NormalizedEffect;
pub use registry::EffectRegistry;
pub use scheduler::{AggregationPolicy, DeviceOutput, PlaybackScheduler, PlaybackState};
pub use wire::{decode_effect, decode_ff_effect, decode_ff_event, encode_ff_effect};
