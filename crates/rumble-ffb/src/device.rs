//! One force-feedback device session
//!
//! [`ForceFeedbackDevice`] owns the registry, the scheduler and a tracer and
//! is the single sequential authority for its effects. Every state-changing
//! call is logged and emitted as an [`EffectTraceEvent`]. [`SharedDevice`]
//! puts one behind a mutex for callers on several threads.

use std::sync::Arc;

use parking_lot::Mutex;
use rumble_errors::{EffectResult, RegistryError, RumbleError};
use rumble_tracing::{
    DeviceTraceEvent, EffectOperation, EffectTraceEvent, TracingManager, trace_effect,
    trace_tick,
};
use tracing::{debug, info, warn};

use crate::{
    DeviceConfig, DeviceOutput, EffectConverter, EffectDescriptor, EffectId, EffectRegistry,
    PlaybackScheduler,
};

/// A host request addressed to one device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfRequest {
    /// Store or replace an effect
    Upload {
        /// Host-assigned id
        id: EffectId,
        /// Effect to store
        descriptor: EffectDescriptor,
    },
    /// Remove an effect
    Erase {
        /// Effect to remove
        id: EffectId,
    },
    /// Start an effect for `count` passes; zero stops it
    Play {
        /// Effect to start
        id: EffectId,
        /// Number of passes
        count: u32,
    },
    /// Stop an effect
    Stop {
        /// Effect to stop
        id: EffectId,
    },
    /// Change the device gain
    SetGain {
        /// New gain, full scale `0xFFFF`
        gain: u16,
    },
}

impl FfRequest {
    /// The effect id named by the request, if any
    pub const fn effect_id(&self) -> Option<EffectId> {
        match self {
            FfRequest::Upload { id, .. }
            | FfRequest::Erase { id }
            | FfRequest::Play { id, .. }
            | FfRequest::Stop { id } => Some(*id),
            FfRequest::SetGain { .. } => None,
        }
    }
}

/// Registry, scheduler and diagnostics for one device
///
/// # Examples
///
/// ```
/// use rumble_ffb::{
///     DeviceConfig, DeviceOutput, EffectDescriptor, EffectId, EffectKind,
///     ForceFeedbackDevice, Replay,
/// };
///
/// let mut device = ForceFeedbackDevice::from_config("pad0", &DeviceConfig::default())?;
/// let id = EffectId::new(0);
/// device.upload(
///     id,
///     &EffectDescriptor::new(EffectKind::Rumble {
///         strong_magnitude: 200,
///         weak_magnitude: 100,
///     })
///     .with_replay(Replay::new(1000, 0)),
/// )?;
/// device.play(id)?;
///
/// assert_eq!(device.tick(500), DeviceOutput::new(100, 200));
/// assert_eq!(device.strong_magnitude(), 200);
/// # Ok::<(), rumble_errors::RumbleError>(())
/// ```
#[derive(Debug)]
pub struct ForceFeedbackDevice {
    name: String,
    registry: EffectRegistry,
    scheduler: PlaybackScheduler,
    tracer: TracingManager,
}

impl ForceFeedbackDevice {
    /// Open a device logging through the default tracer
    ///
    /// # Errors
    ///
    /// Returns [`RumbleError::Validation`] if `config` is invalid.
    pub fn from_config(name: impl Into<String>, config: &DeviceConfig) -> Result<Self, RumbleError> {
        Self::with_tracer(name, config, TracingManager::new())
    }

    /// Open a device emitting diagnostics through `tracer`
    ///
    /// # Errors
    ///
    /// Returns [`RumbleError::Validation`] if `config` is invalid.
    pub fn with_tracer(
        name: impl Into<String>,
        config: &DeviceConfig,
        tracer: TracingManager,
    ) -> Result<Self, RumbleError> {
        config.validate()?;

        let name = name.into();
        let registry = EffectRegistry::with_converter(
            config.max_effects,
            EffectConverter::new(config.magnitude),
        );
        let mut scheduler =
            PlaybackScheduler::with_policy(config.max_effects, config.aggregation, config.magnitude);
        scheduler.set_gain(config.gain);

        info!(device = %name, config = %config.summary(), "force-feedback device opened");
        tracer.emit_device_event(DeviceTraceEvent::DeviceOpened {
            device_id: name.clone(),
            max_effects: config.max_effects,
        });
        tracer.emit_device_event(DeviceTraceEvent::ConfigApplied {
            device_id: name.clone(),
            summary: config.summary(),
        });

        Ok(Self {
            name,
            registry,
            scheduler,
            tracer,
        })
    }

    /// Store or replace an effect
    ///
    /// # Errors
    ///
    /// See [`EffectRegistry::upload`].
    pub fn upload(&mut self, id: EffectId, descriptor: &EffectDescriptor) -> EffectResult {
        let replacing = self.registry.contains(id);
        match self.registry.upload(id, descriptor) {
            Ok(()) => {
                debug!(device = %self.name, %id, effect = %descriptor, replacing, "effect uploaded");
                if replacing {
                    trace_effect!(self.tracer, Upload, id.get(), Replaced);
                } else {
                    trace_effect!(self.tracer, Upload, id.get(), Applied);
                }
                Ok(())
            }
            Err(err) => self.reject(EffectOperation::Upload, id, err),
        }
    }

    /// Remove an effect and any playback of it
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownEffectId`] if `id` was never uploaded.
    pub fn erase(&mut self, id: EffectId) -> EffectResult {
        match self.registry.erase(id) {
            Ok(()) => {
                let was_playing = self.scheduler.discard(id);
                debug!(device = %self.name, %id, was_playing, "effect erased");
                trace_effect!(self.tracer, Erase, id.get(), Applied);
                Ok(())
            }
            Err(err) => self.reject(EffectOperation::Erase, id, err),
        }
    }

    /// Start an effect for one pass
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownEffectId`] if `id` is not uploaded.
    pub fn play(&mut self, id: EffectId) -> EffectResult {
        self.play_repeat(id, 1)
    }

    /// Start an effect for `count` passes; zero stops it
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownEffectId`] if `id` is not uploaded.
    pub fn play_repeat(&mut self, id: EffectId, count: u32) -> EffectResult {
        match self.scheduler.play_repeat(id, count, &self.registry) {
            Ok(()) => {
                debug!(device = %self.name, %id, count, "effect playing");
                trace_effect!(self.tracer, Play, id.get(), Applied);
                Ok(())
            }
            Err(err) => self.reject(EffectOperation::Play, id, err),
        }
    }

    /// Stop an effect
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownEffectId`] if `id` is not playing.
    pub fn stop(&mut self, id: EffectId) -> EffectResult {
        match self.scheduler.stop(id) {
            Ok(()) => {
                debug!(device = %self.name, %id, "effect stopped");
                trace_effect!(self.tracer, Stop, id.get(), Applied);
                Ok(())
            }
            Err(err) => self.reject(EffectOperation::Stop, id, err),
        }
    }

    /// Change the device gain, full scale `0xFFFF`
    pub fn set_gain(&mut self, gain: u16) {
        debug!(device = %self.name, gain, "gain changed");
        self.scheduler.set_gain(gain);
    }

    /// Apply a host request
    ///
    /// # Errors
    ///
    /// Returns whatever the addressed operation returns.
    pub fn handle(&mut self, request: FfRequest) -> EffectResult {
        match request {
            FfRequest::Upload { id, descriptor } => self.upload(id, &descriptor),
            FfRequest::Erase { id } => self.erase(id),
            FfRequest::Play { id, count } => self.play_repeat(id, count),
            FfRequest::Stop { id } => self.stop(id),
            FfRequest::SetGain { gain } => {
                self.set_gain(gain);
                Ok(())
            }
        }
    }

    /// Advance playback by `delta_ms` and return the new output
    ///
    /// Does not allocate.
    pub fn tick(&mut self, delta_ms: u32) -> DeviceOutput {
        let output = self.scheduler.tick(delta_ms, &self.registry);

        for &id in self.scheduler.last_completed() {
            trace_effect!(self.tracer, Complete, id.get(), Applied);
        }
        trace_tick!(
            self.tracer,
            self.scheduler.tick_count(),
            u32::try_from(self.scheduler.playing_count()).unwrap_or(u32::MAX),
            output.weak_magnitude,
            output.strong_magnitude
        );
        output
    }

    /// Stop all playback, forget all effects and emit a close event
    pub fn close(&mut self, reason: &str) {
        self.scheduler.clear();
        self.registry.clear();
        info!(device = %self.name, reason, "force-feedback device closed");
        self.tracer.emit_device_event(DeviceTraceEvent::DeviceClosed {
            device_id: self.name.clone(),
            reason: reason.to_string(),
        });
    }

    fn reject(&self, operation: EffectOperation, id: EffectId, err: RegistryError) -> EffectResult {
        warn!(device = %self.name, %id, operation = operation.as_str(), error = %err, "request rejected");
        self.tracer
            .emit_effect_event(EffectTraceEvent::rejected(operation, id.get(), &err));
        Err(err)
    }

    /// Output published by the last tick
    pub fn output(&self) -> DeviceOutput {
        self.scheduler.output()
    }

    /// Weak motor level of the last tick
    pub fn weak_magnitude(&self) -> u16 {
        self.scheduler.output().weak_magnitude
    }

    /// Strong motor level of the last tick
    pub fn strong_magnitude(&self) -> u16 {
        self.scheduler.output().strong_magnitude
    }

    /// Registry capacity
    pub fn max_effects(&self) -> usize {
        self.registry.capacity()
    }

    /// Device name used in logs and trace events
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Uploaded effects
    pub fn registry(&self) -> &EffectRegistry {
        &self.registry
    }

    /// Playback state
    pub fn scheduler(&self) -> &PlaybackScheduler {
        &self.scheduler
    }

    /// Diagnostics sink
    pub fn tracer(&self) -> &TracingManager {
        &self.tracer
    }
}

/// A device shared between threads
///
/// Each call takes the device lock for its duration, so operations on one
/// device are serialized.
#[derive(Debug, Clone)]
pub struct SharedDevice {
    inner: Arc<Mutex<ForceFeedbackDevice>>,
}

impl SharedDevice {
    /// Share `device`
    pub fn new(device: ForceFeedbackDevice) -> Self {
        Self {
            inner: Arc::new(Mutex::new(device)),
        }
    }

    /// See [`ForceFeedbackDevice::upload`]
    ///
    /// # Errors
    ///
    /// See [`EffectRegistry::upload`].
    pub fn upload(&self, id: EffectId, descriptor: &EffectDescriptor) -> EffectResult {
        self.inner.lock().upload(id, descriptor)
    }

    /// See [`ForceFeedbackDevice::erase`]
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownEffectId`] if `id` was never uploaded.
    pub fn erase(&self, id: EffectId) -> EffectResult {
        self.inner.lock().erase(id)
    }

    /// See [`ForceFeedbackDevice::play`]
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownEffectId`] if `id` is not uploaded.
    pub fn play(&self, id: EffectId) -> EffectResult {
        self.inner.lock().play(id)
    }

    /// See [`ForceFeedbackDevice::stop`]
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownEffectId`] if `id` is not playing.
    pub fn stop(&self, id: EffectId) -> EffectResult {
        self.inner.lock().stop(id)
    }

    /// See [`ForceFeedbackDevice::handle`]
    ///
    /// # Errors
    ///
    /// Returns whatever the addressed operation returns.
    pub fn handle(&self, request: FfRequest) -> EffectResult {
        self.inner.lock().handle(request)
    }

    /// See [`ForceFeedbackDevice::tick`]
    pub fn tick(&self, delta_ms: u32) -> DeviceOutput {
        self.inner.lock().tick(delta_ms)
    }

    /// Output published by the last tick
    pub fn output(&self) -> DeviceOutput {
        self.inner.lock().output()
    }

    /// Run `f` with exclusive access to the device
    pub fn with<R>(&self, f: impl FnOnce(&mut ForceFeedbackDevice) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
