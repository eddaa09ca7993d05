//! Playback state machine and per-tick output aggregation
//!
//! Each playing effect owns one [`PlaybackState`]. A tick advances every
//! state by the caller's delta, retires finished effects, evaluates the rest
//! and folds them into a single [`DeviceOutput`].
//!
//! # Real-time safety
//!
//! [`PlaybackScheduler::tick`] performs no heap allocation: state and
//! completion buffers are reserved up front for the device capacity.

use core::fmt;

use rumble_errors::{EffectResult, RegistryError};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GAIN, MAX_LEVEL};
use crate::envelope::scale_at;
use crate::{EffectId, EffectRegistry, MagnitudeRange};

/// How concurrent effects combine per motor channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// Add contributions; the gain-scaled sum is clamped to the device range
    #[default]
    Sum,
    /// Strongest contribution wins
    Max,
}

impl AggregationPolicy {
    /// Lowercase name as used in configuration files
    pub const fn name(self) -> &'static str {
        match self {
            AggregationPolicy::Sum => "sum",
            AggregationPolicy::Max => "max",
        }
    }

    #[inline]
    fn combine(self, acc: f64, value: f64) -> f64 {
        match self {
            AggregationPolicy::Sum => acc + value,
            AggregationPolicy::Max => acc.max(value),
        }
    }
}

/// Motor levels published after each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DeviceOutput {
    /// High-frequency motor level
    pub weak_magnitude: u16,
    /// Low-frequency motor level
    pub strong_magnitude: u16,
}

impl DeviceOutput {
    /// Both motors off
    pub const ZERO: DeviceOutput = DeviceOutput {
        weak_magnitude: 0,
        strong_magnitude: 0,
    };

    /// Create an output
    pub const fn new(weak_magnitude: u16, strong_magnitude: u16) -> Self {
        Self {
            weak_magnitude,
            strong_magnitude,
        }
    }

    /// True if both motors are off
    pub const fn is_zero(&self) -> bool {
        self.weak_magnitude == 0 && self.strong_magnitude == 0
    }
}

impl fmt::Display for DeviceOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DeviceOutput(weak:{}, strong:{})",
            self.weak_magnitude, self.strong_magnitude
        )
    }
}

/// Progress of one playing effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    /// Effect being played
    pub effect_id: EffectId,
    /// Scheduler clock when the current pass started, in ms
    pub started_at: u64,
    /// Time into the active window in ms, negative while the delay runs
    pub elapsed: i64,
    /// Passes left including the current one
    pub remaining_plays: u32,
    /// Registry generation of the effect when playback started
    pub generation: u64,
}

/// Drives playback of registered effects
///
/// # Examples
///
/// ```
/// use rumble_ffb::{
///     DeviceOutput, EffectDescriptor, EffectId, EffectKind, EffectRegistry, PlaybackScheduler,
///     Replay,
/// };
///
/// let mut registry = EffectRegistry::new(4);
/// let mut scheduler = PlaybackScheduler::new(4);
/// let id = EffectId::new(0);
///
/// registry.upload(
///     id,
///     &EffectDescriptor::new(EffectKind::Rumble {
///         strong_magnitude: 200,
///         weak_magnitude: 100,
///     })
///     .with_replay(Replay::new(1000, 0)),
/// )?;
/// scheduler.play(id, &registry)?;
///
/// assert_eq!(scheduler.tick(500, &registry), DeviceOutput::new(100, 200));
/// assert_eq!(scheduler.tick(600, &registry), DeviceOutput::ZERO);
/// assert!(!scheduler.is_playing(id));
/// # Ok::<(), rumble_errors::RegistryError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PlaybackScheduler {
    states: Vec<PlaybackState>,
    completed: Vec<EffectId>,
    policy: AggregationPolicy,
    range: MagnitudeRange,
    gain: u16,
    clock_ms: u64,
    output: DeviceOutput,
    tick_count: u64,
}

impl PlaybackScheduler {
    /// Create a scheduler for up to `capacity` concurrently playing effects
    pub fn new(capacity: usize) -> Self {
        Self::with_policy(capacity, AggregationPolicy::default(), MagnitudeRange::default())
    }

    /// Create a scheduler with an explicit policy and output range
    pub fn with_policy(capacity: usize, policy: AggregationPolicy, range: MagnitudeRange) -> Self {
        Self {
            states: Vec::with_capacity(capacity),
            completed: Vec::with_capacity(capacity),
            policy,
            range,
            gain: DEFAULT_GAIN,
            clock_ms: 0,
            output: DeviceOutput::ZERO,
            tick_count: 0,
        }
    }

    /// Start `id` for a single pass, restarting it if already playing
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownEffectId`] if `id` is not registered.
    pub fn play(&mut self, id: EffectId, registry: &EffectRegistry) -> EffectResult {
        self.play_repeat(id, 1, registry)
    }

    /// Start `id` for `count` passes, restarting it if already playing
    ///
    /// A count of zero stops the effect if it is playing.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownEffectId`] if `id` is not registered.
    pub fn play_repeat(&mut self, id: EffectId, count: u32, registry: &EffectRegistry) -> EffectResult {
        let (effect, generation) = registry
            .entry(id)
            .ok_or(RegistryError::UnknownEffectId(id.get()))?;

        if count == 0 {
            self.discard(id);
            return Ok(());
        }

        let state = PlaybackState {
            effect_id: id,
            started_at: self.clock_ms,
            elapsed: -i64::from(effect.delay),
            remaining_plays: count,
            generation,
        };

        match self.states.iter_mut().find(|s| s.effect_id == id) {
            Some(existing) => *existing = state,
            None => self.states.push(state),
        }
        Ok(())
    }

    /// Stop `id` immediately
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownEffectId`] if `id` is not playing.
    pub fn stop(&mut self, id: EffectId) -> EffectResult {
        if self.discard(id) {
            Ok(())
        } else {
            Err(RegistryError::UnknownEffectId(id.get()))
        }
    }

    /// Drop any playback of `id`, returning whether one existed
    pub fn discard(&mut self, id: EffectId) -> bool {
        match self.states.iter().position(|s| s.effect_id == id) {
            Some(index) => {
                self.states.swap_remove(index);
                true
            }
            None => false,
        }
    }

    /// Advance playback by `delta_ms` and publish the combined output
    pub fn tick(&mut self, delta_ms: u32, registry: &EffectRegistry) -> DeviceOutput {
        let delta = i64::from(delta_ms);
        self.clock_ms = self.clock_ms.saturating_add(u64::from(delta_ms));
        self.tick_count = self.tick_count.saturating_add(1);
        self.completed.clear();

        let mut weak = 0.0_f64;
        let mut strong = 0.0_f64;
        let mut contributing = false;

        let mut index = 0;
        while let Some(state) = self.states.get_mut(index) {
            let effect = match registry.entry(state.effect_id) {
                Some((effect, generation)) if generation == state.generation => effect,
                // erased, or erased and uploaded again
                _ => {
                    self.states.swap_remove(index);
                    continue;
                }
            };

            state.elapsed = state.elapsed.saturating_add(delta);

            let length = i64::from(effect.length);
            if length > 0 && state.elapsed >= length {
                state.remaining_plays = state.remaining_plays.saturating_sub(1);
                if state.remaining_plays > 0 {
                    state.elapsed = -i64::from(effect.delay);
                    state.started_at = self.clock_ms;
                    index += 1;
                } else {
                    let id = state.effect_id;
                    self.states.swap_remove(index);
                    self.completed.push(id);
                }
                continue;
            }

            if let Ok(elapsed) = u64::try_from(state.elapsed) {
                let (w, s) = effect.levels_at(elapsed);
                let scale = scale_at(&effect.envelope, elapsed, effect.length);
                weak = self.policy.combine(weak, w * scale);
                strong = self.policy.combine(strong, s * scale);
                contributing = true;
            }
            index += 1;
        }

        self.output = if contributing {
            DeviceOutput {
                weak_magnitude: self.finish(weak),
                strong_magnitude: self.finish(strong),
            }
        } else {
            DeviceOutput::ZERO
        };
        self.output
    }

    /// Scale by gain, then bound to the device range; a channel that rounds
    /// to zero stays off
    fn finish(&self, level: f64) -> u16 {
        let scaled = (level * f64::from(self.gain) / f64::from(MAX_LEVEL)).round();
        if scaled < 1.0 {
            return 0;
        }
        to_level(self.range.clamp(scaled))
    }

    /// Output published by the last tick
    pub fn output(&self) -> DeviceOutput {
        self.output
    }

    /// True if `id` has a playback state
    pub fn is_playing(&self, id: EffectId) -> bool {
        self.states.iter().any(|s| s.effect_id == id)
    }

    /// Playback state of `id`
    pub fn state(&self, id: EffectId) -> Option<&PlaybackState> {
        self.states.iter().find(|s| s.effect_id == id)
    }

    /// Number of playback states, including those still in their delay
    pub fn playing_count(&self) -> usize {
        self.states.len()
    }

    /// Effects that finished their last pass during the most recent tick
    pub fn last_completed(&self) -> &[EffectId] {
        &self.completed
    }

    /// Stop everything and publish silence
    pub fn clear(&mut self) {
        self.states.clear();
        self.completed.clear();
        self.output = DeviceOutput::ZERO;
    }

    /// Set the device gain, full scale `0xFFFF`
    pub fn set_gain(&mut self, gain: u16) {
        self.gain = gain;
    }

    /// Current device gain
    pub fn gain(&self) -> u16 {
        self.gain
    }

    /// Current aggregation policy
    pub fn policy(&self) -> AggregationPolicy {
        self.policy
    }

    /// Change the aggregation policy
    pub fn set_policy(&mut self, policy: AggregationPolicy) {
        self.policy = policy;
    }

    /// Number of ticks processed
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Sum of all tick deltas in ms
    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }
}

#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    reason = "value is clamped to 0..=u16::MAX before the cast"
)]
#[inline]
fn to_level(value: f64) -> u16 {
    value.round().clamp(0.0, f64::from(u16::MAX)) as u16
}
