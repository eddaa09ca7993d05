//! Host effect descriptors
//!
//! These mirror the Linux input force-feedback effect model: a tagged union
//! of effect kinds plus the replay, trigger and direction fields every effect
//! carries. Descriptors are immutable input; the converter turns the
//! supported subset into a [`NormalizedEffect`](crate::NormalizedEffect).

use core::fmt;

use rumble_errors::DecodeError;
use serde::{Deserialize, Serialize};

use crate::constants::{FF_SAW_DOWN, FF_SAW_UP, FF_SINE, FF_SQUARE, FF_TRIANGLE};

/// Effect id assigned by the host, unique among uploaded effects
///
/// # Examples
///
/// ```
/// use rumble_ffb::EffectId;
///
/// let id = EffectId::try_from_raw(3)?;
/// assert_eq!(id.get(), 3);
/// assert!(EffectId::try_from_raw(-1).is_err());
/// # Ok::<(), rumble_errors::DecodeError>(())
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EffectId(u16);

impl EffectId {
    /// Wrap a host id
    #[inline]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Convert the signed id field of a host record
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidEffectId`] for negative ids.
    pub fn try_from_raw(raw: i16) -> Result<Self, DecodeError> {
        u16::try_from(raw)
            .ok()
            .map(Self)
            .ok_or(DecodeError::InvalidEffectId(raw))
    }

    /// The numeric id
    #[inline]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl From<u16> for EffectId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl From<EffectId> for u16 {
    fn from(id: EffectId) -> Self {
        id.0
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Attack and fade shaping applied over an effect's active window
///
/// Lengths are milliseconds; levels are on the full `u16` scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Envelope {
    /// Duration of the attack ramp
    pub attack_length: u16,
    /// Level at the start of the attack
    pub attack_level: u16,
    /// Duration of the fade ramp
    pub fade_length: u16,
    /// Level at the end of the fade
    pub fade_level: u16,
}

impl Envelope {
    /// Envelope with no attack or fade
    pub const FLAT: Envelope = Envelope {
        attack_length: 0,
        attack_level: 0,
        fade_length: 0,
        fade_level: 0,
    };

    /// Create an envelope
    pub const fn new(attack_length: u16, attack_level: u16, fade_length: u16, fade_level: u16) -> Self {
        Self {
            attack_length,
            attack_level,
            fade_length,
            fade_level,
        }
    }

    /// True if neither attack nor fade shapes the output
    pub const fn is_flat(&self) -> bool {
        self.attack_length == 0 && self.fade_length == 0
    }
}

/// Playback timing: run `length` ms after waiting `delay` ms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Replay {
    /// Active duration; zero plays until stopped
    pub length: u16,
    /// Wait before the effect becomes active
    pub delay: u16,
}

impl Replay {
    /// Create a replay block
    pub const fn new(length: u16, delay: u16) -> Self {
        Self { length, delay }
    }
}

/// Button trigger for the effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Trigger {
    /// Trigger button code
    pub button: u16,
    /// Minimum interval between triggers
    pub interval: u16,
}

/// Periodic waveform shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    /// Square wave
    Square,
    /// Triangle wave
    Triangle,
    /// Sine wave
    #[default]
    Sine,
    /// Rising sawtooth
    SawUp,
    /// Falling sawtooth
    SawDown,
}

impl Waveform {
    /// The host waveform code
    pub const fn code(self) -> u16 {
        match self {
            Waveform::Square => FF_SQUARE,
            Waveform::Triangle => FF_TRIANGLE,
            Waveform::Sine => FF_SINE,
            Waveform::SawUp => FF_SAW_UP,
            Waveform::SawDown => FF_SAW_DOWN,
        }
    }

    /// Look up a waveform by host code
    ///
    /// `FF_CUSTOM` is not a waveform here; custom sample effects decode to
    /// [`EffectKind::Custom`].
    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            FF_SQUARE => Some(Waveform::Square),
            FF_TRIANGLE => Some(Waveform::Triangle),
            FF_SINE => Some(Waveform::Sine),
            FF_SAW_UP => Some(Waveform::SawUp),
            FF_SAW_DOWN => Some(Waveform::SawDown),
            _ => None,
        }
    }

    /// Lowercase name
    pub const fn name(self) -> &'static str {
        match self {
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
            Waveform::Sine => "sine",
            Waveform::SawUp => "saw_up",
            Waveform::SawDown => "saw_down",
        }
    }
}

/// Per-axis parameters of a condition (physical-model) effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    /// Maximum level when the axis is right of center
    pub right_saturation: u16,
    /// Maximum level when the axis is left of center
    pub left_saturation: u16,
    /// Slope right of center
    pub right_coeff: i16,
    /// Slope left of center
    pub left_coeff: i16,
    /// Size of the dead zone around center
    pub deadband: u16,
    /// Position of the dead zone
    pub center: i16,
}

/// Kind-specific effect payload
///
/// Only [`Constant`](EffectKind::Constant), [`Periodic`](EffectKind::Periodic),
/// [`Ramp`](EffectKind::Ramp) and [`Rumble`](EffectKind::Rumble) have a
/// dual-motor representation; the physical-model kinds and custom waveforms
/// are carried so they can be reported, then rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectKind {
    /// Constant force
    Constant {
        /// Force level
        level: i16,
        /// Output shaping
        #[serde(default)]
        envelope: Envelope,
    },
    /// Periodic waveform
    Periodic {
        /// Waveform shape
        #[serde(default)]
        waveform: Waveform,
        /// Period in ms
        #[serde(default)]
        period: u16,
        /// Peak level
        magnitude: i16,
        /// Mean value of the wave
        #[serde(default)]
        offset: i16,
        /// Horizontal shift
        #[serde(default)]
        phase: u16,
        /// Output shaping
        #[serde(default)]
        envelope: Envelope,
    },
    /// Linear ramp between two levels
    Ramp {
        /// Level at the beginning
        start_level: i16,
        /// Level at the end
        end_level: i16,
        /// Output shaping
        #[serde(default)]
        envelope: Envelope,
    },
    /// Spring condition
    Spring {
        /// Per-axis parameters
        #[serde(default)]
        conditions: [Condition; 2],
    },
    /// Friction condition
    Friction {
        /// Per-axis parameters
        #[serde(default)]
        conditions: [Condition; 2],
    },
    /// Damper condition
    Damper {
        /// Per-axis parameters
        #[serde(default)]
        conditions: [Condition; 2],
    },
    /// Dual-motor rumble
    Rumble {
        /// Heavy motor level
        strong_magnitude: u16,
        /// Light motor level
        weak_magnitude: u16,
    },
    /// Inertia condition
    Inertia {
        /// Per-axis parameters
        #[serde(default)]
        conditions: [Condition; 2],
    },
    /// Periodic effect with custom sample data
    Custom {
        /// Number of samples the host supplied
        #[serde(default)]
        sample_count: u32,
    },
}

impl EffectKind {
    /// Lowercase kind name used in errors and logs
    pub const fn name(&self) -> &'static str {
        match self {
            EffectKind::Constant { .. } => "constant",
            EffectKind::Periodic { .. } => "periodic",
            EffectKind::Ramp { .. } => "ramp",
            EffectKind::Spring { .. } => "spring",
            EffectKind::Friction { .. } => "friction",
            EffectKind::Damper { .. } => "damper",
            EffectKind::Rumble { .. } => "rumble",
            EffectKind::Inertia { .. } => "inertia",
            EffectKind::Custom { .. } => "custom",
        }
    }

    /// True for the kinds that convert to a rumble effect
    pub const fn is_convertible(&self) -> bool {
        matches!(
            self,
            EffectKind::Constant { .. }
                | EffectKind::Periodic { .. }
                | EffectKind::Ramp { .. }
                | EffectKind::Rumble { .. }
        )
    }

    /// The envelope carried by the payload, if the kind has one
    pub const fn envelope(&self) -> Option<Envelope> {
        match self {
            EffectKind::Constant { envelope, .. }
            | EffectKind::Periodic { envelope, .. }
            | EffectKind::Ramp { envelope, .. } => Some(*envelope),
            _ => None,
        }
    }
}

/// A complete host effect description
///
/// # Examples
///
/// ```
/// use rumble_ffb::{EffectDescriptor, EffectKind, Replay};
///
/// let rumble = EffectDescriptor::new(EffectKind::Rumble {
///     strong_magnitude: 200,
///     weak_magnitude: 100,
/// })
/// .with_replay(Replay::new(1000, 0));
///
/// assert_eq!(rumble.kind.name(), "rumble");
/// assert_eq!(rumble.replay.length, 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectDescriptor {
    /// Kind-specific payload
    pub kind: EffectKind,
    /// Direction of the force
    #[serde(default)]
    pub direction: u16,
    /// Timing
    #[serde(default)]
    pub replay: Replay,
    /// Button trigger
    #[serde(default)]
    pub trigger: Trigger,
}

impl EffectDescriptor {
    /// Create a descriptor with zero direction, replay and trigger
    pub const fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            direction: 0,
            replay: Replay {
                length: 0,
                delay: 0,
            },
            trigger: Trigger {
                button: 0,
                interval: 0,
            },
        }
    }

    /// Set the replay block
    pub const fn with_replay(mut self, replay: Replay) -> Self {
        self.replay = replay;
        self
    }

    /// Set the direction
    pub const fn with_direction(mut self, direction: u16) -> Self {
        self.direction = direction;
        self
    }

    /// Set the trigger
    pub const fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = trigger;
        self
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Envelope(attack_length:{}, attack_level:{}, fade_length:{}, fade_level:{})",
            self.attack_length, self.attack_level, self.fade_length, self.fade_level
        )
    }
}

impl fmt::Display for Replay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Replay(length:{}, delay:{})", self.length, self.delay)
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Trigger(button:{}, interval:{})", self.button, self.interval)
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectKind::Constant { level, envelope } => {
                write!(f, "FF_CONSTANT(level:{level}, envelope:{envelope})")
            }
            EffectKind::Periodic {
                waveform,
                period,
                magnitude,
                offset,
                phase,
                envelope,
            } => write!(
                f,
                "FF_PERIODIC(waveform:{}, period:{period}, magnitude:{magnitude}, offset:{offset}, phase:{phase}, envelope:{envelope})",
                waveform.name()
            ),
            EffectKind::Ramp {
                start_level,
                end_level,
                envelope,
            } => write!(
                f,
                "FF_RAMP(start_level:{start_level}, end_level:{end_level}, envelope:{envelope})"
            ),
            EffectKind::Spring { .. } => write!(f, "FF_SPRING()"),
            EffectKind::Friction { .. } => write!(f, "FF_FRICTION()"),
            EffectKind::Damper { .. } => write!(f, "FF_DAMPER()"),
            EffectKind::Rumble {
                strong_magnitude,
                weak_magnitude,
            } => write!(
                f,
                "FF_RUMBLE(strong_magnitude:{strong_magnitude}, weak_magnitude:{weak_magnitude})"
            ),
            EffectKind::Inertia { .. } => write!(f, "FF_INERTIA()"),
            EffectKind::Custom { .. } => write!(f, "FF_CUSTOM()"),
        }
    }
}

impl fmt::Display for EffectDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Effect({}, direction:{}, replay:{}, trigger:{})",
            self.kind, self.direction, self.replay, self.trigger
        )
    }
}
