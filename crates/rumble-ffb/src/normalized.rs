//! Uniform dual-motor playback representation

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::Envelope;

/// An effect reduced to start and end levels for both motors
///
/// Produced by the converter, owned by the registry. Magnitudes are within
/// the device range the converter was configured with. A `length` of zero
/// plays until stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NormalizedEffect {
    /// Weak motor level at the start of the active window
    pub start_weak_magnitude: u16,
    /// Strong motor level at the start of the active window
    pub start_strong_magnitude: u16,
    /// Weak motor level at the end of the active window
    pub end_weak_magnitude: u16,
    /// Strong motor level at the end of the active window
    pub end_strong_magnitude: u16,
    /// Output shaping
    pub envelope: Envelope,
    /// Wait before the effect becomes active, in ms
    pub delay: u16,
    /// Active duration in ms, zero for indefinite
    pub length: u16,
}

impl NormalizedEffect {
    /// True if the effect plays until explicitly stopped
    #[inline]
    pub const fn is_indefinite(&self) -> bool {
        self.length == 0
    }

    /// Unshaped `(weak, strong)` levels at `elapsed` ms into the active window
    ///
    /// Indefinite effects hold their start levels.
    pub fn levels_at(&self, elapsed: u64) -> (f64, f64) {
        if self.length == 0 {
            return (
                f64::from(self.start_weak_magnitude),
                f64::from(self.start_strong_magnitude),
            );
        }
        let t = (elapsed as f64 / f64::from(self.length)).clamp(0.0, 1.0);
        (
            lerp(
                f64::from(self.start_weak_magnitude),
                f64::from(self.end_weak_magnitude),
                t,
            ),
            lerp(
                f64::from(self.start_strong_magnitude),
                f64::from(self.end_strong_magnitude),
                t,
            ),
        )
    }
}

/// Linear interpolation, exact at `t == 0` and `t == 1`
#[inline]
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

impl fmt::Display for NormalizedEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NormalizedEffect(weak:{}->{}, strong:{}->{}, envelope:{}, delay:{}, length:{})",
            self.start_weak_magnitude,
            self.end_weak_magnitude,
            self.start_strong_magnitude,
            self.end_strong_magnitude,
            self.envelope,
            self.delay,
            self.length
        )
    }
}
