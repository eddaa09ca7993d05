//! Envelope evaluation
//!
//! Pure functions: no state, no allocation, total over all inputs.

use crate::constants::MAX_LEVEL;
use crate::normalized::lerp;
use crate::Envelope;

/// Scaling factor of `envelope` at `elapsed` ms into an active window of
/// `total_length` ms
///
/// - During the attack (`elapsed < attack_length`) the factor rises linearly
///   from `attack_level / MAX_LEVEL` to 1.0.
/// - During the fade (`elapsed > total_length - fade_length`, finite effects
///   only) it falls linearly from 1.0 to `fade_level / MAX_LEVEL`.
/// - Otherwise it is 1.0.
///
/// The attack rule is checked first, so it wins where the windows overlap.
/// Boundaries are exact: `elapsed == attack_length` yields 1.0 and
/// `elapsed == total_length` yields the fade level.
///
/// # Examples
///
/// ```
/// use rumble_ffb::{Envelope, envelope::scale_at};
///
/// let envelope = Envelope::new(100, 0, 50, 0);
/// assert_eq!(scale_at(&envelope, 0, 200), 0.0);
/// assert_eq!(scale_at(&envelope, 100, 200), 1.0);
/// assert_eq!(scale_at(&envelope, 150, 200), 1.0);
/// assert_eq!(scale_at(&envelope, 200, 200), 0.0);
/// ```
pub fn scale_at(envelope: &Envelope, elapsed: u64, total_length: u16) -> f64 {
    let max_level = f64::from(MAX_LEVEL);

    let attack_length = u64::from(envelope.attack_length);
    if elapsed < attack_length {
        let t = elapsed as f64 / attack_length as f64;
        return lerp(f64::from(envelope.attack_level) / max_level, 1.0, t);
    }

    if total_length > 0 && envelope.fade_length > 0 {
        let total = i64::from(total_length);
        let fade_length = i64::from(envelope.fade_length);
        let fade_start = total - fade_length;
        let elapsed = i64::try_from(elapsed).unwrap_or(i64::MAX);
        if elapsed > fade_start {
            let t = ((elapsed - fade_start) as f64 / fade_length as f64).min(1.0);
            return lerp(1.0, f64::from(envelope.fade_level) / max_level, t);
        }
    }

    1.0
}
