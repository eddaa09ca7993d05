//! Effect model codes and device limits

/// Dual-motor rumble effect type code
pub const FF_RUMBLE: u16 = 0x50;
/// Periodic waveform effect type code
pub const FF_PERIODIC: u16 = 0x51;
/// Constant force effect type code
pub const FF_CONSTANT: u16 = 0x52;
/// Spring condition effect type code
pub const FF_SPRING: u16 = 0x53;
/// Friction condition effect type code
pub const FF_FRICTION: u16 = 0x54;
/// Damper condition effect type code
pub const FF_DAMPER: u16 = 0x55;
/// Inertia condition effect type code
pub const FF_INERTIA: u16 = 0x56;
/// Ramp effect type code
pub const FF_RAMP: u16 = 0x57;

/// Square waveform code
pub const FF_SQUARE: u16 = 0x58;
/// Triangle waveform code
pub const FF_TRIANGLE: u16 = 0x59;
/// Sine waveform code
pub const FF_SINE: u16 = 0x5a;
/// Rising sawtooth waveform code
pub const FF_SAW_UP: u16 = 0x5b;
/// Falling sawtooth waveform code
pub const FF_SAW_DOWN: u16 = 0x5c;
/// Custom sample waveform code
pub const FF_CUSTOM: u16 = 0x5d;

/// Device gain event code
pub const FF_GAIN: u16 = 0x60;
/// Autocenter event code
pub const FF_AUTOCENTER: u16 = 0x61;

/// Size of one `ff_effect` record on 64-bit hosts
pub const FF_EFFECT_SIZE: usize = 48;

/// Full scale of envelope levels
pub const MAX_LEVEL: u16 = u16::MAX;

/// Effects a device holds unless configured otherwise
pub const DEFAULT_MAX_EFFECTS: usize = 16;

/// Upper bound for a configured registry capacity
pub const MAX_EFFECTS_LIMIT: usize = 256;

/// Full device gain
pub const DEFAULT_GAIN: u16 = u16::MAX;

/// Tick period unless configured otherwise
pub const DEFAULT_TICK_PERIOD_MS: u32 = 8;

/// Upper bound for a configured tick period
pub const MAX_TICK_PERIOD_MS: u32 = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_type_codes_are_contiguous() {
        let codes = [
            FF_RUMBLE,
            FF_PERIODIC,
            FF_CONSTANT,
            FF_SPRING,
            FF_FRICTION,
            FF_DAMPER,
            FF_INERTIA,
            FF_RAMP,
        ];
        for pair in codes.windows(2) {
            if let [a, b] = pair {
                assert_eq!(b - a, 1);
            }
        }
    }

    #[test]
    fn test_waveforms_follow_effect_types() {
        assert_eq!(FF_SQUARE, FF_RAMP + 1);
        assert_eq!(FF_CUSTOM, FF_SQUARE + 5);
    }
}
