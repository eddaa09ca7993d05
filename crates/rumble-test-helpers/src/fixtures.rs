//! Effect descriptor fixtures.
//!
//! Builders for the descriptors most tests need, plus tables covering every
//! effect kind so conversion and wire tests can iterate them.

use rumble_ffb::{
    Condition, EffectDescriptor, EffectKind, Envelope, Replay, Trigger, Waveform,
};

/// Rumble effect with the given motor levels and replay
pub fn rumble(weak: u16, strong: u16, length: u16, delay: u16) -> EffectDescriptor {
    EffectDescriptor::new(EffectKind::Rumble {
        strong_magnitude: strong,
        weak_magnitude: weak,
    })
    .with_replay(Replay::new(length, delay))
}

/// Constant effect with the given level and envelope
pub fn constant(level: i16, envelope: Envelope, length: u16) -> EffectDescriptor {
    EffectDescriptor::new(EffectKind::Constant { level, envelope })
        .with_replay(Replay::new(length, 0))
}

/// Sine periodic effect
pub fn periodic(magnitude: i16, envelope: Envelope, length: u16) -> EffectDescriptor {
    EffectDescriptor::new(EffectKind::Periodic {
        waveform: Waveform::Sine,
        period: 100,
        magnitude,
        offset: 0,
        phase: 0,
        envelope,
    })
    .with_replay(Replay::new(length, 0))
}

/// Linear ramp between two levels
pub fn ramp(start_level: i16, end_level: i16, length: u16) -> EffectDescriptor {
    EffectDescriptor::new(EffectKind::Ramp {
        start_level,
        end_level,
        envelope: Envelope::FLAT,
    })
    .with_replay(Replay::new(length, 0))
}

/// The canonical rumble: weak 100, strong 200 for one second
pub fn reference_rumble() -> EffectDescriptor {
    rumble(100, 200, 1000, 0)
}

/// One descriptor of every kind that converts to a rumble effect
pub fn convertible_descriptors() -> Vec<EffectDescriptor> {
    vec![
        constant(1000, Envelope::new(50, 0, 50, 0), 500),
        periodic(2000, Envelope::FLAT, 300),
        ramp(0, 4000, 400),
        reference_rumble(),
    ]
}

/// One descriptor of every kind that is rejected
pub fn unsupported_descriptors() -> Vec<EffectDescriptor> {
    let conditions = [
        Condition {
            right_saturation: 0x7FFF,
            left_saturation: 0x7FFF,
            right_coeff: 0x1000,
            left_coeff: 0x1000,
            deadband: 0,
            center: 0,
        },
        Condition::default(),
    ];
    vec![
        EffectDescriptor::new(EffectKind::Spring { conditions }),
        EffectDescriptor::new(EffectKind::Friction { conditions }),
        EffectDescriptor::new(EffectKind::Damper { conditions }),
        EffectDescriptor::new(EffectKind::Inertia { conditions }),
        EffectDescriptor::new(EffectKind::Custom { sample_count: 32 }),
    ]
}

/// Every kind with non-default replay, trigger and direction fields
pub fn all_descriptors() -> Vec<EffectDescriptor> {
    convertible_descriptors()
        .into_iter()
        .chain(unsupported_descriptors())
        .map(|d| {
            d.with_direction(0x4000).with_trigger(Trigger {
                button: 1,
                interval: 10,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_partition() {
        assert!(convertible_descriptors().iter().all(|d| d.kind.is_convertible()));
        assert!(unsupported_descriptors().iter().all(|d| !d.kind.is_convertible()));
        assert_eq!(all_descriptors().len(), 9);
    }

    #[test]
    fn test_reference_rumble() {
        let descriptor = reference_rumble();
        assert_eq!(descriptor.replay, Replay::new(1000, 0));
        assert_eq!(
            descriptor.kind,
            EffectKind::Rumble {
                strong_magnitude: 200,
                weak_magnitude: 100
            }
        );
    }
}
