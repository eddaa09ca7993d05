//! Property tests for conversion, envelopes and the scheduler

use proptest::prelude::*;
use rumble_ffb::envelope::scale_at;
use rumble_ffb::{
    AggregationPolicy, DeviceConfig, EffectDescriptor, EffectId, EffectKind, Envelope,
    ForceFeedbackDevice, MagnitudeRange, Replay, Waveform, convert,
};

const EPSILON: f64 = 1e-12;

fn has_negative_level(kind: &EffectKind) -> bool {
    match *kind {
        EffectKind::Constant { level, .. } => level < 0,
        EffectKind::Periodic { magnitude, .. } => magnitude < 0,
        EffectKind::Ramp {
            start_level,
            end_level,
            ..
        } => start_level < 0 || end_level < 0,
        _ => false,
    }
}

fn envelope_strategy() -> impl Strategy<Value = Envelope> {
    (any::<u16>(), any::<u16>(), any::<u16>(), any::<u16>())
        .prop_map(|(al, lv, fl, fv)| Envelope::new(al, lv, fl, fv))
}

fn waveform_strategy() -> impl Strategy<Value = Waveform> {
    prop_oneof![
        Just(Waveform::Square),
        Just(Waveform::Triangle),
        Just(Waveform::Sine),
        Just(Waveform::SawUp),
        Just(Waveform::SawDown),
    ]
}

fn kind_strategy() -> impl Strategy<Value = EffectKind> {
    prop_oneof![
        (any::<i16>(), envelope_strategy())
            .prop_map(|(level, envelope)| EffectKind::Constant { level, envelope }),
        (
            waveform_strategy(),
            any::<u16>(),
            any::<i16>(),
            any::<i16>(),
            any::<u16>(),
            envelope_strategy()
        )
            .prop_map(|(waveform, period, magnitude, offset, phase, envelope)| {
                EffectKind::Periodic {
                    waveform,
                    period,
                    magnitude,
                    offset,
                    phase,
                    envelope,
                }
            }),
        (any::<i16>(), any::<i16>(), envelope_strategy()).prop_map(
            |(start_level, end_level, envelope)| EffectKind::Ramp {
                start_level,
                end_level,
                envelope,
            }
        ),
        (any::<u16>(), any::<u16>()).prop_map(|(strong_magnitude, weak_magnitude)| {
            EffectKind::Rumble {
                strong_magnitude,
                weak_magnitude,
            }
        }),
        any::<u32>().prop_map(|sample_count| EffectKind::Custom { sample_count }),
    ]
}

fn descriptor_strategy() -> impl Strategy<Value = EffectDescriptor> {
    (kind_strategy(), any::<u16>(), any::<u16>(), any::<u16>()).prop_map(
        |(kind, direction, length, delay)| {
            EffectDescriptor::new(kind)
                .with_direction(direction)
                .with_replay(Replay::new(length, delay))
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn prop_conversion_is_total(descriptor in descriptor_strategy()) {
        if let Ok(effect) = convert(&descriptor) {
            prop_assert!(descriptor.kind.is_convertible());
            prop_assert_eq!(effect.length, descriptor.replay.length);
            prop_assert_eq!(effect.delay, descriptor.replay.delay);
        } else {
            prop_assert!(!descriptor.kind.is_convertible() || has_negative_level(&descriptor.kind));
        }
    }

    #[test]
    fn prop_scale_stays_in_unit_interval(
        envelope in envelope_strategy(),
        elapsed in 0u64..200_000,
        length in any::<u16>(),
    ) {
        let scale = scale_at(&envelope, elapsed, length);
        prop_assert!(scale.is_finite());
        prop_assert!((-EPSILON..=1.0 + EPSILON).contains(&scale), "scale {} out of range", scale);
    }

    #[test]
    fn prop_attack_end_is_full_scale(
        attack_length in 0u16..20_000,
        fade_length in 0u16..20_000,
        sustain in 0u16..20_000,
        attack_level in any::<u16>(),
        fade_level in any::<u16>(),
        indefinite in any::<bool>(),
    ) {
        let envelope = Envelope::new(attack_length, attack_level, fade_length, fade_level);
        let length = if indefinite { 0 } else { attack_length + fade_length + sustain };
        let scale = scale_at(&envelope, u64::from(attack_length), length);
        prop_assert_eq!(scale.to_bits(), 1f64.to_bits());
    }

    #[test]
    fn prop_output_within_range(
        levels in prop::collection::vec((any::<u16>(), any::<u16>(), 0u16..500), 1..8),
        min in 0u16..1000,
        span in 1u16..60_000,
        gain in any::<u16>(),
        use_max in any::<bool>(),
        deltas in prop::collection::vec(0u32..100, 1..20),
    ) {
        let max = min.saturating_add(span);
        let policy = if use_max { AggregationPolicy::Max } else { AggregationPolicy::Sum };
        let config = DeviceConfig::new()
            .with_magnitude(MagnitudeRange::new(min, max))
            .with_aggregation(policy)
            .with_gain(gain);
        let mut device = ForceFeedbackDevice::from_config("prop", &config)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        for (raw, (weak, strong, length)) in (0u16..).zip(&levels) {
            let weak = (*weak).clamp(min, max);
            let strong = (*strong).clamp(min, max);
            let descriptor = EffectDescriptor::new(EffectKind::Rumble {
                strong_magnitude: strong,
                weak_magnitude: weak,
            })
            .with_replay(Replay::new(*length, 0));
            device.upload(EffectId::new(raw), &descriptor)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            device.play(EffectId::new(raw))
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
        }

        for delta in deltas {
            let output = device.tick(delta);
            for channel in [output.weak_magnitude, output.strong_magnitude] {
                prop_assert!(
                    channel == 0 || (min..=max).contains(&channel),
                    "{channel} outside {min}..={max}"
                );
            }
            prop_assert!(device.scheduler().playing_count() <= levels.len());
        }
    }
}
