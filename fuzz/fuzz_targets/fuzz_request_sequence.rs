//! Fuzzes arbitrary sequences of host requests against one device.
//!
//! Each 6-byte chunk is one operation: upload, erase, play, stop, gain or a
//! tick. Output must stay within the configured range whatever the order.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_request_sequence
#![no_main]
use libfuzzer_sys::fuzz_target;
use rumble_ffb::{
    AggregationPolicy, DeviceConfig, EffectDescriptor, EffectId, EffectKind, Envelope,
    ForceFeedbackDevice, MagnitudeRange, Replay, decode_ff_event,
};

const MAX: u16 = 0xC000;

fn descriptor(selector: u8, a: u16, b: u16) -> EffectDescriptor {
    let kind = match selector % 4 {
        0 => EffectKind::Rumble {
            strong_magnitude: a,
            weak_magnitude: b,
        },
        1 => EffectKind::Constant {
            level: a as i16,
            envelope: Envelope::new(b % 512, a, b % 256, b),
        },
        2 => EffectKind::Ramp {
            start_level: a as i16,
            end_level: b as i16,
            envelope: Envelope::FLAT,
        },
        _ => EffectKind::Custom {
            sample_count: u32::from(a),
        },
    };
    EffectDescriptor::new(kind).with_replay(Replay::new(b % 2000, a % 100))
}

fuzz_target!(|data: &[u8]| {
    let policy = if data.first().is_some_and(|b| b & 1 == 1) {
        AggregationPolicy::Max
    } else {
        AggregationPolicy::Sum
    };
    let config = DeviceConfig::new()
        .with_max_effects(8)
        .with_magnitude(MagnitudeRange::new(0, MAX))
        .with_aggregation(policy);
    let Ok(mut device) = ForceFeedbackDevice::from_config("fuzz", &config) else {
        return;
    };

    for chunk in data.chunks_exact(6) {
        let op = chunk[0];
        let id = EffectId::new(u16::from(chunk[1] % 16));
        let a = u16::from_le_bytes([chunk[2], chunk[3]]);
        let b = u16::from_le_bytes([chunk[4], chunk[5]]);

        match op % 7 {
            0 => {
                let _ = device.upload(id, &descriptor(op >> 3, a, b));
            }
            1 => {
                let _ = device.erase(id);
            }
            2 => {
                let _ = device.play_repeat(id, u32::from(b % 4));
            }
            3 => {
                let _ = device.stop(id);
            }
            4 => {
                if let Some(request) = decode_ff_event(a, i32::from(b as i16)) {
                    let _ = device.handle(request);
                }
            }
            _ => {
                let output = device.tick(u32::from(a % 1000));
                assert!(output.weak_magnitude <= MAX);
                assert!(output.strong_magnitude <= MAX);
            }
        }

        assert!(device.registry().len() <= 8);
    }
});
