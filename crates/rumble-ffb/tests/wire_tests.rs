//! Host records and events driving a device

use proptest::prelude::*;
use rumble_errors::DecodeError;
use rumble_ffb::constants::{FF_EFFECT_SIZE, FF_GAIN};
use rumble_ffb::{
    DeviceConfig, DeviceOutput, EffectId, FfRequest, ForceFeedbackDevice, decode_effect,
    decode_ff_effect, decode_ff_event, encode_ff_effect,
};
use rumble_test_helpers::prelude::*;

#[test]
fn test_every_fixture_survives_the_wire() -> TestResult {
    for (raw, descriptor) in (0u16..).zip(all_descriptors()) {
        let bytes = encode_ff_effect(EffectId::new(raw), &descriptor);
        let (id, decoded) = decode_effect(&bytes)?;
        assert_eq!(id, EffectId::new(raw));
        assert_eq!(decoded, descriptor, "record {raw}");
    }
    Ok(())
}

#[test]
fn test_trailing_bytes_ignored() -> TestResult {
    let mut bytes = encode_ff_effect(EffectId::new(1), &reference_rumble()).to_vec();
    bytes.extend_from_slice(&[0xAA; 16]);
    assert_eq!(decode_effect(&bytes)?.1, reference_rumble());
    Ok(())
}

#[test]
fn test_every_truncation_is_rejected() {
    let bytes = encode_ff_effect(EffectId::new(1), &reference_rumble());
    for len in 0..FF_EFFECT_SIZE {
        let prefix = bytes.get(..len).unwrap_or_default();
        assert_eq!(
            decode_ff_effect(prefix),
            Err(DecodeError::Truncated {
                expected: FF_EFFECT_SIZE,
                actual: len
            })
        );
    }
}

#[test]
fn test_allocation_marker_id_is_rejected() {
    let mut bytes = encode_ff_effect(EffectId::new(0), &reference_rumble());
    if let Some(id) = bytes.get_mut(2..4) {
        id.copy_from_slice(&(-1i16).to_le_bytes());
    }

    assert!(matches!(decode_ff_effect(&bytes), Ok((-1, _))));
    assert_eq!(decode_effect(&bytes), Err(DecodeError::InvalidEffectId(-1)));
}

#[test]
fn test_host_session() -> TestResult {
    let mut device = ForceFeedbackDevice::from_config("pad0", &DeviceConfig::default())?;

    let record = encode_ff_effect(EffectId::new(5), &reference_rumble());
    let (id, descriptor) = decode_effect(&record)?;
    device.handle(FfRequest::Upload { id, descriptor })?;

    let play = must_some(decode_ff_event(5, 1), "play event");
    assert_eq!(play.effect_id(), Some(id));
    device.handle(play)?;
    assert_eq!(device.tick(10), DeviceOutput::new(100, 200));

    let gain = must_some(decode_ff_event(FF_GAIN, 0), "gain event");
    device.handle(gain)?;
    assert_eq!(device.tick(10), DeviceOutput::ZERO);

    device.handle(must_some(decode_ff_event(FF_GAIN, 0xFFFF), "gain event"))?;
    device.handle(must_some(decode_ff_event(5, 0), "stop event"))?;
    assert!(!device.scheduler().is_playing(id));
    Ok(())
}

#[test]
fn test_negative_play_value_stops() {
    assert_eq!(
        decode_ff_event(2, -4),
        Some(FfRequest::Play {
            id: EffectId::new(2),
            count: 0
        })
    );
    assert_eq!(
        decode_ff_event(FF_GAIN, -4),
        Some(FfRequest::SetGain { gain: 0 })
    );
    assert_eq!(
        decode_ff_event(FF_GAIN, 1 << 20),
        Some(FfRequest::SetGain { gain: u16::MAX })
    );
}

proptest! {
    #[test]
    fn prop_arbitrary_records_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..96)) {
        if let Ok((id, descriptor)) = decode_effect(&bytes) {
            let reencoded = encode_ff_effect(id, &descriptor);
            prop_assert_eq!(decode_effect(&reencoded), Ok((id, descriptor)));
        }
    }
}
