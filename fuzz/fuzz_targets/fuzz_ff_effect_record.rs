//! Fuzzes `ff_effect` record decoding and descriptor conversion.
//!
//! Any decoded record must convert or be rejected without panicking, and
//! re-encoding it must decode to the same descriptor.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_ff_effect_record
#![no_main]
use libfuzzer_sys::fuzz_target;
use rumble_ffb::{EffectConverter, MagnitudeRange, convert, decode_ff_effect, encode_ff_effect, EffectId};

fuzz_target!(|data: &[u8]| {
    let Ok((raw_id, descriptor)) = decode_ff_effect(data) else {
        return;
    };

    let _ = convert(&descriptor);
    let _ = EffectConverter::new(MagnitudeRange::new(0x100, 0x7FFF)).convert(&descriptor);

    if let Ok(id) = EffectId::try_from_raw(raw_id) {
        let bytes = encode_ff_effect(id, &descriptor);
        assert_eq!(decode_ff_effect(&bytes), Ok((raw_id, descriptor)));
    }
});
