//! Binary host effect records
//!
//! Decodes and encodes the 48-byte `struct ff_effect` of 64-bit Linux hosts
//! (native little-endian) and maps `EV_FF` input events to [`FfRequest`]s.
//!
//! ```text
//!  0  type        u16      10  replay.length  u16
//!  2  id          i16      12  replay.delay   u16
//!  4  direction   u16      14  (padding)
//!  6  trigger.btn u16      16  kind payload, 32 bytes
//!  8  trigger.int u16
//! ```
//!
//! Custom periodic sample data lives behind a host pointer and is never
//! read; only its length is kept.

use rumble_errors::DecodeError;

use crate::constants::{
    FF_AUTOCENTER, FF_CONSTANT, FF_CUSTOM, FF_DAMPER, FF_EFFECT_SIZE, FF_FRICTION, FF_GAIN,
    FF_INERTIA, FF_PERIODIC, FF_RAMP, FF_RUMBLE, FF_SPRING,
};
use crate::{
    Condition, EffectDescriptor, EffectId, EffectKind, Envelope, FfRequest, Replay, Trigger,
    Waveform,
};

const PAYLOAD: usize = 16;
const CONDITION_SIZE: usize = 12;

struct RecordReader<'a> {
    bytes: &'a [u8],
}

impl<'a> RecordReader<'a> {
    fn new(bytes: &'a [u8]) -> Result<Self, DecodeError> {
        if bytes.len() < FF_EFFECT_SIZE {
            return Err(DecodeError::Truncated {
                expected: FF_EFFECT_SIZE,
                actual: bytes.len(),
            });
        }
        Ok(Self { bytes })
    }

    fn array<const N: usize>(&self, offset: usize) -> Result<[u8; N], DecodeError> {
        self.bytes
            .get(offset..offset + N)
            .and_then(|slice| <[u8; N]>::try_from(slice).ok())
            .ok_or(DecodeError::Truncated {
                expected: offset + N,
                actual: self.bytes.len(),
            })
    }

    fn u16_at(&self, offset: usize) -> Result<u16, DecodeError> {
        self.array(offset).map(u16::from_le_bytes)
    }

    fn i16_at(&self, offset: usize) -> Result<i16, DecodeError> {
        self.array(offset).map(i16::from_le_bytes)
    }

    fn u32_at(&self, offset: usize) -> Result<u32, DecodeError> {
        self.array(offset).map(u32::from_le_bytes)
    }

    fn envelope_at(&self, offset: usize) -> Result<Envelope, DecodeError> {
        Ok(Envelope {
            attack_length: self.u16_at(offset)?,
            attack_level: self.u16_at(offset + 2)?,
            fade_length: self.u16_at(offset + 4)?,
            fade_level: self.u16_at(offset + 6)?,
        })
    }

    fn condition_at(&self, offset: usize) -> Result<Condition, DecodeError> {
        Ok(Condition {
            right_saturation: self.u16_at(offset)?,
            left_saturation: self.u16_at(offset + 2)?,
            right_coeff: self.i16_at(offset + 4)?,
            left_coeff: self.i16_at(offset + 6)?,
            deadband: self.u16_at(offset + 8)?,
            center: self.i16_at(offset + 10)?,
        })
    }

    fn conditions(&self) -> Result<[Condition; 2], DecodeError> {
        Ok([
            self.condition_at(PAYLOAD)?,
            self.condition_at(PAYLOAD + CONDITION_SIZE)?,
        ])
    }

    fn kind(&self, code: u16) -> Result<EffectKind, DecodeError> {
        let kind = match code {
            FF_RUMBLE => EffectKind::Rumble {
                strong_magnitude: self.u16_at(PAYLOAD)?,
                weak_magnitude: self.u16_at(PAYLOAD + 2)?,
            },
            FF_PERIODIC => {
                let waveform_code = self.u16_at(PAYLOAD)?;
                if waveform_code == FF_CUSTOM {
                    EffectKind::Custom {
                        sample_count: self.u32_at(PAYLOAD + 20)?,
                    }
                } else {
                    EffectKind::Periodic {
                        waveform: Waveform::from_code(waveform_code)
                            .ok_or(DecodeError::UnknownWaveform(waveform_code))?,
                        period: self.u16_at(PAYLOAD + 2)?,
                        magnitude: self.i16_at(PAYLOAD + 4)?,
                        offset: self.i16_at(PAYLOAD + 6)?,
                        phase: self.u16_at(PAYLOAD + 8)?,
                        envelope: self.envelope_at(PAYLOAD + 10)?,
                    }
                }
            }
            FF_CONSTANT => EffectKind::Constant {
                level: self.i16_at(PAYLOAD)?,
                envelope: self.envelope_at(PAYLOAD + 2)?,
            },
            FF_RAMP => EffectKind::Ramp {
                start_level: self.i16_at(PAYLOAD)?,
                end_level: self.i16_at(PAYLOAD + 2)?,
                envelope: self.envelope_at(PAYLOAD + 4)?,
            },
            FF_SPRING => EffectKind::Spring {
                conditions: self.conditions()?,
            },
            FF_FRICTION => EffectKind::Friction {
                conditions: self.conditions()?,
            },
            FF_DAMPER => EffectKind::Damper {
                conditions: self.conditions()?,
            },
            FF_INERTIA => EffectKind::Inertia {
                conditions: self.conditions()?,
            },
            other => return Err(DecodeError::UnknownEffectType(other)),
        };
        Ok(kind)
    }
}

/// Decode one record into its raw host id and descriptor
///
/// Bytes past the fixed record size are ignored.
///
/// # Errors
///
/// - [`DecodeError::Truncated`] for records shorter than 48 bytes
/// - [`DecodeError::UnknownEffectType`] / [`DecodeError::UnknownWaveform`]
///   for codes outside the effect model
pub fn decode_ff_effect(bytes: &[u8]) -> Result<(i16, EffectDescriptor), DecodeError> {
    let record = RecordReader::new(bytes)?;

    let kind = record.kind(record.u16_at(0)?)?;
    let descriptor = EffectDescriptor {
        kind,
        direction: record.u16_at(4)?,
        trigger: Trigger {
            button: record.u16_at(6)?,
            interval: record.u16_at(8)?,
        },
        replay: Replay {
            length: record.u16_at(10)?,
            delay: record.u16_at(12)?,
        },
    };
    Ok((record.i16_at(2)?, descriptor))
}

/// Decode one record whose id the host has already assigned
///
/// # Errors
///
/// As [`decode_ff_effect`], plus [`DecodeError::InvalidEffectId`] for a
/// negative id (the host's "allocate one for me" marker).
///
/// # Examples
///
/// ```
/// use rumble_ffb::{EffectDescriptor, EffectId, EffectKind, Replay, wire};
///
/// let rumble = EffectDescriptor::new(EffectKind::Rumble {
///     strong_magnitude: 0x8000,
///     weak_magnitude: 0x4000,
/// })
/// .with_replay(Replay::new(250, 0));
///
/// let bytes = wire::encode_ff_effect(EffectId::new(2), &rumble);
/// assert_eq!(wire::decode_effect(&bytes)?, (EffectId::new(2), rumble));
/// # Ok::<(), rumble_errors::DecodeError>(())
/// ```
pub fn decode_effect(bytes: &[u8]) -> Result<(EffectId, EffectDescriptor), DecodeError> {
    let (raw_id, descriptor) = decode_ff_effect(bytes)?;
    Ok((EffectId::try_from_raw(raw_id)?, descriptor))
}

struct RecordWriter {
    bytes: [u8; FF_EFFECT_SIZE],
}

impl RecordWriter {
    fn put(&mut self, offset: usize, value: [u8; 2]) {
        if let Some(slot) = self.bytes.get_mut(offset..offset + 2) {
            slot.copy_from_slice(&value);
        }
    }

    fn u16_at(&mut self, offset: usize, value: u16) {
        self.put(offset, value.to_le_bytes());
    }

    fn i16_at(&mut self, offset: usize, value: i16) {
        self.put(offset, value.to_le_bytes());
    }

    fn u32_at(&mut self, offset: usize, value: u32) {
        if let Some(slot) = self.bytes.get_mut(offset..offset + 4) {
            slot.copy_from_slice(&value.to_le_bytes());
        }
    }

    fn envelope_at(&mut self, offset: usize, envelope: &Envelope) {
        self.u16_at(offset, envelope.attack_length);
        self.u16_at(offset + 2, envelope.attack_level);
        self.u16_at(offset + 4, envelope.fade_length);
        self.u16_at(offset + 6, envelope.fade_level);
    }

    fn conditions(&mut self, conditions: &[Condition; 2]) {
        for (index, condition) in conditions.iter().enumerate() {
            let offset = PAYLOAD + index * CONDITION_SIZE;
            self.u16_at(offset, condition.right_saturation);
            self.u16_at(offset + 2, condition.left_saturation);
            self.i16_at(offset + 4, condition.right_coeff);
            self.i16_at(offset + 6, condition.left_coeff);
            self.u16_at(offset + 8, condition.deadband);
            self.i16_at(offset + 10, condition.center);
        }
    }
}

/// Encode a descriptor as a host record
///
/// The custom sample pointer is written as null.
pub fn encode_ff_effect(id: EffectId, descriptor: &EffectDescriptor) -> [u8; FF_EFFECT_SIZE] {
    let mut record = RecordWriter {
        bytes: [0; FF_EFFECT_SIZE],
    };

    record.u16_at(2, id.get());
    record.u16_at(4, descriptor.direction);
    record.u16_at(6, descriptor.trigger.button);
    record.u16_at(8, descriptor.trigger.interval);
    record.u16_at(10, descriptor.replay.length);
    record.u16_at(12, descriptor.replay.delay);

    let code = match &descriptor.kind {
        EffectKind::Rumble {
            strong_magnitude,
            weak_magnitude,
        } => {
            record.u16_at(PAYLOAD, *strong_magnitude);
            record.u16_at(PAYLOAD + 2, *weak_magnitude);
            FF_RUMBLE
        }
        EffectKind::Periodic {
            waveform,
            period,
            magnitude,
            offset,
            phase,
            envelope,
        } => {
            record.u16_at(PAYLOAD, waveform.code());
            record.u16_at(PAYLOAD + 2, *period);
            record.i16_at(PAYLOAD + 4, *magnitude);
            record.i16_at(PAYLOAD + 6, *offset);
            record.u16_at(PAYLOAD + 8, *phase);
            record.envelope_at(PAYLOAD + 10, envelope);
            FF_PERIODIC
        }
        EffectKind::Custom { sample_count } => {
            record.u16_at(PAYLOAD, FF_CUSTOM);
            record.u32_at(PAYLOAD + 20, *sample_count);
            FF_PERIODIC
        }
        EffectKind::Constant { level, envelope } => {
            record.i16_at(PAYLOAD, *level);
            record.envelope_at(PAYLOAD + 2, envelope);
            FF_CONSTANT
        }
        EffectKind::Ramp {
            start_level,
            end_level,
            envelope,
        } => {
            record.i16_at(PAYLOAD, *start_level);
            record.i16_at(PAYLOAD + 2, *end_level);
            record.envelope_at(PAYLOAD + 4, envelope);
            FF_RAMP
        }
        EffectKind::Spring { conditions } => {
            record.conditions(conditions);
            FF_SPRING
        }
        EffectKind::Friction { conditions } => {
            record.conditions(conditions);
            FF_FRICTION
        }
        EffectKind::Damper { conditions } => {
            record.conditions(conditions);
            FF_DAMPER
        }
        EffectKind::Inertia { conditions } => {
            record.conditions(conditions);
            FF_INERTIA
        }
    };
    record.u16_at(0, code);

    record.bytes
}

/// Map an `EV_FF` input event to a request
///
/// `FF_GAIN` sets the device gain, `FF_AUTOCENTER` is not supported by
/// rumble devices and yields `None`. Any other code names an effect id and
/// `value` is its play count, with zero stopping it.
///
/// # Examples
///
/// ```
/// use rumble_ffb::{EffectId, FfRequest, wire::decode_ff_event};
///
/// assert_eq!(
///     decode_ff_event(3, 2),
///     Some(FfRequest::Play { id: EffectId::new(3), count: 2 })
/// );
/// assert_eq!(decode_ff_event(0x60, 0x8000), Some(FfRequest::SetGain { gain: 0x8000 }));
/// assert_eq!(decode_ff_event(0x61, 0), None);
/// ```
pub fn decode_ff_event(code: u16, value: i32) -> Option<FfRequest> {
    match code {
        FF_GAIN => Some(FfRequest::SetGain {
            gain: u16::try_from(value.clamp(0, i32::from(u16::MAX))).unwrap_or(u16::MAX),
        }),
        FF_AUTOCENTER => None,
        id => Some(FfRequest::Play {
            id: EffectId::new(id),
            count: u32::try_from(value).unwrap_or(0),
        }),
    }
}
