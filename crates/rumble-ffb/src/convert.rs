//! Descriptor normalization
//!
//! Maps the four supported effect kinds onto start/end levels for the weak
//! and strong motors. Everything else is rejected, and every magnitude is
//! checked against the device range.

use rumble_errors::ConversionError;

use crate::{EffectDescriptor, EffectKind, Envelope, MagnitudeRange, NormalizedEffect};

/// Converts host descriptors for a device with a given magnitude range
///
/// # Examples
///
/// ```
/// use rumble_ffb::{EffectConverter, EffectDescriptor, EffectKind, Envelope, Replay};
///
/// let converter = EffectConverter::default();
/// let ramp = EffectDescriptor::new(EffectKind::Ramp {
///     start_level: 0,
///     end_level: 1000,
///     envelope: Envelope::FLAT,
/// })
/// .with_replay(Replay::new(500, 20));
///
/// let effect = converter.convert(&ramp)?;
/// assert_eq!(effect.start_weak_magnitude, 0);
/// assert_eq!(effect.end_strong_magnitude, 1000);
/// assert_eq!(effect.delay, 20);
/// # Ok::<(), rumble_errors::ConversionError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EffectConverter {
    range: MagnitudeRange,
}

impl EffectConverter {
    /// Create a converter accepting magnitudes in `range`
    pub const fn new(range: MagnitudeRange) -> Self {
        Self { range }
    }

    /// The accepted magnitude range
    pub const fn range(&self) -> MagnitudeRange {
        self.range
    }

    /// Normalize a descriptor
    ///
    /// # Errors
    ///
    /// - [`ConversionError::UnsupportedEffectKind`] for spring, friction,
    ///   damper, inertia and custom effects
    /// - [`ConversionError::InvalidMagnitudeRange`] if any level lies
    ///   outside the range (negative levels never pass)
    pub fn convert(&self, descriptor: &EffectDescriptor) -> Result<NormalizedEffect, ConversionError> {
        let (start_weak, start_strong, end_weak, end_strong, envelope) = match descriptor.kind {
            EffectKind::Constant { level, envelope } => {
                let level = self.check("level", i32::from(level))?;
                (level, level, level, level, envelope)
            }
            EffectKind::Periodic {
                magnitude, envelope, ..
            } => {
                let magnitude = self.check("magnitude", i32::from(magnitude))?;
                (magnitude, magnitude, magnitude, magnitude, envelope)
            }
            EffectKind::Ramp {
                start_level,
                end_level,
                envelope,
            } => {
                let start = self.check("start_level", i32::from(start_level))?;
                let end = self.check("end_level", i32::from(end_level))?;
                (start, start, end, end, envelope)
            }
            EffectKind::Rumble {
                strong_magnitude,
                weak_magnitude,
            } => {
                let weak = self.check("weak_magnitude", i32::from(weak_magnitude))?;
                let strong = self.check("strong_magnitude", i32::from(strong_magnitude))?;
                (weak, strong, weak, strong, Envelope::FLAT)
            }
            EffectKind::Spring { .. }
            | EffectKind::Friction { .. }
            | EffectKind::Damper { .. }
            | EffectKind::Inertia { .. }
            | EffectKind::Custom { .. } => {
                return Err(ConversionError::unsupported(descriptor.kind.name()));
            }
        };

        Ok(NormalizedEffect {
            start_weak_magnitude: start_weak,
            start_strong_magnitude: start_strong,
            end_weak_magnitude: end_weak,
            end_strong_magnitude: end_strong,
            envelope,
            delay: descriptor.replay.delay,
            length: descriptor.replay.length,
        })
    }

    /// Zero switches a motor off and is accepted whatever the range
    fn check(&self, field: &'static str, value: i32) -> Result<u16, ConversionError> {
        if value != 0 && !self.range.contains(value) {
            return Err(ConversionError::magnitude(
                field,
                value,
                self.range.min,
                self.range.max,
            ));
        }
        u16::try_from(value)
            .ok()
            .ok_or(ConversionError::magnitude(field, value, self.range.min, self.range.max))
    }
}

/// Normalize a descriptor against the full `0..=0xFFFF` range
///
/// # Errors
///
/// See [`EffectConverter::convert`].
pub fn convert(descriptor: &EffectDescriptor) -> Result<NormalizedEffect, ConversionError> {
    EffectConverter::default().convert(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Condition, Replay, Waveform};

    fn replay() -> Replay {
        Replay::new(1000, 25)
    }

    #[test]
    fn test_convert_supported_kinds() -> Result<(), ConversionError> {
        let envelope = Envelope::new(10, 20, 30, 40);
        let cases = [
            (
                EffectKind::Constant {
                    level: 500,
                    envelope,
                },
                (500, 500, 500, 500, envelope),
            ),
            (
                EffectKind::Periodic {
                    waveform: Waveform::Square,
                    period: 100,
                    magnitude: 700,
                    offset: -5,
                    phase: 90,
                    envelope,
                },
                (700, 700, 700, 700, envelope),
            ),
            (
                EffectKind::Ramp {
                    start_level: 100,
                    end_level: 900,
                    envelope,
                },
                (100, 100, 900, 900, envelope),
            ),
            (
                EffectKind::Rumble {
                    strong_magnitude: 200,
                    weak_magnitude: 100,
                },
                (100, 200, 100, 200, Envelope::FLAT),
            ),
        ];

        for (kind, (sw, ss, ew, es, env)) in cases {
            let effect = convert(&EffectDescriptor::new(kind).with_replay(replay()))?;
            assert_eq!(effect.start_weak_magnitude, sw, "{kind}");
            assert_eq!(effect.start_strong_magnitude, ss, "{kind}");
            assert_eq!(effect.end_weak_magnitude, ew, "{kind}");
            assert_eq!(effect.end_strong_magnitude, es, "{kind}");
            assert_eq!(effect.envelope, env, "{kind}");
            assert_eq!(effect.length, 1000);
            assert_eq!(effect.delay, 25);
        }
        Ok(())
    }

    #[test]
    fn test_unsupported_kinds_rejected() {
        let conditions = [Condition::default(); 2];
        let kinds = [
            EffectKind::Spring { conditions },
            EffectKind::Friction { conditions },
            EffectKind::Damper { conditions },
            EffectKind::Inertia { conditions },
            EffectKind::Custom { sample_count: 4 },
        ];
        for kind in kinds {
            let result = convert(&EffectDescriptor::new(kind));
            assert_eq!(
                result,
                Err(ConversionError::UnsupportedEffectKind { kind: kind.name() })
            );
        }
    }

    #[test]
    fn test_negative_level_rejected() {
        let result = convert(&EffectDescriptor::new(EffectKind::Constant {
            level: -1,
            envelope: Envelope::FLAT,
        }));
        assert_eq!(
            result,
            Err(ConversionError::magnitude("level", -1, 0, u16::MAX))
        );
    }

    #[test]
    fn test_zero_level_accepted_below_range_min() -> Result<(), ConversionError> {
        let converter = EffectConverter::new(MagnitudeRange::new(1000, u16::MAX));
        let strong_only = EffectDescriptor::new(EffectKind::Rumble {
            strong_magnitude: 2000,
            weak_magnitude: 0,
        });
        let effect = converter.convert(&strong_only)?;
        assert_eq!(effect.start_weak_magnitude, 0);
        assert_eq!(effect.start_strong_magnitude, 2000);

        let faint = EffectDescriptor::new(EffectKind::Rumble {
            strong_magnitude: 2000,
            weak_magnitude: 1,
        });
        assert_eq!(
            converter.convert(&faint),
            Err(ConversionError::magnitude("weak_magnitude", 1, 1000, u16::MAX))
        );
        Ok(())
    }

    #[test]
    fn test_narrow_range() {
        let converter = EffectConverter::new(MagnitudeRange::new(0, 255));
        let rumble = EffectDescriptor::new(EffectKind::Rumble {
            strong_magnitude: 256,
            weak_magnitude: 10,
        });
        assert_eq!(
            converter.convert(&rumble),
            Err(ConversionError::magnitude("strong_magnitude", 256, 0, 255))
        );
    }
}
