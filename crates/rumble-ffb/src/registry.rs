//! Fixed-capacity store of normalized effects keyed by host id

use std::collections::BTreeMap;

use rumble_errors::{EffectResult, RegistryError};

use crate::{EffectConverter, EffectDescriptor, EffectId, NormalizedEffect};

/// Effects uploaded to one device
///
/// Descriptors are converted once on upload and only the normalized form is
/// stored. Re-uploading an existing id replaces it and never counts against
/// the capacity.
///
/// Every fresh insert of an id gets a new generation. A replacement keeps the
/// generation of the entry it replaces, so playback carries over, while an
/// erase followed by an upload does not.
///
/// # Examples
///
/// ```
/// use rumble_ffb::{EffectDescriptor, EffectId, EffectKind, EffectRegistry};
///
/// let mut registry = EffectRegistry::new(1);
/// let rumble = EffectDescriptor::new(EffectKind::Rumble {
///     strong_magnitude: 200,
///     weak_magnitude: 100,
/// });
///
/// registry.upload(EffectId::new(0), &rumble)?;
/// registry.upload(EffectId::new(0), &rumble)?;
/// assert!(registry.upload(EffectId::new(1), &rumble).is_err());
/// assert_eq!(registry.len(), 1);
/// # Ok::<(), rumble_errors::RegistryError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EffectRegistry {
    effects: BTreeMap<EffectId, Slot>,
    capacity: usize,
    converter: EffectConverter,
    next_generation: u64,
}

#[derive(Debug, Clone)]
struct Slot {
    effect: NormalizedEffect,
    generation: u64,
}

impl EffectRegistry {
    /// Create an empty registry accepting the full magnitude range
    pub fn new(capacity: usize) -> Self {
        Self::with_converter(capacity, EffectConverter::default())
    }

    /// Create an empty registry normalizing with `converter`
    pub fn with_converter(capacity: usize, converter: EffectConverter) -> Self {
        Self {
            effects: BTreeMap::new(),
            capacity,
            converter,
            next_generation: 0,
        }
    }

    /// Convert and store a descriptor under `id`
    ///
    /// # Errors
    ///
    /// - [`RegistryError::ConversionFailed`] if the descriptor cannot be
    ///   normalized; the registry is left unchanged
    /// - [`RegistryError::CapacityExceeded`] if `id` is new and the registry
    ///   is full
    pub fn upload(&mut self, id: EffectId, descriptor: &EffectDescriptor) -> EffectResult {
        let effect = self.converter.convert(descriptor)?;

        if let Some(slot) = self.effects.get_mut(&id) {
            slot.effect = effect;
            return Ok(());
        }

        if self.effects.len() >= self.capacity {
            return Err(RegistryError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let generation = self.next_generation;
        self.next_generation = self.next_generation.wrapping_add(1);
        self.effects.insert(id, Slot { effect, generation });
        Ok(())
    }

    /// Remove the effect stored under `id`
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownEffectId`] if nothing is stored there.
    pub fn erase(&mut self, id: EffectId) -> EffectResult {
        self.effects
            .remove(&id)
            .map(|_| ())
            .ok_or(RegistryError::UnknownEffectId(id.get()))
    }

    /// The effect stored under `id`
    #[inline]
    pub fn get(&self, id: EffectId) -> Option<&NormalizedEffect> {
        self.effects.get(&id).map(|slot| &slot.effect)
    }

    /// Generation of the entry stored under `id`
    ///
    /// Changes whenever `id` is erased and uploaded again.
    #[inline]
    pub fn generation(&self, id: EffectId) -> Option<u64> {
        self.effects.get(&id).map(|slot| slot.generation)
    }

    /// The effect stored under `id` together with its generation
    #[inline]
    pub fn entry(&self, id: EffectId) -> Option<(&NormalizedEffect, u64)> {
        self.effects
            .get(&id)
            .map(|slot| (&slot.effect, slot.generation))
    }

    /// True if an effect is stored under `id`
    #[inline]
    pub fn contains(&self, id: EffectId) -> bool {
        self.effects.contains_key(&id)
    }

    /// Maximum number of stored effects
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of stored effects
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// True if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Stored ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = EffectId> + '_ {
        self.effects.keys().copied()
    }

    /// Remove every effect
    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// The converter used on upload
    pub fn converter(&self) -> &EffectConverter {
        &self.converter
    }
}
