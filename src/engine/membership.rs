//! Per-entity component membership.
//!
//! One [`Mask`] per entity slot, allocated once at world creation. Bit `k`
//! set means the entity has the component with id `k`. Attach and detach are
//! strict state transitions: validation always precedes the bit flip, and a
//! failing call leaves the table untouched.

use crate::engine::error::{DuplicateComponentError, MissingComponentError};
use crate::engine::types::{ComponentId, EntityId, Mask};

/// Fixed-capacity table of membership masks.
#[derive(Debug)]
pub struct MembershipTable {
    masks: Box<[Mask]>,
}

impl MembershipTable {
    /// Creates a table with `capacity` zeroed entity slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            masks: vec![Mask::default(); capacity].into_boxed_slice(),
        }
    }

    /// Sets the bit for `component_id` on `entity`.
    ///
    /// Fails if the bit is already set; nothing is written in that case.
    pub fn add(
        &mut self,
        entity: EntityId,
        component_id: ComponentId,
    ) -> Result<(), DuplicateComponentError> {
        let mask = &mut self.masks[entity as usize];
        if mask.has(component_id) {
            return Err(DuplicateComponentError {
                entity,
                component_id,
            });
        }
        mask.set(component_id);
        Ok(())
    }

    /// Clears the bit for `component_id` on `entity`.
    ///
    /// Fails if the bit is not set; nothing is written in that case.
    pub fn remove(
        &mut self,
        entity: EntityId,
        component_id: ComponentId,
    ) -> Result<(), MissingComponentError> {
        let mask = &mut self.masks[entity as usize];
        if !mask.has(component_id) {
            return Err(MissingComponentError {
                entity,
                component_id,
            });
        }
        mask.clear(component_id);
        Ok(())
    }

    /// Pure bit test; out-of-range slots read as absent.
    #[inline]
    pub fn has(&self, entity: EntityId, component_id: ComponentId) -> bool {
        self.masks
            .get(entity as usize)
            .map(|mask| mask.has(component_id))
            .unwrap_or(false)
    }

    /// Copy of the membership mask for `entity`.
    #[inline]
    pub fn mask_of(&self, entity: EntityId) -> Mask {
        self.masks[entity as usize]
    }

    /// Returns `true` if `entity` has no components attached.
    #[inline]
    pub fn is_clear(&self, entity: EntityId) -> bool {
        self.masks[entity as usize].is_empty()
    }

    /// Read-only view of all slots, indexed by entity id.
    #[inline]
    pub(crate) fn masks(&self) -> &[Mask] {
        &self.masks
    }
}
