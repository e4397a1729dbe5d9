//! Entity id allocation and reuse.
//!
//! Entity ids are bare indices issued densely from zero against a capacity
//! fixed at world creation. Destroyed ids are parked on a free list and
//! reused most-recently-freed-first, so the id space stays compact and the
//! high-water mark only advances when the free list is empty.

use crate::engine::error::{CapacityError, CapacityKind, UnknownEntityError};
use crate::engine::types::{EntityCount, EntityId};

/// Issues and reclaims entity ids against a fixed capacity.
///
/// The allocator tracks two things: a monotonically increasing counter (the
/// high-water mark of ids ever issued) and a LIFO free list of reclaimed
/// ids. It knows nothing about components; the owning world is responsible
/// for refusing to release an entity that still has membership bits set.
#[derive(Debug)]
pub struct EntityAllocator {
    next_id: EntityId,
    free_store: Vec<EntityId>,
    capacity: EntityCount,
}

impl EntityAllocator {
    /// Creates an allocator bounded by `capacity` ids.
    pub fn new(capacity: EntityCount) -> Self {
        Self {
            next_id: 0,
            free_store: Vec::new(),
            capacity,
        }
    }

    /// Issues an entity id.
    ///
    /// Pops the most recently freed id if any is parked; otherwise returns
    /// the counter value and advances it. Fails once the counter would pass
    /// the configured capacity.
    pub fn create(&mut self) -> Result<EntityId, CapacityError> {
        if let Some(id) = self.free_store.pop() {
            return Ok(id);
        }
        if self.next_id >= self.capacity {
            return Err(CapacityError {
                kind: CapacityKind::Entities,
                needed: self.next_id as u64 + 1,
                capacity: self.capacity as u64,
            });
        }
        let id = self.next_id;
        self.next_id += 1;
        Ok(id)
    }

    /// Parks an issued id on the free list for reuse.
    ///
    /// Ids at or above the high-water mark were never issued and are
    /// rejected. The caller must have verified that the entity carries no
    /// components; the allocator cannot see membership.
    pub fn release(&mut self, entity: EntityId) -> Result<(), UnknownEntityError> {
        if entity >= self.next_id {
            return Err(UnknownEntityError {
                entity,
                issued: self.next_id,
            });
        }
        self.free_store.push(entity);
        Ok(())
    }

    /// Returns `true` if `entity` is below the high-water mark.
    #[inline]
    pub fn is_issued(&self, entity: EntityId) -> bool {
        entity < self.next_id
    }

    /// High-water mark: the first id never issued.
    ///
    /// Full scans iterate `0..issued()`, so scan cost follows this mark, not
    /// the live count.
    #[inline]
    pub fn issued(&self) -> EntityId {
        self.next_id
    }

    /// Number of ids currently live (issued and not parked).
    #[inline]
    pub fn live_count(&self) -> EntityCount {
        self.next_id - self.free_store.len() as EntityCount
    }

    /// Configured id capacity.
    #[inline]
    pub fn capacity(&self) -> EntityCount {
        self.capacity
    }
}
