//! World ownership and the mutation surface.
//!
//! A [`World`] owns the entity allocator and the membership table for a
//! fixed number of entity slots, and issues component bit positions. It is
//! the single mutation point: attach, detach, and destroy all validate
//! their preconditions here before any state changes, so no failing call
//! ever commits partial state.
//!
//! ## Concurrency model
//!
//! All operations are synchronous and non-blocking; none suspend or yield.
//! The world and every handle it produces are `Send + Sync`-capable plain
//! storage; no locks, atomics, or channels guard the data path. Sharing a
//! world across execution contexts therefore requires an external scheme
//! (partitioned id ranges, or serializing mutation through one owner);
//! within one owner, queries observe exactly the membership state at the
//! moment they run.

use std::sync::atomic::{AtomicU32, Ordering};

use tracing::debug;

use crate::engine::component::{Component, Schema};
use crate::engine::entity::EntityAllocator;
use crate::engine::error::{
    CapacityError, CapacityKind, EcsResult, EntityHasComponentsError, UnknownEntityError,
};
use crate::engine::membership::MembershipTable;
use crate::engine::query::{QueryBuilder, TrackedQuery};
use crate::engine::types::{
    ComponentId, EntityCount, EntityId, Mask, WorldId, COMPONENT_CAP, DEFAULT_ENTITY_CAP,
};

static NEXT_WORLD_ID: AtomicU32 = AtomicU32::new(0);

/// Fixed-capacity store of entity-component simulation state.
///
/// Capacity is set once at creation and bounds entity ids, membership
/// slots, and every component field buffer defined against this world.
#[derive(Debug)]
pub struct World {
    id: WorldId,
    capacity: EntityCount,
    entities: EntityAllocator,
    membership: MembershipTable,
    next_component_id: ComponentId,
}

impl World {
    /// Creates a world with room for `capacity` entities.
    pub fn new(capacity: EntityCount) -> Self {
        let id = NEXT_WORLD_ID.fetch_add(1, Ordering::Relaxed);
        debug!(world = id, capacity, "created world");
        Self {
            id,
            capacity,
            entities: EntityAllocator::new(capacity),
            membership: MembershipTable::new(capacity as usize),
            next_component_id: 0,
        }
    }

    /// Issues an entity id, reusing the most recently destroyed id first.
    ///
    /// Fails with a capacity error once the id counter would pass the
    /// world's capacity.
    pub fn create_entity(&mut self) -> EcsResult<EntityId> {
        let id = self.entities.create()?;
        Ok(id)
    }

    /// Returns an entity id to the free list.
    ///
    /// The entity must have an all-zero membership mask; destroying an
    /// entity that still has components fails without touching any state.
    /// Ids that were never issued are rejected.
    pub fn remove_entity(&mut self, entity: EntityId) -> EcsResult<()> {
        self.check_issued(entity)?;
        if !self.membership.is_clear(entity) {
            return Err(EntityHasComponentsError {
                entity,
                attached: self.membership.mask_of(entity).count(),
            }
            .into());
        }
        self.entities.release(entity)?;
        Ok(())
    }

    /// Defines a component against this world.
    ///
    /// Validates the schema, assigns the next component bit position, and
    /// allocates one zero-initialized buffer per field sized to the world's
    /// capacity. A schema with no fields defines a tag and allocates
    /// nothing. Fails with a capacity error when the membership mask has no
    /// bit left to assign.
    pub fn create_component(&mut self, schema: &Schema) -> EcsResult<Component> {
        schema.validate()?;
        let component_id = self.next_component_id;
        if component_id as usize >= COMPONENT_CAP {
            return Err(CapacityError {
                kind: CapacityKind::ComponentIds,
                needed: component_id as u64 + 1,
                capacity: COMPONENT_CAP as u64,
            }
            .into());
        }
        self.next_component_id += 1;
        let component = Component::new(self.id, component_id, schema, self.capacity as usize);
        debug!(
            world = self.id,
            component = component_id,
            fields = component.field_count(),
            bytes_per_entity = component.bytes_per_entity(),
            "defined component"
        );
        Ok(component)
    }

    /// Attaches `component` to `entity`.
    ///
    /// Fails if the entity already has the component or the id was never
    /// issued. Equivalent to [`add_component_with`](World::add_component_with)
    /// with no dependents.
    pub fn add_component(&mut self, component: &Component, entity: EntityId) -> EcsResult<()> {
        self.add_component_with(component, entity, &mut [])
    }

    /// Attaches `component` to `entity`, then reconciles every query in
    /// `dependents` against the entity's new membership mask.
    ///
    /// The dependent list is the incremental-maintenance contract: each
    /// mutation site must name the tracked queries whose masks involve the
    /// mutated component. A query omitted from a mutation that affects it
    /// goes stale.
    pub fn add_component_with(
        &mut self,
        component: &Component,
        entity: EntityId,
        dependents: &mut [&mut TrackedQuery],
    ) -> EcsResult<()> {
        self.check_component(component);
        self.check_issued(entity)?;
        self.membership.add(entity, component.id())?;
        self.notify(entity, dependents);
        Ok(())
    }

    /// Detaches `component` from `entity`.
    ///
    /// Fails if the entity does not have the component or the id was never
    /// issued.
    pub fn remove_component(&mut self, component: &Component, entity: EntityId) -> EcsResult<()> {
        self.remove_component_with(component, entity, &mut [])
    }

    /// Detaches `component` from `entity`, then reconciles every query in
    /// `dependents` against the entity's new membership mask.
    pub fn remove_component_with(
        &mut self,
        component: &Component,
        entity: EntityId,
        dependents: &mut [&mut TrackedQuery],
    ) -> EcsResult<()> {
        self.check_component(component);
        self.check_issued(entity)?;
        self.membership.remove(entity, component.id())?;
        self.notify(entity, dependents);
        Ok(())
    }

    /// Pure membership bit test; never mutates and never fails.
    ///
    /// Ids that were never issued (or are out of range) read as `false`.
    pub fn has_component(&self, component: &Component, entity: EntityId) -> bool {
        self.check_component(component);
        self.entities.is_issued(entity) && self.membership.has(entity, component.id())
    }

    /// Starts building a query over this world.
    pub fn query(&self) -> QueryBuilder<'_> {
        QueryBuilder::new(self)
    }

    /// Configured entity capacity.
    #[inline]
    pub fn capacity(&self) -> EntityCount {
        self.capacity
    }

    /// High-water mark of issued entity ids (the full-scan bound).
    #[inline]
    pub fn issued(&self) -> EntityId {
        self.entities.issued()
    }

    /// Number of entities currently live.
    #[inline]
    pub fn live_count(&self) -> EntityCount {
        self.entities.live_count()
    }

    /// Number of components defined so far.
    #[inline]
    pub fn component_count(&self) -> usize {
        self.next_component_id as usize
    }

    /// Copy of the membership mask for `entity`.
    ///
    /// ## Panics
    /// Panics if `entity` is at or beyond the world's capacity.
    #[inline]
    pub fn membership_mask(&self, entity: EntityId) -> Mask {
        self.membership.mask_of(entity)
    }

    #[inline]
    pub(crate) fn id(&self) -> WorldId {
        self.id
    }

    #[inline]
    pub(crate) fn masks(&self) -> &[Mask] {
        self.membership.masks()
    }

    fn check_issued(&self, entity: EntityId) -> Result<(), UnknownEntityError> {
        if !self.entities.is_issued(entity) {
            return Err(UnknownEntityError {
                entity,
                issued: self.entities.issued(),
            });
        }
        Ok(())
    }

    fn check_component(&self, component: &Component) {
        assert!(
            component.world_id() == self.id,
            "component {} was defined on a different world",
            component.id()
        );
    }

    fn notify(&self, entity: EntityId, dependents: &mut [&mut TrackedQuery]) {
        if dependents.is_empty() {
            return;
        }
        let mask = self.membership.mask_of(entity);
        for query in dependents.iter_mut() {
            query.apply(self.id, entity, &mask);
        }
    }
}

impl Default for World {
    /// A world with [`DEFAULT_ENTITY_CAP`] entity slots.
    fn default() -> Self {
        Self::new(DEFAULT_ENTITY_CAP)
    }
}
