//! Query construction and evaluation over membership masks.
//!
//! This module provides a *builder-style* API for constructing
//! include/exclude queries and three interchangeable evaluation strategies
//! over the same mask contract.
//!
//! ## Mask contract
//!
//! A query is an include mask and an exclude mask. Entity `e` matches iff
//!
//! ```text
//! (membership(e) & exclude) == 0  &&  (membership(e) & include) == include
//! ```
//!
//! ## Strategies
//!
//! 1. [`Query`] — full rescan of every id below the high-water mark on each
//!    [`run`](Query::run). Pure read; cost is O(high-water mark).
//! 2. [`EntryQuery`] — rescan plus a per-entity matched-last-run flag, so
//!    each run also reports which matches are *new* since the previous run.
//! 3. [`TrackedQuery`] — a dense array of current matches maintained eagerly
//!    at mutation time. Reading is O(1); the price is that every attach or
//!    detach that could affect the query must name it in its dependent list.
//!
//! All three are constructed through [`QueryBuilder`], obtained from
//! [`World::query`](crate::World::query). The builder is *consumed* by the
//! build methods, so a query definition cannot be reused incorrectly.

use tracing::debug;

use crate::engine::component::Component;
use crate::engine::types::{EntityId, Mask, WorldId};
use crate::engine::world::World;

/// Sentinel slot index for "entity not in the dense array".
const NO_SLOT: u32 = u32::MAX;

/// Include/exclude mask pair shared by every evaluation strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueryFilter {
    /// Components an entity must have.
    pub include: Mask,

    /// Components an entity must not have.
    pub exclude: Mask,
}

impl QueryFilter {
    /// Applies the matching rule to a membership mask.
    #[inline]
    pub fn matches(&self, membership: &Mask) -> bool {
        !membership.intersects(&self.exclude) && membership.contains_all(&self.include)
    }
}

/// Builder for membership queries.
///
/// Obtained from [`World::query`](crate::World::query); components are added
/// with [`with`](QueryBuilder::with) and [`without`](QueryBuilder::without),
/// then one of the build methods selects the evaluation strategy.
///
/// ## Example
/// ```ignore
/// let mut moving = world.query()
///     .with(&position)
///     .with(&velocity)
///     .without(&frozen)
///     .build();
/// for &entity in moving.run(&world) { /* ... */ }
/// ```
///
/// ## Panics
/// `with` and `without` panic if the component was defined on a different
/// world; mask bit positions are only meaningful within one world.
pub struct QueryBuilder<'w> {
    world: &'w World,
    filter: QueryFilter,
}

impl<'w> QueryBuilder<'w> {
    pub(crate) fn new(world: &'w World) -> Self {
        Self {
            world,
            filter: QueryFilter::default(),
        }
    }

    fn check_world(&self, component: &Component) {
        assert!(
            component.world_id() == self.world.id(),
            "component {} was defined on a different world",
            component.id()
        );
    }

    /// Requires `component` to be present on matching entities.
    pub fn with(mut self, component: &Component) -> Self {
        self.check_world(component);
        self.filter.include.set(component.id());
        self
    }

    /// Requires `component` to be absent from matching entities.
    pub fn without(mut self, component: &Component) -> Self {
        self.check_world(component);
        self.filter.exclude.set(component.id());
        self
    }

    /// Builds a full-rescan query.
    pub fn build(self) -> Query {
        debug!(
            include = self.filter.include.count(),
            exclude = self.filter.exclude.count(),
            "built scan query"
        );
        Query {
            world_id: self.world.id(),
            filter: self.filter,
            results: vec![0; self.world.capacity() as usize].into_boxed_slice(),
        }
    }

    /// Builds a rescan-with-diff query.
    pub fn build_entry(self) -> EntryQuery {
        let capacity = self.world.capacity() as usize;
        debug!(
            include = self.filter.include.count(),
            exclude = self.filter.exclude.count(),
            "built entry query"
        );
        EntryQuery {
            world_id: self.world.id(),
            filter: self.filter,
            matched: vec![false; capacity].into_boxed_slice(),
            results: vec![0; capacity].into_boxed_slice(),
            entries: vec![0; capacity].into_boxed_slice(),
        }
    }

    /// Builds an incrementally maintained query, seeded from the current
    /// membership state so its dense view is correct from construction.
    pub fn build_tracked(self) -> TrackedQuery {
        let capacity = self.world.capacity() as usize;
        let mut query = TrackedQuery {
            world_id: self.world.id(),
            filter: self.filter,
            dense: Vec::with_capacity(capacity),
            slot_of: vec![NO_SLOT; capacity].into_boxed_slice(),
        };
        let issued = self.world.issued() as usize;
        for (entity, mask) in self.world.masks()[..issued].iter().enumerate() {
            if query.filter.matches(mask) {
                query.slot_of[entity] = query.dense.len() as u32;
                query.dense.push(entity as EntityId);
            }
        }
        debug!(seeded = query.dense.len(), "built tracked query");
        query
    }
}

/// Full-rescan query.
///
/// Each [`run`](Query::run) walks every id from zero up to the entity
/// counter's high-water mark, not the live count: worlds with heavy churn
/// keep paying for ids long since freed. Matches are collected into a
/// buffer allocated once at construction; `run` never allocates.
pub struct Query {
    world_id: WorldId,
    filter: QueryFilter,
    results: Box<[EntityId]>,
}

impl Query {
    /// Evaluates the query and returns the matching ids.
    ///
    /// A pure function of current membership state: calling it any number of
    /// times without intervening mutation returns the same set, and it has
    /// no observable side effects.
    ///
    /// ## Panics
    /// Panics if `world` is not the world this query was built on.
    pub fn run(&mut self, world: &World) -> &[EntityId] {
        assert!(self.world_id == world.id(), "query was built on a different world");
        let issued = world.issued() as usize;
        let mut found = 0;
        for (entity, mask) in world.masks()[..issued].iter().enumerate() {
            if self.filter.matches(mask) {
                self.results[found] = entity as EntityId;
                found += 1;
            }
        }
        &self.results[..found]
    }

    /// The include/exclude masks this query evaluates.
    pub fn filter(&self) -> QueryFilter {
        self.filter
    }
}

/// Rescan-with-diff query.
///
/// Behaves like [`Query`], but additionally keeps a per-entity flag
/// recording whether the entity matched on the previous run, and reports
/// the matches whose flag was clear on entry: the entities that *began*
/// matching since the last evaluation.
///
/// Entities that **left** the match set are not reported; their flag is
/// cleared silently, so an entity that leaves and later re-enters is
/// reported as new again.
pub struct EntryQuery {
    world_id: WorldId,
    filter: QueryFilter,
    matched: Box<[bool]>,
    results: Box<[EntityId]>,
    entries: Box<[EntityId]>,
}

impl EntryQuery {
    /// Evaluates the query, returning `(matches, entered)`.
    ///
    /// `matches` is the full current match set; `entered` is the subset that
    /// did not match on the previous run. Two consecutive runs with no
    /// intervening mutation yield an empty `entered` the second time.
    ///
    /// ## Panics
    /// Panics if `world` is not the world this query was built on.
    pub fn run(&mut self, world: &World) -> (&[EntityId], &[EntityId]) {
        assert!(self.world_id == world.id(), "query was built on a different world");
        let issued = world.issued() as usize;
        let mut found = 0;
        let mut entered = 0;
        for (entity, mask) in world.masks()[..issued].iter().enumerate() {
            if self.filter.matches(mask) {
                self.results[found] = entity as EntityId;
                found += 1;
                if !self.matched[entity] {
                    self.matched[entity] = true;
                    self.entries[entered] = entity as EntityId;
                    entered += 1;
                }
            } else {
                self.matched[entity] = false;
            }
        }
        (&self.results[..found], &self.entries[..entered])
    }

    /// The include/exclude masks this query evaluates.
    pub fn filter(&self) -> QueryFilter {
        self.filter
    }
}

/// Incrementally maintained query.
///
/// Holds a dense array of currently matching entities plus an entity → slot
/// index for O(1) removal. The array is updated eagerly at mutation time:
/// every [`World::add_component_with`](crate::World::add_component_with) or
/// [`World::remove_component_with`](crate::World::remove_component_with)
/// call whose component could affect this query must list it as a
/// dependent. The contract is explicit: no hidden registry discovers
/// interested queries at runtime, and a query left out of a relevant
/// mutation goes stale.
///
/// Removal swaps the departing entity with the last dense element and
/// shrinks by one, so match order is not preserved.
pub struct TrackedQuery {
    world_id: WorldId,
    filter: QueryFilter,
    dense: Vec<EntityId>,
    slot_of: Box<[u32]>,
}

impl TrackedQuery {
    /// Current matches, as a direct O(1) view of the dense array.
    ///
    /// Order is arbitrary and changes across removals.
    #[inline]
    pub fn matches(&self) -> &[EntityId] {
        &self.dense
    }

    /// Returns `true` if `entity` is currently in the match set.
    #[inline]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.slot_of
            .get(entity as usize)
            .map(|&slot| slot != NO_SLOT)
            .unwrap_or(false)
    }

    /// Number of current matches.
    #[inline]
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Returns `true` if no entity currently matches.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// The include/exclude masks this query maintains.
    pub fn filter(&self) -> QueryFilter {
        self.filter
    }

    /// Reconciles `entity` against its membership mask after a mutation.
    ///
    /// Transition into the match set appends to the dense array; transition
    /// out swap-removes. A mutation that does not change the entity's match
    /// state is a no-op.
    pub(crate) fn apply(&mut self, world_id: WorldId, entity: EntityId, membership: &Mask) {
        debug_assert!(
            self.world_id == world_id,
            "tracked query was built on a different world"
        );
        let matches_now = self.filter.matches(membership);
        let slot = self.slot_of[entity as usize];
        let matched_before = slot != NO_SLOT;
        if matches_now == matched_before {
            return;
        }
        if matches_now {
            self.slot_of[entity as usize] = self.dense.len() as u32;
            self.dense.push(entity);
        } else {
            let last = self.dense[self.dense.len() - 1];
            self.dense.swap_remove(slot as usize);
            self.slot_of[last as usize] = slot;
            self.slot_of[entity as usize] = NO_SLOT;
        }
    }
}
