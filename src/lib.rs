//! # sim_store
//!
//! Fixed-capacity entity-component store for simulation state.
//!
//! A [`World`] associates bare integer entity ids with sets of typed data
//! records ("components") and answers *"which entities currently have
//! components {A, B, ...} and not {C, ...}"* efficiently, once per
//! simulation tick.
//!
//! ## Design Goals
//! - All storage sized once at world creation (no growth, no reallocation)
//! - O(1) attach/detach via per-entity membership bitmasks
//! - Struct-of-arrays field storage, one contiguous buffer per field
//! - Three query strategies: full rescan, rescan-with-diff, and
//!   mutation-maintained dense match sets
//! - Explicit handles everywhere; no global registries
//!
//! ## Example
//! ```
//! use sim_store::prelude::*;
//!
//! # fn main() -> sim_store::EcsResult<()> {
//! let mut world = World::new(10_000);
//! let position = world.create_component(
//!     &Schema::new().field("x", ElementKind::F32).field("y", ElementKind::F32),
//! )?;
//! let mut velocity = world.create_component(
//!     &Schema::new().field("dx", ElementKind::F32).field("dy", ElementKind::F32),
//! )?;
//!
//! let entity = world.create_entity()?;
//! world.add_component(&position, entity)?;
//! world.add_component(&velocity, entity)?;
//! velocity.column_mut::<f32>("dx").unwrap()[entity as usize] = 1.0;
//!
//! let mut moving = world.query().with(&position).with(&velocity).build();
//! assert_eq!(moving.run(&world), &[entity]);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(dead_code)]

pub mod engine;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (Public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use engine::world::World;

pub use engine::component::{
    Component,
    ElementKind,
    FieldColumn,
    FieldDef,
    FieldElement,
    Schema,
};

pub use engine::entity::EntityAllocator;
pub use engine::membership::MembershipTable;

pub use engine::query::{
    EntryQuery,
    Query,
    QueryBuilder,
    QueryFilter,
    TrackedQuery,
};

pub use engine::error::{
    CapacityError,
    CapacityKind,
    DuplicateComponentError,
    EcsError,
    EcsResult,
    EntityHasComponentsError,
    InvalidSchemaError,
    MissingComponentError,
    UnknownEntityError,
};

pub use engine::types::{
    build_mask,
    ComponentId,
    EntityCount,
    EntityId,
    Mask,
    COMPONENT_CAP,
    DEFAULT_ENTITY_CAP,
    MASK_WORDS,
};

// ─────────────────────────────────────────────────────────────────────────────
// Prelude
// ─────────────────────────────────────────────────────────────────────────────

/// Commonly used store types.
///
/// Import with:
/// ```rust
/// use sim_store::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Component,
        EcsError,
        EcsResult,
        ElementKind,
        EntityId,
        EntryQuery,
        Mask,
        Query,
        Schema,
        TrackedQuery,
        World,
    };
}
