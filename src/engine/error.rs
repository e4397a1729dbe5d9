//! Error types for entity lifecycle, component definition, and membership.
//!
//! This module declares focused, composable error types used across the
//! store. Each error models a single precondition violation and carries
//! enough context to make the failure actionable (offending entity, bit
//! position, requested vs. available capacity).
//!
//! ## Goals
//! * **Specificity:** One type per failure mode; no stringly-typed catch-all.
//! * **Ergonomics:** All errors implement [`std::error::Error`] and
//!   [`fmt::Display`], and provide `From<T>` conversions into the aggregate
//!   [`EcsError`], so call sites can use `?` freely.
//! * **Contract, not recovery:** Every error here is a synchronous
//!   precondition violation. None are transient and none should be retried;
//!   callers are expected to treat them as programming-contract failures.
//!
//! ## Typical flow
//! Low-level operations (allocator, membership table) return their dedicated
//! error type. `World` methods bubble these into [`EcsError`] via `?`.
//!
//! ## Display vs. Debug
//! * [`fmt::Display`] is short, imperative, and log-friendly.
//! * [`fmt::Debug`] (derived) retains full structure for diagnostics.

use std::fmt;

use crate::engine::types::{ComponentId, EntityId};

/// Identifies which fixed resource a [`CapacityError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityKind {
    /// Entity id allocation against the world's entity capacity.
    Entities,

    /// Component id allocation against the membership mask's bit width.
    ComponentIds,
}

/// Returned when an id-issuing operation would overrun fixed storage.
///
/// Entity storage, membership storage, and component field buffers are all
/// sized once at world creation; this error is how every issuing path fails
/// instead of silently growing.
///
/// ### Fields
/// * `kind` — Which id space was exhausted.
/// * `needed` — Total ids the operation would have required.
/// * `capacity` — The configured bound that prevented it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError {
    /// Which id space was exhausted.
    pub kind: CapacityKind,

    /// Total ids the operation would have required.
    pub needed: u64,

    /// Configured bound that prevented the operation.
    pub capacity: u64,
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CapacityKind::Entities => write!(
                f,
                "entity limit reached ({} needed; capacity {})",
                self.needed, self.capacity
            ),
            CapacityKind::ComponentIds => write!(
                f,
                "component id space exhausted ({} needed; mask width {})",
                self.needed, self.capacity
            ),
        }
    }
}

impl std::error::Error for CapacityError {}

/// Returned when attaching a component an entity already has.
///
/// Attach is a strict `absent -> present` transition; repeating it is a
/// caller bug, never a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateComponentError {
    /// Entity that already holds the component.
    pub entity: EntityId,

    /// Bit position of the component.
    pub component_id: ComponentId,
}

impl fmt::Display for DuplicateComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entity {} already has component {}",
            self.entity, self.component_id
        )
    }
}

impl std::error::Error for DuplicateComponentError {}

/// Returned when detaching a component an entity does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingComponentError {
    /// Entity that lacks the component.
    pub entity: EntityId,

    /// Bit position of the component.
    pub component_id: ComponentId,
}

impl fmt::Display for MissingComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entity {} does not have component {}",
            self.entity, self.component_id
        )
    }
}

impl std::error::Error for MissingComponentError {}

/// Returned when destroying an entity whose membership mask is non-zero.
///
/// An entity may only be returned to the free list once every component has
/// been detached; otherwise a reused id would inherit stale membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityHasComponentsError {
    /// Entity that still holds components.
    pub entity: EntityId,

    /// Number of components still attached.
    pub attached: u32,
}

impl fmt::Display for EntityHasComponentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entity {} still has {} component(s) attached",
            self.entity, self.attached
        )
    }
}

impl std::error::Error for EntityHasComponentsError {}

/// Returned when a component schema fails validation.
///
/// Field element kinds are a closed set of fixed-width numerics, so the
/// remaining checks are structural: a field name must be non-empty and must
/// not repeat an earlier field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSchemaError {
    /// Name of the offending field (empty string for an unnamed field).
    pub field: String,

    /// Short description of the violation.
    pub problem: &'static str,
}

impl fmt::Display for InvalidSchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid component schema: field `{}` {}",
            self.field, self.problem
        )
    }
}

impl std::error::Error for InvalidSchemaError {}

/// Returned when an operation names an entity id that was never issued.
///
/// Ids are issued densely from zero; anything at or above the high-water
/// mark cannot refer to an entity of this world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownEntityError {
    /// Offending entity id.
    pub entity: EntityId,

    /// Current high-water mark (first never-issued id).
    pub issued: EntityId,
}

impl fmt::Display for UnknownEntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entity id {} was never issued (high-water mark {})",
            self.entity, self.issued
        )
    }
}

impl std::error::Error for UnknownEntityError {}

/// Aggregate error for all store operations.
///
/// Every variant preserves the underlying structured error so callers can
/// match on the failure mode or log a readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// Attach on an entity that already has the component.
    DuplicateComponent(DuplicateComponentError),

    /// Detach on an entity that lacks the component.
    MissingComponent(MissingComponentError),

    /// Destroy on an entity with a non-zero membership mask.
    EntityHasComponents(EntityHasComponentsError),

    /// A component schema failed validation.
    InvalidSchema(InvalidSchemaError),

    /// Entity or component id allocation would exceed a fixed bound.
    CapacityExceeded(CapacityError),

    /// An operation named an entity id that was never issued.
    UnknownEntity(UnknownEntityError),
}

impl fmt::Display for EcsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EcsError::DuplicateComponent(e) => write!(f, "{e}"),
            EcsError::MissingComponent(e) => write!(f, "{e}"),
            EcsError::EntityHasComponents(e) => write!(f, "{e}"),
            EcsError::InvalidSchema(e) => write!(f, "{e}"),
            EcsError::CapacityExceeded(e) => write!(f, "{e}"),
            EcsError::UnknownEntity(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EcsError {}

impl From<DuplicateComponentError> for EcsError {
    fn from(e: DuplicateComponentError) -> Self {
        EcsError::DuplicateComponent(e)
    }
}

impl From<MissingComponentError> for EcsError {
    fn from(e: MissingComponentError) -> Self {
        EcsError::MissingComponent(e)
    }
}

impl From<EntityHasComponentsError> for EcsError {
    fn from(e: EntityHasComponentsError) -> Self {
        EcsError::EntityHasComponents(e)
    }
}

impl From<InvalidSchemaError> for EcsError {
    fn from(e: InvalidSchemaError) -> Self {
        EcsError::InvalidSchema(e)
    }
}

impl From<CapacityError> for EcsError {
    fn from(e: CapacityError) -> Self {
        EcsError::CapacityExceeded(e)
    }
}

impl From<UnknownEntityError> for EcsError {
    fn from(e: UnknownEntityError) -> Self {
        EcsError::UnknownEntity(e)
    }
}

/// Convenience alias for results carrying [`EcsError`].
pub type EcsResult<T> = Result<T, EcsError>;
