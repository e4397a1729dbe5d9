//! Component schemas and struct-of-arrays field storage.
//!
//! A component is a bit position in the membership mask plus zero or more
//! named fields. Each field is one contiguous, zero-initialized buffer of a
//! fixed-width numeric element kind, sized to the world's entity capacity
//! and indexed directly by entity id. A component with no fields is a *tag*
//! and contributes only its membership bit.
//!
//! ## Ownership
//!
//! The [`Component`] handle returned by
//! [`World::create_component`](crate::World::create_component) exclusively
//! owns its field buffers. There is no global registry: the handle is passed
//! back explicitly to attach/detach calls, and field data is read and
//! written through the handle itself. The world only ever sees the bit
//! position.
//!
//! ## Typed access
//!
//! Columns are stored behind the [`FieldColumn`] enum (a closed set of
//! eight element kinds) and recovered as typed slices through
//! [`FieldElement`], mirroring a type-erased column store whose downcast set
//! is known in advance.

use std::fmt;

use crate::engine::error::InvalidSchemaError;
use crate::engine::types::{ComponentId, Mask, WorldId};

/// Element kinds a component field may use.
///
/// The set is closed: every kind is a fixed-width numeric, so a schema can
/// never smuggle in a variable-width or non-numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// 8-bit signed integer.
    I8,
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit signed integer.
    I16,
    /// 16-bit unsigned integer.
    U16,
    /// 32-bit signed integer.
    I32,
    /// 32-bit unsigned integer.
    U32,
    /// 32-bit float.
    F32,
    /// 64-bit float.
    F64,
}

impl ElementKind {
    /// Width of one element in bytes.
    #[inline]
    pub fn byte_width(self) -> usize {
        match self {
            ElementKind::I8 | ElementKind::U8 => 1,
            ElementKind::I16 | ElementKind::U16 => 2,
            ElementKind::I32 | ElementKind::U32 | ElementKind::F32 => 4,
            ElementKind::F64 => 8,
        }
    }
}

/// One named field in a component schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name, unique within the schema.
    pub name: String,

    /// Element kind of the field's buffer.
    pub kind: ElementKind,
}

/// Builder for a component's field layout.
///
/// An empty schema defines a tag component. Fields are appended in
/// declaration order:
///
/// ```
/// use sim_store::{ElementKind, Schema};
///
/// let position = Schema::new()
///     .field("x", ElementKind::F32)
///     .field("y", ElementKind::F32);
/// assert_eq!(position.bytes_per_entity(), 8);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldDef>,
}

impl Schema {
    /// Creates an empty schema (a tag component).
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field of the given element kind.
    pub fn field(mut self, name: impl Into<String>, kind: ElementKind) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            kind,
        });
        self
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Returns `true` if the schema declares no fields.
    pub fn is_tag(&self) -> bool {
        self.fields.is_empty()
    }

    /// Bytes of field storage required per entity slot.
    pub fn bytes_per_entity(&self) -> usize {
        self.fields.iter().map(|field| field.kind.byte_width()).sum()
    }

    /// Structural validation: every field must carry a non-empty name that
    /// does not repeat an earlier field.
    pub(crate) fn validate(&self) -> Result<(), InvalidSchemaError> {
        for (index, field) in self.fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(InvalidSchemaError {
                    field: field.name.clone(),
                    problem: "has no name",
                });
            }
            if self.fields[..index].iter().any(|f| f.name == field.name) {
                return Err(InvalidSchemaError {
                    field: field.name.clone(),
                    problem: "duplicates an earlier field",
                });
            }
        }
        Ok(())
    }
}

/// One contiguous, fixed-length field buffer.
///
/// Every variant holds `capacity` zero-initialized elements, indexed by
/// entity id. The buffer never grows or shrinks after allocation.
pub enum FieldColumn {
    /// 8-bit signed elements.
    I8(Box<[i8]>),
    /// 8-bit unsigned elements.
    U8(Box<[u8]>),
    /// 16-bit signed elements.
    I16(Box<[i16]>),
    /// 16-bit unsigned elements.
    U16(Box<[u16]>),
    /// 32-bit signed elements.
    I32(Box<[i32]>),
    /// 32-bit unsigned elements.
    U32(Box<[u32]>),
    /// 32-bit float elements.
    F32(Box<[f32]>),
    /// 64-bit float elements.
    F64(Box<[f64]>),
}

impl FieldColumn {
    /// Allocates a zeroed buffer of `capacity` elements of `kind`.
    fn zeroed(kind: ElementKind, capacity: usize) -> Self {
        match kind {
            ElementKind::I8 => FieldColumn::I8(vec![0; capacity].into_boxed_slice()),
            ElementKind::U8 => FieldColumn::U8(vec![0; capacity].into_boxed_slice()),
            ElementKind::I16 => FieldColumn::I16(vec![0; capacity].into_boxed_slice()),
            ElementKind::U16 => FieldColumn::U16(vec![0; capacity].into_boxed_slice()),
            ElementKind::I32 => FieldColumn::I32(vec![0; capacity].into_boxed_slice()),
            ElementKind::U32 => FieldColumn::U32(vec![0; capacity].into_boxed_slice()),
            ElementKind::F32 => FieldColumn::F32(vec![0.0; capacity].into_boxed_slice()),
            ElementKind::F64 => FieldColumn::F64(vec![0.0; capacity].into_boxed_slice()),
        }
    }

    /// Element kind stored by this column.
    pub fn kind(&self) -> ElementKind {
        match self {
            FieldColumn::I8(_) => ElementKind::I8,
            FieldColumn::U8(_) => ElementKind::U8,
            FieldColumn::I16(_) => ElementKind::I16,
            FieldColumn::U16(_) => ElementKind::U16,
            FieldColumn::I32(_) => ElementKind::I32,
            FieldColumn::U32(_) => ElementKind::U32,
            FieldColumn::F32(_) => ElementKind::F32,
            FieldColumn::F64(_) => ElementKind::F64,
        }
    }

    /// Buffer length (the world's entity capacity).
    pub fn len(&self) -> usize {
        match self {
            FieldColumn::I8(v) => v.len(),
            FieldColumn::U8(v) => v.len(),
            FieldColumn::I16(v) => v.len(),
            FieldColumn::U16(v) => v.len(),
            FieldColumn::I32(v) => v.len(),
            FieldColumn::U32(v) => v.len(),
            FieldColumn::F32(v) => v.len(),
            FieldColumn::F64(v) => v.len(),
        }
    }

    /// Returns `true` if the buffer is empty (capacity-zero world).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Typed view of the buffer, or `None` if `T` does not match the
    /// column's element kind.
    #[inline]
    pub fn as_slice<T: FieldElement>(&self) -> Option<&[T]> {
        T::from_column(self)
    }

    /// Typed mutable view of the buffer, or `None` on a kind mismatch.
    #[inline]
    pub fn as_mut_slice<T: FieldElement>(&mut self) -> Option<&mut [T]> {
        T::from_column_mut(self)
    }
}

impl fmt::Debug for FieldColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldColumn::{:?}(len={})", self.kind(), self.len())
    }
}

/// Rust element types usable as component field elements.
///
/// Implemented exactly for the eight kinds of [`ElementKind`]; each
/// implementation knows how to recover its typed slice from a
/// [`FieldColumn`].
pub trait FieldElement: Copy + Default + 'static {
    /// The element kind this type maps to.
    const KIND: ElementKind;

    /// Typed view of a column holding this element kind.
    fn from_column(column: &FieldColumn) -> Option<&[Self]>;

    /// Typed mutable view of a column holding this element kind.
    fn from_column_mut(column: &mut FieldColumn) -> Option<&mut [Self]>;
}

macro_rules! impl_field_element {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl FieldElement for $ty {
                const KIND: ElementKind = ElementKind::$kind;

                #[inline]
                fn from_column(column: &FieldColumn) -> Option<&[Self]> {
                    match column {
                        FieldColumn::$kind(buffer) => Some(buffer),
                        _ => None,
                    }
                }

                #[inline]
                fn from_column_mut(column: &mut FieldColumn) -> Option<&mut [Self]> {
                    match column {
                        FieldColumn::$kind(buffer) => Some(buffer),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_field_element! {
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    f32 => F32,
    f64 => F64,
}

struct Field {
    name: String,
    column: FieldColumn,
}

/// A defined component: a membership bit plus its field buffers.
///
/// Handles are created once per world via
/// [`World::create_component`](crate::World::create_component) and live for
/// the world's lifetime. The handle owns all field storage; attach/detach
/// calls only consult [`Component::id`].
pub struct Component {
    world_id: WorldId,
    component_id: ComponentId,
    fields: Vec<Field>,
}

impl Component {
    pub(crate) fn new(
        world_id: WorldId,
        component_id: ComponentId,
        schema: &Schema,
        capacity: usize,
    ) -> Self {
        let fields = schema
            .fields()
            .iter()
            .map(|def| Field {
                name: def.name.clone(),
                column: FieldColumn::zeroed(def.kind, capacity),
            })
            .collect();
        Self {
            world_id,
            component_id,
            fields,
        }
    }

    /// Bit position of this component in the membership mask.
    #[inline]
    pub fn id(&self) -> ComponentId {
        self.component_id
    }

    /// Single-bit mask for this component.
    #[inline]
    pub fn bit(&self) -> Mask {
        let mut mask = Mask::default();
        mask.set(self.component_id);
        mask
    }

    /// Returns `true` if this component has no fields.
    pub fn is_tag(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of declared fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Bytes of field storage per entity slot.
    pub fn bytes_per_entity(&self) -> usize {
        self.fields
            .iter()
            .map(|field| field.column.kind().byte_width())
            .sum()
    }

    /// The column for `name`, if declared.
    pub fn field(&self, name: &str) -> Option<&FieldColumn> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.column)
    }

    /// Mutable column for `name`, if declared.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut FieldColumn> {
        self.fields
            .iter_mut()
            .find(|field| field.name == name)
            .map(|field| &mut field.column)
    }

    /// Typed slice for field `name`, indexed by entity id.
    ///
    /// `None` if the field is undeclared or `T` does not match its kind.
    pub fn column<T: FieldElement>(&self, name: &str) -> Option<&[T]> {
        self.field(name)?.as_slice::<T>()
    }

    /// Typed mutable slice for field `name`, indexed by entity id.
    pub fn column_mut<T: FieldElement>(&mut self, name: &str) -> Option<&mut [T]> {
        self.field_mut(name)?.as_mut_slice::<T>()
    }

    /// Stamp of the world this component was defined on.
    #[inline]
    pub(crate) fn world_id(&self) -> WorldId {
        self.world_id
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Component {{ id: {}, fields: {}, bytes_per_entity: {} }}",
            self.component_id,
            self.fields.len(),
            self.bytes_per_entity()
        )
    }
}
