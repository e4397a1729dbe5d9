//! Core identifiers, capacities, and the membership bitmask.
//!
//! This module defines the **fundamental types and bit layouts** shared by the
//! allocator, the membership table, and the query engine. Everything here is
//! `Copy`, allocation-free, and cheap to pass by value.
//!
//! ## Design
//!
//! - Entities are bare `u32` indices into fixed-capacity storage; an entity
//!   has no representation of its own beyond its membership mask.
//! - Components are identified by a bit position (`ComponentId`) assigned
//!   densely at definition time.
//! - Membership is a fixed-size bitset ([`Mask`]) stored as an array of
//!   `u64` words ("lanes"). With the default [`COMPONENT_CAP`] of 64 the
//!   mask is a single word; raising the cap only changes [`MASK_WORDS`],
//!   since every operation already loops over the word array.
//!
//! Bit widths and capacities are validated with compile-time assertions so a
//! bad constant edit fails the build rather than corrupting masks at runtime.

/// Bare entity identifier: an index in `[0, capacity)`.
pub type EntityId = u32;

/// Component identifier: a bit position in the membership mask.
pub type ComponentId = u16;

/// Count of issued or live entities.
pub type EntityCount = u32;

/// Identity stamp distinguishing worlds within one process.
///
/// Components and queries carry the stamp of the world that created them so
/// that cross-world use is caught at the API boundary instead of silently
/// reinterpreting bit positions.
pub type WorldId = u32;

/// Maximum number of component kinds a world may define.
///
/// This is the membership mask's bit width. Definition number
/// `COMPONENT_CAP + 1` fails with a capacity error.
pub const COMPONENT_CAP: usize = 64;

/// Number of `u64` words required to hold [`COMPONENT_CAP`] bits.
pub const MASK_WORDS: usize = (COMPONENT_CAP + 63) / 64;

/// Entity capacity used by the [`World`](crate::World) `Default` impl.
pub const DEFAULT_ENTITY_CAP: u32 = 1_000_000;

const _: [(); 1] = [(); (MASK_WORDS > 0) as usize];
const _: [(); 1] = [(); (COMPONENT_CAP <= MASK_WORDS * 64) as usize];
const _: [(); 1] = [(); (COMPONENT_CAP <= ComponentId::MAX as usize + 1) as usize];

/// Fixed-width bitset recording a set of components.
///
/// One `Mask` is stored per entity slot in the membership table; queries hold
/// one include and one exclude `Mask`. Bit `k` set means the component with
/// `ComponentId == k` is present in the set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Mask {
    /// Packed component bitset, least significant bit of word 0 first.
    pub words: [u64; MASK_WORDS],
}

impl Default for Mask {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Mask {
    /// The empty set.
    pub const EMPTY: Mask = Mask { words: [0u64; MASK_WORDS] };

    /// Sets the bit corresponding to `component_id`.
    #[inline]
    pub fn set(&mut self, component_id: ComponentId) {
        let index = (component_id as usize) / 64;
        let bit = (component_id as usize) % 64;
        self.words[index] |= 1u64 << bit;
    }

    /// Clears the bit corresponding to `component_id`.
    #[inline]
    pub fn clear(&mut self, component_id: ComponentId) {
        let index = (component_id as usize) / 64;
        let bit = (component_id as usize) % 64;
        self.words[index] &= !(1u64 << bit);
    }

    /// Returns `true` if `component_id` is present in this mask.
    #[inline]
    pub fn has(&self, component_id: ComponentId) -> bool {
        let index = (component_id as usize) / 64;
        let bit = (component_id as usize) % 64;
        (self.words[index] >> bit) & 1 == 1
    }

    /// Returns `true` if no bit is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&word| word == 0)
    }

    /// Returns `true` if every bit of `other` is also set in `self`.
    #[inline]
    pub fn contains_all(&self, other: &Mask) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(word, required)| (word & required) == *required)
    }

    /// Returns `true` if `self` and `other` share at least one set bit.
    #[inline]
    pub fn intersects(&self, other: &Mask) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .any(|(a, b)| (a & b) != 0)
    }

    /// Number of set bits.
    #[inline]
    pub fn count(&self) -> u32 {
        self.words.iter().map(|word| word.count_ones()).sum()
    }

    /// Iterates over all component ids set in this mask, ascending.
    pub fn iterate_over_components(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.words.iter().enumerate().flat_map(|(word_index, &word)| {
            let base = word_index * 64;
            let mut bits = word;
            std::iter::from_fn(move || {
                if bits == 0 {
                    return None;
                }
                let tz = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                Some((base + tz) as ComponentId)
            })
        })
    }
}

/// Builds a mask from a list of component ids.
pub fn build_mask(component_ids: &[ComponentId]) -> Mask {
    let mut mask = Mask::default();
    for &component_id in component_ids {
        mask.set(component_id);
    }
    mask
}
