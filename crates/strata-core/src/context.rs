//! The context vector: one value id per dimension, in dimension id order.
//!
//! A context identifies where an override applies. Slot `i` holds the
//! interned value id for dimension `i`; `ValueId::NONE` (id 0) means the
//! dimension is not constrained by this override. All operations are pure
//! functions over the id vector.

use crate::registry::{DimensionId, ValueId};

/// An ordered vector of per-dimension value ids.
///
/// Contexts compare lexicographically over the full vector, which is the
/// specificity order the linearizer relies on. A context narrower than the
/// registry (fewer slots) is treated as if padded with trailing
/// `ValueId::NONE` slots; the all-zero context is the unconditional default
/// and contains every other context.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Context {
    slots: Vec<ValueId>,
}

impl Context {
    /// The unconditional context (no slots, degree 0).
    pub fn unconditional() -> Self {
        Self::default()
    }

    /// An all-zero context with one slot per dimension.
    pub fn with_width(width: usize) -> Self {
        Self {
            slots: vec![ValueId::NONE; width],
        }
    }

    pub fn from_slots(slots: Vec<ValueId>) -> Self {
        Self { slots }
    }

    pub fn width(&self) -> usize {
        self.slots.len()
    }

    /// Value id at the given slot; `NONE` past the end of the vector.
    #[inline]
    pub fn slot(&self, index: usize) -> ValueId {
        self.slots.get(index).copied().unwrap_or(ValueId::NONE)
    }

    /// Value id for a dimension.
    #[inline]
    pub fn get(&self, dimension: DimensionId) -> ValueId {
        self.slot(dimension.index())
    }

    pub fn set(&mut self, dimension: DimensionId, value: ValueId) {
        self.slots[dimension.index()] = value;
    }

    /// Number of leading slots up to and including the last non-zero slot.
    ///
    /// 0 for the unconditional context. Invariant under appending trailing
    /// zero slots.
    pub fn degree(&self) -> usize {
        let mut degree = self.slots.len();
        for slot in self.slots.iter().rev() {
            if *slot != ValueId::NONE {
                break;
            }
            degree -= 1;
        }
        degree
    }

    /// Value id of the last meaningful slot; `NONE` for degree 0.
    pub fn last(&self) -> ValueId {
        match self.degree() {
            0 => ValueId::NONE,
            d => self.slots[d - 1],
        }
    }

    /// Count of leading slots where `self` and `other` agree, stopping at
    /// the first mismatch.
    pub fn prefix_depth(&self, other: &Context) -> usize {
        let mut depth = 0;
        for (i, slot) in self.slots.iter().enumerate() {
            if *slot != other.slot(i) {
                break;
            }
            depth += 1;
        }
        depth
    }

    /// Positional generalization: `self` contains `other` iff the two agree
    /// up to the first mismatch and every one of `self`'s slots from there
    /// on is zero.
    ///
    /// Note this is not a per-slot "zero or equal" test: a zero slot
    /// *before* the first mismatch must be matched by a zero in `other`.
    pub fn contains(&self, other: &Context) -> bool {
        let mut i = 0;
        while i < self.slots.len() {
            if self.slots[i] != other.slot(i) {
                break;
            }
            i += 1;
        }
        self.slots[i..].iter().all(|slot| *slot == ValueId::NONE)
    }

    /// Whether this is the unconditional (all-zero) context.
    pub fn is_unconditional(&self) -> bool {
        self.degree() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = ValueId> + '_ {
        self.slots.iter().copied()
    }
}
