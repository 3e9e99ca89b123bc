//! State identifiers and fixed-capacity state sets.

use fixedbitset::FixedBitSet;
use std::fmt;

/// A state identifier represented as a u32.
pub type StateId = u32;

/// A set of states backed by a fixed-size bit set.
///
/// The capacity is fixed at creation, normally to the node count of the
/// automaton whose states the set ranges over. Inserting a state at or beyond
/// the capacity panics.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    /// Create a new empty state set with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Create a state set containing a single state.
    pub fn singleton(state: StateId, capacity: usize) -> Self {
        let mut set = Self::with_capacity(capacity);
        set.insert(state);
        set
    }

    /// Insert a state, returning `true` if it was not already present.
    pub fn insert(&mut self, state: StateId) -> bool {
        !self.bits.put(state as usize)
    }

    /// Remove a state, returning `true` if it was present.
    pub fn remove(&mut self, state: StateId) -> bool {
        let present = self.contains(state);
        if present {
            self.bits.set(state as usize, false);
        }
        present
    }

    /// Check if the set contains a state.
    pub fn contains(&self, state: StateId) -> bool {
        self.bits.contains(state as usize)
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Get the number of states in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// The number of states the set can hold.
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Overwrite this set with the contents of `other`, reusing storage.
    pub fn copy_from(&mut self, other: &StateSet) {
        self.bits.clone_from(&other.bits);
    }

    /// Check whether every member of this set is also in `other`.
    pub fn is_subset(&self, other: &StateSet) -> bool {
        self.bits.is_subset(&other.bits)
    }

    /// Iterate over all states in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones().map(|i| i as StateId)
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
