//! The equivalence map between NFA state subsets and DFA nodes.
//!
//! Only lives for the duration of one subset construction.

use rustc_hash::FxHashMap as HashMap;

use crate::automaton::Automaton;
use crate::state::{StateId, StateSet};

const BLOCK: usize = 32;

/// Associates each DFA node with the exact set of NFA nodes it stands for.
///
/// Slots are indexed by DFA node and allocated in blocks of 32. The hash
/// index makes lookup O(1) on average; since every registered subset is
/// distinct, a hit is the same node a scan in creation order would return.
pub struct EquivMap<'n, F> {
    nfa: &'n Automaton<F>,
    sets: Vec<Option<StateSet>>,
    index: HashMap<StateSet, StateId>,
}

impl<'n, F> EquivMap<'n, F> {
    pub fn new(nfa: &'n Automaton<F>) -> Self {
        Self {
            nfa,
            sets: Vec::new(),
            index: HashMap::default(),
        }
    }

    /// The subset associated with DFA node `id`.
    ///
    /// A slot that was never registered reads as an empty set sized to the
    /// NFA.
    pub fn get(&mut self, id: StateId) -> &StateSet {
        self.slot_mut(id)
    }

    /// Number of registered subsets.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Consume the map, returning the registered subsets in DFA node order.
    pub fn into_subsets(self) -> Vec<StateSet> {
        let registered = self.index.len();
        self.sets.into_iter().take(registered).flatten().collect()
    }

    fn slot_mut(&mut self, id: StateId) -> &mut StateSet {
        let i = id as usize;
        if self.sets.len() <= i {
            let avail = (i / BLOCK + 1) * BLOCK;
            self.sets.resize_with(avail, || None);
        }
        let capacity = self.nfa.len();
        self.sets[i].get_or_insert_with(|| StateSet::with_capacity(capacity))
    }
}

impl<F: Copy + PartialEq> EquivMap<'_, F> {
    /// Find the DFA node standing for `subset`, adding one to `dfa` if the
    /// subset has not been seen yet.
    ///
    /// A new node receives the final markers of every NFA node in `subset`.
    pub fn lookup(&mut self, dfa: &mut Automaton<F>, subset: &StateSet) -> StateId {
        if let Some(&id) = self.index.get(subset) {
            return id;
        }

        let id = dfa.add_node();
        for state in subset.iter() {
            for &marker in self.nfa.finals(state) {
                dfa.add_final(id, marker);
            }
        }

        self.slot_mut(id).copy_from(subset);
        self.index.insert(subset.clone(), id);
        id
    }
}
