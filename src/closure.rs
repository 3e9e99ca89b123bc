//! Epsilon closure over an automaton's empty transitions.

use crate::automaton::Automaton;
use crate::state::{StateId, StateSet};

/// Expand `subset` in place to every state reachable from it through zero or
/// more epsilon edges of `automaton`.
///
/// States already in the set are never queued twice, so epsilon cycles
/// terminate.
pub fn epsilon_closure<F>(automaton: &Automaton<F>, subset: &mut StateSet) {
    let mut worklist: Vec<StateId> = subset.iter().collect();
    while let Some(state) = worklist.pop() {
        for dest in automaton.node(state).epsilon_targets() {
            if subset.insert(dest) {
                worklist.push(dest);
            }
        }
    }
}

impl<F> Automaton<F> {
    /// The epsilon closure of the single state `state`.
    pub fn epsilon_closure_of(&self, state: StateId) -> StateSet {
        let mut subset = StateSet::singleton(state, self.len());
        epsilon_closure(self, &mut subset);
        subset
    }
}
