//! Breakpoints: the interval boundaries that partition the input alphabet.
//!
//! Take the classes `[p-z]` and `[pt]`, held as the intervals
//!
//! ```text
//! [p-z] = [p,{)
//! [pt]  = [p,q),[t,u)
//! ```
//!
//! Their breakpoints are the union of all the `lo` and `hi` bounds,
//! `{p,q,t,u,{}`. Between two adjacent breakpoints every class is either
//! entirely present or entirely absent, so a single representative value
//! decides membership for the whole range.

use crate::automaton::Automaton;
use crate::state::StateSet;

/// Collect the sorted, duplicate-free breakpoints of every labelled edge
/// leaving a state in `subset`.
///
/// Returns an empty vector, without allocating, when none of the states has
/// a labelled edge.
pub fn breakpoints<F>(nfa: &Automaton<F>, subset: &StateSet) -> Vec<u32> {
    let nintervals: usize = subset
        .iter()
        .flat_map(|state| nfa.node(state).labelled_edges())
        .map(|(class, _)| class.len())
        .sum();
    if nintervals == 0 {
        return Vec::new();
    }

    let mut breaks = Vec::with_capacity(nintervals * 2);
    for state in subset.iter() {
        for (class, _) in nfa.node(state).labelled_edges() {
            for (lo, hi) in class.intervals() {
                breaks.push(lo);
                breaks.push(hi);
            }
        }
    }

    breaks.sort_unstable();
    breaks.dedup();
    breaks.shrink_to_fit();
    breaks
}
