//! Subset construction algorithm for converting ε-NFA to DFA.
//!
//! Each DFA node stands for the epsilon-closed set of NFA nodes the NFA could
//! be in. Edges are split along the breakpoints of the NFA classes, so the
//! DFA only distinguishes characters the NFA distinguishes.
//!
//! Equivalent DFA states are not merged: two different NFA subsets that
//! accept the same language stay two DFA nodes. Callers that need a minimal
//! automaton have to minimize the result themselves.

use std::convert::Infallible;

use crate::automaton::Automaton;
use crate::breaks::breakpoints;
use crate::closure::epsilon_closure;
use crate::config::Config;
use crate::equiv::EquivMap;
use crate::state::{StateId, StateSet};
use crate::{Error, Result};

/// Convert an epsilon-NFA to a DFA using the powerset construction algorithm.
///
/// The NFA's start state is node 0; so is the DFA's. An empty NFA yields an
/// empty DFA.
pub fn subset_construction<F: Copy + PartialEq>(nfa: &Automaton<F>) -> Automaton<F> {
    let mut dfa = Automaton::new();
    match make_dfa(&mut dfa, nfa, |_| Ok::<(), Infallible>(())) {
        Ok(_) => dfa,
        Err(never) => match never {},
    }
}

/// Like [`subset_construction`], honouring `config`.
pub fn subset_construction_with<F: Copy + PartialEq>(
    nfa: &Automaton<F>,
    config: &Config,
) -> Result<Automaton<F>> {
    subset_construction_mapped(nfa, config).map(|(dfa, _)| dfa)
}

/// Build the DFA and also return, for each DFA node, the NFA subset it was
/// built from.
pub fn subset_construction_mapped<F: Copy + PartialEq>(
    nfa: &Automaton<F>,
    config: &Config,
) -> Result<(Automaton<F>, Vec<StateSet>)> {
    let mut dfa = Automaton::new();
    let limit = config.get_state_limit();
    let subsets = make_dfa(&mut dfa, nfa, |dfa| check_limit(dfa, limit))?;
    Ok((dfa, subsets))
}

fn check_limit<F>(dfa: &Automaton<F>, limit: Option<usize>) -> Result<()> {
    match limit {
        Some(limit) if dfa.len() > limit => Err(Error::StateLimitExceeded(limit)),
        _ => Ok(()),
    }
}

/// Fill the empty `dfa` with the deterministic equivalent of `nfa`.
///
/// `check` runs after every lookup that may have added a DFA node and can
/// abort the construction.
fn make_dfa<F, E>(
    dfa: &mut Automaton<F>,
    nfa: &Automaton<F>,
    mut check: impl FnMut(&Automaton<F>) -> Result<(), E>,
) -> Result<Vec<StateSet>, E>
where
    F: Copy + PartialEq,
{
    if nfa.is_empty() {
        return Ok(Vec::new());
    }
    let mut equiv = EquivMap::new(nfa);

    // the initial DFA node is the epsilon closure of the NFA's start
    let start = nfa.epsilon_closure_of(0);
    equiv.lookup(dfa, &start);
    check(&*dfa)?;

    // nodes appended during an iteration are picked up by later ones
    let mut current: StateId = 0;
    while (current as usize) < dfa.len() {
        let src = equiv.get(current).clone();
        let breaks = breakpoints(nfa, &src);

        for window in breaks.windows(2) {
            let (lo, hi) = (window[0], window[1]);

            // [lo, hi) is uniform for every class, so lo decides it
            let mut dest = StateSet::with_capacity(nfa.len());
            for state in src.iter() {
                for (class, to) in nfa.node(state).labelled_edges() {
                    if class.contains(lo) {
                        dest.insert(to);
                    }
                }
            }
            epsilon_closure(nfa, &mut dest);

            let target = equiv.lookup(dfa, &dest);
            check(&*dfa)?;

            let existing = dfa
                .edges(current)
                .iter()
                .position(|e| e.dest() == target);
            let edge = match existing {
                Some(j) => &mut dfa.edges_mut(current)[j],
                None => dfa.add_edge(current, target),
            };
            edge.class_mut().add(lo, hi);
        }
        current += 1;
    }

    Ok(equiv.into_subsets())
}

impl<F: Copy + PartialEq> Automaton<F> {
    /// Replace this NFA with its equivalent DFA.
    pub fn to_dfa(&mut self) {
        *self = subset_construction(self);
    }

    /// Replace this NFA with its equivalent DFA, honouring `config`.
    ///
    /// On error the automaton is left untouched.
    pub fn to_dfa_with(&mut self, config: &Config) -> Result<()> {
        *self = subset_construction_with(self, config)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cclass::CharClass;
    use crate::marker::Marker;

    fn ch(c: char) -> u32 {
        c as u32
    }

    fn range(lo: char, hi: char) -> CharClass {
        CharClass::from_range(ch(lo), ch(hi))
    }

    fn nodes(n: usize) -> Automaton<u32> {
        let mut a = Automaton::new();
        for _ in 0..n {
            a.add_node();
        }
        a
    }

    /// Tokens: `[a-z]+` (1), `if` (2), `[0-9]+` (3).
    fn lexer_nfa() -> Automaton<u32> {
        let mut nfa = nodes(8);
        nfa.add_edge(0, 1);
        nfa.add_edge(1, 2).set_class(range('a', '{'));
        nfa.add_edge(2, 2).set_class(range('a', '{'));
        nfa.add_final(2, 1);

        nfa.add_edge(0, 3);
        nfa.add_edge(3, 4).set_class(range('i', 'j'));
        nfa.add_edge(4, 5).set_class(range('f', 'g'));
        nfa.add_final(5, 2);

        nfa.add_edge(0, 6);
        nfa.add_edge(6, 7).set_class(range('0', ':'));
        nfa.add_edge(7, 6);
        nfa.add_final(7, 3);
        nfa
    }

    fn nfa_accepts(nfa: &Automaton<u32>, input: &[u32]) -> Vec<u32> {
        let mut current = nfa.epsilon_closure_of(0);
        for &c in input {
            let mut next = StateSet::with_capacity(nfa.len());
            for state in current.iter() {
                for (class, to) in nfa.node(state).labelled_edges() {
                    if class.contains(c) {
                        next.insert(to);
                    }
                }
            }
            epsilon_closure(nfa, &mut next);
            current = next;
        }
        let mut finals: Vec<u32> = current
            .iter()
            .flat_map(|s| nfa.finals(s).iter().copied())
            .collect();
        finals.sort_unstable();
        finals.dedup();
        finals
    }

    fn dfa_accepts(dfa: &Automaton<u32>, input: &[u32]) -> Vec<u32> {
        let mut state = 0;
        for &c in input {
            match dfa
                .node(state)
                .labelled_edges()
                .find(|(class, _)| class.contains(c))
            {
                Some((_, to)) => state = to,
                None => return Vec::new(),
            }
        }
        let mut finals = dfa.finals(state).to_vec();
        finals.sort_unstable();
        finals
    }

    #[test]
    fn single_range_edge() {
        let mut nfa = nodes(2);
        nfa.add_edge(0, 1).set_class(range('a', 'c'));
        nfa.add_final(1, 7);

        let dfa = subset_construction(&nfa);
        assert_eq!(dfa.len(), 2);
        assert_eq!(dfa.edges(0).len(), 1);
        assert_eq!(dfa.edges(0)[0].dest(), 1);
        assert_eq!(dfa.edges(0)[0].class(), Some(&range('a', 'c')));
        assert!(dfa.finals(0).is_empty());
        assert_eq!(dfa.finals(1), &[7]);
        assert!(dfa.edges(1).is_empty());
    }

    #[test]
    fn overlapping_edges_are_split() {
        let mut nfa = nodes(3);
        nfa.add_edge(0, 1).set_class(range('a', 'z'));
        nfa.add_edge(0, 2).set_class(range('d', 'f'));

        let (dfa, subsets) = subset_construction_mapped(&nfa, &Config::new()).unwrap();
        assert_eq!(dfa.len(), 3);
        assert!(dfa.is_deterministic());

        let mut covered: Vec<(u32, u32, Vec<StateId>)> = Vec::new();
        for edge in dfa.edges(0) {
            let members: Vec<StateId> = subsets[edge.dest() as usize].iter().collect();
            for (lo, hi) in edge.class().unwrap().intervals() {
                covered.push((lo, hi, members.clone()));
            }
        }
        covered.sort();
        assert_eq!(
            covered,
            vec![
                (ch('a'), ch('d'), vec![1]),
                (ch('d'), ch('f'), vec![1, 2]),
                (ch('f'), ch('z'), vec![1]),
            ]
        );
        // ranges sharing a target share one edge
        assert_eq!(dfa.edges(0).len(), 2);
    }

    #[test]
    fn epsilon_cycle_start() {
        let mut nfa = nodes(3);
        nfa.add_edge(0, 1);
        nfa.add_edge(1, 0);
        nfa.add_edge(1, 2).set_class(range('x', 'y'));
        nfa.add_final(2, 1);

        let (dfa, subsets) = subset_construction_mapped(&nfa, &Config::new()).unwrap();
        assert_eq!(subsets[0].iter().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(subsets[0], nfa.epsilon_closure_of(0));
        assert_eq!(dfa.len(), 2);
        assert_eq!(dfa.finals(1), &[1]);
    }

    #[test]
    fn gaps_between_intervals_lead_to_a_dead_node() {
        let mut nfa = nodes(2);
        let class = nfa.add_edge(0, 1).class_mut();
        class.add(ch('a'), ch('b'));
        class.add(ch('x'), ch('y'));
        nfa.add_final(1, 1);

        let (dfa, subsets) = subset_construction_mapped(&nfa, &Config::new()).unwrap();
        assert_eq!(dfa.len(), 3);
        assert!(subsets[2].is_empty());
        assert!(dfa.edges(2).is_empty());
        assert!(dfa.finals(2).is_empty());

        let mut to_one = range('a', 'b');
        to_one.add(ch('x'), ch('y'));
        assert_eq!(dfa.edges(0)[0].dest(), 1);
        assert_eq!(dfa.edges(0)[0].class(), Some(&to_one));
        assert_eq!(dfa.edges(0)[1].dest(), 2);
        assert_eq!(dfa.edges(0)[1].class(), Some(&range('b', 'x')));
    }

    #[test]
    fn recognizes_the_same_tokens() {
        let nfa = lexer_nfa();
        let dfa = subset_construction(&nfa);
        assert!(dfa.is_deterministic());

        let alphabet = ['i', 'f', 'x', '1', '-'].map(ch);
        let mut inputs: Vec<Vec<u32>> = vec![Vec::new()];
        let mut frontier = inputs.clone();
        for _ in 0..3 {
            frontier = frontier
                .iter()
                .flat_map(|prefix| {
                    alphabet.iter().map(move |&c| {
                        let mut s = prefix.clone();
                        s.push(c);
                        s
                    })
                })
                .collect();
            inputs.extend(frontier.iter().cloned());
        }
        assert_eq!(inputs.len(), 156);

        for input in &inputs {
            assert_eq!(dfa_accepts(&dfa, input), nfa_accepts(&nfa, input), "{:?}", input);
        }
        assert_eq!(dfa_accepts(&dfa, &[ch('i'), ch('f')]), vec![1, 2]);
        assert_eq!(dfa_accepts(&dfa, &[ch('4'), ch('2')]), vec![3]);
    }

    #[test]
    fn dfa_finals_are_the_union_of_subset_finals() {
        let nfa = lexer_nfa();
        let (dfa, subsets) = subset_construction_mapped(&nfa, &Config::new()).unwrap();
        assert_eq!(subsets.len(), dfa.len());
        assert_eq!(subsets[0], nfa.epsilon_closure_of(0));

        for (id, subset) in subsets.iter().enumerate() {
            let mut expected: Vec<u32> = Vec::new();
            for state in subset.iter() {
                for &marker in nfa.finals(state) {
                    if !expected.contains(&marker) {
                        expected.push(marker);
                    }
                }
            }
            assert_eq!(dfa.finals(id as StateId), &expected[..]);
        }
        for (i, a) in subsets.iter().enumerate() {
            assert!(subsets[i + 1..].iter().all(|b| a != b));
        }
    }

    #[test]
    fn wide_fan_out_stays_deterministic() {
        let mut nfa = nodes(1);
        for i in 0..20 {
            let n = nfa.add_node();
            nfa.add_edge(0, n).set_class(CharClass::from_range(i, i + 2));
            nfa.add_final(n, i);
        }
        let dfa = subset_construction(&nfa);
        assert!(dfa.is_deterministic());
        // 21 unit ranges, each reaching a different subset
        assert_eq!(dfa.edges(0).len(), 21);
        assert_eq!(dfa_accepts(&dfa, &[5]), vec![4, 5]);
        assert_eq!(dfa_accepts(&dfa, &[0]), vec![0]);
        assert_eq!(dfa_accepts(&dfa, &[20]), vec![19]);
        assert!(dfa_accepts(&dfa, &[21]).is_empty());
    }

    #[test]
    fn state_limit_aborts_and_keeps_the_nfa() {
        let mut nfa = lexer_nfa();
        let original = nfa.clone();

        let err = nfa.to_dfa_with(&Config::new().state_limit(Some(2))).unwrap_err();
        assert!(err.is_state_limit());
        assert!(matches!(err, Error::StateLimitExceeded(2)));
        assert_eq!(nfa, original);

        nfa.to_dfa_with(&Config::new().state_limit(Some(1000))).unwrap();
        assert!(nfa.is_deterministic());
        assert_eq!(nfa, subset_construction(&original));
    }

    #[test]
    fn converts_in_place() {
        let mut automaton = lexer_nfa();
        let expected = subset_construction(&automaton);
        automaton.to_dfa();
        assert_eq!(automaton, expected);
    }

    #[test]
    fn empty_nfa_gives_empty_dfa() {
        let nfa: Automaton<u32> = Automaton::new();
        let dfa = subset_construction(&nfa);
        assert!(dfa.is_empty());
    }

    #[test]
    fn markers_keep_their_identity() {
        #[derive(Debug, PartialEq)]
        struct Rule(&'static str);
        let ident = Rule("ident");
        let same_name = Rule("ident");

        let mut nfa: Automaton<Marker<'_, Rule>> = Automaton::new();
        let start = nfa.add_node();
        let a = nfa.add_node();
        let b = nfa.add_node();
        nfa.add_edge(start, a).set_class(range('a', 'b'));
        nfa.add_edge(start, b).set_class(range('a', 'b'));
        nfa.add_final(a, Marker::new(&ident));
        nfa.add_final(b, Marker::new(&same_name));
        nfa.add_final(b, Marker::new(&ident));

        nfa.to_dfa();
        assert_eq!(nfa.len(), 2);
        let finals = nfa.finals(1);
        assert_eq!(finals.len(), 2);
        assert!(std::ptr::eq(finals[0].get(), &ident));
        assert!(std::ptr::eq(finals[1].get(), &same_name));
    }
}
