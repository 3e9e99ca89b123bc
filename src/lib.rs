//! # Subset_DFA
//!
//! `subset_dfa` crate turns NFAs labelled with character classes into DFAs
//! by subset construction.
//!
//! ```
//! use subset_dfa::{Automaton, CharClass};
//!
//! let mut nfa: Automaton<u32> = Automaton::new();
//! let start = nfa.add_node();
//! let word = nfa.add_node();
//! nfa.add_edge(start, word).set_class(CharClass::from_range('a' as u32, '{' as u32));
//! nfa.add_edge(word, start);
//! nfa.add_final(word, 1);
//!
//! nfa.to_dfa();
//! assert!(nfa.is_deterministic());
//! assert_eq!(nfa.finals(1), &[1]);
//! ```

pub mod automaton;
pub mod breaks;
pub mod cclass;
pub mod closure;
pub mod config;
pub mod equiv;
pub mod error;
pub mod marker;
pub mod state;
pub mod subset_construction;

pub use automaton::{Automaton, Edge, Node};
pub use cclass::CharClass;
pub use config::Config;
pub use error::{Error, Result};
pub use marker::Marker;
pub use state::{StateId, StateSet};
pub use subset_construction::{subset_construction, subset_construction_with};

#[cfg(feature = "python-bindings")]
mod python_bindings;
