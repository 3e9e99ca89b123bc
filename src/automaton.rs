//! The automaton graph shared by input NFAs and constructed DFAs.
//!
//! Nodes, edges and final markers are addressed by index. Any operation that
//! adds to the graph may move its storage, so a `&Node` or `&mut Edge` taken
//! before such a call has to be looked up again by index afterwards.

use bincode::{config, Decode, Encode};
use std::fmt;

use crate::cclass::CharClass;
use crate::state::StateId;
use crate::{Error, Result};

const NODE_CHUNK: usize = 16;
const EDGE_CHUNK: usize = 16;
const FINAL_CHUNK: usize = 16;

/// Grow `v` by a fixed chunk once it is full, instead of doubling.
fn reserve_chunk<T>(v: &mut Vec<T>, chunk: usize) {
    if v.len() == v.capacity() {
        v.reserve_exact(chunk);
    }
}

/// A transition to `dest`, labelled by a character class.
///
/// An edge without a class is an epsilon transition.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct Edge {
    dest: StateId,
    class: Option<CharClass>,
}

impl Edge {
    pub fn dest(&self) -> StateId {
        self.dest
    }

    pub fn class(&self) -> Option<&CharClass> {
        self.class.as_ref()
    }

    pub fn is_epsilon(&self) -> bool {
        self.class.is_none()
    }

    /// Label the edge with `class`, replacing any previous label.
    pub fn set_class(&mut self, class: CharClass) -> &mut Self {
        self.class = Some(class);
        self
    }

    /// The edge's class, created empty on first access.
    ///
    /// Note that an edge with an empty class is no longer an epsilon edge,
    /// it simply matches nothing.
    pub fn class_mut(&mut self) -> &mut CharClass {
        self.class.get_or_insert_with(CharClass::new)
    }
}

/// A state: its outgoing edges in insertion order and its final markers.
#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct Node<F> {
    edges: Vec<Edge>,
    finals: Vec<F>,
}

impl<F> Default for Node<F> {
    fn default() -> Self {
        Self {
            edges: Vec::new(),
            finals: Vec::new(),
        }
    }
}

impl<F> Node<F> {
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn finals(&self) -> &[F] {
        &self.finals
    }

    pub fn is_final(&self) -> bool {
        !self.finals.is_empty()
    }

    /// The non-epsilon edges of this node.
    pub fn labelled_edges(&self) -> impl Iterator<Item = (&CharClass, StateId)> + '_ {
        self.edges
            .iter()
            .filter_map(|e| e.class.as_ref().map(|class| (class, e.dest)))
    }

    /// The destinations of this node's epsilon edges.
    pub fn epsilon_targets(&self) -> impl Iterator<Item = StateId> + '_ {
        self.edges.iter().filter(|e| e.is_epsilon()).map(|e| e.dest)
    }
}

/// A finite automaton over character classes.
///
/// `F` is the final-marker handle. The automaton copies and compares
/// handles but never owns what they refer to; see [`crate::marker`].
/// Node 0 is the start state.
#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct Automaton<F> {
    nodes: Vec<Node<F>>,
}

impl<F> Default for Automaton<F> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<F> Automaton<F> {
    /// Create a new empty automaton.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its index.
    pub fn add_node(&mut self) -> StateId {
        reserve_chunk(&mut self.nodes, NODE_CHUNK);
        let id = self.nodes.len() as StateId;
        self.nodes.push(Node::default());
        id
    }

    /// Append an epsilon edge `from -> to` and return it so the caller can
    /// attach a class.
    pub fn add_edge(&mut self, from: StateId, to: StateId) -> &mut Edge {
        let edges = &mut self.nodes[from as usize].edges;
        reserve_chunk(edges, EDGE_CHUNK);
        edges.push(Edge {
            dest: to,
            class: None,
        });
        let last = edges.len() - 1;
        &mut edges[last]
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node<F>] {
        &self.nodes
    }

    pub fn node(&self, id: StateId) -> &Node<F> {
        &self.nodes[id as usize]
    }

    pub fn try_node(&self, id: StateId) -> Result<&Node<F>> {
        self.nodes
            .get(id as usize)
            .ok_or(Error::InvalidState(id as usize))
    }

    pub fn edges(&self, id: StateId) -> &[Edge] {
        &self.nodes[id as usize].edges
    }

    /// Mutable access to the edges of `id`. Destinations stay fixed; only
    /// the labels can be changed through the returned slice.
    pub fn edges_mut(&mut self, id: StateId) -> &mut [Edge] {
        &mut self.nodes[id as usize].edges
    }

    pub fn finals(&self, id: StateId) -> &[F] {
        &self.nodes[id as usize].finals
    }

    pub fn is_final(&self, id: StateId) -> bool {
        self.nodes[id as usize].is_final()
    }

    /// Total number of edges over all nodes.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum()
    }

    /// Release every node, edge class and final list, leaving the automaton
    /// empty. Final markers are dropped as handles only.
    pub fn clear(&mut self) {
        self.nodes = Vec::new();
    }

    /// Whether every node has only labelled edges and no two of them share
    /// a character.
    pub fn is_deterministic(&self) -> bool {
        self.nodes.iter().all(|node| {
            if node.edges.iter().any(Edge::is_epsilon) {
                return false;
            }
            let classes: Vec<&CharClass> = node.labelled_edges().map(|(c, _)| c).collect();
            classes
                .iter()
                .enumerate()
                .all(|(i, a)| classes[i + 1..].iter().all(|b| !a.overlaps(b)))
        })
    }

    /// Check that every edge points at an existing node and carries a
    /// well-formed class.
    fn validate(&self) -> Result<()> {
        let len = self.nodes.len();
        for (id, node) in self.nodes.iter().enumerate() {
            for edge in &node.edges {
                if edge.dest as usize >= len {
                    return Err(Error::InvalidState(edge.dest as usize));
                }
                if edge.class.as_ref().is_some_and(|c| !c.is_canonical()) {
                    return Err(Error::MalformedClass(id));
                }
            }
        }
        Ok(())
    }
}

impl<F: Copy + PartialEq> Automaton<F> {
    /// Mark `node` as accepting with `marker`.
    ///
    /// Adding a marker the node already carries is a no-op.
    pub fn add_final(&mut self, node: StateId, marker: F) {
        let finals = &mut self.nodes[node as usize].finals;
        if finals.contains(&marker) {
            return;
        }
        reserve_chunk(finals, FINAL_CHUNK);
        finals.push(marker);
    }
}

impl<F: Encode> Automaton<F> {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::encode_to_vec(self, config::standard())?)
    }
}

impl<F: Decode<()>> Automaton<F> {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (automaton, _): (Self, usize) = bincode::decode_from_slice(bytes, config::standard())?;
        automaton.validate()?;
        Ok(automaton)
    }
}

impl<F: fmt::Debug> fmt::Display for Automaton<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Automaton with {} nodes:", self.nodes.len())?;
        for (id, node) in self.nodes.iter().enumerate() {
            write!(f, "{}", id)?;
            if node.is_final() {
                write!(f, " final {:?}", node.finals)?;
            }
            writeln!(f)?;
            for edge in &node.edges {
                match &edge.class {
                    Some(class) => writeln!(f, "    {} -> {}", class, edge.dest)?,
                    None => writeln!(f, "    eps -> {}", edge.dest)?,
                }
            }
        }
        Ok(())
    }
}
