//! Core type definitions for the graph data model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// Capability required of every node value.
///
/// Any hashable, comparable, cloneable value can identify a node. The
/// `Debug` bound is used to render nodes in error messages.
pub trait Node: Hash + Eq + Clone + fmt::Debug + 'static {}

impl<T> Node for T where T: Hash + Eq + Clone + fmt::Debug + 'static {}

/// Key distinguishing parallel edges between the same pair of nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum EdgeKey {
    Index(u64),
    Name(String),
}

impl EdgeKey {
    pub fn new(key: impl Into<EdgeKey>) -> Self {
        key.into()
    }

    pub fn as_index(&self) -> Option<u64> {
        match self {
            EdgeKey::Index(i) => Some(*i),
            EdgeKey::Name(_) => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            EdgeKey::Name(s) => Some(s),
            EdgeKey::Index(_) => None,
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKey::Index(i) => write!(f, "{}", i),
            EdgeKey::Name(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for EdgeKey {
    fn from(i: u64) -> Self {
        EdgeKey::Index(i)
    }
}

impl From<u32> for EdgeKey {
    fn from(i: u32) -> Self {
        EdgeKey::Index(i as u64)
    }
}

impl From<usize> for EdgeKey {
    fn from(i: usize) -> Self {
        EdgeKey::Index(i as u64)
    }
}

impl From<String> for EdgeKey {
    fn from(s: String) -> Self {
        EdgeKey::Name(s)
    }
}

impl From<&str> for EdgeKey {
    fn from(s: &str) -> Self {
        EdgeKey::Name(s.to_string())
    }
}

/// Directedness and multiplicity of a graph or graph view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphKind {
    pub directed: bool,
    pub multigraph: bool,
}

impl GraphKind {
    pub const GRAPH: GraphKind = GraphKind { directed: false, multigraph: false };
    pub const DIGRAPH: GraphKind = GraphKind { directed: true, multigraph: false };
    pub const MULTIGRAPH: GraphKind = GraphKind { directed: false, multigraph: true };
    pub const MULTIDIGRAPH: GraphKind = GraphKind { directed: true, multigraph: true };

    pub fn name(&self) -> &'static str {
        match (self.directed, self.multigraph) {
            (false, false) => "Graph",
            (true, false) => "DiGraph",
            (false, true) => "MultiGraph",
            (true, true) => "MultiDiGraph",
        }
    }

    /// Whether presenting data of kind `self` as kind `target` can drop
    /// edges or records.
    ///
    /// Decided from the two kinds alone. Parallel edges cannot survive in a
    /// simple graph, and antiparallel directed edges cannot both survive in
    /// an undirected graph unless the target is a multigraph fed by a simple
    /// source (each direction then becomes its own parallel edge).
    pub fn loses_information_as(&self, target: GraphKind) -> bool {
        if self.multigraph && !target.multigraph {
            return true;
        }
        if self.directed && !target.directed {
            return !(target.multigraph && !self.multigraph);
        }
        false
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Which side of a directed adjacency to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Outgoing,
    Incoming,
    Both,
}

/// Deterministic rule for merging several candidate edge records into one.
///
/// Candidates for an undirected pair are ordered by the insertion rank of
/// their source node, then by key insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collapse {
    /// Keep the earliest candidate
    First,
    /// Keep the latest candidate
    Last,
}
