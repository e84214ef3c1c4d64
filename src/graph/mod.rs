//! Core graph data model
//!
//! This module implements the four graph variants and what they share:
//! - Attribute records shared between both halves of an edge (`attr`)
//! - Insertion-ordered adjacency storage with simple and keyed slots (`store`)
//! - `Graph`/`MultiGraph` (`undirected`) and `DiGraph`/`MultiDiGraph` (`directed`)
//! - The `GraphQuery`/`GraphMut` interfaces and copies between kinds

pub mod attr;
pub mod config;
pub mod convert;
pub mod directed;
pub mod error;
pub mod query;
pub mod store;
pub mod types;
pub mod undirected;

// Re-export main types
pub use attr::{attrs, AttrMap, AttrRecord, AttrValue};
pub use config::GraphConfig;
pub use convert::{copy_graph, fill_graph, fill_graph_with};
pub use directed::{DiGraph, DirectedGraph, MultiDiGraph};
pub use error::{GraphError, GraphResult};
pub use query::{EdgeEntry, EdgeIter, EdgeSpec, GraphMut, GraphQuery, NodeIter, RecordIter};
pub use store::{
    AdjacencyStore, EdgeSlot, FxIndexMap, FxIndexSet, MultiEdge, NodeTable, SingleEdge,
};
pub use types::{Collapse, Direction, EdgeKey, GraphKind, Node};
pub use undirected::{Graph, MultiGraph, UndirectedGraph};
