//! Netgraph: in-memory graphs with attributes
//!
//! Four graph kinds share one data model:
//!
//! - [`Graph`]: undirected, at most one edge per node pair
//! - [`DiGraph`]: directed, at most one edge per ordered pair
//! - [`MultiGraph`]: undirected with keyed parallel edges
//! - [`MultiDiGraph`]: directed with keyed parallel edges
//!
//! Nodes are any hashable, cloneable value. Graphs, nodes and edges each
//! carry an attribute record that is shared (not copied) between the two
//! adjacency entries of an undirected edge and the succ/pred entries of a
//! directed one.
//!
//! Reporting views (`nodes()`, `edges()`, `degree()`, `adj()`...) come from
//! [`GraphExt`] and read through to the graph. Subgraph, reverse and
//! reinterpreting views live in [`graphviews`].
//!
//! ## Example Usage
//!
//! ```rust
//! use netgraph::prelude::*;
//!
//! let mut g: Graph<&str> = Graph::new();
//! g.add_edge_with("a", "b", attrs([("weight", 2.0)]));
//! g.add_edge("b", "c");
//!
//! assert_eq!(g.degree().get(&"b"), Ok(2));
//! assert_eq!(g.size(Some("weight")), 3.0);
//!
//! let sub = g.subgraph(["a", "b"]);
//! assert_eq!(sub.number_of_edges(), 1);
//! assert!(sub.has_edge(&"b", &"a"));
//! ```

#![warn(clippy::all)]

pub mod graph;
pub mod graphviews;
pub mod views;

// Re-export main types for convenience
pub use graph::{
    attrs, AttrMap, AttrRecord, AttrValue, Collapse, DiGraph, Direction, EdgeKey, Graph,
    GraphConfig, GraphError, GraphKind, GraphMut, GraphQuery, GraphResult, MultiDiGraph,
    MultiGraph, Node,
};
pub use graphviews::{AsGraphView, GraphView, SubgraphViewMut};
pub use views::GraphExt;

/// Everything needed to build and query graphs
pub mod prelude {
    pub use crate::graph::{
        attrs, copy_graph, AttrMap, AttrRecord, AttrValue, Collapse, DiGraph, Direction,
        EdgeKey, Graph, GraphConfig, GraphError, GraphKind, GraphMut, GraphQuery, GraphResult,
        MultiDiGraph, MultiGraph, Node,
    };
    pub use crate::graphviews::{
        edge_subgraph, filters, generic_graph_view, restricted_view, reverse_view, subgraph,
        subgraph_view, subgraph_view_mut, AsGraphView, GraphView, SubgraphViewMut,
    };
    pub use crate::views::GraphExt;
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
