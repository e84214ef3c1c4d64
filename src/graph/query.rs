//! Read and write interfaces shared by graphs and graph views
//!
//! `GraphQuery` is the seam every consumer reads through: the four concrete
//! graph variants and `GraphView` implement it, and the reporting views in
//! [`crate::views`] are built on nothing else. It is object safe so a view
//! can hold `&dyn GraphQuery` to the graph that owns the data.

use super::attr::{AttrMap, AttrRecord, AttrValue};
use super::convert;
use super::error::GraphResult;
use super::types::{Collapse, EdgeKey, GraphKind, Node};
use rustc_hash::FxHashSet;
use tracing::debug;

/// One edge seen from a fixed endpoint: the neighbor, the key (multigraphs
/// only) and the shared record.
#[derive(Debug)]
pub struct EdgeEntry<'a, N> {
    pub node: &'a N,
    pub key: Option<&'a EdgeKey>,
    pub record: &'a AttrRecord,
}

impl<N> Clone for EdgeEntry<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for EdgeEntry<'_, N> {}

pub type NodeIter<'a, N> = Box<dyn Iterator<Item = &'a N> + 'a>;
pub type EdgeIter<'a, N> = Box<dyn Iterator<Item = EdgeEntry<'a, N>> + 'a>;
pub type RecordIter<'a> = Box<dyn Iterator<Item = (Option<&'a EdgeKey>, &'a AttrRecord)> + 'a>;

/// Read interface of a graph.
///
/// Iterators borrow the graph and see its state at the time they are
/// advanced; they are never materialized copies. `out_entries`/`in_entries`
/// yield all entries for one neighbor consecutively. For undirected graphs
/// both return the same adjacency and a self-loop appears once.
pub trait GraphQuery {
    type Node: Node;

    fn kind(&self) -> GraphKind;

    fn graph_record(&self) -> &AttrRecord;

    /// The stored copy of `n`, if `n` is part of this graph
    fn node_key(&self, n: &Self::Node) -> Option<&Self::Node>;

    fn node_record(&self, n: &Self::Node) -> Option<&AttrRecord>;

    /// Position of `n` in insertion order in the graph that owns the data.
    ///
    /// Ranks compare like insertion order but are not dense: removed nodes
    /// leave gaps, and removals may renumber the remaining nodes.
    fn node_rank(&self, n: &Self::Node) -> Option<usize>;

    fn node_count(&self) -> usize;

    fn node_iter(&self) -> NodeIter<'_, Self::Node>;

    /// Edges leaving `n` (all incident edges for undirected graphs)
    fn out_entries(&self, n: &Self::Node) -> Option<EdgeIter<'_, Self::Node>>;

    /// Edges entering `n` (all incident edges for undirected graphs)
    fn in_entries(&self, n: &Self::Node) -> Option<EdgeIter<'_, Self::Node>>;

    /// Records of the edges `u -> v` (either orientation when undirected)
    fn records_between(&self, u: &Self::Node, v: &Self::Node) -> RecordIter<'_>;

    fn is_directed(&self) -> bool {
        self.kind().directed
    }

    fn is_multigraph(&self) -> bool {
        self.kind().multigraph
    }

    fn contains_node(&self, n: &Self::Node) -> bool {
        self.node_key(n).is_some()
    }

    fn out_count(&self, n: &Self::Node) -> Option<usize> {
        self.out_entries(n).map(|entries| entries.count())
    }

    fn in_count(&self, n: &Self::Node) -> Option<usize> {
        self.in_entries(n).map(|entries| entries.count())
    }

    fn out_weight(&self, n: &Self::Node, weight: &str) -> Option<f64> {
        self.out_entries(n)
            .map(|entries| entries.map(|e| e.record.weight(weight)).sum())
    }

    fn in_weight(&self, n: &Self::Node, weight: &str) -> Option<f64> {
        self.in_entries(n)
            .map(|entries| entries.map(|e| e.record.weight(weight)).sum())
    }

    /// Total number of edges
    fn edge_count(&self) -> usize {
        let mut total = 0;
        let mut loops = 0;
        for n in self.node_iter() {
            total += self.out_count(n).unwrap_or(0);
            if !self.is_directed() {
                loops += self.records_between(n, n).count();
            }
        }
        if self.is_directed() {
            total
        } else {
            (total + loops) / 2
        }
    }
}

/// Structural mutation shared by the four graph variants
pub trait GraphMut: GraphQuery + Sized {
    /// Kind of every graph of this variant
    const KIND: GraphKind;

    /// An empty graph of this variant carrying `attrs` as graph attributes
    fn with_graph_attrs(attrs: AttrMap) -> Self;

    /// Add `n` if absent and merge `attrs` into its record
    fn insert_node(&mut self, n: Self::Node, attrs: AttrMap);

    /// Add or update an edge, creating missing endpoints.
    ///
    /// Simple graphs ignore `key` and return `None`; multigraphs return the
    /// key the edge was stored under.
    fn insert_edge(
        &mut self,
        u: Self::Node,
        v: Self::Node,
        key: Option<EdgeKey>,
        attrs: AttrMap,
    ) -> Option<EdgeKey>;

    fn delete_node(&mut self, n: &Self::Node) -> GraphResult<()>;

    fn delete_edge(
        &mut self,
        u: &Self::Node,
        v: &Self::Node,
        key: Option<&EdgeKey>,
    ) -> GraphResult<()>;

    fn clear(&mut self);

    /// Add every node of `nodes`
    fn add_nodes_from<I>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = Self::Node>,
    {
        for n in nodes {
            self.insert_node(n, AttrMap::new());
        }
    }

    /// Add every node of `nodes`, merging a copy of `attrs` into each
    fn add_nodes_from_with<I>(&mut self, nodes: I, attrs: &AttrMap)
    where
        I: IntoIterator<Item = Self::Node>,
    {
        for n in nodes {
            self.insert_node(n, attrs.clone());
        }
    }

    /// Add every edge of `edges`; see [`EdgeSpec`] for the accepted items
    fn add_edges_from<I, E>(&mut self, edges: I)
    where
        I: IntoIterator<Item = E>,
        E: EdgeSpec<Self::Node>,
    {
        let mut added = 0usize;
        for edge in edges {
            let (u, v, key, attrs) = edge.into_parts();
            self.insert_edge(u, v, key, attrs);
            added += 1;
        }
        debug!("Added {} edges", added);
    }

    /// Add every edge of `edges` with `attrs` as shared attributes.
    ///
    /// Each edge starts from a copy of `attrs`; attributes carried by the
    /// edge item itself override the shared ones.
    fn add_edges_from_with<I, E>(&mut self, edges: I, attrs: &AttrMap)
    where
        I: IntoIterator<Item = E>,
        E: EdgeSpec<Self::Node>,
    {
        let mut added = 0usize;
        for edge in edges {
            let (u, v, key, own) = edge.into_parts();
            let mut merged = attrs.clone();
            merged.extend(own);
            self.insert_edge(u, v, key, merged);
            added += 1;
        }
        debug!("Added {} edges with {} shared attributes", added, attrs.len());
    }

    /// Add `(u, v, w)` triples, storing `w` under the attribute `weight`
    fn add_weighted_edges_from<I>(&mut self, edges: I, weight: &str)
    where
        I: IntoIterator<Item = (Self::Node, Self::Node, f64)>,
    {
        for (u, v, w) in edges {
            let mut attrs = AttrMap::new();
            attrs.insert(weight.to_string(), AttrValue::Float(w));
            self.insert_edge(u, v, None, attrs);
        }
    }

    /// Remove every listed node that is present; absent nodes are skipped
    fn remove_nodes_from<'a, I>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = &'a Self::Node>,
    {
        for n in nodes {
            let _ = self.delete_node(n);
        }
    }

    /// Remove every listed edge that is present; absent edges are skipped
    fn remove_edges_from<'a, I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (&'a Self::Node, &'a Self::Node, Option<&'a EdgeKey>)>,
    {
        for (u, v, key) in edges {
            let _ = self.delete_edge(u, v, key);
        }
    }

    /// Build a graph from an edge list
    fn from_edges<I, E>(edges: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: EdgeSpec<Self::Node>,
    {
        let mut graph = Self::with_graph_attrs(AttrMap::new());
        graph.add_edges_from(edges);
        graph
    }

    /// Build a graph from `(node, neighbors)` pairs.
    ///
    /// Every listed node is added even without neighbors. An undirected
    /// multigraph adds each listed pair once, so a symmetric listing does
    /// not double its edges.
    fn from_adjacency<I, J>(adjacency: I) -> Self
    where
        I: IntoIterator<Item = (Self::Node, J)>,
        J: IntoIterator<Item = Self::Node>,
    {
        let mut graph = Self::with_graph_attrs(AttrMap::new());
        let dedup = Self::KIND.multigraph && !Self::KIND.directed;
        let mut seen: FxHashSet<Self::Node> = FxHashSet::default();
        for (u, nbrs) in adjacency {
            graph.insert_node(u.clone(), AttrMap::new());
            for v in nbrs {
                if dedup && seen.contains(&v) {
                    continue;
                }
                graph.insert_edge(u.clone(), v, None, AttrMap::new());
            }
            if dedup {
                seen.insert(u);
            }
        }
        graph
    }

    /// Build a graph of this variant from any graph or view; see
    /// [`convert::copy_graph`] for when `collapse` is required
    fn try_from_graph<G>(src: &G, collapse: Option<Collapse>) -> GraphResult<Self>
    where
        G: GraphQuery<Node = Self::Node> + ?Sized,
    {
        convert::copy_graph(src, collapse)
    }

    /// Merge the nodes, edges and attributes of `other` into this graph.
    ///
    /// Existing records are updated in place. Each undirected edge of
    /// `other` is added once, in the orientation its earlier node gives it.
    fn update_from<G>(&mut self, other: &G)
    where
        G: GraphQuery<Node = Self::Node> + ?Sized,
    {
        self.graph_record().update(other.graph_record().snapshot());
        for n in other.node_iter() {
            let attrs = other.node_record(n).map(|r| r.snapshot()).unwrap_or_default();
            self.insert_node(n.clone(), attrs);
        }
        let keyed = Self::KIND.multigraph && other.is_multigraph();
        let once = !other.is_directed();
        let mut added = 0usize;
        for u in other.node_iter() {
            let Some(entries) = other.out_entries(u) else {
                continue;
            };
            let rank_u = other.node_rank(u);
            for e in entries {
                if once && other.node_rank(e.node) < rank_u {
                    continue;
                }
                let key = if keyed { e.key.cloned() } else { None };
                self.insert_edge(u.clone(), e.node.clone(), key, e.record.snapshot());
                added += 1;
            }
        }
        debug!("Merged {} nodes and {} edges", other.node_count(), added);
    }
}

/// Item accepted by [`GraphMut::add_edges_from`].
///
/// `(u, v)`, `(u, v, attrs)`, `(u, v, key)` and `(u, v, key, attrs)`.
/// Simple graphs ignore keys.
pub trait EdgeSpec<N> {
    fn into_parts(self) -> (N, N, Option<EdgeKey>, AttrMap);
}

impl<N: Node> EdgeSpec<N> for (N, N) {
    fn into_parts(self) -> (N, N, Option<EdgeKey>, AttrMap) {
        (self.0, self.1, None, AttrMap::new())
    }
}

impl<N: Node> EdgeSpec<N> for (N, N, AttrMap) {
    fn into_parts(self) -> (N, N, Option<EdgeKey>, AttrMap) {
        (self.0, self.1, None, self.2)
    }
}

impl<N: Node> EdgeSpec<N> for (N, N, EdgeKey) {
    fn into_parts(self) -> (N, N, Option<EdgeKey>, AttrMap) {
        (self.0, self.1, Some(self.2), AttrMap::new())
    }
}

impl<N: Node> EdgeSpec<N> for (N, N, EdgeKey, AttrMap) {
    fn into_parts(self) -> (N, N, Option<EdgeKey>, AttrMap) {
        (self.0, self.1, Some(self.2), self.3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::attr::attrs;
    use crate::graph::{DiGraph, Graph, MultiDiGraph, MultiGraph};

    #[test]
    fn test_add_edges_from_accepts_all_shapes() {
        let mut g: MultiGraph<&str> = MultiGraph::new();
        g.add_edges_from([("a", "b")]);
        g.add_edges_from([("a", "b", attrs([("w", 2i64)]))]);
        g.add_edges_from([("a", "b", EdgeKey::from("x"))]);
        g.add_edges_from([("a", "b", EdgeKey::from("x"), attrs([("w", 5i64)]))]);

        assert_eq!(g.edge_count(), 3);
        let named = g
            .records_between(&"b", &"a")
            .find(|(k, _)| *k == Some(&EdgeKey::from("x")))
            .unwrap()
            .1;
        assert_eq!(named.get("w"), Some(AttrValue::Integer(5)));
    }

    #[test]
    fn test_weighted_edges() {
        let mut g: Graph<u32> = Graph::new();
        g.add_weighted_edges_from([(1, 2, 0.5), (2, 3, 1.5)], "cost");
        assert_eq!(g.out_weight(&2, "cost"), Some(2.0));
        // missing weight attribute counts as 1
        assert_eq!(g.out_weight(&2, "weight"), Some(2.0));
    }

    #[test]
    fn test_nodes_from_with_attrs() {
        let mut g: DiGraph<u32> = DiGraph::new();
        g.add_nodes_from_with([1, 2], &attrs([("color", "red")]));
        g.add_nodes_from([3]);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.node_record(&2).unwrap().get("color"), Some(AttrValue::from("red")));
        // each node gets its own record
        g.node_record(&1).unwrap().set("color", "blue");
        assert_eq!(g.node_record(&2).unwrap().get("color"), Some(AttrValue::from("red")));
        assert!(g.node_record(&3).unwrap().is_empty());
    }

    #[test]
    fn test_bulk_removal_skips_absent() {
        let mut g: Graph<u32> = Graph::from_edges([(1, 2), (2, 3), (3, 4)]);
        g.remove_edges_from([(&1, &2, None), (&7, &8, None)]);
        g.remove_nodes_from([&4, &9]);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_from_adjacency() {
        let g: Graph<u32> = Graph::from_adjacency([(1, vec![2, 3]), (2, vec![1]), (4, vec![])]);
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 2);

        // symmetric listing does not double multigraph edges
        let m: MultiGraph<u32> = MultiGraph::from_adjacency([(1, vec![2, 1]), (2, vec![1])]);
        assert_eq!(m.edge_count(), 2);

        let d: MultiDiGraph<u32> = MultiDiGraph::from_adjacency([(1, vec![2]), (2, vec![1])]);
        assert_eq!(d.edge_count(), 2);
    }

    #[test]
    fn test_try_from_graph() {
        let d: DiGraph<u32> = DiGraph::from_edges([(1, 2), (2, 1)]);
        assert!(Graph::<u32>::try_from_graph(&d, None).is_err());
        let g = Graph::<u32>::try_from_graph(&d, Some(Collapse::First)).unwrap();
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_update_from_merges() {
        let mut g: Graph<u32> = Graph::from_edges([(1, 2)]);
        let mut other: Graph<u32> = Graph::with_attrs(attrs([("name", "other")]));
        other.add_edge_with(2, 1, attrs([("w", 3i64)]));
        other.add_edge(2, 3);

        g.update_from(&other);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.graph_record().get("name"), Some(AttrValue::from("other")));
        assert_eq!(
            g.records_between(&1, &2).next().unwrap().1.get("w"),
            Some(AttrValue::Integer(3))
        );

        // undirected edges land once in a directed target
        let mut d: DiGraph<u32> = DiGraph::new();
        d.update_from(&other);
        assert_eq!(d.edge_count(), 2);
    }
}
