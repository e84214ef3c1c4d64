//! Edge reporting view
//!
//! Undirected edges are reported once, from the endpoint that was inserted
//! first. A self-loop is reported once.

use crate::graph::{AttrRecord, AttrValue, Direction, EdgeKey, FxIndexSet, GraphQuery};
use rustc_hash::FxHashSet;
use std::fmt;

/// One edge as reported by an [`EdgeView`].
///
/// `key` is `Some` exactly when the graph is a multigraph.
#[derive(Debug)]
pub struct EdgeRef<'g, N> {
    pub u: &'g N,
    pub v: &'g N,
    pub key: Option<&'g EdgeKey>,
    pub record: &'g AttrRecord,
}

impl<N> Clone for EdgeRef<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for EdgeRef<'_, N> {}

impl<'g, N: Clone> EdgeRef<'g, N> {
    /// Owned `(u, v)` pair
    pub fn pair(&self) -> (N, N) {
        (self.u.clone(), self.v.clone())
    }
}

pub type EdgeRefIter<'g, N> = Box<dyn Iterator<Item = EdgeRef<'g, N>> + 'g>;

/// Items the edge set operations accept: borrowed `(u, v)` pairs and the
/// [`EdgeRef`]s of another view
pub trait EdgeEnds<'a, N> {
    fn ends(self) -> (&'a N, &'a N);
}

impl<'a, N> EdgeEnds<'a, N> for &'a (N, N) {
    fn ends(self) -> (&'a N, &'a N) {
        (&self.0, &self.1)
    }
}

impl<'a, N> EdgeEnds<'a, N> for EdgeRef<'a, N> {
    fn ends(self) -> (&'a N, &'a N) {
        (self.u, self.v)
    }
}

impl<'a, N> EdgeEnds<'a, N> for &EdgeRef<'a, N> {
    fn ends(self) -> (&'a N, &'a N) {
        (self.u, self.v)
    }
}

/// Read-only, live view of a graph's edges.
///
/// `Outgoing` reports each edge as `u -> v` grouped by source;
/// `Incoming` groups directed edges by target. Both are the same set.
pub struct EdgeView<'g, G: ?Sized> {
    graph: &'g G,
    direction: Direction,
}

impl<'g, G: GraphQuery + ?Sized> EdgeView<'g, G> {
    pub fn new(graph: &'g G, direction: Direction) -> Self {
        EdgeView { graph, direction }
    }

    pub fn len(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn contains(&self, u: &G::Node, v: &G::Node) -> bool {
        self.graph.records_between(u, v).next().is_some()
    }

    pub fn contains_keyed(&self, u: &G::Node, v: &G::Node, key: &EdgeKey) -> bool {
        self.graph
            .records_between(u, v)
            .any(|(k, _)| k == Some(key))
    }

    pub fn iter(&self) -> EdgeRefIter<'g, G::Node> {
        let graph = self.graph;
        if graph.is_directed() && self.direction == Direction::Incoming {
            return Box::new(graph.node_iter().flat_map(move |v| {
                graph.in_entries(v).into_iter().flatten().map(move |e| EdgeRef {
                    u: e.node,
                    v,
                    key: e.key,
                    record: e.record,
                })
            }));
        }
        let undirected = !graph.is_directed();
        Box::new(graph.node_iter().flat_map(move |u| {
            let rank = graph.node_rank(u);
            graph
                .out_entries(u)
                .into_iter()
                .flatten()
                .filter(move |e| !undirected || graph.node_rank(e.node) >= rank)
                .map(move |e| EdgeRef {
                    u,
                    v: e.node,
                    key: e.key,
                    record: e.record,
                })
        }))
    }

    /// `(u, v)` endpoint pairs
    pub fn pairs(&self) -> impl Iterator<Item = (&'g G::Node, &'g G::Node)> + 'g {
        self.iter().map(|e| (e.u, e.v))
    }

    /// `(u, v, value of name)`, `default` where the attribute is unset
    pub fn with_attr(
        &self,
        name: &'g str,
        default: Option<AttrValue>,
    ) -> impl Iterator<Item = (&'g G::Node, &'g G::Node, Option<AttrValue>)> + 'g {
        self.iter()
            .map(move |e| (e.u, e.v, e.record.get_or(name, default.clone())))
    }

    /// Edges incident to the nodes of `nbunch` that are in the graph.
    ///
    /// Each edge is reported once, from the first listed endpoint.
    pub fn incident_to<'a, I>(&self, nbunch: I) -> Vec<EdgeRef<'g, G::Node>>
    where
        I: IntoIterator<Item = &'a G::Node>,
        G::Node: 'a,
    {
        let graph = self.graph;
        let incoming = graph.is_directed() && self.direction == Direction::Incoming;
        let mut seen: FxHashSet<&'g G::Node> = FxHashSet::default();
        let mut out = Vec::new();
        for n in nbunch {
            let Some(n) = graph.node_key(n) else {
                continue;
            };
            if !seen.insert(n) {
                continue;
            }
            let entries = if incoming { graph.in_entries(n) } else { graph.out_entries(n) };
            for e in entries.into_iter().flatten() {
                // an undirected edge between two listed nodes is reported once
                if !graph.is_directed() && e.node != n && seen.contains(e.node) {
                    continue;
                }
                out.push(if incoming {
                    EdgeRef { u: e.node, v: n, key: e.key, record: e.record }
                } else {
                    EdgeRef { u: n, v: e.node, key: e.key, record: e.record }
                });
            }
        }
        out
    }

    /// Edges of this view whose endpoints form an edge in `other`.
    ///
    /// `other` yields borrowed pairs or the edges of another view.
    pub fn intersection<'a, I>(&self, other: I) -> FxIndexSet<(G::Node, G::Node)>
    where
        I: IntoIterator,
        I::Item: EdgeEnds<'a, G::Node>,
        G::Node: 'a,
    {
        let other = self.pair_set(other);
        self.iter()
            .filter(|e| self.pair_in(&other, e.u, e.v))
            .map(|e| e.pair())
            .collect()
    }

    /// Edges of this view followed by the pairs of `other` not already in it
    pub fn union<'a, I>(&self, other: I) -> FxIndexSet<(G::Node, G::Node)>
    where
        I: IntoIterator,
        I::Item: EdgeEnds<'a, G::Node>,
        G::Node: 'a,
    {
        let mut out: FxIndexSet<(G::Node, G::Node)> = self.iter().map(|e| e.pair()).collect();
        for item in other {
            let (u, v) = item.ends();
            if !self.contains(u, v) {
                out.insert((u.clone(), v.clone()));
            }
        }
        out
    }

    pub fn difference<'a, I>(&self, other: I) -> FxIndexSet<(G::Node, G::Node)>
    where
        I: IntoIterator,
        I::Item: EdgeEnds<'a, G::Node>,
        G::Node: 'a,
    {
        let other = self.pair_set(other);
        self.iter()
            .filter(|e| !self.pair_in(&other, e.u, e.v))
            .map(|e| e.pair())
            .collect()
    }

    /// Owned copy of the current edge list as `(u, v, key)` triples
    pub fn snapshot(&self) -> Vec<(G::Node, G::Node, Option<EdgeKey>)> {
        self.iter()
            .map(|e| (e.u.clone(), e.v.clone(), e.key.cloned()))
            .collect()
    }

    fn pair_set<'a, I>(&self, pairs: I) -> FxHashSet<(&'a G::Node, &'a G::Node)>
    where
        I: IntoIterator,
        I::Item: EdgeEnds<'a, G::Node>,
        G::Node: 'a,
    {
        pairs.into_iter().map(|item| item.ends()).collect()
    }

    fn pair_in(
        &self,
        set: &FxHashSet<(&G::Node, &G::Node)>,
        u: &G::Node,
        v: &G::Node,
    ) -> bool {
        set.contains(&(u, v)) || (!self.graph.is_directed() && set.contains(&(v, u)))
    }
}

impl<G: ?Sized> Clone for EdgeView<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: ?Sized> Copy for EdgeView<'_, G> {}

impl<'g, G: GraphQuery + ?Sized> IntoIterator for EdgeView<'g, G> {
    type Item = EdgeRef<'g, G::Node>;
    type IntoIter = EdgeRefIter<'g, G::Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'g, G: GraphQuery + ?Sized> IntoIterator for &EdgeView<'g, G> {
    type Item = EdgeRef<'g, G::Node>;
    type IntoIter = EdgeRefIter<'g, G::Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<G: GraphQuery + ?Sized> fmt::Debug for EdgeView<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.pairs()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{attrs, DiGraph, Graph, GraphMut, MultiGraph};
    use crate::views::GraphExt;

    #[test]
    fn test_undirected_edges_reported_once() {
        let g: Graph<u32> = Graph::from_edges([(1, 2), (2, 3), (3, 1), (2, 2)]);
        let pairs: Vec<(u32, u32)> = g.edges().iter().map(|e| e.pair()).collect();
        assert_eq!(pairs, vec![(1, 2), (1, 3), (2, 3), (2, 2)]);
        assert_eq!(g.edges().len(), 4);
        assert!(g.edges().contains(&3, &2));
    }

    #[test]
    fn test_in_edges_grouped_by_target() {
        let d: DiGraph<u32> = DiGraph::from_edges([(1, 3), (2, 1), (2, 3)]);
        let out: Vec<(u32, u32)> = d.edges().iter().map(|e| e.pair()).collect();
        let inc: Vec<(u32, u32)> = d.in_edges().iter().map(|e| e.pair()).collect();
        assert_eq!(out, vec![(1, 3), (2, 1), (2, 3)]);
        assert_eq!(inc, vec![(2, 1), (1, 3), (2, 3)]);
        assert!(!d.edges().contains(&3, &1));
    }

    #[test]
    fn test_multigraph_keys_reported() {
        let mut g: MultiGraph<u32> = MultiGraph::new();
        g.add_edge(1, 2);
        g.add_keyed_edge(2, 1, Some("ferry".into()), attrs([("w", 3i64)]));

        let snapshot = g.edges().snapshot();
        assert_eq!(
            snapshot,
            vec![
                (1, 2, Some(EdgeKey::Index(0))),
                (1, 2, Some(EdgeKey::from("ferry"))),
            ]
        );
        assert!(g.edges().contains_keyed(&2, &1, &"ferry".into()));

        let weights: Vec<Option<AttrValue>> = g
            .edges()
            .with_attr("w", None)
            .map(|(_, _, w)| w)
            .collect();
        assert_eq!(weights, vec![None, Some(AttrValue::Integer(3))]);
    }

    #[test]
    fn test_incident_to() {
        let g: Graph<u32> = Graph::from_edges([(1, 2), (2, 3), (3, 4)]);
        let pairs: Vec<(u32, u32)> = g
            .edges()
            .incident_to(&[2, 3, 9])
            .iter()
            .map(|e| e.pair())
            .collect();
        assert_eq!(pairs, vec![(2, 1), (2, 3), (3, 4)]);
    }

    #[test]
    fn test_set_operations_respect_orientation() {
        let g: Graph<u32> = Graph::from_edges([(1, 2), (2, 3)]);
        let other = [(2u32, 1u32), (5, 6)];
        let common: Vec<_> = g.edges().intersection(&other).into_iter().collect();
        assert_eq!(common, vec![(1, 2)]);
        let union: Vec<_> = g.edges().union(&other).into_iter().collect();
        assert_eq!(union, vec![(1, 2), (2, 3), (5, 6)]);
        let diff: Vec<_> = g.edges().difference(&other).into_iter().collect();
        assert_eq!(diff, vec![(2, 3)]);

        let d: DiGraph<u32> = DiGraph::from_edges([(1, 2)]);
        assert!(d.edges().intersection(&other).is_empty());
    }

    #[test]
    fn test_set_operations_between_views() {
        let g: Graph<u32> = Graph::from_edges([(1, 2), (2, 3), (3, 4)]);
        let h: Graph<u32> = Graph::from_edges([(3, 2), (4, 5)]);

        let common: Vec<_> = g.edges().intersection(h.edges()).into_iter().collect();
        assert_eq!(common, vec![(2, 3)]);
        let union: Vec<_> = g.edges().union(h.edges()).into_iter().collect();
        assert_eq!(union, vec![(1, 2), (2, 3), (3, 4), (4, 5)]);
        let diff: Vec<_> = g.edges().difference(&h.edges()).into_iter().collect();
        assert_eq!(diff, vec![(1, 2), (3, 4)]);

        let sub = g.subgraph([1, 2, 3]);
        let picked = sub.edges().incident_to(&[3]);
        let kept: Vec<_> = g.edges().intersection(&picked).into_iter().collect();
        assert_eq!(kept, vec![(2, 3)]);

        let d: DiGraph<u32> = DiGraph::from_edges([(3, 2)]);
        assert!(DiGraph::<u32>::from_edges([(2, 3)]).edges().intersection(d.edges()).is_empty());
    }
}
