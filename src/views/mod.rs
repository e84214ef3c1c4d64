//! Reporting views and the query extension trait
//!
//! Views hold a shared borrow of a graph (or graph view) and read through
//! to it on every call; they never cache structure. While a view is alive
//! the graph cannot be mutated. Code that needs to mutate while walking a
//! graph takes a `snapshot()` first.

pub mod adjacency;
pub mod degree;
pub mod edges;
pub mod nodes;

pub use adjacency::{AdjacencyView, EdgeBundle, NeighborView, Neighbors};
pub use degree::{DegreeView, WeightedDegreeView};
pub use edges::{EdgeEnds, EdgeRef, EdgeRefIter, EdgeView};
pub use nodes::NodeView;

use crate::graph::{AttrRecord, Direction, EdgeKey, GraphError, GraphQuery, GraphResult};

/// Convenience queries over any [`GraphQuery`]
pub trait GraphExt: GraphQuery {
    fn nodes(&self) -> NodeView<'_, Self> {
        NodeView::new(self)
    }

    fn edges(&self) -> EdgeView<'_, Self> {
        EdgeView::new(self, Direction::Outgoing)
    }

    /// Edges grouped by target; same as [`GraphExt::edges`] when undirected
    fn in_edges(&self) -> EdgeView<'_, Self> {
        EdgeView::new(self, Direction::Incoming)
    }

    fn adj(&self) -> AdjacencyView<'_, Self> {
        AdjacencyView::new(self, Direction::Outgoing)
    }

    fn succ(&self) -> AdjacencyView<'_, Self> {
        AdjacencyView::new(self, Direction::Outgoing)
    }

    fn pred(&self) -> AdjacencyView<'_, Self> {
        AdjacencyView::new(self, Direction::Incoming)
    }

    fn degree(&self) -> DegreeView<'_, Self> {
        DegreeView::new(self, Direction::Both)
    }

    fn in_degree(&self) -> DegreeView<'_, Self> {
        DegreeView::new(self, Direction::Incoming)
    }

    fn out_degree(&self) -> DegreeView<'_, Self> {
        DegreeView::new(self, Direction::Outgoing)
    }

    fn weighted_degree<'a>(&'a self, weight: &'a str) -> WeightedDegreeView<'a, Self> {
        WeightedDegreeView::new(self, Direction::Both, weight)
    }

    fn has_node(&self, n: &Self::Node) -> bool {
        self.contains_node(n)
    }

    fn has_edge(&self, u: &Self::Node, v: &Self::Node) -> bool {
        self.records_between(u, v).next().is_some()
    }

    fn has_keyed_edge(&self, u: &Self::Node, v: &Self::Node, key: &EdgeKey) -> bool {
        self.records_between(u, v).any(|(k, _)| k == Some(key))
    }

    /// Neighbors of `n` (successors when directed), each listed once
    fn neighbors(&self, n: &Self::Node) -> GraphResult<Neighbors<'_, Self::Node>> {
        match self.out_entries(n) {
            Some(entries) => Ok(Neighbors::new(Some(entries))),
            None => Err(GraphError::node_not_found(n)),
        }
    }

    fn successors(&self, n: &Self::Node) -> GraphResult<Neighbors<'_, Self::Node>> {
        self.neighbors(n)
    }

    fn predecessors(&self, n: &Self::Node) -> GraphResult<Neighbors<'_, Self::Node>> {
        match self.in_entries(n) {
            Some(entries) => Ok(Neighbors::new(Some(entries))),
            None => Err(GraphError::node_not_found(n)),
        }
    }

    /// `G[n]`
    fn neighbor_view(&self, n: &Self::Node) -> GraphResult<NeighborView<'_, Self>> {
        let node = self.node_key(n).ok_or_else(|| GraphError::node_not_found(n))?;
        Ok(NeighborView::new(self, node, Direction::Outgoing))
    }

    /// `G[u][v]`: the record of the edge, or of its first parallel edge
    fn edge_record(&self, u: &Self::Node, v: &Self::Node) -> GraphResult<&AttrRecord> {
        self.records_between(u, v)
            .next()
            .map(|(_, record)| record)
            .ok_or_else(|| GraphError::edge_not_found(u, v, None))
    }

    fn keyed_edge_record(
        &self,
        u: &Self::Node,
        v: &Self::Node,
        key: &EdgeKey,
    ) -> GraphResult<&AttrRecord> {
        self.records_between(u, v)
            .find(|(k, _)| *k == Some(key))
            .map(|(_, record)| record)
            .ok_or_else(|| GraphError::edge_not_found(u, v, Some(key)))
    }

    /// `G[u][v]` for multigraphs: key -> record
    fn edge_bundle(&self, u: &Self::Node, v: &Self::Node) -> GraphResult<EdgeBundle<'_, Self>> {
        let (Some(from), Some(to)) = (self.node_key(u), self.node_key(v)) else {
            return Err(GraphError::edge_not_found(u, v, None));
        };
        let bundle = EdgeBundle::new(self, from, to);
        if bundle.is_empty() {
            return Err(GraphError::edge_not_found(u, v, None));
        }
        Ok(bundle)
    }

    fn number_of_nodes(&self) -> usize {
        self.node_count()
    }

    fn number_of_edges(&self) -> usize {
        self.edge_count()
    }

    /// Number of edges `u -> v` (either orientation when undirected)
    fn number_of_edges_between(&self, u: &Self::Node, v: &Self::Node) -> usize {
        self.records_between(u, v).count()
    }

    /// Edge count, or the sum of `weight` over all edges
    fn size(&self, weight: Option<&str>) -> f64 {
        match weight {
            None => self.edge_count() as f64,
            Some(w) => self.edges().iter().map(|e| e.record.weight(w)).sum(),
        }
    }

    /// The nodes of `nbunch` that are in the graph, as stored
    fn nbunch_iter<'a, I>(&'a self, nbunch: I) -> Box<dyn Iterator<Item = &'a Self::Node> + 'a>
    where
        I: IntoIterator<Item = Self::Node>,
        I::IntoIter: 'a,
    {
        Box::new(nbunch.into_iter().filter_map(move |n| self.node_key(&n)))
    }

    fn selfloop_edges(&self) -> Box<dyn Iterator<Item = EdgeRef<'_, Self::Node>> + '_> {
        Box::new(self.node_iter().flat_map(move |n| {
            self.records_between(n, n).map(move |(key, record)| EdgeRef {
                u: n,
                v: n,
                key,
                record,
            })
        }))
    }

    fn number_of_selfloops(&self) -> usize {
        self.selfloop_edges().count()
    }
}

impl<G: GraphQuery + ?Sized> GraphExt for G {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{attrs, AttrValue, DiGraph, Graph, GraphMut, MultiDiGraph};

    #[test]
    fn test_triangle_queries() {
        let mut g: Graph<u32> = Graph::new();
        g.add_edges_from([(1, 2), (2, 3), (1, 3)]);

        assert_eq!(g.degree().get(&1), Ok(2));
        assert_eq!(g.neighbors(&2).unwrap().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert!(g.has_edge(&3, &1));
        assert!(g.neighbors(&9).is_err());
        assert_eq!(g.number_of_edges(), 3);
        assert_eq!(g.size(None), 3.0);
    }

    #[test]
    fn test_edge_record_lookup() {
        let mut d: DiGraph<&str> = DiGraph::new();
        d.add_edge_with("a", "b", attrs([("w", 4i64)]));

        assert_eq!(d.edge_record(&"a", &"b").unwrap().get("w"), Some(AttrValue::Integer(4)));
        assert_eq!(
            d.edge_record(&"b", &"a"),
            Err(GraphError::edge_not_found(&"b", &"a", None))
        );
        assert_eq!(d.size(Some("w")), 4.0);
        assert_eq!(d.predecessors(&"b").unwrap().collect::<Vec<_>>(), vec![&"a"]);
        assert_eq!(d.successors(&"b").unwrap().count(), 0);
    }

    #[test]
    fn test_keyed_lookup() {
        let mut m: MultiDiGraph<u32> = MultiDiGraph::new();
        m.add_edge(1, 2);
        let key = m.add_edge(1, 2);

        assert!(m.has_keyed_edge(&1, &2, &key));
        assert!(!m.has_keyed_edge(&2, &1, &key));
        assert_eq!(m.number_of_edges_between(&1, &2), 2);
        assert_eq!(m.edge_bundle(&1, &2).unwrap().len(), 2);
        assert!(m.edge_bundle(&2, &1).is_err());
        assert!(m.keyed_edge_record(&1, &2, &EdgeKey::Index(5)).is_err());
    }

    #[test]
    fn test_selfloops_and_nbunch() {
        let g: Graph<u32> = Graph::from_edges([(1, 1), (1, 2), (3, 3)]);
        assert_eq!(g.number_of_selfloops(), 2);
        let loops: Vec<u32> = g.selfloop_edges().map(|e| *e.u).collect();
        assert_eq!(loops, vec![1, 3]);

        let present: Vec<u32> = g.nbunch_iter([3, 7, 1]).copied().collect();
        assert_eq!(present, vec![3, 1]);
    }

    #[test]
    fn test_works_through_trait_object() {
        let g: Graph<u32> = Graph::from_edges([(1, 2)]);
        let q: &dyn GraphQuery<Node = u32> = &g;
        assert_eq!(q.nodes().len(), 2);
        assert_eq!(q.edges().snapshot(), vec![(1, 2, None)]);
    }
}
