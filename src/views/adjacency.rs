//! Adjacency views: `G[u]` and `G[u][v]`

use crate::graph::{
    AttrRecord, Direction, EdgeIter, EdgeKey, GraphError, GraphQuery, GraphResult, RecordIter,
};
use std::fmt;

/// Distinct neighbors over entries grouped by neighbor
pub struct Neighbors<'g, N> {
    entries: Option<EdgeIter<'g, N>>,
    last: Option<&'g N>,
}

impl<'g, N> Neighbors<'g, N> {
    pub(crate) fn new(entries: Option<EdgeIter<'g, N>>) -> Self {
        Neighbors { entries, last: None }
    }
}

impl<'g, N: PartialEq> Iterator for Neighbors<'g, N> {
    type Item = &'g N;

    fn next(&mut self) -> Option<&'g N> {
        let entries = self.entries.as_mut()?;
        for e in entries {
            if self.last != Some(e.node) {
                self.last = Some(e.node);
                return Some(e.node);
            }
        }
        None
    }
}

/// Node -> neighbors mapping of a graph.
///
/// `Outgoing` is the successor map (the only map for undirected graphs),
/// `Incoming` the predecessor map.
pub struct AdjacencyView<'g, G: ?Sized> {
    graph: &'g G,
    direction: Direction,
}

impl<'g, G: GraphQuery + ?Sized> AdjacencyView<'g, G> {
    pub fn new(graph: &'g G, direction: Direction) -> Self {
        AdjacencyView { graph, direction }
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, n: &G::Node) -> bool {
        self.graph.contains_node(n)
    }

    pub fn get(&self, n: &G::Node) -> GraphResult<NeighborView<'g, G>> {
        let node = self
            .graph
            .node_key(n)
            .ok_or_else(|| GraphError::node_not_found(n))?;
        Ok(NeighborView {
            graph: self.graph,
            node,
            direction: self.direction,
        })
    }

    /// `(node, neighbor view)` pairs in node order
    pub fn iter(&self) -> impl Iterator<Item = (&'g G::Node, NeighborView<'g, G>)> + 'g {
        let graph = self.graph;
        let direction = self.direction;
        graph.node_iter().map(move |node| {
            (
                node,
                NeighborView {
                    graph,
                    node,
                    direction,
                },
            )
        })
    }
}

/// Neighbors of one node, each with its edge bundle
pub struct NeighborView<'g, G: GraphQuery + ?Sized> {
    graph: &'g G,
    node: &'g G::Node,
    direction: Direction,
}

impl<'g, G: GraphQuery + ?Sized> NeighborView<'g, G> {
    pub(crate) fn new(graph: &'g G, node: &'g G::Node, direction: Direction) -> Self {
        NeighborView {
            graph,
            node,
            direction,
        }
    }

    pub fn node(&self) -> &'g G::Node {
        self.node
    }

    /// Number of distinct neighbors
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn contains(&self, v: &G::Node) -> bool {
        let (a, b) = self.oriented(v);
        self.graph.records_between(a, b).next().is_some()
    }

    pub fn iter(&self) -> Neighbors<'g, G::Node> {
        Neighbors::new(self.entries())
    }

    /// `G[u][v]`: the edge bundle between this node and `v`
    pub fn get(&self, v: &G::Node) -> GraphResult<EdgeBundle<'g, G>> {
        let Some(other) = self.graph.node_key(v) else {
            let (from, to) = self.oriented(v);
            return Err(GraphError::edge_not_found(from, to, None));
        };
        let (from, to) = self.oriented(other);
        let bundle = EdgeBundle::new(self.graph, from, to);
        if bundle.is_empty() {
            return Err(GraphError::edge_not_found(from, to, None));
        }
        Ok(bundle)
    }

    /// Every `(neighbor, key, record)` entry, grouped by neighbor
    pub fn entries(&self) -> Option<EdgeIter<'g, G::Node>> {
        match self.direction {
            Direction::Incoming => self.graph.in_entries(self.node),
            _ => self.graph.out_entries(self.node),
        }
    }

    fn oriented<'a>(&self, v: &'a G::Node) -> (&'a G::Node, &'a G::Node)
    where
        'g: 'a,
    {
        match self.direction {
            Direction::Incoming => (v, self.node),
            _ => (self.node, v),
        }
    }
}

impl<G: GraphQuery + ?Sized> fmt::Debug for NeighborView<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Records of the edges `from -> to`.
///
/// A simple graph's bundle holds one record with no key; a multigraph's maps
/// each parallel edge's key to its record. The bundle reads through to the
/// graph on every call.
pub struct EdgeBundle<'g, G: GraphQuery + ?Sized> {
    graph: &'g G,
    from: &'g G::Node,
    to: &'g G::Node,
}

impl<'g, G: GraphQuery + ?Sized> EdgeBundle<'g, G> {
    pub(crate) fn new(graph: &'g G, from: &'g G::Node, to: &'g G::Node) -> Self {
        EdgeBundle { graph, from, to }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn iter(&self) -> RecordIter<'g> {
        self.graph.records_between(self.from, self.to)
    }

    /// The edge record of a simple graph, or the first parallel edge
    pub fn record(&self) -> Option<&'g AttrRecord> {
        self.iter().next().map(|(_, record)| record)
    }

    pub fn get(&self, key: &EdgeKey) -> Option<&'g AttrRecord> {
        self.iter()
            .find(|(k, _)| *k == Some(key))
            .map(|(_, record)| record)
    }

    pub fn contains_key(&self, key: &EdgeKey) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'g EdgeKey> + 'g {
        self.iter().filter_map(|(k, _)| k)
    }
}

impl<G: GraphQuery + ?Sized> fmt::Debug for EdgeBundle<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
