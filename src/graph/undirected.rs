//! Undirected graphs: `Graph` and `MultiGraph`
//!
//! One adjacency store holds both halves of every edge. `adj[u][v]` and
//! `adj[v][u]` reference the same record; a self-loop is stored once.

use super::attr::{AttrMap, AttrRecord};
use super::config::GraphConfig;
use super::convert;
use super::directed::DirectedGraph;
use super::error::{GraphError, GraphResult};
use super::query::{EdgeIter, GraphMut, GraphQuery, NodeIter, RecordIter};
use super::store::{AdjacencyStore, EdgeSlot, MultiEdge, NodeTable, SingleEdge};
use super::types::{EdgeKey, GraphKind, Node};
use tracing::{debug, trace};

/// Undirected graph over edge slot type `S`
#[derive(Debug)]
pub struct UndirectedGraph<N, S> {
    graph: AttrRecord,
    nodes: NodeTable<N, AttrRecord>,
    adj: AdjacencyStore<N, S>,
}

/// Undirected simple graph
pub type Graph<N> = UndirectedGraph<N, SingleEdge>;

/// Undirected graph allowing parallel edges
pub type MultiGraph<N> = UndirectedGraph<N, MultiEdge>;

impl<N: Node, S: EdgeSlot> UndirectedGraph<N, S> {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::with_attrs(AttrMap::new())
    }

    /// Create an empty graph with graph-level attributes
    pub fn with_attrs(attrs: AttrMap) -> Self {
        UndirectedGraph {
            graph: AttrRecord::from_map(attrs),
            nodes: NodeTable::new(),
            adj: AdjacencyStore::new(),
        }
    }

    pub fn with_config(config: &GraphConfig) -> Self {
        let mut attrs = AttrMap::new();
        if let Some(name) = &config.name {
            attrs.insert("name".to_string(), name.as_str().into());
        }
        UndirectedGraph {
            graph: AttrRecord::from_map(attrs),
            nodes: NodeTable::with_capacity(config.node_capacity),
            adj: AdjacencyStore::with_capacity(config.node_capacity),
        }
    }

    pub fn graph_attrs(&self) -> &AttrRecord {
        &self.graph
    }

    /// Add a node; adding an existing node is a no-op
    pub fn add_node(&mut self, n: N) {
        self.ensure_node(&n);
    }

    /// Add a node and merge `attrs` into its record
    pub fn add_node_with(&mut self, n: N, attrs: AttrMap) {
        self.ensure_node(&n);
        if let Some(record) = self.nodes.get(&n) {
            record.update(attrs);
        }
    }

    /// Remove a node and all its incident edges.
    ///
    /// Takes amortized time in the combined degree of `n`'s neighbors, not
    /// in the number of nodes in the graph.
    pub fn remove_node(&mut self, n: &N) -> GraphResult<()> {
        if self.nodes.remove(n).is_none() {
            return Err(GraphError::node_not_found(n));
        }
        if let Some(nbrs) = self.adj.remove_node(n) {
            for v in nbrs.keys() {
                if v != n {
                    self.adj.take_slot(v, n);
                }
            }
        }
        trace!("Removed node {:?}", n);
        Ok(())
    }

    /// Remove all edges, keeping nodes and their attributes
    pub fn clear_edges(&mut self) {
        self.adj.clear_edges();
        debug!("Cleared edges of {} nodes", self.nodes.len());
    }

    /// Remove all nodes, edges and graph attributes
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.adj.clear();
        self.graph.clear();
    }

    /// Independent copy with the same structure and attribute values
    pub fn copy(&self) -> Self
    where
        Self: GraphMut<Node = N>,
    {
        convert::fill_graph(self)
    }

    /// Directed copy with each edge present in both directions
    pub fn to_directed(&self) -> DirectedGraph<N, S>
    where
        DirectedGraph<N, S>: GraphMut<Node = N>,
    {
        convert::fill_graph(self)
    }

    /// Independent undirected copy; same as [`UndirectedGraph::copy`]
    pub fn to_undirected(&self) -> Self
    where
        Self: GraphMut<Node = N>,
    {
        convert::fill_graph(self)
    }

    fn ensure_node(&mut self, n: &N) {
        if !self.nodes.contains_key(n) {
            self.nodes.insert(n.clone(), AttrRecord::new());
            self.adj.add_node(n.clone());
            trace!("Added node {:?}", n);
        }
    }
}

impl<N: Node> UndirectedGraph<N, SingleEdge> {
    /// Add an edge, creating missing endpoints
    pub fn add_edge(&mut self, u: N, v: N) {
        self.add_edge_with(u, v, AttrMap::new());
    }

    /// Add an edge or merge `attrs` into the existing one
    pub fn add_edge_with(&mut self, u: N, v: N, attrs: AttrMap) {
        self.ensure_node(&u);
        self.ensure_node(&v);
        if let Some(slot) = self.adj.slot(&u, &v) {
            slot.0.update(attrs);
            return;
        }
        trace!("Adding edge {:?} - {:?}", u, v);
        let record = AttrRecord::from_map(attrs);
        if u != v {
            self.adj.set_slot(&v, u.clone(), SingleEdge(record.clone()));
        }
        self.adj.set_slot(&u, v, SingleEdge(record));
    }

    pub fn remove_edge(&mut self, u: &N, v: &N) -> GraphResult<()> {
        if self.adj.take_slot(u, v).is_none() {
            return Err(GraphError::edge_not_found(u, v, None));
        }
        if u != v {
            self.adj.take_slot(v, u);
        }
        trace!("Removed edge {:?} - {:?}", u, v);
        Ok(())
    }
}

impl<N: Node> UndirectedGraph<N, MultiEdge> {
    /// Add a parallel edge under a fresh key
    pub fn add_edge(&mut self, u: N, v: N) -> EdgeKey {
        self.add_keyed_edge(u, v, None, AttrMap::new())
    }

    /// Add a parallel edge under a fresh key with attributes
    pub fn add_edge_with(&mut self, u: N, v: N, attrs: AttrMap) -> EdgeKey {
        self.add_keyed_edge(u, v, None, attrs)
    }

    /// Add an edge under `key` (a fresh key when `None`).
    ///
    /// Reusing an existing key merges `attrs` into that edge's record.
    pub fn add_keyed_edge(
        &mut self,
        u: N,
        v: N,
        key: Option<EdgeKey>,
        attrs: AttrMap,
    ) -> EdgeKey {
        self.ensure_node(&u);
        self.ensure_node(&v);
        let key = key.unwrap_or_else(|| self.new_edge_key(&u, &v));
        if let Some(record) = self.adj.slot(&u, &v).and_then(|slot| slot.get(Some(&key))) {
            record.update(attrs);
            return key;
        }
        trace!("Adding edge {:?} - {:?} key {}", u, v, key);
        let record = AttrRecord::from_map(attrs);
        if u != v {
            self.adj.insert_keyed(&v, &u, key.clone(), record.clone());
        }
        self.adj.insert_keyed(&u, &v, key.clone(), record);
        key
    }

    /// Key the next keyless `add_edge(u, v)` would use
    pub fn new_edge_key(&self, u: &N, v: &N) -> EdgeKey {
        self.adj
            .slot(u, v)
            .map(MultiEdge::next_key)
            .unwrap_or(EdgeKey::Index(0))
    }

    /// Remove the edge `u - v` under `key`, or the most recently added one
    /// when `key` is `None`
    pub fn remove_edge(&mut self, u: &N, v: &N, key: Option<&EdgeKey>) -> GraphResult<()> {
        let key = match key {
            Some(k) => k.clone(),
            None => self
                .adj
                .slot(u, v)
                .and_then(MultiEdge::last_key)
                .cloned()
                .ok_or_else(|| GraphError::edge_not_found(u, v, None))?,
        };
        if self.adj.remove_keyed(u, v, &key).is_none() {
            return Err(GraphError::edge_not_found(u, v, Some(&key)));
        }
        if u != v {
            self.adj.remove_keyed(v, u, &key);
        }
        trace!("Removed edge {:?} - {:?} key {}", u, v, key);
        Ok(())
    }
}

impl<N: Node, S: EdgeSlot> Default for UndirectedGraph<N, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Node, S: EdgeSlot> GraphQuery for UndirectedGraph<N, S> {
    type Node = N;

    fn kind(&self) -> GraphKind {
        GraphKind {
            directed: false,
            multigraph: S::MULTI,
        }
    }

    fn graph_record(&self) -> &AttrRecord {
        &self.graph
    }

    fn node_key(&self, n: &N) -> Option<&N> {
        self.nodes.get_key_value(n).map(|(k, _)| k)
    }

    fn node_record(&self, n: &N) -> Option<&AttrRecord> {
        self.nodes.get(n)
    }

    fn node_rank(&self, n: &N) -> Option<usize> {
        self.nodes.rank(n)
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node_iter(&self) -> NodeIter<'_, N> {
        Box::new(self.nodes.keys())
    }

    fn out_entries(&self, n: &N) -> Option<EdgeIter<'_, N>> {
        self.adj
            .edge_entries(n)
            .map(|entries| Box::new(entries) as EdgeIter<'_, N>)
    }

    fn in_entries(&self, n: &N) -> Option<EdgeIter<'_, N>> {
        self.out_entries(n)
    }

    fn records_between(&self, u: &N, v: &N) -> RecordIter<'_> {
        match self.adj.slot(u, v) {
            Some(slot) => Box::new(slot.entries()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn out_count(&self, n: &N) -> Option<usize> {
        self.adj.side_count(n)
    }

    fn in_count(&self, n: &N) -> Option<usize> {
        self.adj.side_count(n)
    }

    fn out_weight(&self, n: &N, weight: &str) -> Option<f64> {
        self.adj.side_weight(n, weight)
    }

    fn in_weight(&self, n: &N, weight: &str) -> Option<f64> {
        self.adj.side_weight(n, weight)
    }

    fn edge_count(&self) -> usize {
        (self.adj.entry_count() + self.adj.selfloop_count()) / 2
    }
}

impl<N: Node> GraphMut for UndirectedGraph<N, SingleEdge> {
    const KIND: GraphKind = GraphKind::GRAPH;

    fn with_graph_attrs(attrs: AttrMap) -> Self {
        Self::with_attrs(attrs)
    }

    fn insert_node(&mut self, n: N, attrs: AttrMap) {
        self.add_node_with(n, attrs);
    }

    fn insert_edge(
        &mut self,
        u: N,
        v: N,
        _key: Option<EdgeKey>,
        attrs: AttrMap,
    ) -> Option<EdgeKey> {
        self.add_edge_with(u, v, attrs);
        None
    }

    fn delete_node(&mut self, n: &N) -> GraphResult<()> {
        self.remove_node(n)
    }

    fn delete_edge(&mut self, u: &N, v: &N, _key: Option<&EdgeKey>) -> GraphResult<()> {
        self.remove_edge(u, v)
    }

    fn clear(&mut self) {
        UndirectedGraph::clear(self);
    }
}

impl<N: Node> GraphMut for UndirectedGraph<N, MultiEdge> {
    const KIND: GraphKind = GraphKind::MULTIGRAPH;

    fn with_graph_attrs(attrs: AttrMap) -> Self {
        Self::with_attrs(attrs)
    }

    fn insert_node(&mut self, n: N, attrs: AttrMap) {
        self.add_node_with(n, attrs);
    }

    fn insert_edge(&mut self, u: N, v: N, key: Option<EdgeKey>, attrs: AttrMap) -> Option<EdgeKey> {
        Some(self.add_keyed_edge(u, v, key, attrs))
    }

    fn delete_node(&mut self, n: &N) -> GraphResult<()> {
        self.remove_node(n)
    }

    fn delete_edge(&mut self, u: &N, v: &N, key: Option<&EdgeKey>) -> GraphResult<()> {
        self.remove_edge(u, v, key)
    }

    fn clear(&mut self) {
        UndirectedGraph::clear(self);
    }
}
