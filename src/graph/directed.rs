//! Directed graphs: `DiGraph` and `MultiDiGraph`
//!
//! Two adjacency stores mirror each other: `succ[u][v]` and `pred[v][u]`
//! reference the same record. Every mutation prepares what it needs (node
//! entries, the new record, cloned endpoints) before touching either store,
//! then writes both sides with no fallible step in between, so no caller can
//! observe one side updated and the other stale.

use super::attr::{AttrMap, AttrRecord};
use super::config::GraphConfig;
use super::convert;
use super::error::{GraphError, GraphResult};
use super::query::{EdgeIter, GraphMut, GraphQuery, NodeIter, RecordIter};
use super::store::{AdjacencyStore, EdgeSlot, MultiEdge, NodeTable, SingleEdge};
use super::types::{Collapse, EdgeKey, GraphKind, Node};
use super::undirected::UndirectedGraph;
use tracing::{debug, trace};

/// Directed graph over edge slot type `S`
#[derive(Debug)]
pub struct DirectedGraph<N, S> {
    graph: AttrRecord,
    nodes: NodeTable<N, AttrRecord>,
    succ: AdjacencyStore<N, S>,
    pred: AdjacencyStore<N, S>,
}

/// Directed simple graph
pub type DiGraph<N> = DirectedGraph<N, SingleEdge>;

/// Directed graph allowing parallel edges
pub type MultiDiGraph<N> = DirectedGraph<N, MultiEdge>;

impl<N: Node, S: EdgeSlot> DirectedGraph<N, S> {
    pub fn new() -> Self {
        Self::with_attrs(AttrMap::new())
    }

    pub fn with_attrs(attrs: AttrMap) -> Self {
        DirectedGraph {
            graph: AttrRecord::from_map(attrs),
            nodes: NodeTable::new(),
            succ: AdjacencyStore::new(),
            pred: AdjacencyStore::new(),
        }
    }

    pub fn with_config(config: &GraphConfig) -> Self {
        let mut attrs = AttrMap::new();
        if let Some(name) = &config.name {
            attrs.insert("name".to_string(), name.as_str().into());
        }
        DirectedGraph {
            graph: AttrRecord::from_map(attrs),
            nodes: NodeTable::with_capacity(config.node_capacity),
            succ: AdjacencyStore::with_capacity(config.node_capacity),
            pred: AdjacencyStore::with_capacity(config.node_capacity),
        }
    }

    pub fn graph_attrs(&self) -> &AttrRecord {
        &self.graph
    }

    pub fn add_node(&mut self, n: N) {
        self.ensure_node(&n);
    }

    pub fn add_node_with(&mut self, n: N, attrs: AttrMap) {
        self.ensure_node(&n);
        if let Some(record) = self.nodes.get(&n) {
            record.update(attrs);
        }
    }

    /// Remove a node, its out-edges and its in-edges.
    ///
    /// Takes amortized time in the combined degree of `n`'s neighbors, not
    /// in the number of nodes in the graph.
    pub fn remove_node(&mut self, n: &N) -> GraphResult<()> {
        if self.nodes.remove(n).is_none() {
            return Err(GraphError::node_not_found(n));
        }
        let succs = self.succ.remove_node(n);
        let preds = self.pred.remove_node(n);
        if let Some(succs) = succs {
            for v in succs.keys() {
                self.pred.take_slot(v, n);
            }
        }
        if let Some(preds) = preds {
            for u in preds.keys() {
                self.succ.take_slot(u, n);
            }
        }
        trace!("Removed node {:?}", n);
        Ok(())
    }

    pub fn clear_edges(&mut self) {
        self.succ.clear_edges();
        self.pred.clear_edges();
        debug!("Cleared edges of {} nodes", self.nodes.len());
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.succ.clear();
        self.pred.clear();
        self.graph.clear();
    }

    pub fn copy(&self) -> Self
    where
        Self: GraphMut<Node = N>,
    {
        convert::fill_graph(self)
    }

    /// Independent directed copy; same as [`DirectedGraph::copy`]
    pub fn to_directed(&self) -> Self
    where
        Self: GraphMut<Node = N>,
    {
        convert::fill_graph(self)
    }

    /// Undirected copy, merging antiparallel (and, for multigraphs,
    /// same-keyed) edges by `collapse`
    pub fn to_undirected(&self, collapse: Collapse) -> UndirectedGraph<N, S>
    where
        UndirectedGraph<N, S>: GraphMut<Node = N>,
    {
        convert::fill_graph_with(self, collapse)
    }

    /// Copy with every edge reversed
    pub fn reverse(&self) -> Self
    where
        Self: GraphMut<Node = N>,
    {
        let mut reversed = Self::with_attrs(self.graph.snapshot());
        for (n, record) in self.nodes.iter() {
            reversed.insert_node(n.clone(), record.snapshot());
        }
        for u in self.nodes.keys() {
            if let Some(entries) = self.succ.edge_entries(u) {
                for e in entries {
                    let record = e.record.snapshot();
                    reversed.insert_edge(e.node.clone(), u.clone(), e.key.cloned(), record);
                }
            }
        }
        reversed
    }

    fn ensure_node(&mut self, n: &N) {
        if !self.nodes.contains_key(n) {
            self.nodes.insert(n.clone(), AttrRecord::new());
            self.succ.add_node(n.clone());
            self.pred.add_node(n.clone());
            trace!("Added node {:?}", n);
        }
    }
}

impl<N: Node> DirectedGraph<N, SingleEdge> {
    pub fn add_edge(&mut self, u: N, v: N) {
        self.add_edge_with(u, v, AttrMap::new());
    }

    /// Add the edge `u -> v` or merge `attrs` into the existing one
    pub fn add_edge_with(&mut self, u: N, v: N, attrs: AttrMap) {
        self.ensure_node(&u);
        self.ensure_node(&v);
        if let Some(slot) = self.succ.slot(&u, &v) {
            slot.0.update(attrs);
            return;
        }
        trace!("Adding edge {:?} -> {:?}", u, v);
        let record = AttrRecord::from_map(attrs);
        let mirror = SingleEdge(record.clone());
        let source = u.clone();
        // commit
        self.succ.set_slot(&u, v.clone(), SingleEdge(record));
        self.pred.set_slot(&v, source, mirror);
    }

    pub fn remove_edge(&mut self, u: &N, v: &N) -> GraphResult<()> {
        if !self.succ.has_slot(u, v) {
            return Err(GraphError::edge_not_found(u, v, None));
        }
        self.succ.take_slot(u, v);
        self.pred.take_slot(v, u);
        trace!("Removed edge {:?} -> {:?}", u, v);
        Ok(())
    }
}

impl<N: Node> DirectedGraph<N, MultiEdge> {
    pub fn add_edge(&mut self, u: N, v: N) -> EdgeKey {
        self.add_keyed_edge(u, v, None, AttrMap::new())
    }

    pub fn add_edge_with(&mut self, u: N, v: N, attrs: AttrMap) -> EdgeKey {
        self.add_keyed_edge(u, v, None, attrs)
    }

    /// Add the edge `u -> v` under `key` (a fresh key when `None`).
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
        if let Some(record) = self.succ.slot(&u, &v).and_then(|slot| slot.get(Some(&key))) {
            record.update(attrs);
            return key;
        }
        trace!("Adding edge {:?} -> {:?} key {}", u, v, key);
        let record = AttrRecord::from_map(attrs);
        let mirror = record.clone();
        let mirror_key = key.clone();
        // commit
        self.succ.insert_keyed(&u, &v, key.clone(), record);
        self.pred.insert_keyed(&v, &u, mirror_key, mirror);
        key
    }

    pub fn new_edge_key(&self, u: &N, v: &N) -> EdgeKey {
        self.succ
            .slot(u, v)
            .map(MultiEdge::next_key)
            .unwrap_or(EdgeKey::Index(0))
    }

    /// Remove the edge `u -> v` under `key`, or the most recently added one
    /// when `key` is `None`
    pub fn remove_edge(&mut self, u: &N, v: &N, key: Option<&EdgeKey>) -> GraphResult<()> {
        let key = match key {
            Some(k) => k.clone(),
            None => self
                .succ
                .slot(u, v)
                .and_then(MultiEdge::last_key)
                .cloned()
                .ok_or_else(|| GraphError::edge_not_found(u, v, None))?,
        };
        let present = self
            .succ
            .slot(u, v)
            .map_or(false, |slot| slot.contains_key(&key));
        if !present {
            return Err(GraphError::edge_not_found(u, v, Some(&key)));
        }
        self.succ.remove_keyed(u, v, &key);
        self.pred.remove_keyed(v, u, &key);
        trace!("Removed edge {:?} -> {:?} key {}", u, v, key);
        Ok(())
    }
}

impl<N: Node, S: EdgeSlot> Default for DirectedGraph<N, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Node, S: EdgeSlot> GraphQuery for DirectedGraph<N, S> {
    type Node = N;

    fn kind(&self) -> GraphKind {
        GraphKind {
            directed: true,
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
        self.succ
            .edge_entries(n)
            .map(|entries| Box::new(entries) as EdgeIter<'_, N>)
    }

    fn in_entries(&self, n: &N) -> Option<EdgeIter<'_, N>> {
        self.pred
            .edge_entries(n)
            .map(|entries| Box::new(entries) as EdgeIter<'_, N>)
    }

    fn records_between(&self, u: &N, v: &N) -> RecordIter<'_> {
        match self.succ.slot(u, v) {
            Some(slot) => Box::new(slot.entries()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn out_count(&self, n: &N) -> Option<usize> {
        self.succ.side_count(n)
    }

    fn in_count(&self, n: &N) -> Option<usize> {
        self.pred.side_count(n)
    }

    fn out_weight(&self, n: &N, weight: &str) -> Option<f64> {
        self.succ.side_weight(n, weight)
    }

    fn in_weight(&self, n: &N, weight: &str) -> Option<f64> {
        self.pred.side_weight(n, weight)
    }

    fn edge_count(&self) -> usize {
        self.succ.entry_count()
    }
}

impl<N: Node> GraphMut for DirectedGraph<N, SingleEdge> {
    const KIND: GraphKind = GraphKind::DIGRAPH;

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
        DirectedGraph::clear(self);
    }
}

impl<N: Node> GraphMut for DirectedGraph<N, MultiEdge> {
    const KIND: GraphKind = GraphKind::MULTIDIGRAPH;

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
        DirectedGraph::clear(self);
    }
}
