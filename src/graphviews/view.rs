//! Layered, read-through graph views
//!
//! A `GraphView` is the graph that owns the data plus a flat stack of
//! layers. Each layer produces a graph kind and is evaluated against the
//! layers below it, so an edge filter placed after a reverse sees reversed
//! edges. Nothing structural is copied; records handed out are the owner's.

use crate::graph::{
    AttrRecord, Collapse, EdgeEntry, EdgeIter, EdgeKey, FxIndexMap, GraphError, GraphKind,
    GraphQuery, GraphResult, Node, NodeIter, RecordIter,
};
use std::fmt;
use std::rc::Rc;
use tracing::debug;

pub(crate) type NodePredicate<'g, N> = Rc<dyn Fn(&N) -> bool + 'g>;
pub(crate) type EdgePredicate<'g, N> = Rc<dyn Fn(&N, &N, Option<&EdgeKey>) -> bool + 'g>;

/// Keys given to the edges of a simple graph presented as a multigraph.
/// Merging both directions of a simple digraph yields at most two.
static SYNTHETIC_KEYS: [EdgeKey; 2] = [EdgeKey::Index(0), EdgeKey::Index(1)];

pub(crate) enum Layer<'g, N> {
    Nodes(NodePredicate<'g, N>),
    Edges(EdgePredicate<'g, N>),
    Reverse,
    Reinterpret(Collapse),
}

impl<N> Clone for Layer<'_, N> {
    fn clone(&self) -> Self {
        match self {
            Layer::Nodes(f) => Layer::Nodes(Rc::clone(f)),
            Layer::Edges(f) => Layer::Edges(Rc::clone(f)),
            Layer::Reverse => Layer::Reverse,
            Layer::Reinterpret(collapse) => Layer::Reinterpret(*collapse),
        }
    }
}

struct Step<'g, N> {
    layer: Layer<'g, N>,
    kind: GraphKind,
}

impl<N> Clone for Step<'_, N> {
    fn clone(&self) -> Self {
        Step {
            layer: self.layer.clone(),
            kind: self.kind,
        }
    }
}

/// Read-only view over a graph owned elsewhere
pub struct GraphView<'g, N: Node> {
    base: &'g (dyn GraphQuery<Node = N> + 'g),
    steps: Vec<Step<'g, N>>,
}

impl<N: Node> Clone for GraphView<'_, N> {
    fn clone(&self) -> Self {
        GraphView {
            base: self.base,
            steps: self.steps.clone(),
        }
    }
}

impl<'g, N: Node> GraphView<'g, N> {
    /// View of `base` with no layers
    pub fn new(base: &'g (dyn GraphQuery<Node = N> + 'g)) -> Self {
        GraphView {
            base,
            steps: Vec::new(),
        }
    }

    /// The graph that owns the data
    pub fn base(&self) -> &'g (dyn GraphQuery<Node = N> + 'g) {
        self.base
    }

    /// Number of layers between this view and its owner
    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    /// New view hiding the nodes for which `f` is false
    pub fn filter_nodes<F>(&self, f: F) -> Self
    where
        F: Fn(&N) -> bool + 'g,
    {
        self.with_layer(Layer::Nodes(Rc::new(f)), self.kind())
    }

    /// New view hiding the edges for which `f` is false.
    ///
    /// Undirected edges are passed with their endpoints in node insertion
    /// order. `key` is `Some` on multigraphs.
    pub fn filter_edges<F>(&self, f: F) -> Self
    where
        F: Fn(&N, &N, Option<&EdgeKey>) -> bool + 'g,
    {
        self.with_layer(Layer::Edges(Rc::new(f)), self.kind())
    }

    /// New view with every edge reversed; directed views only
    pub fn reversed(&self) -> GraphResult<Self> {
        let kind = self.kind();
        if !kind.directed {
            return Err(GraphError::Unsupported(format!(
                "reverse view of an undirected {}",
                kind
            )));
        }
        Ok(self.with_layer(Layer::Reverse, kind))
    }

    /// New view presenting this one as a graph of kind `kind`.
    ///
    /// Combinations that can merge edges need a `collapse` rule; without one
    /// they fail with [`GraphError::AmbiguousConversion`].
    pub fn reinterpret(&self, kind: GraphKind, collapse: Option<Collapse>) -> GraphResult<Self> {
        let from = self.kind();
        let collapse = match collapse {
            Some(rule) => rule,
            None if from.loses_information_as(kind) => {
                return Err(GraphError::AmbiguousConversion { from, to: kind });
            }
            None => Collapse::First,
        };
        Ok(self.with_layer(Layer::Reinterpret(collapse), kind))
    }

    pub(crate) fn with_layer(&self, layer: Layer<'g, N>, kind: GraphKind) -> Self {
        let mut steps = self.steps.clone();
        steps.push(Step { layer, kind });
        debug!("Built {} view with {} layers", kind, steps.len());
        GraphView {
            base: self.base,
            steps,
        }
    }

    fn kind_at(&self, depth: usize) -> GraphKind {
        match depth.checked_sub(1).and_then(|i| self.steps.get(i)) {
            Some(step) => step.kind,
            None => self.base.kind(),
        }
    }

    fn node_ok(&self, n: &N) -> bool {
        self.steps.iter().all(|step| match &step.layer {
            Layer::Nodes(f) => f(n),
            _ => true,
        })
    }

    fn visible(&self, n: &N) -> bool {
        self.base.contains_node(n) && self.node_ok(n)
    }

    fn edge_passes(
        &self,
        f: &EdgePredicate<'g, N>,
        kind: GraphKind,
        u: &N,
        v: &N,
        key: Option<&EdgeKey>,
    ) -> bool {
        if !kind.directed && self.base.node_rank(v) < self.base.node_rank(u) {
            f(v, u, key)
        } else {
            f(u, v, key)
        }
    }

    fn out_at<'a>(&'a self, n: &N, depth: usize) -> Option<EdgeIter<'a, N>> {
        let Some(step) = depth.checked_sub(1).and_then(|i| self.steps.get(i)) else {
            return self.base.out_entries(n);
        };
        match &step.layer {
            Layer::Nodes(_) => self.out_at(n, depth - 1),
            Layer::Edges(f) => {
                let kind = self.kind_at(depth - 1);
                let n = self.base.node_key(n)?;
                let entries = self.out_at(n, depth - 1)?;
                Some(Box::new(entries.filter(move |e| {
                    self.edge_passes(f, kind, n, e.node, e.key)
                })))
            }
            Layer::Reverse => self.in_at(n, depth - 1),
            Layer::Reinterpret(collapse) => self.reinterpret_at(n, depth, true, *collapse),
        }
    }

    fn in_at<'a>(&'a self, n: &N, depth: usize) -> Option<EdgeIter<'a, N>> {
        let Some(step) = depth.checked_sub(1).and_then(|i| self.steps.get(i)) else {
            return self.base.in_entries(n);
        };
        match &step.layer {
            Layer::Nodes(_) => self.in_at(n, depth - 1),
            Layer::Edges(f) => {
                let kind = self.kind_at(depth - 1);
                let n = self.base.node_key(n)?;
                let entries = self.in_at(n, depth - 1)?;
                Some(Box::new(entries.filter(move |e| {
                    self.edge_passes(f, kind, e.node, n, e.key)
                })))
            }
            Layer::Reverse => self.out_at(n, depth - 1),
            Layer::Reinterpret(collapse) => self.reinterpret_at(n, depth, false, *collapse),
        }
    }

    fn between_at<'a>(&'a self, u: &N, v: &N, depth: usize) -> RecordIter<'a> {
        let Some(step) = depth.checked_sub(1).and_then(|i| self.steps.get(i)) else {
            return self.base.records_between(u, v);
        };
        match &step.layer {
            Layer::Nodes(_) => self.between_at(u, v, depth - 1),
            Layer::Edges(f) => {
                let kind = self.kind_at(depth - 1);
                let (Some(u), Some(v)) = (self.base.node_key(u), self.base.node_key(v)) else {
                    return Box::new(std::iter::empty());
                };
                Box::new(
                    self.between_at(u, v, depth - 1)
                        .filter(move |(key, _)| self.edge_passes(f, kind, u, v, *key)),
                )
            }
            Layer::Reverse => self.between_at(v, u, depth - 1),
            Layer::Reinterpret(collapse) => {
                let from = self.kind_at(depth - 1);
                let to = self.kind_at(depth);
                if from == to {
                    return self.between_at(u, v, depth - 1);
                }
                let (Some(u), Some(v)) = (self.base.node_key(u), self.base.node_key(v)) else {
                    return Box::new(std::iter::empty());
                };
                let candidates = self.candidates_between(u, v, depth - 1, from, to);
                let mut out = Vec::new();
                resolve_group(v, &candidates, from, to, *collapse, &mut out);
                Box::new(out.into_iter().map(|e| (e.key, e.record)))
            }
        }
    }

    /// Entries of `n` after the reinterpret layer at `depth`
    fn reinterpret_at<'a>(
        &'a self,
        n: &N,
        depth: usize,
        outgoing: bool,
        collapse: Collapse,
    ) -> Option<EdgeIter<'a, N>> {
        let from = self.kind_at(depth - 1);
        let to = self.kind_at(depth);
        if from == to {
            return if outgoing {
                self.out_at(n, depth - 1)
            } else {
                self.in_at(n, depth - 1)
            };
        }
        let n = self.base.node_key(n)?;
        let groups = if from.directed && !to.directed {
            self.merged_groups(n, depth - 1)?
        } else if outgoing {
            group_by_neighbor(self.out_at(n, depth - 1)?)
        } else {
            group_by_neighbor(self.in_at(n, depth - 1)?)
        };

        let mut out = Vec::new();
        for (v, candidates) in groups {
            resolve_group(v, &candidates, from, to, collapse, &mut out);
        }
        Some(Box::new(out.into_iter()))
    }

    /// Both directions of `n` merged per neighbor, candidates ordered by the
    /// insertion rank of their source node
    fn merged_groups<'a>(
        &'a self,
        n: &'a N,
        depth: usize,
    ) -> Option<Vec<(&'a N, Vec<EdgeEntry<'a, N>>)>> {
        type Sides<'a, N> = (Vec<EdgeEntry<'a, N>>, Vec<EdgeEntry<'a, N>>);
        let mut sides: FxIndexMap<&'a N, Sides<'a, N>> = FxIndexMap::default();
        for e in self.out_at(n, depth)? {
            sides.entry(e.node).or_default().0.push(e);
        }
        for e in self.in_at(n, depth)? {
            // a self-loop already came through the outgoing side
            if e.node != n {
                sides.entry(e.node).or_default().1.push(e);
            }
        }
        let rank = self.base.node_rank(n);
        Some(
            sides
                .into_iter()
                .map(|(v, (outs, ins))| {
                    let candidates: Vec<EdgeEntry<'a, N>> = if self.base.node_rank(v) < rank {
                        ins.into_iter().chain(outs).collect()
                    } else {
                        outs.into_iter().chain(ins).collect()
                    };
                    (v, candidates)
                })
                .collect(),
        )
    }

    /// Candidates for the pair `u - v` below a reinterpret layer, in the
    /// order `merged_groups` would list them
    fn candidates_between<'a>(
        &'a self,
        u: &'a N,
        v: &'a N,
        depth: usize,
        from: GraphKind,
        to: GraphKind,
    ) -> Vec<EdgeEntry<'a, N>> {
        let side = |a: &'a N, b: &'a N| {
            self.between_at(a, b, depth)
                .map(move |(key, record)| EdgeEntry { node: v, key, record })
        };
        if !from.directed || to.directed || u == v {
            return side(u, v).collect();
        }
        if self.base.node_rank(v) < self.base.node_rank(u) {
            side(v, u).chain(side(u, v)).collect()
        } else {
            side(u, v).chain(side(v, u)).collect()
        }
    }
}

/// Resolve the candidates toward neighbor `v` into the entries a view of
/// kind `to` shows
fn resolve_group<'a, N: Node>(
    v: &'a N,
    candidates: &[EdgeEntry<'a, N>],
    from: GraphKind,
    to: GraphKind,
    collapse: Collapse,
    out: &mut Vec<EdgeEntry<'a, N>>,
) {
    if !to.multigraph {
        let pick = match collapse {
            Collapse::First => candidates.first(),
            Collapse::Last => candidates.last(),
        };
        if let Some(e) = pick {
            out.push(EdgeEntry { node: v, key: None, record: e.record });
        }
    } else if from.multigraph {
        let mut by_key: FxIndexMap<Option<&'a EdgeKey>, &'a AttrRecord> = FxIndexMap::default();
        for e in candidates {
            match collapse {
                Collapse::First => {
                    by_key.entry(e.key).or_insert(e.record);
                }
                Collapse::Last => {
                    by_key.insert(e.key, e.record);
                }
            }
        }
        out.extend(by_key.into_iter().map(|(key, record)| EdgeEntry { node: v, key, record }));
    } else {
        out.extend(candidates.iter().zip(SYNTHETIC_KEYS.iter()).map(|(e, key)| EdgeEntry {
            node: v,
            key: Some(key),
            record: e.record,
        }));
    }
}

fn group_by_neighbor<'a, N: Node>(entries: EdgeIter<'a, N>) -> Vec<(&'a N, Vec<EdgeEntry<'a, N>>)> {
    let mut groups: Vec<(&'a N, Vec<EdgeEntry<'a, N>>)> = Vec::new();
    for e in entries {
        match groups.last_mut() {
            Some((v, group)) if *v == e.node => group.push(e),
            _ => groups.push((e.node, vec![e])),
        }
    }
    groups
}

impl<'g, N: Node> GraphQuery for GraphView<'g, N> {
    type Node = N;

    fn kind(&self) -> GraphKind {
        self.kind_at(self.steps.len())
    }

    fn graph_record(&self) -> &AttrRecord {
        self.base.graph_record()
    }

    fn node_key(&self, n: &N) -> Option<&N> {
        self.base.node_key(n).filter(|n| self.node_ok(n))
    }

    fn node_record(&self, n: &N) -> Option<&AttrRecord> {
        if self.node_ok(n) {
            self.base.node_record(n)
        } else {
            None
        }
    }

    fn node_rank(&self, n: &N) -> Option<usize> {
        if self.node_ok(n) {
            self.base.node_rank(n)
        } else {
            None
        }
    }

    fn node_count(&self) -> usize {
        if self.steps.iter().any(|s| matches!(s.layer, Layer::Nodes(_))) {
            self.node_iter().count()
        } else {
            self.base.node_count()
        }
    }

    fn node_iter(&self) -> NodeIter<'_, N> {
        Box::new(self.base.node_iter().filter(move |n| self.node_ok(n)))
    }

    fn out_entries(&self, n: &N) -> Option<EdgeIter<'_, N>> {
        if !self.visible(n) {
            return None;
        }
        let entries = self.out_at(n, self.steps.len())?;
        Some(Box::new(entries.filter(move |e| self.node_ok(e.node))))
    }

    fn in_entries(&self, n: &N) -> Option<EdgeIter<'_, N>> {
        if !self.visible(n) {
            return None;
        }
        let entries = self.in_at(n, self.steps.len())?;
        Some(Box::new(entries.filter(move |e| self.node_ok(e.node))))
    }

    fn records_between(&self, u: &N, v: &N) -> RecordIter<'_> {
        if !self.visible(u) || !self.visible(v) {
            return Box::new(std::iter::empty());
        }
        self.between_at(u, v, self.steps.len())
    }
}

impl<N: Node> fmt::Debug for GraphView<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphView")
            .field("kind", &self.kind())
            .field("layers", &self.steps.len())
            .field("nodes", &self.node_count())
            .finish()
    }
}
