//! Subgraph view that can mutate the graph beneath it

use super::view::{EdgePredicate, GraphView, Layer, NodePredicate};
use crate::graph::{AttrMap, EdgeKey, GraphError, GraphMut, GraphQuery, GraphResult};
use std::rc::Rc;
use tracing::trace;

/// Filtered view over `&mut G`.
///
/// Removing a node or edge the view shows removes it from the graph.
/// Anything the view hides is reported as not found. Additions are accepted
/// only when the filters would show the result; otherwise they fail with
/// [`GraphError::FrozenView`].
pub struct SubgraphViewMut<'g, G: GraphMut> {
    graph: &'g mut G,
    filter_node: NodePredicate<'g, G::Node>,
    filter_edge: EdgePredicate<'g, G::Node>,
}

impl<'g, G: GraphMut> SubgraphViewMut<'g, G> {
    pub fn new<FN, FE>(graph: &'g mut G, filter_node: FN, filter_edge: FE) -> Self
    where
        FN: Fn(&G::Node) -> bool + 'g,
        FE: Fn(&G::Node, &G::Node, Option<&EdgeKey>) -> bool + 'g,
    {
        SubgraphViewMut {
            graph,
            filter_node: Rc::new(filter_node),
            filter_edge: Rc::new(filter_edge),
        }
    }

    /// Read-only view of what this view currently shows
    pub fn view(&self) -> GraphView<'_, G::Node> {
        let base: &dyn GraphQuery<Node = G::Node> = &*self.graph;
        let filter_node: NodePredicate<'_, G::Node> = self.filter_node.clone();
        let filter_edge: EdgePredicate<'_, G::Node> = self.filter_edge.clone();
        let kind = base.kind();
        GraphView::new(base)
            .with_layer(Layer::Nodes(filter_node), kind)
            .with_layer(Layer::Edges(filter_edge), kind)
    }

    pub fn contains_node(&self, n: &G::Node) -> bool {
        self.graph.contains_node(n) && (self.filter_node)(n)
    }

    pub fn remove_node(&mut self, n: &G::Node) -> GraphResult<()> {
        if !self.contains_node(n) {
            return Err(GraphError::node_not_found(n));
        }
        trace!("Removing node {:?} through subgraph view", n);
        self.graph.delete_node(n)
    }

    /// Remove the edge `u - v` under `key`; with no key, the most recently
    /// added edge the view shows
    pub fn remove_edge(
        &mut self,
        u: &G::Node,
        v: &G::Node,
        key: Option<&EdgeKey>,
    ) -> GraphResult<()> {
        let multi = self.graph.is_multigraph();
        let target = {
            let view = self.view();
            view.records_between(u, v)
                .map(|(k, _)| k.cloned())
                .filter(|k| key.is_none() || !multi || k.as_ref() == key)
                .last()
        };
        match target {
            Some(k) => self.graph.delete_edge(u, v, k.as_ref()),
            None => Err(GraphError::edge_not_found(u, v, key)),
        }
    }

    /// Add `n` if the node filter shows it
    pub fn add_node(&mut self, n: G::Node, attrs: AttrMap) -> GraphResult<()> {
        if !(self.filter_node)(&n) {
            return Err(GraphError::FrozenView(format!("node {:?} is hidden by this view", n)));
        }
        self.graph.insert_node(n, attrs);
        Ok(())
    }

    /// Add an edge if the filters show both endpoints and the edge.
    ///
    /// The edge filter sees `key` as given.
    pub fn add_edge(
        &mut self,
        u: G::Node,
        v: G::Node,
        key: Option<EdgeKey>,
        attrs: AttrMap,
    ) -> GraphResult<Option<EdgeKey>> {
        if !(self.filter_node)(&u) || !(self.filter_node)(&v) {
            return Err(GraphError::FrozenView(format!(
                "edge {:?} - {:?} has an endpoint hidden by this view",
                u, v
            )));
        }
        if !self.edge_shown(&u, &v, key.as_ref()) {
            return Err(GraphError::FrozenView(format!(
                "edge {:?} - {:?} is hidden by this view",
                u, v
            )));
        }
        Ok(self.graph.insert_edge(u, v, key, attrs))
    }

    /// The graph beneath this view
    pub fn into_inner(self) -> &'g mut G {
        self.graph
    }

    fn edge_shown(&self, u: &G::Node, v: &G::Node, key: Option<&EdgeKey>) -> bool {
        if self.graph.is_directed() {
            return (self.filter_edge)(u, v, key);
        }
        // nodes not yet in the graph rank after all existing ones, in call order
        let rank = |n: &G::Node| self.graph.node_rank(n).unwrap_or(usize::MAX);
        if rank(v) < rank(u) {
            (self.filter_edge)(v, u, key)
        } else {
            (self.filter_edge)(u, v, key)
        }
    }
}
