//! Graph views: subgraph, reverse and reinterpreting views
//!
//! Every function here takes a graph or an existing view and returns a
//! [`GraphView`] that reads through to the graph owning the data. A view of a
//! view does not nest: it copies the layer list and adds one layer.

pub mod filters;
pub mod mutable;
pub mod view;

pub use mutable::SubgraphViewMut;
pub use view::GraphView;

use crate::graph::{
    Collapse, DirectedGraph, EdgeKey, EdgeSlot, EdgeSpec, GraphKind, GraphMut, GraphQuery,
    GraphResult, Node, UndirectedGraph,
};
use rustc_hash::FxHashSet;
use view::Layer;

/// Things a [`GraphView`] can be built from
pub trait AsGraphView<'g> {
    type Node: Node;

    fn as_graph_view(self) -> GraphView<'g, Self::Node>;
}

impl<'g, N: Node, S: EdgeSlot> AsGraphView<'g> for &'g UndirectedGraph<N, S> {
    type Node = N;

    fn as_graph_view(self) -> GraphView<'g, N> {
        GraphView::new(self)
    }
}

impl<'g, N: Node, S: EdgeSlot> AsGraphView<'g> for &'g DirectedGraph<N, S> {
    type Node = N;

    fn as_graph_view(self) -> GraphView<'g, N> {
        GraphView::new(self)
    }
}

impl<'g, N: Node> AsGraphView<'g> for &GraphView<'g, N> {
    type Node = N;

    fn as_graph_view(self) -> GraphView<'g, N> {
        self.clone()
    }
}

impl<'g, N: Node> AsGraphView<'g> for &'g (dyn GraphQuery<Node = N> + 'g) {
    type Node = N;

    fn as_graph_view(self) -> GraphView<'g, N> {
        GraphView::new(self)
    }
}

/// View showing the nodes that pass `filter_node` and the edges between
/// them that pass `filter_edge`
pub fn subgraph_view<'g, G, FN, FE>(
    graph: G,
    filter_node: FN,
    filter_edge: FE,
) -> GraphView<'g, G::Node>
where
    G: AsGraphView<'g>,
    FN: Fn(&G::Node) -> bool + 'g,
    FE: Fn(&G::Node, &G::Node, Option<&EdgeKey>) -> bool + 'g,
{
    graph
        .as_graph_view()
        .filter_nodes(filter_node)
        .filter_edges(filter_edge)
}

/// View of a directed graph with every edge reversed
pub fn reverse_view<'g, G: AsGraphView<'g>>(graph: G) -> GraphResult<GraphView<'g, G::Node>> {
    graph.as_graph_view().reversed()
}

/// View presenting `graph` as a graph of kind `kind`.
///
/// Fails with `AmbiguousConversion` when the conversion can merge edges and
/// no `collapse` rule is given.
pub fn generic_graph_view<'g, G: AsGraphView<'g>>(
    graph: G,
    kind: GraphKind,
    collapse: Option<Collapse>,
) -> GraphResult<GraphView<'g, G::Node>> {
    graph.as_graph_view().reinterpret(kind, collapse)
}

/// Induced subgraph on the nodes of `nbunch` that are in `graph`
pub fn subgraph<'g, G, I>(graph: G, nbunch: I) -> GraphView<'g, G::Node>
where
    G: AsGraphView<'g>,
    I: IntoIterator<Item = G::Node>,
{
    graph.as_graph_view().filter_nodes(filters::show_nodes(nbunch))
}

/// View containing the listed edges and their endpoints.
///
/// Items are `(u, v)` or `(u, v, key)` as for `add_edges_from`; a pair
/// without a key selects every parallel edge between the two nodes.
pub fn edge_subgraph<'g, G, I, E>(graph: G, edges: I) -> GraphView<'g, G::Node>
where
    G: AsGraphView<'g>,
    I: IntoIterator<Item = E>,
    E: EdgeSpec<G::Node>,
{
    let view = graph.as_graph_view();
    let selection = EdgeSelection::new(edges, view.is_directed());
    let nodes = selection.endpoints();
    view.filter_nodes(filters::show_nodes(nodes))
        .filter_edges(move |u, v, key| selection.matches(u, v, key))
}

/// View without the listed nodes and edges
pub fn restricted_view<'g, G, NI, EI, E>(graph: G, nodes: NI, edges: EI) -> GraphView<'g, G::Node>
where
    G: AsGraphView<'g>,
    NI: IntoIterator<Item = G::Node>,
    EI: IntoIterator<Item = E>,
    E: EdgeSpec<G::Node>,
{
    let view = graph.as_graph_view();
    let selection = EdgeSelection::new(edges, view.is_directed());
    view.filter_nodes(filters::hide_nodes(nodes))
        .filter_edges(move |u, v, key| !selection.matches(u, v, key))
}

/// Mutable subgraph view over `graph`
pub fn subgraph_view_mut<'g, G, FN, FE>(
    graph: &'g mut G,
    filter_node: FN,
    filter_edge: FE,
) -> SubgraphViewMut<'g, G>
where
    G: GraphMut,
    FN: Fn(&G::Node) -> bool + 'g,
    FE: Fn(&G::Node, &G::Node, Option<&EdgeKey>) -> bool + 'g,
{
    SubgraphViewMut::new(graph, filter_node, filter_edge)
}

/// Edge list with optional keys, matched in either orientation when
/// undirected
struct EdgeSelection<N> {
    keyed: FxHashSet<(N, N, EdgeKey)>,
    any_key: FxHashSet<(N, N)>,
}

impl<N: Node> EdgeSelection<N> {
    fn new<I, E>(edges: I, directed: bool) -> Self
    where
        I: IntoIterator<Item = E>,
        E: EdgeSpec<N>,
    {
        let mut keyed = FxHashSet::default();
        let mut any_key = FxHashSet::default();
        for edge in edges {
            let (u, v, key, _) = edge.into_parts();
            match key {
                Some(k) => {
                    if !directed {
                        keyed.insert((v.clone(), u.clone(), k.clone()));
                    }
                    keyed.insert((u, v, k));
                }
                None => {
                    if !directed {
                        any_key.insert((v.clone(), u.clone()));
                    }
                    any_key.insert((u, v));
                }
            }
        }
        EdgeSelection { keyed, any_key }
    }

    fn endpoints(&self) -> Vec<N> {
        self.keyed
            .iter()
            .map(|(u, _, _)| u.clone())
            .chain(self.any_key.iter().map(|(u, _)| u.clone()))
            .chain(self.keyed.iter().map(|(_, v, _)| v.clone()))
            .chain(self.any_key.iter().map(|(_, v)| v.clone()))
            .collect()
    }

    fn matches(&self, u: &N, v: &N, key: Option<&EdgeKey>) -> bool {
        let pair = (u.clone(), v.clone());
        if self.any_key.contains(&pair) {
            return true;
        }
        match key {
            Some(k) => self.keyed.contains(&(pair.0, pair.1, k.clone())),
            None => false,
        }
    }
}

impl<N: Node, S: EdgeSlot> UndirectedGraph<N, S> {
    /// Read-only view of the whole graph
    pub fn view(&self) -> GraphView<'_, N> {
        GraphView::new(self)
    }

    /// Induced subgraph view on `nbunch`
    pub fn subgraph<I: IntoIterator<Item = N>>(&self, nbunch: I) -> GraphView<'_, N> {
        subgraph(self, nbunch)
    }

    pub fn edge_subgraph<I, E>(&self, edges: I) -> GraphView<'_, N>
    where
        I: IntoIterator<Item = E>,
        E: EdgeSpec<N>,
    {
        edge_subgraph(self, edges)
    }
}

impl<N: Node, S: EdgeSlot> DirectedGraph<N, S> {
    pub fn view(&self) -> GraphView<'_, N> {
        GraphView::new(self)
    }

    pub fn subgraph<I: IntoIterator<Item = N>>(&self, nbunch: I) -> GraphView<'_, N> {
        subgraph(self, nbunch)
    }

    pub fn edge_subgraph<I, E>(&self, edges: I) -> GraphView<'_, N>
    where
        I: IntoIterator<Item = E>,
        E: EdgeSpec<N>,
    {
        edge_subgraph(self, edges)
    }

    /// Read-only view with every edge reversed
    pub fn reverse_view(&self) -> GraphView<'_, N> {
        GraphView::new(self).with_layer(Layer::Reverse, self.kind())
    }
}

impl<'g, N: Node> GraphView<'g, N> {
    pub fn view(&self) -> Self {
        self.clone()
    }

    pub fn subgraph<I: IntoIterator<Item = N>>(&self, nbunch: I) -> Self {
        subgraph(self, nbunch)
    }

    pub fn edge_subgraph<I, E>(&self, edges: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: EdgeSpec<N>,
    {
        edge_subgraph(self, edges)
    }
}
