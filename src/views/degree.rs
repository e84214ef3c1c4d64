//! Degree reporting views

use crate::graph::{Direction, GraphError, GraphQuery, GraphResult};
use std::fmt;

/// Edge count per node.
///
/// `Both` on a directed graph is in-degree plus out-degree. On an undirected
/// graph every direction reports the degree, with self-loops counted twice.
pub struct DegreeView<'g, G: ?Sized> {
    graph: &'g G,
    direction: Direction,
}

impl<'g, G: GraphQuery + ?Sized> DegreeView<'g, G> {
    pub fn new(graph: &'g G, direction: Direction) -> Self {
        DegreeView { graph, direction }
    }

    pub fn get(&self, n: &G::Node) -> GraphResult<usize> {
        degree_of(self.graph, self.direction, n).ok_or_else(|| GraphError::node_not_found(n))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'g G::Node, usize)> + 'g {
        let graph = self.graph;
        let direction = self.direction;
        graph
            .node_iter()
            .map(move |n| (n, degree_of(graph, direction, n).unwrap_or(0)))
    }

    /// Degrees of the nodes of `nbunch` that are in the graph
    pub fn incident_to<'a, I>(&self, nbunch: I) -> Vec<(&'g G::Node, usize)>
    where
        I: IntoIterator<Item = &'a G::Node>,
        G::Node: 'a,
    {
        nbunch
            .into_iter()
            .filter_map(|n| {
                let n = self.graph.node_key(n)?;
                degree_of(self.graph, self.direction, n).map(|d| (n, d))
            })
            .collect()
    }

    pub fn total(&self) -> usize {
        self.iter().map(|(_, d)| d).sum()
    }

    pub fn snapshot(&self) -> Vec<(G::Node, usize)> {
        self.iter().map(|(n, d)| (n.clone(), d)).collect()
    }
}

/// Sum of an edge attribute per node; edges without a numeric value weigh 1
pub struct WeightedDegreeView<'g, G: ?Sized> {
    graph: &'g G,
    direction: Direction,
    weight: &'g str,
}

impl<'g, G: GraphQuery + ?Sized> WeightedDegreeView<'g, G> {
    pub fn new(graph: &'g G, direction: Direction, weight: &'g str) -> Self {
        WeightedDegreeView {
            graph,
            direction,
            weight,
        }
    }

    pub fn get(&self, n: &G::Node) -> GraphResult<f64> {
        weighted_degree_of(self.graph, self.direction, n, self.weight)
            .ok_or_else(|| GraphError::node_not_found(n))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'g G::Node, f64)> + 'g {
        let graph = self.graph;
        let direction = self.direction;
        let weight = self.weight;
        graph.node_iter().map(move |n| {
            (n, weighted_degree_of(graph, direction, n, weight).unwrap_or(0.0))
        })
    }

    pub fn incident_to<'a, I>(&self, nbunch: I) -> Vec<(&'g G::Node, f64)>
    where
        I: IntoIterator<Item = &'a G::Node>,
        G::Node: 'a,
    {
        nbunch
            .into_iter()
            .filter_map(|n| {
                let n = self.graph.node_key(n)?;
                weighted_degree_of(self.graph, self.direction, n, self.weight).map(|d| (n, d))
            })
            .collect()
    }

    pub fn total(&self) -> f64 {
        self.iter().map(|(_, d)| d).sum()
    }

    pub fn snapshot(&self) -> Vec<(G::Node, f64)> {
        self.iter().map(|(n, d)| (n.clone(), d)).collect()
    }
}

fn degree_of<G: GraphQuery + ?Sized>(
    graph: &G,
    direction: Direction,
    n: &G::Node,
) -> Option<usize> {
    if !graph.is_directed() {
        let loops = graph.records_between(n, n).count();
        return graph.out_count(n).map(|count| count + loops);
    }
    match direction {
        Direction::Outgoing => graph.out_count(n),
        Direction::Incoming => graph.in_count(n),
        Direction::Both => Some(graph.out_count(n)? + graph.in_count(n)?),
    }
}

fn weighted_degree_of<G: GraphQuery + ?Sized>(
    graph: &G,
    direction: Direction,
    n: &G::Node,
    weight: &str,
) -> Option<f64> {
    if !graph.is_directed() {
        let loops: f64 = graph
            .records_between(n, n)
            .map(|(_, record)| record.weight(weight))
            .sum();
        return graph.out_weight(n, weight).map(|sum| sum + loops);
    }
    match direction {
        Direction::Outgoing => graph.out_weight(n, weight),
        Direction::Incoming => graph.in_weight(n, weight),
        Direction::Both => Some(graph.out_weight(n, weight)? + graph.in_weight(n, weight)?),
    }
}

impl<G: GraphQuery + ?Sized> fmt::Debug for DegreeView<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<G: GraphQuery + ?Sized> fmt::Debug for WeightedDegreeView<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{attrs, DiGraph, Graph, GraphMut, MultiGraph};
    use crate::views::GraphExt;

    #[test]
    fn test_undirected_degree_counts_loops_twice() {
        let g: Graph<u32> = Graph::from_edges([(1, 2), (1, 1)]);
        assert_eq!(g.degree().get(&1), Ok(3));
        assert_eq!(g.degree().get(&2), Ok(1));
        assert_eq!(g.degree().total(), 2 * g.edge_count());
        assert_eq!(g.degree().get(&5), Err(GraphError::node_not_found(&5u32)));
    }

    #[test]
    fn test_directed_degrees() {
        let d: DiGraph<u32> = DiGraph::from_edges([(1, 2), (3, 2), (2, 2)]);
        assert_eq!(d.in_degree().get(&2), Ok(3));
        assert_eq!(d.out_degree().get(&2), Ok(1));
        assert_eq!(d.degree().get(&2), Ok(4));
        assert_eq!(d.degree().snapshot(), vec![(1, 1), (2, 4), (3, 1)]);
    }

    #[test]
    fn test_weighted_degree() {
        let mut g: MultiGraph<&str> = MultiGraph::new();
        g.add_edge_with("a", "b", attrs([("w", 2.5)]));
        g.add_edge_with("a", "b", attrs([("w", 1i64)]));
        g.add_edge("a", "a");

        let weighted = g.weighted_degree("w");
        assert_eq!(weighted.get(&"a"), Ok(2.5 + 1.0 + 2.0));
        assert_eq!(weighted.get(&"b"), Ok(3.5));
        assert_eq!(weighted.incident_to(&["b", "zz"]), vec![(&"b", 3.5)]);
    }
}
