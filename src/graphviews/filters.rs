//! Ready-made predicates for node and edge filtering views
//!
//! Edge predicates for undirected graphs (`show_edges`, `show_multiedges`
//! and their `hide_` forms) match either orientation of a listed pair.
//! The `diedges` forms match the listed orientation only.
//!
//! The show/hide helpers collect their input up front and return a boxed
//! predicate that owns the collected set, so the input iterator may borrow
//! from the caller.

use crate::graph::{EdgeKey, Node};
use rustc_hash::FxHashSet;

/// Node predicate owning its node set
pub type NodeFilter<N> = Box<dyn Fn(&N) -> bool>;

/// Edge predicate owning its edge set
pub type EdgeFilter<N> = Box<dyn Fn(&N, &N, Option<&EdgeKey>) -> bool>;

/// Keep every node
pub fn no_filter<N>(_: &N) -> bool {
    true
}

/// Keep every edge
pub fn no_edge_filter<N>(_: &N, _: &N, _: Option<&EdgeKey>) -> bool {
    true
}

/// Keep only the listed nodes
pub fn show_nodes<N: Node>(nodes: impl IntoIterator<Item = N>) -> NodeFilter<N> {
    let nodes: FxHashSet<N> = nodes.into_iter().collect();
    Box::new(move |n: &N| nodes.contains(n))
}

/// Hide the listed nodes
pub fn hide_nodes<N: Node>(nodes: impl IntoIterator<Item = N>) -> NodeFilter<N> {
    let nodes: FxHashSet<N> = nodes.into_iter().collect();
    Box::new(move |n: &N| !nodes.contains(n))
}

fn undirected_pairs<N: Node>(edges: impl IntoIterator<Item = (N, N)>) -> FxHashSet<(N, N)> {
    let mut pairs = FxHashSet::default();
    for (u, v) in edges {
        pairs.insert((v.clone(), u.clone()));
        pairs.insert((u, v));
    }
    pairs
}

fn undirected_triples<N: Node>(
    edges: impl IntoIterator<Item = (N, N, EdgeKey)>,
) -> FxHashSet<(N, N, EdgeKey)> {
    let mut triples = FxHashSet::default();
    for (u, v, k) in edges {
        triples.insert((v.clone(), u.clone(), k.clone()));
        triples.insert((u, v, k));
    }
    triples
}

fn has_pair<N: Node>(pairs: &FxHashSet<(N, N)>, u: &N, v: &N) -> bool {
    pairs.contains(&(u.clone(), v.clone()))
}

fn has_triple<N: Node>(
    triples: &FxHashSet<(N, N, EdgeKey)>,
    u: &N,
    v: &N,
    key: Option<&EdgeKey>,
) -> bool {
    match key {
        Some(k) => triples.contains(&(u.clone(), v.clone(), k.clone())),
        None => false,
    }
}

/// Keep only the listed undirected edges
pub fn show_edges<N: Node>(
    edges: impl IntoIterator<Item = (N, N)>,
) -> EdgeFilter<N> {
    let pairs = undirected_pairs(edges);
    Box::new(move |u: &N, v: &N, _: Option<&EdgeKey>| has_pair(&pairs, u, v))
}

/// Hide the listed undirected edges
pub fn hide_edges<N: Node>(
    edges: impl IntoIterator<Item = (N, N)>,
) -> EdgeFilter<N> {
    let pairs = undirected_pairs(edges);
    Box::new(move |u: &N, v: &N, _: Option<&EdgeKey>| !has_pair(&pairs, u, v))
}

/// Keep only the listed directed edges
pub fn show_diedges<N: Node>(
    edges: impl IntoIterator<Item = (N, N)>,
) -> EdgeFilter<N> {
    let pairs: FxHashSet<(N, N)> = edges.into_iter().collect();
    Box::new(move |u: &N, v: &N, _: Option<&EdgeKey>| has_pair(&pairs, u, v))
}

/// Hide the listed directed edges
pub fn hide_diedges<N: Node>(
    edges: impl IntoIterator<Item = (N, N)>,
) -> EdgeFilter<N> {
    let pairs: FxHashSet<(N, N)> = edges.into_iter().collect();
    Box::new(move |u: &N, v: &N, _: Option<&EdgeKey>| !has_pair(&pairs, u, v))
}

/// Keep only the listed keyed undirected edges
pub fn show_multiedges<N: Node>(
    edges: impl IntoIterator<Item = (N, N, EdgeKey)>,
) -> EdgeFilter<N> {
    let triples = undirected_triples(edges);
    Box::new(move |u: &N, v: &N, key: Option<&EdgeKey>| has_triple(&triples, u, v, key))
}

/// Hide the listed keyed undirected edges
pub fn hide_multiedges<N: Node>(
    edges: impl IntoIterator<Item = (N, N, EdgeKey)>,
) -> EdgeFilter<N> {
    let triples = undirected_triples(edges);
    Box::new(move |u: &N, v: &N, key: Option<&EdgeKey>| !has_triple(&triples, u, v, key))
}

/// Keep only the listed keyed directed edges
pub fn show_multidiedges<N: Node>(
    edges: impl IntoIterator<Item = (N, N, EdgeKey)>,
) -> EdgeFilter<N> {
    let triples: FxHashSet<(N, N, EdgeKey)> = edges.into_iter().collect();
    Box::new(move |u: &N, v: &N, key: Option<&EdgeKey>| has_triple(&triples, u, v, key))
}

/// Hide the listed keyed directed edges
pub fn hide_multidiedges<N: Node>(
    edges: impl IntoIterator<Item = (N, N, EdgeKey)>,
) -> EdgeFilter<N> {
    let triples: FxHashSet<(N, N, EdgeKey)> = edges.into_iter().collect();
    Box::new(move |u: &N, v: &N, key: Option<&EdgeKey>| !has_triple(&triples, u, v, key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_filters() {
        let show = show_nodes([1, 2]);
        let hide = hide_nodes([1, 2]);
        assert!(show(&1));
        assert!(!show(&3));
        assert!(!hide(&2));
        assert!(hide(&3));
        assert!(no_filter(&3));
    }

    #[test]
    fn test_filters_own_their_sets() {
        let listed = vec![(1u32, 2u32)];
        let show: EdgeFilter<u32> = show_edges(listed.iter().cloned());
        let nodes: NodeFilter<u32> = hide_nodes(listed.iter().map(|(u, _)| *u));
        drop(listed);
        assert!(show(&2, &1, None));
        assert!(!nodes(&1));
        assert!(nodes(&2));
    }

    #[test]
    fn test_undirected_edges_match_both_orientations() {
        let show = show_edges([(1, 2)]);
        assert!(show(&2, &1, None));
        assert!(show(&1, &2, None));
        assert!(!show(&1, &3, None));

        let show_di = show_diedges([(1, 2)]);
        assert!(show_di(&1, &2, None));
        assert!(!show_di(&2, &1, None));
        assert!(hide_diedges([(1, 2)])(&2, &1, None));
        assert!(!hide_edges([(1, 2)])(&2, &1, None));
    }

    #[test]
    fn test_multiedge_filters_need_key() {
        let show = show_multiedges([(1, 2, EdgeKey::Index(0))]);
        assert!(show(&2, &1, Some(&EdgeKey::Index(0))));
        assert!(!show(&1, &2, Some(&EdgeKey::Index(1))));
        assert!(!show(&1, &2, None));

        let hide = hide_multidiedges([(1, 2, EdgeKey::Index(0))]);
        assert!(!hide(&1, &2, Some(&EdgeKey::Index(0))));
        assert!(hide(&2, &1, Some(&EdgeKey::Index(0))));
        assert!(show_multidiedges([(1, 2, EdgeKey::from("a"))])(&1, &2, Some(&"a".into())));
        assert!(!hide_multiedges([(1, 2, EdgeKey::Index(0))])(&2, &1, Some(&EdgeKey::Index(0))));
        assert!(no_edge_filter(&1, &2, None));
    }
}
