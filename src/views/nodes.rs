//! Node reporting view

use crate::graph::{
    AttrRecord, AttrValue, FxIndexSet, GraphError, GraphQuery, GraphResult, NodeIter,
};
use std::fmt;
use std::ops::Index;

/// Read-only, live view of a graph's nodes in insertion order
pub struct NodeView<'g, G: ?Sized> {
    graph: &'g G,
}

impl<'g, G: GraphQuery + ?Sized> NodeView<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        NodeView { graph }
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

    pub fn iter(&self) -> NodeIter<'g, G::Node> {
        self.graph.node_iter()
    }

    /// Attribute record of `n`, shared with the graph
    pub fn get(&self, n: &G::Node) -> Option<&'g AttrRecord> {
        self.graph.node_record(n)
    }

    pub fn record(&self, n: &G::Node) -> GraphResult<&'g AttrRecord> {
        self.get(n).ok_or_else(|| GraphError::node_not_found(n))
    }

    /// `(node, record)` pairs
    pub fn with_data(&self) -> impl Iterator<Item = (&'g G::Node, &'g AttrRecord)> + 'g {
        let graph = self.graph;
        graph
            .node_iter()
            .filter_map(move |n| graph.node_record(n).map(|record| (n, record)))
    }

    /// `(node, value of name)` pairs, `default` where the attribute is unset
    pub fn with_attr(
        &self,
        name: &'g str,
        default: Option<AttrValue>,
    ) -> impl Iterator<Item = (&'g G::Node, Option<AttrValue>)> + 'g {
        self.with_data()
            .map(move |(n, record)| (n, record.get_or(name, default.clone())))
    }

    /// Nodes of this view that are also in `other`, in view order
    pub fn intersection<'a, I>(&self, other: I) -> FxIndexSet<G::Node>
    where
        I: IntoIterator<Item = &'a G::Node>,
        G::Node: 'a,
    {
        let other: FxIndexSet<&G::Node> = other.into_iter().collect();
        self.iter().filter(|n| other.contains(n)).cloned().collect()
    }

    /// Nodes of this view followed by the nodes of `other` not in it
    pub fn union<'a, I>(&self, other: I) -> FxIndexSet<G::Node>
    where
        I: IntoIterator<Item = &'a G::Node>,
        G::Node: 'a,
    {
        let mut out: FxIndexSet<G::Node> = self.iter().cloned().collect();
        out.extend(other.into_iter().cloned());
        out
    }

    pub fn difference<'a, I>(&self, other: I) -> FxIndexSet<G::Node>
    where
        I: IntoIterator<Item = &'a G::Node>,
        G::Node: 'a,
    {
        let other: FxIndexSet<&G::Node> = other.into_iter().collect();
        self.iter().filter(|n| !other.contains(n)).cloned().collect()
    }

    pub fn symmetric_difference<'a, I>(&self, other: I) -> FxIndexSet<G::Node>
    where
        I: IntoIterator<Item = &'a G::Node>,
        G::Node: 'a,
    {
        let other: FxIndexSet<&G::Node> = other.into_iter().collect();
        let mut out: FxIndexSet<G::Node> =
            self.iter().filter(|n| !other.contains(n)).cloned().collect();
        out.extend(other.into_iter().filter(|n| !self.contains(n)).cloned());
        out
    }

    pub fn is_disjoint<'a, I>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = &'a G::Node>,
        G::Node: 'a,
    {
        other.into_iter().all(|n| !self.contains(n))
    }

    /// Owned copy of the current node list
    pub fn snapshot(&self) -> Vec<G::Node> {
        self.iter().cloned().collect()
    }
}

impl<G: ?Sized> Clone for NodeView<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: ?Sized> Copy for NodeView<'_, G> {}

impl<'g, G: GraphQuery + ?Sized> Index<&G::Node> for NodeView<'g, G> {
    type Output = AttrRecord;

    /// Panics if `n` is not in the graph; use [`NodeView::record`] to get an
    /// error instead.
    fn index(&self, n: &G::Node) -> &AttrRecord {
        match self.get(n) {
            Some(record) => record,
            None => panic!("{}", GraphError::node_not_found(n)),
        }
    }
}

impl<'g, G: GraphQuery + ?Sized> IntoIterator for NodeView<'g, G> {
    type Item = &'g G::Node;
    type IntoIter = NodeIter<'g, G::Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'g, G: GraphQuery + ?Sized> IntoIterator for &NodeView<'g, G> {
    type Item = &'g G::Node;
    type IntoIter = NodeIter<'g, G::Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<G: GraphQuery + ?Sized> fmt::Debug for NodeView<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{attrs, Graph};
    use crate::views::GraphExt;

    fn sample() -> Graph<&'static str> {
        let mut g = Graph::new();
        g.add_node_with("a", attrs([("color", "red")]));
        g.add_edge("b", "c");
        g
    }

    #[test]
    fn test_iteration_order_and_len() {
        let g = sample();
        let nodes = g.nodes();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes.snapshot(), vec!["a", "b", "c"]);
        assert!(nodes.contains(&"b"));
        assert!(!nodes.contains(&"z"));
    }

    #[test]
    fn test_records_are_shared() {
        let g = sample();
        g.nodes()[&"a"].set("color", "blue");
        assert_eq!(
            g.node_record(&"a").unwrap().get("color"),
            Some(AttrValue::from("blue"))
        );
        assert!(g.nodes().record(&"z").is_err());
    }

    #[test]
    fn test_with_attr_default() {
        let g = sample();
        let colors: Vec<_> = g
            .nodes()
            .with_attr("color", Some(AttrValue::from("none")))
            .map(|(n, c)| (*n, c.unwrap()))
            .collect();
        assert_eq!(
            colors,
            vec![
                ("a", AttrValue::from("red")),
                ("b", AttrValue::from("none")),
                ("c", AttrValue::from("none")),
            ]
        );
    }

    #[test]
    fn test_set_algebra() {
        let g = sample();
        let nodes = g.nodes();
        let other = ["c", "d"];

        assert_eq!(nodes.intersection(&other).into_iter().collect::<Vec<_>>(), vec!["c"]);
        assert_eq!(
            nodes.union(&other).into_iter().collect::<Vec<_>>(),
            vec!["a", "b", "c", "d"]
        );
        assert_eq!(nodes.difference(&other).into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(
            nodes.symmetric_difference(&other).into_iter().collect::<Vec<_>>(),
            vec!["a", "b", "d"]
        );
        assert!(nodes.is_disjoint(&["x"]));
        assert!(!nodes.is_disjoint(&other));
    }
}
