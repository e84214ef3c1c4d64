//! Properties every graph variant keeps across mutation

mod common;

use netgraph::prelude::*;
use rustc_hash::FxHashSet;

#[test]
fn test_directed_mirror_survives_mutation() {
    common::init_tracing();

    let mut d: DiGraph<u32> = DiGraph::new();
    d.add_edges_from([(1, 2), (2, 3), (3, 1), (3, 3), (4, 1)]);
    common::assert_mirrored(&d);

    d.remove_node(&1).unwrap();
    d.add_edge_with(2, 4, attrs([("w", 3i64)]));
    d.remove_edge(&3, &3).unwrap();
    common::assert_mirrored(&d);
    assert_eq!(d.number_of_edges(), 2);
    assert_eq!(d.predecessors(&4).unwrap().copied().collect::<Vec<_>>(), vec![2]);

    let mut m: MultiDiGraph<u32> = MultiDiGraph::new();
    let first = m.add_edge(1, 2);
    m.add_edge(1, 2);
    m.add_edge(2, 1);
    m.remove_edge(&1, &2, Some(&first)).unwrap();
    common::assert_mirrored(&m);
    assert_eq!(m.number_of_edges(), 2);
}

#[test]
fn test_degree_sum_is_twice_the_edges() {
    let mut g: Graph<u32> = Graph::new();
    g.add_edges_from([(1, 2), (2, 3), (3, 4), (4, 1), (1, 3), (5, 5)]);
    g.add_node(6);

    let sum: usize = g.nodes().iter().map(|n| g.degree().get(n).unwrap()).sum();
    assert_eq!(sum, 2 * g.number_of_edges());
    assert_eq!(g.degree().total(), sum);

    g.remove_node(&3).unwrap();
    assert_eq!(g.degree().total(), 2 * g.number_of_edges());
}

#[test]
fn test_copy_is_equal_and_independent() {
    let mut g: Graph<&str> = Graph::with_attrs(attrs([("name", "roads")]));
    g.add_node_with("a", attrs([("pop", 10i64)]));
    g.add_edge_with("a", "b", attrs([("km", 2.5)]));
    g.add_edge("b", "c");

    let mut copy = g.copy();
    assert_eq!(copy.nodes().snapshot(), g.nodes().snapshot());
    assert_eq!(copy.edges().snapshot(), g.edges().snapshot());
    assert_eq!(copy.graph_attrs().get("name"), g.graph_attrs().get("name"));
    assert_eq!(copy.edge_record(&"a", &"b"), g.edge_record(&"a", &"b"));

    copy.edge_record(&"b", &"a").unwrap().set("km", 9.0);
    copy.nodes()[&"a"].set("pop", 0i64);
    copy.add_edge("c", "d");

    assert_eq!(g.edge_record(&"a", &"b").unwrap().get("km"), Some(AttrValue::Float(2.5)));
    assert_eq!(g.nodes()[&"a"].get("pop"), Some(AttrValue::Integer(10)));
    assert!(!g.has_node(&"d"));
}

#[test]
fn test_records_stay_live_outside_views() {
    let mut g: Graph<u32> = Graph::new();
    g.add_edge(1, 2);
    let record = g.edge_record(&1, &2).unwrap().clone();

    g.add_edge_with(2, 1, attrs([("color", "red")]));
    assert_eq!(record.get("color"), Some(AttrValue::String("red".to_string())));

    g.add_node(3);
    assert!(g.nodes().contains(&3));
}

#[test]
fn test_subgraph_view_filters_nodes_and_edges() {
    let g: Graph<u32> = Graph::from_edges((0..10).map(|i| (i, (i + 2) % 10)));
    let even = |n: &u32| n % 2 == 0;
    let view = subgraph_view(&g, even, filters::no_edge_filter);

    let expected: Vec<u32> = g.nodes().iter().copied().filter(|n| even(n)).collect();
    assert_eq!(view.nodes().snapshot(), expected);
    for e in view.edges().iter() {
        assert!(even(e.u) && even(e.v));
        assert!(AttrRecord::ptr_eq(e.record, g.edge_record(e.u, e.v).unwrap()));
    }
    let kept = g.edges().iter().filter(|e| even(e.u) && even(e.v)).count();
    assert_eq!(view.number_of_edges(), kept);
}

#[test]
fn test_multiedge_keys_never_collide() {
    let mut m: MultiGraph<u32> = MultiGraph::new();
    let keys: Vec<EdgeKey> = (0..5).map(|_| m.add_edge(1, 2)).collect();
    let distinct: FxHashSet<&EdgeKey> = keys.iter().collect();
    assert_eq!(distinct.len(), keys.len());
    assert_eq!(m.number_of_edges_between(&1, &2), 5);

    m.add_keyed_edge(2, 1, Some(keys[2].clone()), attrs([("w", 1i64)]));
    m.add_keyed_edge(1, 2, Some(EdgeKey::from("named")), AttrMap::new());
    assert_eq!(m.number_of_edges_between(&2, &1), 6);
    assert_eq!(
        m.keyed_edge_record(&1, &2, &keys[2]).unwrap().get("w"),
        Some(AttrValue::Integer(1))
    );
    assert_ne!(m.add_edge(1, 2), EdgeKey::from("named"));
}

#[test]
fn test_triangle_scenario() {
    let mut g: Graph<u32> = Graph::new();
    g.add_edges_from([(1, 2), (2, 3), (1, 3)]);

    assert_eq!(g.degree().get(&1), Ok(2));
    assert_eq!(g.neighbors(&2).unwrap().copied().collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(g.subgraph([1, 2]).edges().snapshot(), vec![(1, 2, None)]);
}

#[test]
fn test_reverse_scenario() {
    let mut d: DiGraph<u32> = DiGraph::new();
    d.add_edge(1, 2);

    assert!(d.has_edge(&1, &2));
    assert!(!d.has_edge(&2, &1));
    assert!(reverse_view(&d).unwrap().has_edge(&2, &1));
}

#[test]
fn test_errors_name_what_is_missing() {
    let mut g: Graph<u32> = Graph::from_edges([(1, 2)]);
    let err = g.remove_node(&7).unwrap_err();
    assert_eq!(err, GraphError::NodeNotFound("7".to_string()));
    assert_eq!(err.to_string(), "Node 7 not found");

    assert!(matches!(g.remove_edge(&1, &3), Err(GraphError::EdgeNotFound { .. })));
    assert!(g.degree().get(&9).is_err());
    assert!(g.nodes().record(&9).is_err());

    let mut m: MultiGraph<u32> = MultiGraph::from_edges([(1, 2)]);
    assert_eq!(
        m.remove_edge(&1, &2, Some(&EdgeKey::Index(4))),
        Err(GraphError::edge_not_found(&1u32, &2u32, Some(&EdgeKey::Index(4))))
    );

    let md: MultiDiGraph<u32> = MultiDiGraph::from_edges([(1, 2), (1, 2)]);
    let lossy: GraphResult<Graph<u32>> = copy_graph(&md, None);
    assert_eq!(
        lossy.unwrap_err(),
        GraphError::AmbiguousConversion {
            from: GraphKind::MULTIDIGRAPH,
            to: GraphKind::GRAPH,
        }
    );
}

#[test]
fn test_config_names_the_graph() -> anyhow::Result<()> {
    let config = GraphConfig::from_json(r#"{"name": "metro", "node_capacity": 64}"#)?;
    let mut d: DiGraph<u32> = DiGraph::with_config(&config);
    d.add_edge(1, 2);
    assert_eq!(d.graph_attrs().get("name"), Some(AttrValue::String("metro".to_string())));
    assert!(GraphConfig::from_json(r#"{"colour": 1}"#).is_err());
    Ok(())
}

#[test]
fn test_conversions_between_kinds() -> anyhow::Result<()> {
    let mut d: DiGraph<u32> = DiGraph::new();
    d.add_edge_with(1, 2, attrs([("w", 1i64)]));
    d.add_edge_with(2, 1, attrs([("w", 2i64)]));

    let first = d.to_undirected(Collapse::First);
    let last = d.to_undirected(Collapse::Last);
    assert_eq!(first.number_of_edges(), 1);
    assert_eq!(first.edge_record(&2, &1)?.get("w"), Some(AttrValue::Integer(1)));
    assert_eq!(last.edge_record(&1, &2)?.get("w"), Some(AttrValue::Integer(2)));

    let back = first.to_directed();
    assert_eq!(back.number_of_edges(), 2);
    common::assert_mirrored(&back);

    let reversed = d.reverse();
    assert_eq!(reversed.edge_record(&2, &1)?.get("w"), Some(AttrValue::Integer(1)));

    let multi: MultiDiGraph<u32> = MultiDiGraph::try_from_graph(&d, None)?;
    assert_eq!(multi.number_of_edges(), 2);
    Ok(())
}

#[test]
fn test_shared_edge_attrs_yield_to_own() {
    let shared = attrs([("color", AttrValue::from("red")), ("w", AttrValue::from(1i64))]);

    let mut g: Graph<u32> = Graph::new();
    g.add_edges_from_with(
        [(1, 2, AttrMap::new()), (2, 3, attrs([("w", 5i64)]))],
        &shared,
    );
    assert_eq!(g.edge_record(&2, &1).unwrap().get("color"), Some(AttrValue::from("red")));
    assert_eq!(g.edge_record(&2, &1).unwrap().get("w"), Some(AttrValue::Integer(1)));
    assert_eq!(g.edge_record(&3, &2).unwrap().get("w"), Some(AttrValue::Integer(5)));
    assert_eq!(g.edge_record(&3, &2).unwrap().get("color"), Some(AttrValue::from("red")));

    let mut m: MultiDiGraph<u32> = MultiDiGraph::new();
    m.add_edges_from_with([(1, 2), (1, 2)], &shared);
    m.add_edges_from_with(
        [(1, 2, EdgeKey::from("x"), attrs([("color", "blue")]))],
        &shared,
    );
    assert_eq!(m.number_of_edges_between(&1, &2), 3);
    let colors: Vec<Option<AttrValue>> =
        m.records_between(&1, &2).map(|(_, r)| r.get("color")).collect();
    assert_eq!(
        colors,
        vec![
            Some(AttrValue::from("red")),
            Some(AttrValue::from("red")),
            Some(AttrValue::from("blue")),
        ]
    );
    assert_eq!(
        m.keyed_edge_record(&1, &2, &EdgeKey::from("x")).unwrap().get("w"),
        Some(AttrValue::Integer(1))
    );
    assert!(!m.has_edge(&2, &1));
}

#[test]
fn test_bulk_node_removal_on_large_ring() {
    let size = 20_000u32;
    let mut g: Graph<u32> = Graph::new();
    g.add_edges_from((0..size).map(|i| (i, (i + 1) % size)));
    let mut d: DiGraph<u32> = DiGraph::from_edges((0..size).map(|i| (i, (i + 1) % size)));

    let doomed: Vec<u32> = (0..5_000).collect();
    g.remove_nodes_from(&doomed);
    d.remove_nodes_from(&doomed);

    assert_eq!(g.number_of_nodes(), 15_000);
    assert_eq!(g.number_of_edges(), 14_999);
    assert_eq!(d.number_of_edges(), 14_999);
    common::assert_mirrored(&d);
    let order: Vec<u32> = g.nodes().iter().copied().take(3).collect();
    assert_eq!(order, vec![5_000, 5_001, 5_002]);
    assert_eq!(g.degree().get(&5_000), Ok(1));
    assert!(!d.has_node(&0));

    // a node added back goes to the end
    g.add_edge(0, 5_000);
    assert_eq!(g.nodes().iter().last(), Some(&0));
    assert_eq!(g.neighbors(&5_000).unwrap().copied().collect::<Vec<_>>(), vec![5_001, 0]);
}
