//! Shared helpers for integration tests

use netgraph::prelude::*;
use tracing_subscriber::EnvFilter;

/// Route `tracing` output to the test harness; `RUST_LOG` picks the level
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Every successor entry has a predecessor entry with the same key and
/// the same record, and the other way round
pub fn assert_mirrored<G: GraphQuery<Node = u32>>(g: &G) {
    for u in g.node_iter() {
        for e in g.out_entries(u).expect("node listed by node_iter") {
            let back = g
                .in_entries(e.node)
                .expect("neighbor is a node")
                .find(|b| b.node == u && b.key == e.key)
                .expect("mirror entry");
            assert!(AttrRecord::ptr_eq(e.record, back.record));
        }
        for e in g.in_entries(u).expect("node listed by node_iter") {
            assert!(g.successors(e.node).expect("neighbor is a node").any(|s| s == u));
        }
    }
}
