//! Copying between graph kinds
//!
//! Every copy goes through [`GraphQuery`], so any graph or view can be the
//! source and any of the four variants the target. Attribute records are
//! always snapshotted; a copy never shares a record with its source.

use super::error::{GraphError, GraphResult};
use super::query::{GraphMut, GraphQuery};
use super::types::Collapse;
use tracing::debug;

/// Copy `src` into a new graph of type `T`, merging colliding edges by
/// keeping the first candidate.
pub fn fill_graph<T, G>(src: &G) -> T
where
    T: GraphMut,
    G: GraphQuery<Node = T::Node> + ?Sized,
{
    fill_graph_with(src, Collapse::First)
}

/// Copy `src` into a new graph of type `T`.
///
/// When `T` cannot hold two source edges apart (antiparallel edges in an
/// undirected target, parallel edges in a simple target, equal keys after
/// merging directions) the candidates are ordered by source node rank and
/// `collapse` picks the surviving record.
pub fn fill_graph_with<T, G>(src: &G, collapse: Collapse) -> T
where
    T: GraphMut,
    G: GraphQuery<Node = T::Node> + ?Sized,
{
    let from = src.kind();
    let to = T::KIND;
    let keyed = from.multigraph && to.multigraph;
    // Undirected into undirected: take each stored edge from one side only
    let once = !from.directed && !to.directed;

    let mut out = T::with_graph_attrs(src.graph_record().snapshot());
    for n in src.node_iter() {
        let attrs = src.node_record(n).map(|r| r.snapshot()).unwrap_or_default();
        out.insert_node(n.clone(), attrs);
    }

    let mut collapsed = 0usize;
    for u in src.node_iter() {
        let Some(entries) = src.out_entries(u) else {
            continue;
        };
        let rank_u = src.node_rank(u);
        for e in entries {
            if once && src.node_rank(e.node) < rank_u {
                continue;
            }
            let key = if keyed { e.key.cloned() } else { None };
            if to.multigraph && key.is_none() {
                out.insert_edge(u.clone(), e.node.clone(), None, e.record.snapshot());
                continue;
            }
            let existing = out
                .records_between(u, e.node)
                .find(|(k, _)| key.is_none() || *k == key.as_ref())
                .map(|(_, record)| record.clone());
            match (existing, collapse) {
                (None, _) => {
                    out.insert_edge(u.clone(), e.node.clone(), key, e.record.snapshot());
                }
                (Some(_), Collapse::First) => collapsed += 1,
                (Some(record), Collapse::Last) => {
                    record.replace(e.record.snapshot());
                    collapsed += 1;
                }
            }
        }
    }

    if collapsed > 0 {
        debug!("Collapsed {} edges copying {} into {}", collapsed, from, to);
    }
    out
}

/// Copy `src` into a new graph of type `T`, refusing conversions that can
/// lose edges unless a `collapse` rule is given.
///
/// Whether a conversion can lose edges is decided from the two kinds alone
/// (see [`GraphKind::loses_information_as`](super::types::GraphKind::loses_information_as)),
/// never from the data currently in `src`.
pub fn copy_graph<T, G>(src: &G, collapse: Option<Collapse>) -> GraphResult<T>
where
    T: GraphMut,
    G: GraphQuery<Node = T::Node> + ?Sized,
{
    let from = src.kind();
    match collapse {
        Some(rule) => Ok(fill_graph_with(src, rule)),
        None if from.loses_information_as(T::KIND) => Err(GraphError::AmbiguousConversion {
            from,
            to: T::KIND,
        }),
        None => Ok(fill_graph(src)),
    }
}
