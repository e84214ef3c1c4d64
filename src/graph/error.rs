//! Errors raised by graph operations

use super::types::{EdgeKey, GraphKind, Node};
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(String),

    #[error(
        "Edge {u} -> {v}{} not found",
        .key.as_ref().map(|k| format!(" (key {})", k)).unwrap_or_default()
    )]
    EdgeNotFound {
        u: String,
        v: String,
        key: Option<EdgeKey>,
    },

    #[error("Frozen view: {0}")]
    FrozenView(String),

    #[error("Cannot present a {from} as a {to} without a collapse rule")]
    AmbiguousConversion { from: GraphKind, to: GraphKind },

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl GraphError {
    pub fn node_not_found<N: Node>(n: &N) -> Self {
        GraphError::NodeNotFound(format!("{:?}", n))
    }

    pub fn edge_not_found<N: Node>(u: &N, v: &N, key: Option<&EdgeKey>) -> Self {
        GraphError::EdgeNotFound {
            u: format!("{:?}", u),
            v: format!("{:?}", v),
            key: key.cloned(),
        }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(GraphError::node_not_found(&7).to_string(), "Node 7 not found");
        assert_eq!(
            GraphError::edge_not_found(&"a", &"b", None).to_string(),
            "Edge \"a\" -> \"b\" not found"
        );
        assert_eq!(
            GraphError::edge_not_found(&1, &2, Some(&EdgeKey::Index(3))).to_string(),
            "Edge 1 -> 2 (key 3) not found"
        );
        assert_eq!(
            GraphError::AmbiguousConversion {
                from: GraphKind::MULTIGRAPH,
                to: GraphKind::GRAPH
            }
            .to_string(),
            "Cannot present a MultiGraph as a Graph without a collapse rule"
        );
    }
}
