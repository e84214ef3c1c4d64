//! Construction-time configuration for graphs

use super::error::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};

/// Graph configuration
///
/// Every field is optional in serialized form, so a config file only needs
/// to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    /// Expected number of nodes (capacity hint)
    pub node_capacity: usize,
    /// Value stored as the graph-level `name` attribute
    pub name: Option<String>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            node_capacity: 0,
            name: None,
        }
    }
}

impl GraphConfig {
    /// Parse a configuration from JSON
    pub fn from_json(text: &str) -> GraphResult<Self> {
        serde_json::from_str(text).map_err(|e| GraphError::Config(e.to_string()))
    }

    pub fn with_node_capacity(mut self, capacity: usize) -> Self {
        self.node_capacity = capacity;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
