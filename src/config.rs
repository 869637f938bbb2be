//! Graph configuration: ordering policy and size limits.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Order in which ready (dependency-free) nodes are taken during sorting.
///
/// Only affects nodes that are mutually independent; every dependency edge is
/// honoured either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadyOrder {
    /// Breadth-first: ready nodes run in the order they became ready.
    #[default]
    Fifo,
    /// Depth-first: the most recently readied node runs next, keeping
    /// producer/consumer chains together.
    Lifo,
}

/// Configuration for a [`PrimitiveGraph`](crate::PrimitiveGraph).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    /// Tie-break among independent ready nodes.
    pub ready_order: ReadyOrder,
    /// Maximum number of nodes; `None` means unlimited.
    pub max_nodes: Option<usize>,
    /// Maximum number of distinct edges; `None` means unlimited.
    pub max_edges: Option<usize>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            ready_order: ReadyOrder::Fifo,
            max_nodes: None,
            max_edges: None,
        }
    }
}

impl GraphConfig {
    /// Caps graph size for plans built from untrusted input.
    pub fn bounded() -> Self {
        Self {
            ready_order: ReadyOrder::Fifo,
            max_nodes: Some(4096),
            max_edges: Some(65536),
        }
    }

    /// Unbounded graph ordered depth-first.
    pub fn depth_first() -> Self {
        Self {
            ready_order: ReadyOrder::Lifo,
            max_nodes: None,
            max_edges: None,
        }
    }

    /// Parses a TOML document; missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GraphConfig = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: "<inline>".into(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GraphConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_nodes == Some(0) {
            return Err(ConfigError::Invalid("max_nodes must be at least 1".into()));
        }
        Ok(())
    }
}
