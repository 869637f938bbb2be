//! Error handling for graph construction, ordering and execution.
//!
//! Every public API returns [`Result<T>`], an alias over [`GraphError`].
//! Errors produced by primitives travel through the scheduler unchanged, so
//! a caller sees exactly what the failing step reported.

use std::error::Error as StdError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::NodeId;

/// Result type for plangraph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Boxed error surfaced by a primitive.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors raised while building, ordering or running an execution graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// No topological order exists because the graph contains a cycle.
    ///
    /// `nodes` lists every node that could not be placed in the order: the
    /// members of a cycle and everything downstream of one.
    #[error("execution graph contains a cycle through nodes {nodes:?}")]
    CyclicGraph {
        /// Nodes left unordered.
        nodes: Vec<NodeId>,
    },

    /// Execution was requested on a graph with nothing to run.
    #[error("empty execution graph")]
    EmptyGraph,

    /// Execution was requested before the current edge set was ordered.
    #[error("execution graph must be optimised after its last change")]
    Unordered,

    /// An identity did not resolve to a recognised graph vertex.
    #[error("unknown execution primitive type for node {0}")]
    UnsupportedNodeType(NodeId),

    /// A configured size limit would be exceeded.
    #[error("{what} limit of {max} exceeded")]
    LimitExceeded {
        /// Which limit was hit.
        what: &'static str,
        /// Configured maximum.
        max: usize,
    },

    /// Failure reported by a primitive's own `execute` or `incident_data`.
    #[error(transparent)]
    Primitive(BoxError),

    /// A report could not be serialised.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid argument supplied by the caller.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl GraphError {
    /// Wraps an arbitrary error raised inside a primitive.
    pub fn primitive(err: impl Into<BoxError>) -> Self {
        GraphError::Primitive(err.into())
    }

    /// Returns a machine-readable code for the error variant.
    pub fn code(&self) -> &'static str {
        match self {
            GraphError::CyclicGraph { .. } => "CyclicGraph",
            GraphError::EmptyGraph => "EmptyGraph",
            GraphError::Unordered => "Unordered",
            GraphError::UnsupportedNodeType(_) => "UnsupportedNodeType",
            GraphError::LimitExceeded { .. } => "LimitExceeded",
            GraphError::Primitive(_) => "UnitExecution",
            GraphError::Serialization(_) => "Serialization",
            GraphError::Config(_) => "Config",
            GraphError::InvalidArgument(_) => "InvalidArgument",
        }
    }
}

/// Errors raised while reading a [`GraphConfig`](crate::GraphConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read graph config {path}: {source}")]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse graph config {path}: {source}")]
    Parse {
        /// File that was being parsed.
        path: PathBuf,
        /// Underlying parse failure.
        source: toml::de::Error,
    },
    /// A value parsed but is out of range.
    #[error("invalid graph config: {0}")]
    Invalid(String),
}
