//! Execution graph: primitives as vertices, data dependencies as edges.
//!
//! The graph owns all topology. Nodes live in an arena indexed by their
//! [`NodeId`], edges live in per-node adjacency maps, and nothing inside a
//! node points back at the graph.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::trace;

use crate::config::GraphConfig;
use crate::error::{GraphError, Result};
use crate::primitive::{PreparedStatementCtx, Primitive};
use crate::txn::TxnControlCounters;
use crate::types::NodeId;

mod exec;
mod node;
mod topo;


pub use node::PrimitiveNode;
use node::{vertex, vertex_mut, Vertex};

/// Directed dependency: `to` consumes the output of `from`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    /// Producer node.
    pub from: NodeId,
    /// Consumer node.
    pub to: NodeId,
    /// Caller-supplied weight. Stored and reported, never consulted.
    pub weight: f64,
}

/// Weighted directed graph of primitives plus planning bookkeeping.
#[derive(Debug, Default)]
pub struct PrimitiveGraph {
    vertices: Vec<Vertex>,
    outgoing: Vec<BTreeMap<NodeId, f64>>,
    edge_count: usize,
    sorted: Option<Vec<NodeId>>,
    txn_control_counters: Vec<TxnControlCounters>,
    config: GraphConfig,
}

impl PrimitiveGraph {
    /// Creates an empty graph with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with the supplied configuration.
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Builds a graph holding exactly one node for `primitive`.
    ///
    /// No ordering is performed; call [`optimise`](Self::optimise) before
    /// executing it like any other graph.
    pub fn singleton(primitive: Box<dyn Primitive>) -> Self {
        let mut graph = Self::new();
        graph.push_vertex(primitive);
        graph
    }

    /// Registers `primitive` as a new node and returns its identity.
    pub fn create_node(&mut self, primitive: Box<dyn Primitive>) -> Result<NodeId> {
        if let Some(max) = self.config.max_nodes {
            if self.vertices.len() >= max {
                return Err(GraphError::LimitExceeded { what: "node", max });
            }
        }
        Ok(self.push_vertex(primitive))
    }

    fn push_vertex(&mut self, primitive: Box<dyn Primitive>) -> NodeId {
        let id = NodeId(self.vertices.len() as u64);
        self.vertices
            .push(Vertex::Primitive(PrimitiveNode::new(id, primitive)));
        self.outgoing.push(BTreeMap::new());
        self.sorted = None;
        trace!(node = %id, "created primitive node");
        id
    }

    /// Declares that `to` consumes the output of `from`.
    ///
    /// Re-adding an existing (from, to) pair replaces its weight. Cycles are
    /// not detected here; [`optimise`](Self::optimise) rejects them.
    pub fn add_dependency(&mut self, from: NodeId, to: NodeId, weight: f64) -> Result<()> {
        vertex(&self.vertices, to)?;
        vertex(&self.vertices, from)?;
        let targets = from
            .index()
            .and_then(|idx| self.outgoing.get_mut(idx))
            .ok_or(GraphError::UnsupportedNodeType(from))?;
        if !targets.contains_key(&to) {
            if let Some(max) = self.config.max_edges {
                if self.edge_count >= max {
                    return Err(GraphError::LimitExceeded { what: "edge", max });
                }
            }
            self.edge_count += 1;
        }
        targets.insert(to, weight);
        self.sorted = None;
        trace!(from = %from, to = %to, weight, "added dependency");
        Ok(())
    }

    /// Appends planning-time transaction counters.
    pub fn add_txn_control_counters(&mut self, counters: TxnControlCounters) {
        self.txn_control_counters.push(counters);
    }

    /// Transaction counters in the order they were added.
    pub fn txn_control_counters(&self) -> &[TxnControlCounters] {
        &self.txn_control_counters
    }

    /// Prepared statement context; always `None` at this layer.
    pub fn prepared_statement_ctx(&self) -> Option<&PreparedStatementCtx> {
        None
    }

    /// Configuration the graph was built with.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Looks up a node by identity.
    pub fn node(&self, id: NodeId) -> Option<&PrimitiveNode> {
        match vertex(&self.vertices, id).ok()? {
            Vertex::Primitive(node) => Some(node),
        }
    }

    /// Looks up a node by identity for mutation, e.g. alias binding.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut PrimitiveNode> {
        match vertex_mut(&mut self.vertices, id).ok()? {
            Vertex::Primitive(node) => Some(node),
        }
    }

    /// All nodes in identity order.
    pub fn nodes(&self) -> impl Iterator<Item = &PrimitiveNode> {
        self.vertices.iter().map(|vertex| match vertex {
            Vertex::Primitive(node) => node,
        })
    }

    /// All edges ordered by (from, to).
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.outgoing.iter().enumerate().flat_map(|(idx, targets)| {
            let from = NodeId(idx as u64);
            targets
                .iter()
                .map(move |(&to, &weight)| Edge { from, to, weight })
        })
    }

    /// Weight of the (from, to) edge, if present.
    pub fn edge_weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        from.index()
            .and_then(|idx| self.outgoing.get(idx))
            .and_then(|targets| targets.get(&to))
            .copied()
    }

    /// Direct consumers of `id` in ascending identity order.
    pub fn successors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.index()
            .and_then(|idx| self.outgoing.get(idx))
            .into_iter()
            .flat_map(|targets| targets.keys().copied())
    }

    /// Cached topological order, if it reflects the current edge set.
    pub fn sorted(&self) -> Option<&[NodeId]> {
        self.sorted.as_deref()
    }

    /// Serialisable snapshot of the graph's structure and current order.
    pub fn explain(&self) -> GraphExplain {
        GraphExplain {
            nodes: self
                .vertices
                .iter()
                .map(|vertex| {
                    let id = vertex.id();
                    ExplainNode {
                        id,
                        successors: self.successors(id).collect(),
                    }
                })
                .collect(),
            edges: self.edges().collect(),
            order: self.sorted.clone(),
            txn_control_counters: self.txn_control_counters.len(),
        }
    }
}

/// Structure report produced by [`PrimitiveGraph::explain`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphExplain {
    /// Nodes with their direct consumers.
    pub nodes: Vec<ExplainNode>,
    /// Every dependency edge.
    pub edges: Vec<Edge>,
    /// Current topological order, absent when stale or never computed.
    pub order: Option<Vec<NodeId>>,
    /// Number of transaction control counters collected.
    pub txn_control_counters: usize,
}

/// One node entry in a [`GraphExplain`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplainNode {
    /// Node identity.
    pub id: NodeId,
    /// Direct consumers.
    pub successors: Vec<NodeId>,
}

impl GraphExplain {
    /// Renders the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| GraphError::Serialization(e.to_string()))
    }
}
