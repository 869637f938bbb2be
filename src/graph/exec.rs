//! Ordering, execution and cross-cutting broadcasts.

use tracing::{debug, trace, warn};

use super::node::{vertex_mut, Vertex};
use super::{topo, PrimitiveGraph};
use crate::error::{GraphError, Result};
use crate::output::ExecutorOutput;
use crate::primitive::{PreparedStatementCtx, Primitive, PrimitiveCtx};
use crate::profile::{profile_timer, record_profile_timer, GraphProfileKind};
use crate::types::{NodeId, TxnId};

impl PrimitiveGraph {
    /// Computes and caches a topological order of every node.
    ///
    /// Must be called after the last structural change and before
    /// [`execute`](Self::execute). On a cycle the cache stays empty, so a
    /// subsequent `execute` fails instead of running a stale order.
    pub fn optimise(&mut self) -> Result<()> {
        self.sorted = None;
        let sorted = self.topological_order()?;
        debug!(nodes = sorted.len(), edges = self.edge_count, "ordered execution graph");
        self.sorted = Some(sorted);
        Ok(())
    }

    /// Computes a topological order without caching it.
    pub fn topological_order(&self) -> Result<Vec<NodeId>> {
        let timer = profile_timer();
        let result = topo::sort(&self.outgoing, self.config.ready_order);
        record_profile_timer(GraphProfileKind::Optimise, timer);
        if let Err(GraphError::CyclicGraph { nodes }) = &result {
            warn!(?nodes, "execution graph is cyclic");
        }
        result
    }

    /// Runs every node in the cached order and returns the last node's output.
    ///
    /// After each node succeeds its output is handed to every direct consumer
    /// through [`Primitive::incident_data`]. The first error from either call
    /// aborts the walk and is returned unchanged.
    pub fn execute(&mut self, ctx: &dyn PrimitiveCtx) -> Result<ExecutorOutput> {
        if self.vertices.is_empty() {
            return Err(GraphError::EmptyGraph);
        }
        let order = self.sorted.clone().ok_or(GraphError::Unordered)?;
        let mut output = None;
        for id in order {
            let timer = profile_timer();
            let result = vertex_mut(&mut self.vertices, id)?
                .primitive_mut()
                .execute(ctx);
            record_profile_timer(GraphProfileKind::Execute, timer);
            let produced = result.inspect_err(|err| {
                debug!(node = %id, code = err.code(), "primitive failed");
            })?;
            trace!(node = %id, rows = produced.rows.len(), "primitive executed");

            let successors = id
                .index()
                .and_then(|idx| self.outgoing.get(idx))
                .ok_or(GraphError::UnsupportedNodeType(id))?;
            for &to in successors.keys() {
                let timer = profile_timer();
                let delivered = vertex_mut(&mut self.vertices, to)?
                    .primitive_mut()
                    .incident_data(id, &produced);
                record_profile_timer(GraphProfileKind::Incident, timer);
                delivered.inspect_err(|err| {
                    debug!(from = %id, to = %to, code = err.code(), "incident data rejected");
                })?;
                trace!(from = %id, to = %to, "delivered incident data");
            }
            output = Some(produced);
        }
        debug!(nodes = self.vertices.len(), "execution graph finished");
        output.ok_or(GraphError::EmptyGraph)
    }

    /// Hands `id` to every node's primitive.
    pub fn set_txn_id(&mut self, id: TxnId) {
        for vertex in &mut self.vertices {
            match vertex {
                Vertex::Primitive(node) => node.primitive_mut().set_txn_id(id),
            }
        }
        trace!(txn = %id, nodes = self.vertices.len(), "broadcast transaction id");
    }

    /// No-op: the graph as a whole owns no named inputs.
    pub fn set_input_alias(&mut self, _alias: &str, _id: NodeId) -> Result<()> {
        Ok(())
    }

    /// No-op: the graph as a whole consumes no upstream output.
    pub fn incident_data(&mut self, _from: NodeId, _input: &ExecutorOutput) -> Result<()> {
        Ok(())
    }
}

impl Primitive for PrimitiveGraph {
    fn execute(&mut self, ctx: &dyn PrimitiveCtx) -> Result<ExecutorOutput> {
        PrimitiveGraph::execute(self, ctx)
    }

    fn incident_data(&mut self, from: NodeId, input: &ExecutorOutput) -> Result<()> {
        PrimitiveGraph::incident_data(self, from, input)
    }

    fn set_txn_id(&mut self, id: TxnId) {
        PrimitiveGraph::set_txn_id(self, id)
    }

    fn set_input_alias(&mut self, alias: &str, id: NodeId) -> Result<()> {
        PrimitiveGraph::set_input_alias(self, alias, id)
    }

    fn prepared_statement_ctx(&self) -> Option<&PreparedStatementCtx> {
        PrimitiveGraph::prepared_statement_ctx(self)
    }
}
