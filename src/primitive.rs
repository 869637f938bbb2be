//! Capability contract every execution step satisfies.
//!
//! The graph never constructs primitives. Planners build them, hand them to
//! [`PrimitiveGraph::create_node`](crate::PrimitiveGraph::create_node), and
//! from then on the graph drives them exclusively through this trait.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::Result;
use crate::output::ExecutorOutput;
use crate::types::{NodeId, TxnId};

/// A single independently executable step of a query plan.
pub trait Primitive {
    /// Performs the step's work. Called at most once per graph run.
    fn execute(&mut self, ctx: &dyn PrimitiveCtx) -> Result<ExecutorOutput>;

    /// Accepts the output of the direct predecessor `from`.
    ///
    /// Invoked after the producer has run and before this step's own
    /// [`execute`](Primitive::execute), once per incoming edge. Implementations
    /// buffer what they need for the later `execute` call.
    fn incident_data(&mut self, from: NodeId, input: &ExecutorOutput) -> Result<()>;

    /// Records the transaction this step belongs to.
    fn set_txn_id(&mut self, id: TxnId);

    /// Binds a named external input to a node identity.
    fn set_input_alias(&mut self, alias: &str, id: NodeId) -> Result<()>;

    /// Prepared statement backing this step, if a collaborator manages one.
    fn prepared_statement_ctx(&self) -> Option<&PreparedStatementCtx> {
        None
    }
}

/// Execution context handed through the graph to every primitive untouched.
pub trait PrimitiveCtx {
    /// Cooperative cancellation flag primitives may poll.
    ///
    /// The graph itself never reads it.
    fn cancellation(&self) -> Option<&AtomicBool> {
        None
    }

    /// Returns `true` once cancellation has been requested.
    fn is_cancelled(&self) -> bool {
        self.cancellation()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}

/// Stock [`PrimitiveCtx`] carrying an optional cancel token and session id.
#[derive(Debug, Clone, Default)]
pub struct ExecutionCtx {
    cancel_token: Option<Arc<AtomicBool>>,
    session_id: Option<u64>,
}

impl ExecutionCtx {
    /// Creates a context with no cancel token and no session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a shared cancel token.
    pub fn with_cancellation(mut self, token: Arc<AtomicBool>) -> Self {
        self.cancel_token = Some(token);
        self
    }

    /// Attaches the session the run belongs to.
    pub fn with_session_id(mut self, session_id: u64) -> Self {
        self.session_id = Some(session_id);
        self
    }

    /// Session the run belongs to, if any.
    pub fn session_id(&self) -> Option<u64> {
        self.session_id
    }
}

impl PrimitiveCtx for ExecutionCtx {
    fn cancellation(&self) -> Option<&AtomicBool> {
        self.cancel_token.as_deref()
    }
}

/// Prepared statement handle owned by an external statement manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedStatementCtx {
    /// Statement text as prepared.
    pub statement: String,
    /// Number of bind parameters.
    pub param_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancellation_is_observable_through_ctx() {
        let token = Arc::new(AtomicBool::new(false));
        let ctx = ExecutionCtx::new()
            .with_cancellation(Arc::clone(&token))
            .with_session_id(9);
        assert!(!ctx.is_cancelled());
        token.store(true, Ordering::SeqCst);
        assert!(ctx.is_cancelled());
        assert_eq!(ctx.session_id(), Some(9));
    }

    #[test]
    fn default_ctx_is_never_cancelled() {
        assert!(!ExecutionCtx::new().is_cancelled());
    }
}
