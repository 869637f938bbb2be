//! Transaction bookkeeping collected while a plan is built.

use serde::{Deserialize, Serialize};

/// Planning-time record describing one logical statement inside a graph.
///
/// Downstream consolidation uses these to fold per-statement results such as
/// affected-row counts. The graph stores them in insertion order and never
/// interprets them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxnControlCounters {
    /// Generation of the provider metadata the statement was planned against.
    pub generation_id: u64,
    /// Session issuing the statement.
    pub session_id: u64,
    /// Transaction the statement runs in.
    pub txn_id: u64,
    /// Sequence number of the statement within its transaction.
    pub insert_id: u64,
    /// Generation of the discovery documents in use.
    pub discovery_generation_id: u64,
}

impl TxnControlCounters {
    /// Creates counters for statement `insert_id` of transaction `txn_id`.
    pub fn new(generation_id: u64, session_id: u64, txn_id: u64, insert_id: u64) -> Self {
        Self {
            generation_id,
            session_id,
            txn_id,
            insert_id,
            discovery_generation_id: 0,
        }
    }

    /// Sets the discovery generation.
    pub fn with_discovery_generation(mut self, id: u64) -> Self {
        self.discovery_generation_id = id;
        self
    }
}
