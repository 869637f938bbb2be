//! Dependency-ordered execution core for multi-step query plans.
//!
//! A planner hands the crate a set of [`Primitive`] steps and the data
//! dependencies between them. [`PrimitiveGraph`] orders the steps
//! topologically, runs them one at a time on the caller's thread, and feeds
//! every step's output to the steps that consume it.
//!
//! ```rust
//! use plangraph::{ExecutionCtx, PrimitiveGraph, Result};
//! # use plangraph::{ExecutorOutput, NodeId, Primitive, PrimitiveCtx, TxnId};
//! # struct Noop;
//! # impl Primitive for Noop {
//! #     fn execute(&mut self, _: &dyn PrimitiveCtx) -> Result<ExecutorOutput> {
//! #         Ok(ExecutorOutput::default())
//! #     }
//! #     fn incident_data(&mut self, _: NodeId, _: &ExecutorOutput) -> Result<()> { Ok(()) }
//! #     fn set_txn_id(&mut self, _: TxnId) {}
//! #     fn set_input_alias(&mut self, _: &str, _: NodeId) -> Result<()> { Ok(()) }
//! # }
//!
//! fn run() -> Result<()> {
//!     let mut graph = PrimitiveGraph::new();
//!     let fetch = graph.create_node(Box::new(Noop))?;
//!     let project = graph.create_node(Box::new(Noop))?;
//!     graph.add_dependency(fetch, project, 0.0)?;
//!     graph.optimise()?;
//!     let _output = graph.execute(&ExecutionCtx::new())?;
//!     Ok(())
//! }
//! # run().unwrap();
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod logging;
pub mod output;
pub mod primitive;
pub mod profile;
pub mod txn;
pub mod types;

pub use config::{GraphConfig, ReadyOrder};
pub use error::{ConfigError, GraphError, Result};
pub use graph::{Edge, GraphExplain, PrimitiveGraph, PrimitiveNode};
pub use output::{ExecutorOutput, Row, Value};
pub use primitive::{ExecutionCtx, PreparedStatementCtx, Primitive, PrimitiveCtx};
pub use txn::TxnControlCounters;
pub use types::{NodeId, TxnId};
