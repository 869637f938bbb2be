//! Values produced by primitives and handed between them.

use std::collections::BTreeMap;

use serde::Serialize;

/// Single output row represented as a mapping from column alias to value.
pub type Row = BTreeMap<String, Value>;

/// Runtime value carried in an output row.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating-point value
    Float(f64),
    /// String value
    String(String),
    /// Binary value
    Bytes(Vec<u8>),
}

/// Result of running one primitive.
///
/// The graph returns the output of the last primitive in topological order;
/// earlier outputs reach their consumers only through
/// [`Primitive::incident_data`](crate::Primitive::incident_data).
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ExecutorOutput {
    /// Rows produced by the step.
    pub rows: Vec<Row>,
    /// Informational messages to surface to the client.
    pub messages: Vec<String>,
    /// Rows affected by a mutating statement, when applicable.
    pub affected_rows: Option<u64>,
}

impl ExecutorOutput {
    /// Creates an output holding the given rows.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// Creates an output carrying a single message and no rows.
    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            messages: vec![msg.into()],
            ..Self::default()
        }
    }

    /// Sets the affected row count.
    pub fn with_affected_rows(mut self, count: u64) -> Self {
        self.affected_rows = Some(count);
        self
    }

    /// Returns `true` when the output carries neither rows nor messages.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.messages.is_empty() && self.affected_rows.is_none()
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}
