#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use plangraph::{
    ExecutorOutput, GraphError, NodeId, Primitive, PrimitiveCtx, Result, Row, TxnId, Value,
};

/// One observed call on a [`Probe`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Executed { step: usize },
    Incident { step: usize, from: NodeId },
    Txn { step: usize, id: TxnId },
    Alias { step: usize, alias: String, id: NodeId },
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Test primitive: records calls, sums the `value` column of its inputs and
/// emits `own + inputs`.
pub struct Probe {
    step: usize,
    own: i64,
    log: EventLog,
    inputs: Vec<i64>,
    fail: Option<&'static str>,
}

impl Probe {
    pub fn new(step: usize, own: i64, log: &EventLog) -> Self {
        Self {
            step,
            own,
            log: Rc::clone(log),
            inputs: Vec::new(),
            fail: None,
        }
    }

    pub fn failing(step: usize, message: &'static str, log: &EventLog) -> Self {
        Self {
            fail: Some(message),
            ..Self::new(step, 0, log)
        }
    }

    pub fn boxed(self) -> Box<dyn Primitive> {
        Box::new(self)
    }
}

pub fn value_of(output: &ExecutorOutput) -> Option<i64> {
    match output.rows.first()?.get("value")? {
        Value::Int(v) => Some(*v),
        _ => None,
    }
}

impl Primitive for Probe {
    fn execute(&mut self, ctx: &dyn PrimitiveCtx) -> Result<ExecutorOutput> {
        self.log
            .borrow_mut()
            .push(Event::Executed { step: self.step });
        if ctx.is_cancelled() {
            return Err(GraphError::primitive("cancelled"));
        }
        if let Some(message) = self.fail {
            return Err(GraphError::primitive(message));
        }
        let mut row = Row::new();
        row.insert(
            "value".into(),
            Value::Int(self.own + self.inputs.iter().sum::<i64>()),
        );
        row.insert("step".into(), Value::Int(self.step as i64));
        Ok(ExecutorOutput::from_rows(vec![row]))
    }

    fn incident_data(&mut self, from: NodeId, input: &ExecutorOutput) -> Result<()> {
        self.log.borrow_mut().push(Event::Incident {
            step: self.step,
            from,
        });
        self.inputs.extend(value_of(input));
        Ok(())
    }

    fn set_txn_id(&mut self, id: TxnId) {
        self.log.borrow_mut().push(Event::Txn {
            step: self.step,
            id,
        });
    }

    fn set_input_alias(&mut self, alias: &str, id: NodeId) -> Result<()> {
        self.log.borrow_mut().push(Event::Alias {
            step: self.step,
            alias: alias.to_owned(),
            id,
        });
        Ok(())
    }
}
