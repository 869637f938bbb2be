use std::fmt;

use crate::error::{GraphError, Result};
use crate::primitive::Primitive;
use crate::types::NodeId;

/// Graph vertex wrapping one primitive and its graph-assigned identity.
pub struct PrimitiveNode {
    id: NodeId,
    primitive: Box<dyn Primitive>,
}

impl PrimitiveNode {
    pub(crate) fn new(id: NodeId, primitive: Box<dyn Primitive>) -> Self {
        Self { id, primitive }
    }

    /// Identity assigned by the owning graph.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The wrapped primitive.
    pub fn primitive(&self) -> &dyn Primitive {
        self.primitive.as_ref()
    }

    /// Mutable access to the wrapped primitive.
    pub fn primitive_mut(&mut self) -> &mut dyn Primitive {
        self.primitive.as_mut()
    }

    /// Forwards an input alias binding to the wrapped primitive.
    pub fn set_input_alias(&mut self, alias: &str, id: NodeId) -> Result<()> {
        self.primitive.set_input_alias(alias, id)
    }
}

impl fmt::Debug for PrimitiveNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimitiveNode")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Every kind of vertex the graph can hold.
///
/// Scheduling code matches exhaustively, so a new kind must be handled at
/// every site before the crate compiles.
#[derive(Debug)]
pub(crate) enum Vertex {
    Primitive(PrimitiveNode),
}

impl Vertex {
    pub(crate) fn id(&self) -> NodeId {
        match self {
            Vertex::Primitive(node) => node.id(),
        }
    }

    pub(crate) fn primitive_mut(&mut self) -> &mut dyn Primitive {
        match self {
            Vertex::Primitive(node) => node.primitive_mut(),
        }
    }
}

pub(crate) fn vertex(vertices: &[Vertex], id: NodeId) -> Result<&Vertex> {
    id.index()
        .and_then(|idx| vertices.get(idx))
        .filter(|vertex| vertex.id() == id)
        .ok_or(GraphError::UnsupportedNodeType(id))
}

pub(crate) fn vertex_mut(vertices: &mut [Vertex], id: NodeId) -> Result<&mut Vertex> {
    id.index()
        .and_then(|idx| vertices.get_mut(idx))
        .filter(|vertex| vertex.id() == id)
        .ok_or(GraphError::UnsupportedNodeType(id))
}
