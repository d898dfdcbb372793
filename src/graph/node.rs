use serde_json::{Map, Value};
use std::fmt;

/// Index of a node inside a `WorkflowGraph` arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Canvas coordinates in the n8n editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A single resolved node, ready to be serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowNode {
    /// Unique within one graph; becomes the connection key in the document.
    pub name: String,
    pub type_id: String,
    pub type_version: f64,
    pub position: Position,
    pub parameters: Map<String, Value>,
    pub notes: Option<String>,
    /// One-line description for list views.
    pub summary: String,
}
