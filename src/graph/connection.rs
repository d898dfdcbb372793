use super::NodeId;

/// A directed edge from one node's output slot to another node's input slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Connection {
    pub from: NodeId,
    pub to: NodeId,
    pub output_index: u32,
    pub input_index: u32,
}

impl Connection {
    /// Connects the first output of `from` to the first input of `to`.
    pub fn main(from: NodeId, to: NodeId) -> Self {
        Self {
            from,
            to,
            output_index: 0,
            input_index: 0,
        }
    }
}
