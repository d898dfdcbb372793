//! Arena-backed workflow graph.
//!
//! Nodes live in a `Vec` and edges refer to them by `NodeId`. Names are only
//! looked up when the graph is rendered, so a rename can never leave a
//! dangling connection behind.

pub mod connection;
pub mod node;
pub mod visualizer;

pub use connection::Connection;
pub use node::{NodeId, Position, WorkflowNode};

use crate::error::GraphError;
use ahash::AHashSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowGraph {
    nodes: Vec<WorkflowNode>,
    connections: Vec<Connection>,
}

impl WorkflowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node. Insertion order is execution order.
    pub fn add_node(&mut self, node: WorkflowNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Adds a `main` connection between two existing nodes.
    ///
    /// Edges must point forward in insertion order, which keeps every graph
    /// acyclic without a separate cycle check.
    pub fn connect(&mut self, from: NodeId, to: NodeId) -> Result<(), GraphError> {
        self.add_connection(Connection::main(from, to))
    }

    fn add_connection(&mut self, connection: Connection) -> Result<(), GraphError> {
        for id in [connection.from, connection.to] {
            if id.0 >= self.nodes.len() {
                return Err(GraphError::UnknownNode(id));
            }
        }
        if connection.from == connection.to {
            return Err(GraphError::SelfLoop(self.nodes[connection.from.0].name.clone()));
        }
        if connection.from > connection.to {
            return Err(GraphError::BackwardEdge {
                from: self.nodes[connection.from.0].name.clone(),
                to: self.nodes[connection.to.0].name.clone(),
            });
        }
        if !self.connections.contains(&connection) {
            self.connections.push(connection);
        }
        Ok(())
    }

    pub fn nodes(&self) -> &[WorkflowNode] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&WorkflowNode> {
        self.nodes.get(id.0)
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// The trigger is always the first node.
    pub fn trigger(&self) -> Option<&WorkflowNode> {
        self.nodes.first()
    }

    pub fn incoming(&self, id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(move |c| c.to == id)
    }

    pub fn outgoing(&self, id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(move |c| c.from == id)
    }

    pub fn in_degree(&self, id: NodeId) -> usize {
        self.incoming(id).count()
    }

    /// Nodes with no incoming connection, in insertion order.
    pub fn roots(&self) -> Vec<NodeId> {
        let targets: AHashSet<NodeId> = self.connections.iter().map(|c| c.to).collect();
        self.node_ids().filter(|id| !targets.contains(id)).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Checks the structural invariants the serializer relies on: unique
    /// names, and exactly one root which is the first node.
    pub fn validate(&self) -> Result<(), GraphError> {
        if self.nodes.is_empty() {
            return Err(GraphError::Empty);
        }

        let mut seen = AHashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !seen.insert(node.name.as_str()) {
                return Err(GraphError::DuplicateName(node.name.clone()));
            }
        }

        let roots = self.roots();
        if roots != [NodeId(0)] {
            return Err(GraphError::RootMismatch {
                roots: roots
                    .iter()
                    .map(|id| self.nodes[id.0].name.clone())
                    .collect(),
            });
        }
        Ok(())
    }
}
