//! Rendering a `WorkflowGraph` as an importable n8n workflow document.

pub mod schema;
pub mod summary;

pub use schema::{
    ConnectionMap, ConnectionTarget, DocumentNode, NodeOutputs, WorkflowDocument, WorkflowSettings,
};
pub use summary::{NodeSummary, SummaryFormatter};

use crate::error::{GenerationError, GraphError};
use crate::graph::WorkflowGraph;
use crate::text::file_slug;
use serde::{Deserialize, Serialize};

/// Workflow-level values that are not part of the graph itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMeta {
    pub workflow_name: String,
    pub timezone: String,
}

impl DocumentMeta {
    pub fn new(workflow_name: impl Into<String>, timezone: impl Into<String>) -> Self {
        Self {
            workflow_name: workflow_name.into(),
            timezone: timezone.into(),
        }
    }
}

impl WorkflowDocument {
    /// Converts a graph into the document model. Connections refer to nodes
    /// by name, resolved here from the arena indices.
    pub fn from_graph(graph: &WorkflowGraph, meta: &DocumentMeta) -> Result<Self, GenerationError> {
        let nodes = graph
            .nodes()
            .iter()
            .map(|node| DocumentNode {
                parameters: node.parameters.clone(),
                name: node.name.clone(),
                type_id: node.type_id.clone(),
                type_version: node.type_version,
                position: [node.position.x, node.position.y],
                notes: node.notes.clone(),
                notes_in_flow: node.notes.as_ref().map(|_| true),
            })
            .collect();

        // Sources are keyed in node order, each with its targets in edge order.
        let mut connections = ConnectionMap::new();
        for id in graph.node_ids() {
            for connection in graph.outgoing(id) {
                let (source, target) = match (graph.node(connection.from), graph.node(connection.to)) {
                    (Some(source), Some(target)) => (source, target),
                    (None, _) => return Err(GraphError::UnknownNode(connection.from).into()),
                    (_, None) => return Err(GraphError::UnknownNode(connection.to).into()),
                };
                connections.entry(&source.name).push(
                    connection.output_index,
                    ConnectionTarget::main(target.name.clone(), connection.input_index),
                );
            }
        }

        Ok(Self {
            name: meta.workflow_name.clone(),
            nodes,
            connections,
            active: false,
            settings: WorkflowSettings::new(meta.timezone.clone()),
            pin_data: Default::default(),
        })
    }

    pub fn to_json_pretty(&self) -> Result<String, GenerationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, GenerationError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Renders `graph` as pretty-printed n8n workflow JSON.
pub fn serialize(graph: &WorkflowGraph, meta: &DocumentMeta) -> Result<String, GenerationError> {
    WorkflowDocument::from_graph(graph, meta)?.to_json_pretty()
}

/// The result of one generation: the document text plus per-node summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedWorkflow {
    pub workflow_name: String,
    pub document: String,
    pub node_summaries: Vec<NodeSummary>,
}

impl GeneratedWorkflow {
    /// Suggested file name: the workflow name, lower-cased with whitespace
    /// replaced by `-`, plus `.json`.
    pub fn file_name(&self) -> String {
        format!("{}.json", file_slug(&self.workflow_name))
    }

    /// Parses the document text back into the typed model.
    pub fn parse_document(&self) -> Result<WorkflowDocument, GenerationError> {
        WorkflowDocument::from_json(&self.document)
    }
}
