//! Common test utilities for building requests, clauses and graphs.
use flowsmith::document::WorkflowDocument;
use flowsmith::generator::segmenter::{Clause, ClauseLink, ClauseRole};
use flowsmith::prelude::*;
use serde_json::Map;

/// The reference prompt: event trigger, lookup, Notion update, Slack message.
#[allow(dead_code)]
pub const SUPPORT_PROMPT: &str = "When a new support ticket is created, fetch the customer's details, update the Notion CRM page, and post a summary to Slack.";

/// Two delivery steps joined by a bare "and", eligible for fan-out.
#[allow(dead_code)]
pub const FAN_OUT_PROMPT: &str =
    "When a form is submitted, send an email to ops@example.com and post the details to Slack";

/// Creates a request with the default timezone and notes enabled.
#[allow(dead_code)]
pub fn request(prompt: &str) -> GenerationRequest {
    GenerationRequest::new("Test Workflow", prompt)
}

#[allow(dead_code)]
pub fn support_request() -> GenerationRequest {
    GenerationRequest::new("Support Escalation", SUPPORT_PROMPT)
}

/// Runs the default generator and parses the resulting document.
#[allow(dead_code)]
pub fn generate_document(request: &GenerationRequest) -> WorkflowDocument {
    let workflow = generate_workflow(request).expect("generation should succeed");
    workflow
        .parse_document()
        .expect("generated document should parse")
}

#[allow(dead_code)]
pub fn node_names(document: &WorkflowDocument) -> Vec<&str> {
    document.nodes.iter().map(|n| n.name.as_str()).collect()
}

/// Builds an action clause the way the segmenter would.
#[allow(dead_code)]
pub fn action_clause(text: &str, order: usize) -> Clause {
    Clause {
        text: text.to_string(),
        order,
        role: ClauseRole::Action,
        link: ClauseLink::Sequential,
        synthetic: false,
    }
}

#[allow(dead_code)]
pub fn trigger_clause(text: &str) -> Clause {
    Clause {
        text: text.to_string(),
        order: 0,
        role: ClauseRole::Trigger,
        link: ClauseLink::Sequential,
        synthetic: false,
    }
}

/// A bare node for graph-level tests.
#[allow(dead_code)]
pub fn bare_node(name: &str) -> WorkflowNode {
    WorkflowNode {
        name: name.to_string(),
        type_id: "n8n-nodes-base.set".to_string(),
        type_version: 3.4,
        position: Position::new(0, 0),
        parameters: Map::new(),
        notes: None,
        summary: String::new(),
    }
}

/// A graph of `names.len()` nodes chained in order.
#[allow(dead_code)]
pub fn chain(names: &[&str]) -> (WorkflowGraph, Vec<NodeId>) {
    let mut graph = WorkflowGraph::new();
    let ids: Vec<NodeId> = names.iter().map(|n| graph.add_node(bare_node(n))).collect();
    for pair in ids.windows(2) {
        graph.connect(pair[0], pair[1]).expect("forward edge");
    }
    (graph, ids)
}
