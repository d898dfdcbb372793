//! Unit tests for requests, text helpers, catalog and error messages.
use flowsmith::catalog::NodeCatalog;
use flowsmith::document::{ConnectionMap, ConnectionTarget, WorkflowDocument};
use flowsmith::error::{GenerationError, GraphError};
use flowsmith::request::{GenerationRequest, Timezone};
use flowsmith::text::{capitalize, contains_keyword, file_slug, normalize_whitespace, path_slug};
use std::str::FromStr;

#[test]
fn test_timezone_parsing() {
    assert_eq!(Timezone::from_str("UTC").unwrap(), Timezone::Utc);
    assert_eq!(
        Timezone::from_str("America/New_York").unwrap(),
        Timezone::AmericaNewYork
    );
    assert!(matches!(
        Timezone::from_str("Europe/Paris"),
        Err(GenerationError::InvalidTimezone(_))
    ));
    for zone in Timezone::ALL {
        assert_eq!(Timezone::from_str(zone.as_str()).unwrap(), zone);
    }
}

#[test]
fn test_request_deserializes_from_form_payload() {
    let request: GenerationRequest =
        serde_json::from_str(r#"{"workflowName": "Digest", "prompt": "Every day fetch the news"}"#)
            .unwrap();
    assert_eq!(request.timezone, "UTC");
    assert!(request.include_notes);

    let request: GenerationRequest = serde_json::from_str(
        r#"{"workflowName": "Digest", "prompt": "x", "timezone": "Asia/Singapore", "includeNotes": false}"#,
    )
    .unwrap();
    assert_eq!(request.timezone, "Asia/Singapore");
    assert!(!request.include_notes);
}

#[test]
fn test_text_helpers() {
    assert_eq!(normalize_whitespace("  a \n\t b  "), "a b");
    assert_eq!(capitalize("post it"), "Post it");
    assert_eq!(capitalize(""), "");
    assert_eq!(file_slug("Support  Escalation Flow"), "support-escalation-flow");
    assert_eq!(path_slug("Orders / New!"), "orders-new");
    assert!(contains_keyword("send the email", "email"));
    assert!(!contains_keyword("send the email", "ai"));
    assert!(contains_keyword("once a week, please", "once a week"));
}

#[test]
fn test_catalog_layout() {
    let catalog = NodeCatalog::global();
    assert!(!catalog.is_empty());
    assert!(catalog.triggers().all(|d| d.is_trigger()));
    assert!(catalog.actions().all(|d| !d.is_trigger()));
    assert_eq!(catalog.fallback().label, "Edit Fields");
    assert_eq!(catalog.iter().last().map(|d| d.label), Some("Edit Fields"));
    assert!(catalog.by_label("Slack").is_some_and(|d| d.fan_out));
    assert!(catalog.by_label("HTTP Request").is_some_and(|d| !d.fan_out));

    let mut labels: Vec<&str> = catalog.iter().map(|d| d.label).collect();
    let total = labels.len();
    labels.sort_unstable();
    labels.dedup();
    assert_eq!(labels.len(), total, "catalog labels must be unique");
}

#[test]
fn test_error_messages() {
    assert_eq!(
        GenerationError::EmptyPrompt {
            min_length: 10,
            actual: 3
        }
        .to_string(),
        "Describe the workflow in at least 10 characters (received 3)"
    );
    assert_eq!(
        GenerationError::UnresolvedTrigger {
            clause: Some("If it rains".to_string())
        }
        .to_string(),
        "Could not determine how the workflow starts from 'If it rains'"
    );
    assert_eq!(
        GenerationError::from(GraphError::DuplicateName("Slack".to_string())).to_string(),
        "Workflow graph is inconsistent: Node name 'Slack' is used more than once"
    );
    assert!(GenerationError::InvalidName.is_validation());
    assert!(!GenerationError::from(GraphError::Empty).is_validation());
}

#[test]
fn test_connection_map_keeps_insertion_order() {
    let mut map = ConnectionMap::new();
    map.entry("Zeta").push(0, ConnectionTarget::main("Alpha", 0));
    map.entry("Alpha").push(0, ConnectionTarget::main("Beta", 0));
    map.entry("Zeta").push(0, ConnectionTarget::main("Beta", 0));

    let json = serde_json::to_string(&map).unwrap();
    assert!(json.find("\"Zeta\"").unwrap() < json.find("\"Alpha\":").unwrap());
    assert_eq!(map.len(), 2);
    assert_eq!(map.edge_count(), 3);

    let parsed: ConnectionMap = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, map);
}

#[test]
fn test_document_parses_n8n_export_without_pin_data() {
    let json = r#"{
        "name": "Imported",
        "nodes": [{
            "parameters": {},
            "name": "Manual Trigger",
            "type": "n8n-nodes-base.manualTrigger",
            "typeVersion": 1,
            "position": [250, 300]
        }],
        "connections": {},
        "active": false,
        "settings": { "executionOrder": "v1", "timezone": "UTC" }
    }"#;
    let document = WorkflowDocument::from_json(json).unwrap();
    assert_eq!(document.nodes[0].type_version, 1.0);
    assert!(document.node("Manual Trigger").is_some());
    assert!(document.connections.is_empty());
    assert!(document.pin_data.is_empty());
}
