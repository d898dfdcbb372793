//! End-to-end tests for the generation pipeline and the emitted document.
mod common;
use common::{FAN_OUT_PROMPT, SUPPORT_PROMPT, generate_document, node_names, request, support_request};
use flowsmith::error::RequestConversionError;
use flowsmith::prelude::*;
use serde_json::Value;

#[test]
fn test_reference_prompt_produces_linear_chain() {
    let document = generate_document(&support_request());

    assert_eq!(
        node_names(&document),
        vec!["On New Event", "HTTP Request", "Notion", "Slack"]
    );
    assert_eq!(document.connections.edge_count(), 3);
    assert_eq!(
        document.connections.sources().collect::<Vec<_>>(),
        vec!["On New Event", "HTTP Request", "Notion"]
    );
    for (source, next) in [
        ("On New Event", "HTTP Request"),
        ("HTTP Request", "Notion"),
        ("Notion", "Slack"),
    ] {
        let targets: Vec<&str> = document
            .connections
            .get(source)
            .unwrap()
            .targets()
            .map(|t| t.node.as_str())
            .collect();
        assert_eq!(targets, vec![next]);
    }

    let positions: Vec<[i32; 2]> = document.nodes.iter().map(|n| n.position).collect();
    assert_eq!(positions, vec![[250, 300], [470, 300], [690, 300], [910, 300]]);
}

#[test]
fn test_document_envelope() {
    let workflow = generate_workflow(&support_request().with_timezone("Europe/Berlin")).unwrap();
    let raw: Value = serde_json::from_str(&workflow.document).unwrap();

    assert_eq!(raw["name"], "Support Escalation");
    assert_eq!(raw["active"], false);
    assert_eq!(raw["settings"]["executionOrder"], "v1");
    assert_eq!(raw["settings"]["timezone"], "Europe/Berlin");
    assert_eq!(raw["pinData"], serde_json::json!({}));
    assert_eq!(
        raw["connections"]["On New Event"]["main"][0][0],
        serde_json::json!({ "node": "HTTP Request", "type": "main", "index": 0 })
    );
    assert_eq!(raw["nodes"][3]["type"], "n8n-nodes-base.slack");
}

#[test]
fn test_whole_type_versions_are_written_as_integers() {
    let workflow =
        generate_workflow(&request("Fetch the latest orders and save them to Postgres")).unwrap();
    let raw: Value = serde_json::from_str(&workflow.document).unwrap();
    assert_eq!(raw["nodes"][0]["type"], "n8n-nodes-base.manualTrigger");
    assert_eq!(raw["nodes"][0]["typeVersion"].as_u64(), Some(1));
    assert_eq!(raw["nodes"][2]["typeVersion"].as_f64(), Some(2.5));
}

#[test]
fn test_generation_is_deterministic() {
    let first = generate_workflow(&support_request()).unwrap();
    let second = generate_workflow(&support_request()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_notes_follow_request_flag() {
    let with_notes = generate_document(&support_request());
    assert_eq!(
        with_notes.nodes[0].notes.as_deref(),
        Some("When a new support ticket is created")
    );
    assert_eq!(with_notes.nodes[2].notes.as_deref(), Some("Update the Notion CRM page"));
    assert_eq!(with_notes.nodes[0].notes_in_flow, Some(true));

    let workflow = generate_workflow(&support_request().with_notes(false)).unwrap();
    assert!(!workflow.document.contains("\"notes\""));
    assert!(!workflow.document.contains("\"notesInFlow\""));
}

#[test]
fn test_duplicate_labels_get_numbered_names() {
    let document = generate_document(&request(
        "When a webhook is called, fetch the user profile, then fetch the billing history",
    ));
    assert_eq!(
        node_names(&document),
        vec!["Webhook", "HTTP Request", "HTTP Request 2"]
    );
    let targets: Vec<&str> = document
        .connections
        .get("HTTP Request")
        .unwrap()
        .targets()
        .map(|t| t.node.as_str())
        .collect();
    assert_eq!(targets, vec!["HTTP Request 2"]);
}

#[test]
fn test_connections_reference_existing_nodes_only() {
    for prompt in [
        SUPPORT_PROMPT,
        FAN_OUT_PROMPT,
        "Every Monday at 9am fetch the sales report and post it to the #sales channel",
        "Fetch the latest orders and save them to Postgres",
    ] {
        let document = generate_document(&request(prompt));
        let names = node_names(&document);
        for (source, outputs) in document.connections.iter() {
            assert!(names.contains(&source), "dangling source {}", source);
            for target in outputs.targets() {
                assert!(names.contains(&target.node.as_str()));
                assert_ne!(target.node, source, "self loop on {}", source);
            }
        }

        // Exactly one node without inbound connections, and it is the first.
        let roots: Vec<&str> = names
            .iter()
            .copied()
            .filter(|name| {
                !document
                    .connections
                    .iter()
                    .any(|(_, outputs)| outputs.targets().any(|t| t.node == *name))
            })
            .collect();
        assert_eq!(roots, vec![names[0]], "prompt: {}", prompt);
    }
}

#[test]
fn test_delivery_steps_fan_out_from_shared_predecessor() {
    let document = generate_document(&request(FAN_OUT_PROMPT));
    assert_eq!(
        node_names(&document),
        vec!["On Form Submission", "Send Email", "Slack"]
    );

    let targets: Vec<&str> = document
        .connections
        .get("On Form Submission")
        .unwrap()
        .targets()
        .map(|t| t.node.as_str())
        .collect();
    assert_eq!(targets, vec!["Send Email", "Slack"]);
    assert_eq!(document.connections.edge_count(), 2);

    assert_eq!(document.nodes[1].position, [470, 300]);
    assert_eq!(document.nodes[2].position, [470, 460]);
    assert_eq!(
        document.nodes[1].parameters["toEmail"],
        serde_json::json!("ops@example.com")
    );
}

#[test]
fn test_chain_continues_after_fan_out() {
    let prompt = format!("{}, then log it to Google Sheets", FAN_OUT_PROMPT);
    let document = generate_document(&request(&prompt));
    assert_eq!(document.nodes[3].name, "Google Sheets");
    assert_eq!(document.nodes[3].position, [690, 300]);

    let targets: Vec<&str> = document
        .connections
        .get("Slack")
        .unwrap()
        .targets()
        .map(|t| t.node.as_str())
        .collect();
    assert_eq!(targets, vec!["Google Sheets"]);
}

#[test]
fn test_branching_can_be_disabled() {
    let generator = Generator::builder().with_branching(false).build().unwrap();
    let workflow = generator.generate(&request(FAN_OUT_PROMPT)).unwrap();
    let document = workflow.parse_document().unwrap();

    assert_eq!(document.connections.edge_count(), 2);
    assert!(document.connections.get("Send Email").is_some());
    assert_eq!(document.nodes[2].position, [690, 300]);
}

#[test]
fn test_custom_layout() {
    let generator = Generator::builder()
        .with_layout(LayoutConfig {
            origin: Position::new(0, 0),
            column_step: 100,
            row_step: 50,
        })
        .build()
        .unwrap();
    let document = generator
        .generate(&request(FAN_OUT_PROMPT))
        .unwrap()
        .parse_document()
        .unwrap();
    let positions: Vec<[i32; 2]> = document.nodes.iter().map(|n| n.position).collect();
    assert_eq!(positions, vec![[0, 0], [100, 0], [100, 50]]);
}

#[test]
fn test_schedule_prompt() {
    let document = generate_document(&request(
        "Every Monday at 9am fetch the sales report and post it to the #sales channel in Slack",
    ));
    assert_eq!(
        node_names(&document),
        vec!["Schedule Trigger", "HTTP Request", "Slack"]
    );
    assert_eq!(
        document.nodes[0].parameters["rule"]["interval"][0]["triggerAtDay"],
        serde_json::json!([1])
    );
    assert_eq!(
        document.nodes[2].parameters["channelId"]["value"],
        serde_json::json!("#sales")
    );
}

#[test]
fn test_summaries() {
    let workflow = generate_workflow(&request(
        "Fetch the latest orders, then wibble the frobnicator",
    ))
    .unwrap();
    let summaries: Vec<&str> = workflow
        .node_summaries
        .iter()
        .map(|s| s.summary.as_str())
        .collect();
    assert_eq!(summaries[0], "Starts when you execute the workflow manually");
    assert_eq!(summaries[1], "Fetch the latest orders (matched \"fetch\")");
    assert!(summaries[2].contains("no matching integration"));
    assert_eq!(workflow.node_summaries[2].type_id, "n8n-nodes-base.set");
}

#[test]
fn test_file_name_and_explain() {
    let workflow = generate_workflow(&support_request()).unwrap();
    assert_eq!(workflow.file_name(), "support-escalation.json");

    let outline = Generator::new().unwrap().explain(&support_request()).unwrap();
    assert!(outline.contains("WORKFLOW: Support Escalation"));
    assert!(outline.contains("On New Event"));
}

#[test]
fn test_blank_name_is_rejected_first() {
    let result = generate_workflow(&GenerationRequest::new("   ", "hi").with_timezone("Mars/Base"));
    assert!(matches!(result, Err(GenerationError::InvalidName)));
}

#[test]
fn test_short_prompt_is_rejected_before_timezone() {
    let result = generate_workflow(&request("hi").with_timezone("Mars/Base"));
    assert!(matches!(
        result,
        Err(GenerationError::EmptyPrompt {
            min_length: 10,
            actual: 2
        })
    ));
}

#[test]
fn test_invalid_timezone_is_rejected_before_processing() {
    let result = generate_workflow(
        &request("If the stars align, do something useful").with_timezone("Mars/Base"),
    );
    match result {
        Err(GenerationError::InvalidTimezone(zone)) => assert_eq!(zone, "Mars/Base"),
        other => panic!("Expected InvalidTimezone, got {:?}", other),
    }
}

#[test]
fn test_unresolved_trigger() {
    let result = generate_workflow(&request("If the stars align, do something useful"));
    match result {
        Err(GenerationError::UnresolvedTrigger { clause }) => {
            assert_eq!(clause.as_deref(), Some("If the stars align"));
        }
        other => panic!("Expected UnresolvedTrigger, got {:?}", other),
    }

    let result = generate_workflow(&request("... ,,, ;;; !!!"));
    assert!(matches!(
        result,
        Err(GenerationError::UnresolvedTrigger { clause: None })
    ));
}

struct ChatCommand {
    title: Option<String>,
    text: String,
}

impl IntoRequest for ChatCommand {
    fn into_request(self) -> Result<GenerationRequest, RequestConversionError> {
        let title = self
            .title
            .ok_or(RequestConversionError::MissingField("title"))?;
        Ok(GenerationRequest::new(title, self.text))
    }
}

#[test]
fn test_generate_from_custom_front_end_model() {
    let generator = Generator::new().unwrap();
    let workflow = generator
        .generate_from(ChatCommand {
            title: Some("Support Escalation".to_string()),
            text: SUPPORT_PROMPT.to_string(),
        })
        .unwrap();
    assert_eq!(workflow.node_summaries.len(), 4);

    let result = generator.generate_from(ChatCommand {
        title: None,
        text: SUPPORT_PROMPT.to_string(),
    });
    assert!(matches!(
        result,
        Err(GenerationError::Request(RequestConversionError::MissingField("title")))
    ));
}

#[test]
fn test_slack_and_email_fan_out() {
    let document = generate_document(&request(
        "When a deal closes, post it to Slack and email the team",
    ));
    assert_eq!(node_names(&document), vec!["On New Event", "Slack", "Send Email"]);
    let targets: Vec<&str> = document
        .connections
        .get("On New Event")
        .unwrap()
        .targets()
        .map(|t| t.node.as_str())
        .collect();
    assert_eq!(targets, vec!["Slack", "Send Email"]);
    assert!(document.connections.get("Slack").is_none());
}

#[test]
fn test_generator_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Generator>();

    let generator = std::sync::Arc::new(Generator::new().unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let generator = std::sync::Arc::clone(&generator);
            std::thread::spawn(move || generator.generate(&support_request()).unwrap())
        })
        .collect();
    let results: Vec<GeneratedWorkflow> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn test_minimum_prompt_length_is_configurable() {
    let generator = Generator::builder().with_min_prompt_length(40).build().unwrap();
    let result = generator.generate(&request("Fetch the latest orders"));
    assert!(matches!(
        result,
        Err(GenerationError::EmptyPrompt { min_length: 40, .. })
    ));
}

fn node_types(document: &WorkflowDocument) -> Vec<&str> {
    document.nodes.iter().map(|n| n.type_id.as_str()).collect()
}

#[test]
fn test_support_prompt_with_trailing_comma() {
    let document = generate_document(&request(
        "When a new support ticket is created, fetch the customer's details, update the Notion CRM page, and post a summary to Slack,",
    ));
    assert_eq!(
        node_types(&document),
        vec![
            "n8n-nodes-base.webhook",
            "n8n-nodes-base.httpRequest",
            "n8n-nodes-base.notion",
            "n8n-nodes-base.slack",
        ]
    );
    assert_eq!(document.connections.edge_count(), 3);
    for pair in document.nodes.windows(2) {
        let targets: Vec<&str> = document
            .connections
            .get(&pair[0].name)
            .unwrap()
            .targets()
            .map(|t| t.node.as_str())
            .collect();
        assert_eq!(targets, vec![pair[1].name.as_str()]);
    }
    assert_eq!(document.node("Notion").unwrap().parameters["operation"], "update");

    for (node, fragment) in document.nodes[1..]
        .iter()
        .zip(["customer's details", "notion crm page", "summary to slack"])
    {
        let note = node.notes.as_deref().unwrap_or_default().to_lowercase();
        assert!(note.contains(fragment), "note {:?} lacks {:?}", note, fragment);
    }
}

#[test]
fn test_action_before_event_cue_keeps_both_nodes() {
    let document = generate_document(&request(
        "Post a message to Slack when a new issue is created",
    ));
    assert_eq!(node_names(&document), vec!["On New Event", "Slack"]);
    assert_eq!(
        document.nodes[0].notes.as_deref(),
        Some("When a new issue is created")
    );
    assert_eq!(document.connections.edge_count(), 1);
}

#[test]
fn test_action_before_schedule_cue_keeps_every_action() {
    let document = generate_document(&request(
        "Fetch the weather every morning and email it to me",
    ));
    assert_eq!(
        node_types(&document),
        vec![
            "n8n-nodes-base.scheduleTrigger",
            "n8n-nodes-base.httpRequest",
            "n8n-nodes-base.emailSend",
        ]
    );
    assert_eq!(
        document.nodes[0].parameters["rule"],
        serde_json::json!({ "interval": [{ "field": "days", "triggerAtHour": 9 }] })
    );
    assert_eq!(document.connections.edge_count(), 2);

    let document = generate_document(&request(
        "Download the report once it is ready, then email it to me",
    ));
    assert_eq!(
        node_types(&document),
        vec![
            "n8n-nodes-base.webhook",
            "n8n-nodes-base.httpRequest",
            "n8n-nodes-base.emailSend",
        ]
    );
}

#[test]
fn test_quoted_message_survives_comma() {
    let document = generate_document(&request(
        "When a form is submitted, post \"Hello, team\" to Slack",
    ));
    assert_eq!(node_names(&document), vec!["On Form Submission", "Slack"]);
    assert_eq!(document.nodes[1].parameters["text"], "Hello, team");
}

#[test]
fn test_generate_workflow_matches_fresh_generator() {
    let generator = Generator::new().unwrap();
    for prompt in [SUPPORT_PROMPT, FAN_OUT_PROMPT] {
        let request = request(prompt);
        assert_eq!(
            generate_workflow(&request).unwrap(),
            generator.generate(&request).unwrap()
        );
    }
}

#[test]
fn test_connection_sources_follow_node_order() {
    for prompt in [
        SUPPORT_PROMPT,
        FAN_OUT_PROMPT,
        "When a deal closes, post it to Slack and email the team, then update the Notion CRM page",
        "Fetch the weather every morning and email it to me",
    ] {
        let document = generate_document(&request(prompt));
        let names = node_names(&document);
        let positions: Vec<usize> = document
            .connections
            .sources()
            .map(|source| names.iter().position(|name| *name == source).unwrap())
            .collect();
        assert!(
            positions.windows(2).all(|pair| pair[0] < pair[1]),
            "sources out of node order for {:?}",
            prompt
        );
    }
}
