use super::descriptor::{NodeTypeDescriptor, ParamSlot, TriggerKind};
use serde_json::json;

pub(super) const FALLBACK_TYPE_ID: &str = "n8n-nodes-base.set";

/// Trigger entries, most specific first. Declaration order is match priority.
pub(super) fn trigger_entries() -> Vec<NodeTypeDescriptor> {
    vec![
        NodeTypeDescriptor::trigger(
            TriggerKind::Schedule,
            "n8n-nodes-base.scheduleTrigger",
            1.2,
            "Schedule Trigger",
        )
        .keywords(&[
            "every",
            "each day",
            "each week",
            "each morning",
            "daily",
            "hourly",
            "weekly",
            "monthly",
            "once a day",
            "once a week",
            "on a schedule",
            "schedule",
            "scheduled",
            "cron",
        ])
        .parameters(json!({
            "rule": { "interval": [{ "field": "days", "triggerAtHour": 9 }] }
        }))
        .slots(&[ParamSlot::Schedule]),
        NodeTypeDescriptor::trigger(
            TriggerKind::Manual,
            "n8n-nodes-base.manualTrigger",
            1.0,
            "Manual Trigger",
        )
        .keywords(&["manually", "manual", "on demand", "click", "button"]),
        NodeTypeDescriptor::trigger(
            TriggerKind::Event,
            "n8n-nodes-base.emailReadImap",
            2.0,
            "Email Trigger (IMAP)",
        )
        .keywords(&[
            "new email",
            "email arrives",
            "email is received",
            "receive an email",
            "receives an email",
            "incoming email",
            "inbox",
        ])
        .parameters(json!({ "mailbox": "INBOX", "postProcessAction": "read", "options": {} })),
        NodeTypeDescriptor::trigger(
            TriggerKind::Event,
            "n8n-nodes-base.formTrigger",
            2.2,
            "On Form Submission",
        )
        .keywords(&[
            "form is submitted",
            "form submission",
            "submits a form",
            "submits the form",
            "form",
        ])
        .parameters(json!({
            "formTitle": "Submission",
            "formFields": { "values": [] },
            "options": {}
        }))
        .slots(&[ParamSlot::Text("formTitle")]),
        NodeTypeDescriptor::trigger(
            TriggerKind::Webhook,
            "n8n-nodes-base.webhook",
            2.0,
            "Webhook",
        )
        .keywords(&[
            "webhook",
            "http request",
            "request is received",
            "incoming request",
            "post request",
            "api call",
            "endpoint",
        ])
        .parameters(json!({
            "httpMethod": "POST",
            "path": "incoming",
            "responseMode": "onReceived",
            "options": {}
        }))
        .slots(&[ParamSlot::WebhookPath("path")]),
        NodeTypeDescriptor::trigger(
            TriggerKind::Event,
            "n8n-nodes-base.webhook",
            2.0,
            "On New Event",
        )
        .keywords(&[
            "when",
            "whenever",
            "as soon as",
            "once",
            "new",
            "created",
            "updated",
            "changed",
            "added",
            "arrives",
            "happens",
            "occurs",
        ])
        .parameters(json!({
            "httpMethod": "POST",
            "path": "new-event",
            "responseMode": "onReceived",
            "options": {}
        }))
        .slots(&[ParamSlot::WebhookPath("path")]),
    ]
}

/// Action entries. Named services come before the generic messaging and HTTP
/// rules so that "post the report to Slack" never resolves to a plain request.
pub(super) fn action_entries() -> Vec<NodeTypeDescriptor> {
    vec![
        NodeTypeDescriptor::action("n8n-nodes-base.slack", 2.2, "Slack")
            .keywords(&["slack"])
            .parameters(json!({
                "select": "channel",
                "channelId": { "__rl": true, "value": "#general", "mode": "name" },
                "text": "={{ JSON.stringify($json) }}",
                "otherOptions": {}
            }))
            .slots(&[ParamSlot::Channel("channelId.value"), ParamSlot::Text("text")])
            .fan_out(),
        NodeTypeDescriptor::action("n8n-nodes-base.notion", 2.2, "Notion")
            .keywords(&["notion"])
            .parameters(json!({
                "resource": "databasePage",
                "operation": "update",
                "pageId": { "__rl": true, "value": "", "mode": "url" },
                "options": {}
            }))
            .slots(&[ParamSlot::Operation(
                "operation",
                &[
                    ("create", "create"),
                    ("add", "create"),
                    ("update", "update"),
                    ("find", "getAll"),
                    ("search", "getAll"),
                    ("get", "get"),
                ],
            )]),
        NodeTypeDescriptor::action("n8n-nodes-base.googleSheets", 4.5, "Google Sheets")
            .keywords(&["google sheet", "google sheets", "spreadsheet", "sheet", "sheets"])
            .parameters(json!({
                "operation": "append",
                "documentId": { "__rl": true, "value": "", "mode": "list" },
                "sheetName": { "__rl": true, "value": "", "mode": "list" },
                "options": {}
            }))
            .slots(&[ParamSlot::Operation(
                "operation",
                &[
                    ("update", "update"),
                    ("read", "read"),
                    ("get", "read"),
                    ("append", "append"),
                    ("add", "append"),
                    ("log", "append"),
                ],
            )]),
        NodeTypeDescriptor::action("n8n-nodes-base.airtable", 2.1, "Airtable")
            .keywords(&["airtable"])
            .parameters(json!({ "operation": "create", "options": {} })),
        NodeTypeDescriptor::action("n8n-nodes-base.hubspot", 2.1, "HubSpot")
            .keywords(&["hubspot"])
            .parameters(json!({
                "resource": "contact",
                "operation": "upsert",
                "additionalFields": {}
            })),
        NodeTypeDescriptor::action("n8n-nodes-base.jira", 1.0, "Jira Software")
            .keywords(&["jira"])
            .parameters(json!({
                "resource": "issue",
                "operation": "create",
                "additionalFields": {}
            })),
        NodeTypeDescriptor::action("n8n-nodes-base.github", 1.0, "GitHub")
            .keywords(&["github"])
            .parameters(json!({ "resource": "issue", "operation": "create" })),
        NodeTypeDescriptor::action("n8n-nodes-base.postgres", 2.5, "Postgres")
            .keywords(&["postgres", "postgresql", "database", "sql"])
            .parameters(json!({ "operation": "insert", "options": {} }))
            .slots(&[ParamSlot::Operation(
                "operation",
                &[
                    ("insert", "insert"),
                    ("save", "insert"),
                    ("update", "update"),
                    ("query", "executeQuery"),
                    ("select", "select"),
                ],
            )]),
        NodeTypeDescriptor::action("@n8n/n8n-nodes-langchain.openAi", 1.8, "OpenAI")
            .keywords(&[
                "openai",
                "chatgpt",
                "gpt",
                "ai",
                "summarize",
                "summarise",
                "classify",
                "translate",
            ])
            .parameters(json!({
                "resource": "text",
                "operation": "message",
                "modelId": { "__rl": true, "value": "gpt-4o-mini", "mode": "list" },
                "messages": { "values": [{ "content": "={{ JSON.stringify($json) }}" }] },
                "options": {}
            })),
        NodeTypeDescriptor::action("n8n-nodes-base.gmail", 2.1, "Gmail")
            .keywords(&["gmail"])
            .parameters(json!({
                "sendTo": "",
                "subject": "Workflow update",
                "message": "={{ JSON.stringify($json) }}",
                "options": {}
            }))
            .slots(&[ParamSlot::Recipient("sendTo"), ParamSlot::Subject("subject")])
            .fan_out(),
        NodeTypeDescriptor::action("n8n-nodes-base.discord", 2.0, "Discord")
            .keywords(&["discord"])
            .parameters(json!({
                "resource": "message",
                "content": "={{ JSON.stringify($json) }}",
                "options": {}
            }))
            .slots(&[ParamSlot::Text("content")])
            .fan_out(),
        NodeTypeDescriptor::action("n8n-nodes-base.telegram", 1.2, "Telegram")
            .keywords(&["telegram"])
            .parameters(json!({
                "chatId": "",
                "text": "={{ JSON.stringify($json) }}",
                "additionalFields": {}
            }))
            .slots(&[ParamSlot::Text("text")])
            .fan_out(),
        NodeTypeDescriptor::action("n8n-nodes-base.microsoftTeams", 2.0, "Microsoft Teams")
            .keywords(&["microsoft teams", "teams"])
            .parameters(json!({
                "resource": "channelMessage",
                "operation": "create",
                "message": "={{ JSON.stringify($json) }}",
                "options": {}
            }))
            .slots(&[ParamSlot::Text("message")])
            .fan_out(),
        NodeTypeDescriptor::action("n8n-nodes-base.emailSend", 2.1, "Send Email")
            .keywords(&["email", "e-mail", "mail"])
            .parameters(json!({
                "fromEmail": "",
                "toEmail": "",
                "subject": "Workflow update",
                "emailFormat": "text",
                "text": "={{ JSON.stringify($json) }}",
                "options": {}
            }))
            .slots(&[ParamSlot::Recipient("toEmail"), ParamSlot::Subject("subject")])
            .fan_out(),
        NodeTypeDescriptor::action("n8n-nodes-base.wait", 1.1, "Wait")
            .keywords(&["wait", "delay", "pause"])
            .parameters(json!({ "amount": 1, "unit": "minutes" }))
            .slots(&[ParamSlot::Wait]),
        NodeTypeDescriptor::action("n8n-nodes-base.if", 2.2, "If")
            .keywords(&["check if", "check whether", "only if", "only when", "if", "condition"])
            .parameters(json!({
                "conditions": {
                    "options": { "caseSensitive": true, "typeValidation": "strict" },
                    "conditions": [],
                    "combinator": "and"
                },
                "options": {}
            })),
        NodeTypeDescriptor::action("n8n-nodes-base.code", 2.0, "Code")
            .keywords(&["transform", "format", "parse", "calculate", "compute", "code", "script"])
            .parameters(json!({ "jsCode": "return $input.all();" })),
        NodeTypeDescriptor::action("n8n-nodes-base.emailSend", 2.1, "Send Notification")
            .keywords(&[
                "send a message",
                "send message",
                "message",
                "notify",
                "notification",
                "alert",
                "ping",
                "tell",
            ])
            .parameters(json!({
                "fromEmail": "",
                "toEmail": "",
                "subject": "Workflow notification",
                "emailFormat": "text",
                "text": "={{ JSON.stringify($json) }}",
                "options": {}
            }))
            .slots(&[ParamSlot::Recipient("toEmail"), ParamSlot::Text("text")])
            .fan_out(),
        NodeTypeDescriptor::action("n8n-nodes-base.httpRequest", 4.2, "HTTP Request")
            .keywords(&[
                "fetch",
                "get",
                "retrieve",
                "pull",
                "download",
                "look up",
                "lookup",
                "call",
                "request",
                "api",
                "http",
                "query",
                "scrape",
                "enrich",
            ])
            .parameters(json!({
                "method": "GET",
                "url": "https://api.example.com",
                "options": {}
            }))
            .slots(&[ParamSlot::Url("url"), ParamSlot::Method("method")]),
        NodeTypeDescriptor::action(FALLBACK_TYPE_ID, 3.4, "Edit Fields")
            .keywords(&["set", "assign", "rename", "map fields"])
            .parameters(json!({
                "mode": "manual",
                "assignments": { "assignments": [] },
                "options": {}
            })),
    ]
}
