use crate::catalog::TriggerKind;
use crate::generator::classifier::{IntentKind, ResolvedIntent};
use crate::text::capitalize;
use serde::{Deserialize, Serialize};

/// A compact description of one generated node, for list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub type_id: String,
    pub summary: String,
}

/// Formats resolved intents into one-line, human-readable summaries.
pub struct SummaryFormatter;

impl SummaryFormatter {
    pub fn describe(intent: &ResolvedIntent<'_>) -> String {
        let text = capitalize(intent.clause.text.trim());
        match intent.kind {
            IntentKind::Trigger(_) if intent.clause.synthetic => {
                "Starts when you execute the workflow manually".to_string()
            }
            IntentKind::Trigger(kind) => format!("{}: {}", Self::trigger_heading(kind), text),
            IntentKind::Action => match intent.extracted_label {
                Some(keyword) => format!("{} (matched \"{}\")", text, keyword),
                None => format!("{} (no matching integration, passes data through)", text),
            },
        }
    }

    fn trigger_heading(kind: TriggerKind) -> &'static str {
        match kind {
            TriggerKind::Webhook => "Starts on an incoming webhook",
            TriggerKind::Schedule => "Starts on a schedule",
            TriggerKind::Manual => "Starts manually",
            TriggerKind::Event => "Starts on an event",
        }
    }
}
