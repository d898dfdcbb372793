use serde_json::{Map, Value};
use std::fmt;

/// How a trigger node starts a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    Webhook,
    Schedule,
    Manual,
    Event,
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerKind::Webhook => write!(f, "webhook"),
            TriggerKind::Schedule => write!(f, "schedule"),
            TriggerKind::Manual => write!(f, "manual"),
            TriggerKind::Event => write!(f, "event"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Trigger(TriggerKind),
    Action,
}

/// A parameter a node exposes to literal extraction from the clause text.
///
/// Keys are dotted paths into the node's parameter object, so
/// `"channelId.value"` addresses `{"channelId": {"value": ...}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSlot {
    /// `#channel`, a quoted name, or "the X channel".
    Channel(&'static str),
    /// The first e-mail address in the clause.
    Recipient(&'static str),
    /// The first `http(s)://` URL in the clause.
    Url(&'static str),
    /// HTTP verb, switched to `POST` when the clause sends data to a URL.
    Method(&'static str),
    /// The first quoted literal, used as message body or title.
    Text(&'static str),
    /// The first quoted literal, used as an e-mail subject.
    Subject(&'static str),
    /// Resource operation chosen by the first listed verb found in the clause.
    Operation(&'static str, &'static [(&'static str, &'static str)]),
    /// Interval and time of day for schedule triggers.
    Schedule,
    /// Amount and unit for wait nodes.
    Wait,
    /// Slugified webhook path from a quoted literal or a `/path` token.
    WebhookPath(&'static str),
}

/// A static description of one node type the generator can emit.
#[derive(Debug, Clone)]
pub struct NodeTypeDescriptor {
    pub type_id: &'static str,
    pub type_version: f64,
    pub label: &'static str,
    pub category: Category,
    pub default_parameters: Map<String, Value>,
    pub match_keywords: &'static [&'static str],
    pub slots: &'static [ParamSlot],
    /// Delivery nodes that may be fanned out as siblings of one another.
    pub fan_out: bool,
}

impl NodeTypeDescriptor {
    pub fn trigger(
        kind: TriggerKind,
        type_id: &'static str,
        type_version: f64,
        label: &'static str,
    ) -> Self {
        Self::new(Category::Trigger(kind), type_id, type_version, label)
    }

    pub fn action(type_id: &'static str, type_version: f64, label: &'static str) -> Self {
        Self::new(Category::Action, type_id, type_version, label)
    }

    fn new(
        category: Category,
        type_id: &'static str,
        type_version: f64,
        label: &'static str,
    ) -> Self {
        Self {
            type_id,
            type_version,
            label,
            category,
            default_parameters: Map::new(),
            match_keywords: &[],
            slots: &[],
            fan_out: false,
        }
    }

    pub fn keywords(mut self, keywords: &'static [&'static str]) -> Self {
        self.match_keywords = keywords;
        self
    }

    /// Sets the default parameters. Anything other than a JSON object is ignored.
    pub fn parameters(mut self, parameters: Value) -> Self {
        if let Value::Object(map) = parameters {
            self.default_parameters = map;
        }
        self
    }

    pub fn slots(mut self, slots: &'static [ParamSlot]) -> Self {
        self.slots = slots;
        self
    }

    pub fn fan_out(mut self) -> Self {
        self.fan_out = true;
        self
    }

    pub fn is_trigger(&self) -> bool {
        matches!(self.category, Category::Trigger(_))
    }

    pub fn trigger_kind(&self) -> Option<TriggerKind> {
        match self.category {
            Category::Trigger(kind) => Some(kind),
            Category::Action => None,
        }
    }
}
