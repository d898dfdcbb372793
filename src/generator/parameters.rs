use crate::catalog::{NodeTypeDescriptor, ParamSlot};
use crate::error::GenerationError;
use crate::text::{contains_keyword, path_slug};
use regex::{Captures, Regex};
use serde_json::{Map, Value, json};
use tracing::trace;

/// Words that never name a Slack channel in "the X channel".
const NOT_A_CHANNEL: &[&str] = &[
    "a", "the", "this", "that", "our", "my", "your", "same", "slack", "teams", "discord",
];

const SENDING_VERBS: &[&str] = &["post", "send", "submit", "push", "create", "upload"];

const WEEKDAYS: &[&str] = &[
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// Best-effort extraction of literal parameter values from clause text.
///
/// Every pattern is optional: when nothing is found the descriptor default
/// stays in place.
#[derive(Debug, Clone)]
pub struct ParameterExtractor {
    quoted: Regex,
    channel_tag: Regex,
    channel_named: Regex,
    email: Regex,
    url: Regex,
    path: Regex,
    clock_12h: Regex,
    clock_24h: Regex,
    interval: Regex,
    duration: Regex,
}

impl ParameterExtractor {
    pub fn new() -> Result<Self, GenerationError> {
        Ok(Self {
            quoted: Regex::new(r#""([^"]+)"|“([^”]+)”|(?:^|\s)'([^']+)'"#)?,
            channel_tag: Regex::new(r"(?:^|\s)#([A-Za-z0-9][A-Za-z0-9_-]*)")?,
            channel_named: Regex::new(r"(?i)\b#?([a-z0-9][a-z0-9_-]*)\s+channel\b")?,
            email: Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")?,
            url: Regex::new(r#"https?://[^\s"'<>]+"#)?,
            path: Regex::new(r"(?:^|\s)(/[A-Za-z0-9_/-]+)")?,
            clock_12h: Regex::new(r"(?i)\b(\d{1,2})(?::([0-5]\d))?\s*(am|pm)\b")?,
            clock_24h: Regex::new(r"\b([01]?\d|2[0-3]):([0-5]\d)\b")?,
            interval: Regex::new(r"(?i)\bevery\s+(\d+)\s*(minute|hour|day|week)s?\b")?,
            duration: Regex::new(r"(?i)\b(\d+)\s*(second|minute|hour|day)s?\b")?,
        })
    }

    /// Returns the descriptor's default parameters with every slot the
    /// clause provides a literal for filled in.
    pub fn apply(&self, descriptor: &NodeTypeDescriptor, clause: &str) -> Map<String, Value> {
        let mut parameters = descriptor.default_parameters.clone();
        let lowered = clause.to_lowercase();

        for slot in descriptor.slots {
            match *slot {
                ParamSlot::Schedule => {
                    set_path(&mut parameters, "rule", self.schedule_rule(clause, &lowered));
                }
                ParamSlot::Wait => {
                    if let Some((amount, unit)) = self.duration(clause) {
                        set_path(&mut parameters, "amount", json!(amount));
                        set_path(&mut parameters, "unit", json!(unit));
                    }
                }
                ParamSlot::Operation(key, table) => {
                    if let Some((_, operation)) =
                        table.iter().find(|(verb, _)| contains_keyword(&lowered, verb))
                    {
                        set_path(&mut parameters, key, json!(operation));
                    }
                }
                ParamSlot::Method(key) => {
                    let sends = SENDING_VERBS.iter().any(|verb| contains_keyword(&lowered, verb));
                    if sends && self.url(clause).is_some() {
                        set_path(&mut parameters, key, json!("POST"));
                    }
                }
                ParamSlot::Channel(key) => {
                    if let Some(channel) = self.channel(clause) {
                        set_path(&mut parameters, key, json!(channel));
                    }
                }
                ParamSlot::Recipient(key) => {
                    if let Some(address) = self.email.find(clause) {
                        set_path(&mut parameters, key, json!(address.as_str()));
                    }
                }
                ParamSlot::Url(key) => {
                    if let Some(url) = self.url(clause) {
                        set_path(&mut parameters, key, json!(url));
                    }
                }
                ParamSlot::Text(key) | ParamSlot::Subject(key) => {
                    if let Some(text) = self.quoted(clause) {
                        set_path(&mut parameters, key, json!(text));
                    }
                }
                ParamSlot::WebhookPath(key) => {
                    let path = self
                        .quoted(clause)
                        .map(path_slug)
                        .or_else(|| {
                            self.path
                                .captures(clause)
                                .and_then(|c| c.get(1))
                                .map(|m| path_slug(m.as_str()))
                        })
                        .filter(|slug| !slug.is_empty());
                    if let Some(path) = path {
                        set_path(&mut parameters, key, json!(path));
                    }
                }
            }
        }

        trace!(node = descriptor.label, ?parameters, "assigned parameters");
        parameters
    }

    /// The first quoted literal, accepting straight, curly and single quotes.
    pub fn quoted<'t>(&self, clause: &'t str) -> Option<&'t str> {
        self.quoted
            .captures(clause)
            .and_then(|c| first_group(&c))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn url<'t>(&self, clause: &'t str) -> Option<&'t str> {
        self.url
            .find(clause)
            .map(|m| m.as_str().trim_end_matches(['.', ',', ';', ':', ')', '!', '?']))
    }

    /// A Slack-style channel name with a leading `#`.
    pub fn channel(&self, clause: &str) -> Option<String> {
        if let Some(tag) = self.channel_tag.captures(clause).and_then(|c| c.get(1)) {
            return Some(format!("#{}", tag.as_str()));
        }
        if let Some(quoted) = self.quoted(clause).filter(|q| q.starts_with('#')) {
            return Some(quoted.to_string());
        }
        self.channel_named
            .captures_iter(clause)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().to_lowercase())
            .find(|name| !NOT_A_CHANNEL.contains(&name.as_str()))
            .map(|name| format!("#{}", name))
    }

    /// Hour and minute of an explicit time of day such as `9am` or `14:30`.
    pub fn time_of_day(&self, clause: &str) -> Option<(u32, u32)> {
        if let Some(c) = self.clock_12h.captures(clause) {
            let hour: u32 = c.get(1)?.as_str().parse().ok()?;
            let minute: u32 = c.get(2).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
            if !(1..=12).contains(&hour) {
                return None;
            }
            let pm = c.get(3)?.as_str().eq_ignore_ascii_case("pm");
            let hour = match (hour, pm) {
                (12, false) => 0,
                (12, true) => 12,
                (h, true) => h + 12,
                (h, false) => h,
            };
            return Some((hour, minute));
        }
        let c = self.clock_24h.captures(clause)?;
        Some((c.get(1)?.as_str().parse().ok()?, c.get(2)?.as_str().parse().ok()?))
    }

    fn duration(&self, clause: &str) -> Option<(u64, &'static str)> {
        let c = self.duration.captures(clause)?;
        let amount = c.get(1)?.as_str().parse().ok()?;
        let unit = match c.get(2)?.as_str().to_lowercase().as_str() {
            "second" => "seconds",
            "minute" => "minutes",
            "hour" => "hours",
            _ => "days",
        };
        Some((amount, unit))
    }

    /// Builds an n8n schedule rule (`{"interval": [...]}`) from the clause.
    fn schedule_rule(&self, clause: &str, lowered: &str) -> Value {
        let mut entry = Map::new();
        let has = |word: &str| contains_keyword(lowered, word);

        let explicit = self.interval.captures(clause).and_then(|c| {
            let amount: u64 = c.get(1)?.as_str().parse().ok()?;
            Some((amount, c.get(2)?.as_str().to_lowercase()))
        });
        let weekday = WEEKDAYS
            .iter()
            .position(|day| has(day) || has(&format!("{}s", day)));

        let field = if let Some((amount, unit)) = explicit {
            let (field, key) = match unit.as_str() {
                "minute" => ("minutes", "minutesInterval"),
                "hour" => ("hours", "hoursInterval"),
                "day" => ("days", "daysInterval"),
                _ => ("weeks", "weeksInterval"),
            };
            entry.insert(key.to_string(), json!(amount));
            field
        } else if has("every minute") {
            "minutes"
        } else if has("hourly") || has("every hour") {
            "hours"
        } else if weekday.is_some() || has("weekly") || has("every week") || has("once a week") {
            "weeks"
        } else if has("monthly") || has("every month") {
            "months"
        } else {
            "days"
        };

        entry.insert("field".to_string(), json!(field));
        if field == "weeks" {
            entry.insert("triggerAtDay".to_string(), json!([weekday.unwrap_or(1)]));
        }
        if field == "months" {
            entry.insert("triggerAtDayOfMonth".to_string(), json!(1));
        }
        if matches!(field, "days" | "weeks" | "months") {
            let (hour, minute) = self.time_of_day(clause).unwrap_or_else(|| {
                if has("evening") {
                    (18, 0)
                } else if has("night") || has("tonight") {
                    (21, 0)
                } else if has("noon") || has("midday") {
                    (12, 0)
                } else {
                    (9, 0)
                }
            });
            entry.insert("triggerAtHour".to_string(), json!(hour));
            if minute > 0 {
                entry.insert("triggerAtMinute".to_string(), json!(minute));
            }
        }

        // Keep "field" first for readability of the exported JSON.
        let mut ordered = Map::new();
        if let Some(field) = entry.remove("field") {
            ordered.insert("field".to_string(), field);
        }
        ordered.extend(entry);
        json!({ "interval": [Value::Object(ordered)] })
    }
}

fn first_group<'t>(captures: &Captures<'t>) -> Option<&'t str> {
    captures
        .iter()
        .skip(1)
        .flatten()
        .next()
        .map(|m| m.as_str())
}

/// Writes `value` at a dotted path, creating intermediate objects as needed.
fn set_path(parameters: &mut Map<String, Value>, path: &str, value: Value) {
    let mut segments = path.split('.').peekable();
    let mut current = parameters;
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            current.insert(segment.to_string(), value);
            return;
        }
        let child = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !child.is_object() {
            *child = Value::Object(Map::new());
        }
        match child {
            Value::Object(map) => current = map,
            _ => return,
        }
    }
}
