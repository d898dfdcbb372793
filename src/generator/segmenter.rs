use crate::error::GenerationError;
use crate::text::{contains_keyword, normalize_whitespace};
use tracing::debug;

/// Minimum number of characters a trimmed prompt must contain.
pub const DEFAULT_MIN_PROMPT_LENGTH: usize = 10;

/// Text of the clause prepended when the prompt does not say how it starts.
pub const SYNTHETIC_TRIGGER_TEXT: &str = "Manually trigger the workflow";

/// Words that mark the first clause as describing how the workflow starts.
const TRIGGER_CUES: &[&str] = &[
    "when",
    "whenever",
    "every",
    "each",
    "on a schedule",
    "daily",
    "hourly",
    "weekly",
    "monthly",
    "manually",
    "on demand",
    "if",
    "once",
    "as soon as",
];

/// Cues after which a comma-less first clause may carry an action as well,
/// as in "Every Monday at 9am fetch the report".
const SCHEDULE_CUES: &[&str] = &[
    "every",
    "each",
    "daily",
    "hourly",
    "weekly",
    "monthly",
    "on a schedule",
];

/// Cues that open a trigger phrase in the middle of an action clause, as in
/// "Post a message to Slack when a new issue is created".
const TRAILING_TRIGGER_OPENERS: &[&str] =
    &["when", "whenever", "as soon as", "once", "every", "each"];

/// Cues that qualify an action clause without opening a phrase of their own,
/// as in "Send the report to Slack daily".
const TRAILING_TRIGGER_ADVERBS: &[&str] = &[
    "daily",
    "hourly",
    "weekly",
    "monthly",
    "manually",
    "on demand",
    "on a schedule",
];

/// Words that may follow "every" or "each" in a schedule phrase.
const SCHEDULE_UNITS: &[&str] = &[
    "minute", "minutes", "hour", "hours", "day", "days", "week", "weeks", "month", "months",
    "morning", "afternoon", "evening", "night", "weekday", "weekend", "sunday", "monday",
    "tuesday", "wednesday", "thursday", "friday", "saturday",
];

/// Private-use characters delimiting a masked quoted literal.
const MASK_OPEN: char = '\u{E000}';
const MASK_CLOSE: char = '\u{E001}';

/// Longest first, so "and then" is stripped before "and".
const LEADING_CONNECTIVES: &[&str] = &["and then", "after that", "then", "and", "also", "finally", "next"];

/// Verbs that may open an action clause. A bare "and" only separates two
/// clauses when the words after it start with one of these.
pub const ACTION_VERBS: &[&str] = &[
    "add", "alert", "append", "archive", "assign", "call", "check", "classify", "copy", "create",
    "delay", "delete", "download", "email", "enrich", "fetch", "forward", "format", "generate",
    "get", "insert", "invite", "log", "look", "mark", "message", "move", "notify", "parse",
    "pause", "ping", "post", "publish", "pull", "push", "query", "read", "record", "remove",
    "reply", "retrieve", "run", "save", "scrape", "send", "set", "share", "store", "summarise",
    "summarize", "sync", "tag", "tell", "transform", "translate", "tweet", "update", "upload",
    "wait", "write",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseRole {
    Trigger,
    Action,
}

/// How a clause relates to the clause before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseLink {
    /// Runs after the previous clause.
    Sequential,
    /// Joined to the previous clause by a bare "and" inside one fragment, so
    /// it may run alongside it.
    Parallel,
}

/// One natural-language step of the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub text: String,
    pub order: usize,
    pub role: ClauseRole,
    pub link: ClauseLink,
    /// `true` for the default manual trigger the segmenter inserts itself.
    pub synthetic: bool,
}

/// Splits a prompt into ordered trigger and action clauses.
#[derive(Debug, Clone)]
pub struct ClauseSegmenter {
    min_prompt_length: usize,
}

impl Default for ClauseSegmenter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PROMPT_LENGTH)
    }
}

impl ClauseSegmenter {
    pub fn new(min_prompt_length: usize) -> Self {
        Self { min_prompt_length }
    }

    pub fn min_prompt_length(&self) -> usize {
        self.min_prompt_length
    }

    /// Fails with `EmptyPrompt` when the trimmed prompt is too short.
    pub fn check_length(&self, prompt: &str) -> Result<(), GenerationError> {
        let actual = prompt.trim().chars().count();
        if actual < self.min_prompt_length {
            return Err(GenerationError::EmptyPrompt {
                min_length: self.min_prompt_length,
                actual,
            });
        }
        Ok(())
    }

    /// Splits `prompt` into clauses, preserving left-to-right order.
    ///
    /// The first clause is the trigger clause. If the prompt does not open
    /// with a trigger cue, a synthetic manual trigger is prepended. An empty
    /// result means the prompt contained no words at all.
    pub fn segment(&self, prompt: &str) -> Result<Vec<Clause>, GenerationError> {
        self.check_length(prompt)?;
        let normalized = normalize_whitespace(prompt);
        // Quoted literals are never split.
        let (masked, literals) = mask_quotes(&normalized);

        let mut pieces: Vec<(String, ClauseLink)> = Vec::new();
        for sentence in split_sentences(&masked) {
            for fragment in sentence.split(',') {
                let fragment = strip_connectives(fragment);
                for step in split_on_then(fragment) {
                    let step = strip_connectives(&step);
                    for (i, part) in split_on_and(step).into_iter().enumerate() {
                        let text = clean(&part);
                        if text.is_empty() {
                            continue;
                        }
                        let link = if i == 0 {
                            ClauseLink::Sequential
                        } else {
                            ClauseLink::Parallel
                        };
                        pieces.push((text, link));
                    }
                }
            }
        }

        if pieces.is_empty() {
            debug!("prompt produced no clauses");
            return Ok(Vec::new());
        }

        let first = pieces[0].0.to_lowercase();
        let has_cue = TRIGGER_CUES.iter().any(|cue| contains_keyword(&first, cue));
        let mut synthetic = false;
        if opens_action(&pieces[0].0.split_whitespace().collect::<Vec<_>>()) {
            // "Post a message to Slack when a new issue is created"
            match split_trailing_trigger(&pieces[0].0) {
                Some((trigger, action)) => {
                    pieces[0].0 = action;
                    pieces.insert(0, (trigger, ClauseLink::Sequential));
                }
                None => synthetic = true,
            }
        } else if !has_cue {
            synthetic = true;
        } else if SCHEDULE_CUES.iter().any(|cue| contains_keyword(&first, cue)) {
            if let Some((trigger, action)) = split_before_first_verb(&pieces[0].0) {
                pieces[0].0 = trigger;
                pieces.insert(1, (action, ClauseLink::Sequential));
            }
        }
        if synthetic {
            pieces.insert(0, (SYNTHETIC_TRIGGER_TEXT.to_string(), ClauseLink::Sequential));
        }

        let clauses: Vec<Clause> = pieces
            .into_iter()
            .enumerate()
            .map(|(order, (text, link))| Clause {
                text: unmask_quotes(&text, &literals),
                order,
                role: if order == 0 {
                    ClauseRole::Trigger
                } else {
                    ClauseRole::Action
                },
                link,
                synthetic: synthetic && order == 0,
            })
            .collect();

        debug!(
            clauses = clauses.len(),
            synthetic_trigger = synthetic,
            quoted_literals = literals.len(),
            "segmented prompt"
        );
        Ok(clauses)
    }
}

/// Splits on `.`, `!`, `?` and `;` when followed by whitespace or the end,
/// so URLs and decimals stay intact.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?' | ';') {
            let at_boundary = chars.peek().is_none_or(|(_, next)| next.is_whitespace());
            if at_boundary {
                let end = i + c.len_utf8();
                sentences.push(&text[start..end]);
                start = end;
            }
        }
    }
    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

fn split_on_then(fragment: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for word in fragment.split_whitespace() {
        if word.eq_ignore_ascii_case("then") {
            if current.last().is_some_and(|w| w.eq_ignore_ascii_case("and")) {
                current.pop();
            }
            if !current.is_empty() {
                parts.push(current.join(" "));
            }
            current.clear();
        } else {
            current.push(word);
        }
    }
    if !current.is_empty() {
        parts.push(current.join(" "));
    }
    parts
}

fn split_on_and(step: &str) -> Vec<String> {
    let words: Vec<&str> = step.split_whitespace().collect();
    let mut parts = Vec::new();
    let mut start = 0;
    for (i, word) in words.iter().enumerate() {
        if i > start && word.eq_ignore_ascii_case("and") && opens_action(&words[i + 1..]) {
            parts.push(words[start..i].join(" "));
            start = i + 1;
        }
    }
    parts.push(words[start..].join(" "));
    parts
}

/// "Every Monday at 9am fetch the report" -> ("Every Monday at 9am", "fetch the report").
fn split_before_first_verb(text: &str) -> Option<(String, String)> {
    let words: Vec<&str> = text.split_whitespace().collect();
    (1..words.len())
        .find(|&i| opens_action(&words[i..]))
        .map(|i| (words[..i].join(" "), words[i..].join(" ")))
}

/// Splits an action-first clause into `(trigger, action)` at a later trigger cue.
///
/// An opener cue takes the rest of the clause with it ("... when a new issue
/// is created"). An adverb cue becomes the trigger on its own, together with a
/// following "at <time>", and the action keeps the full clause text.
fn split_trailing_trigger(text: &str) -> Option<(String, String)> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let opener = (1..words.len()).find(|&i| {
        starts_with_cue(&words[i..], TRAILING_TRIGGER_OPENERS)
            && (!matches!(normalize_word(words[i]).as_str(), "every" | "each")
                || words.get(i + 1).is_some_and(|w| is_schedule_unit(w)))
    });
    if let Some(i) = opener {
        return Some((words[i..].join(" "), words[..i].join(" ")));
    }

    let (i, cue) = (1..words.len()).find_map(|i| {
        TRAILING_TRIGGER_ADVERBS
            .iter()
            .find(|cue| starts_with_cue(&words[i..], &[**cue]))
            .map(|cue| (i, *cue))
    })?;
    let mut end = i + cue.split_whitespace().count();
    if words.get(end).is_some_and(|w| w.eq_ignore_ascii_case("at")) && end + 1 < words.len() {
        end += 2;
    }
    let trigger = words[i..end].join(" ");
    let action = if end == words.len() {
        words[..i].join(" ")
    } else {
        text.to_string()
    };
    Some((trigger, action))
}

fn starts_with_cue(words: &[&str], cues: &[&str]) -> bool {
    cues.iter().any(|cue| {
        let cue_words: Vec<&str> = cue.split_whitespace().collect();
        cue_words.len() <= words.len()
            && cue_words
                .iter()
                .zip(words)
                .all(|(cue_word, word)| normalize_word(word) == *cue_word)
    })
}

fn is_schedule_unit(word: &str) -> bool {
    let word = normalize_word(word);
    SCHEDULE_UNITS.contains(&word.as_str())
        || (!word.is_empty() && word.chars().all(|c| c.is_ascii_digit()))
}

fn normalize_word(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase()
}

/// Replaces each quoted literal (`"..."`, `“...”`, or `'...'` opening a word)
/// with a single-word placeholder, returning the masked text and the literals.
fn mask_quotes(text: &str) -> (String, Vec<String>) {
    let mut masked = String::with_capacity(text.len());
    let mut literals = Vec::new();
    let mut rest = text;
    while let Some((start, open)) = next_quote(rest) {
        let close = match open {
            '“' => '”',
            other => other,
        };
        let body = start + open.len_utf8();
        let Some(len) = rest[body..].find(close) else {
            break;
        };
        let end = body + len + close.len_utf8();
        masked.push_str(&rest[..start]);
        masked.push(MASK_OPEN);
        masked.push_str(&literals.len().to_string());
        masked.push(MASK_CLOSE);
        literals.push(rest[start..end].to_string());
        rest = &rest[end..];
    }
    masked.push_str(rest);
    (masked, literals)
}

fn next_quote(text: &str) -> Option<(usize, char)> {
    let mut previous: Option<char> = None;
    for (i, c) in text.char_indices() {
        let opens_word = previous.is_none_or(char::is_whitespace);
        if c == '"' || c == '“' || (c == '\'' && opens_word) {
            return Some((i, c));
        }
        previous = Some(c);
    }
    None
}

fn unmask_quotes(text: &str, literals: &[String]) -> String {
    if literals.is_empty() || !text.contains(MASK_OPEN) {
        return text.to_string();
    }
    let mut restored = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(MASK_OPEN) {
        restored.push_str(&rest[..start]);
        let body = start + MASK_OPEN.len_utf8();
        let Some(len) = rest[body..].find(MASK_CLOSE) else {
            break;
        };
        let literal = rest[body..body + len]
            .parse::<usize>()
            .ok()
            .and_then(|index| literals.get(index));
        match literal {
            Some(literal) => restored.push_str(literal),
            None => restored.push_str(&rest[start..body + len + MASK_CLOSE.len_utf8()]),
        }
        rest = &rest[body + len + MASK_CLOSE.len_utf8()..];
    }
    restored.push_str(rest);
    restored
}

fn opens_action(words: &[&str]) -> bool {
    words.len() >= 2 && is_action_verb(words[0])
}

fn is_action_verb(word: &str) -> bool {
    let word = word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
    ACTION_VERBS.contains(&word.as_str())
}

fn strip_connectives(text: &str) -> &str {
    let mut text = text.trim();
    loop {
        let current = text;
        let stripped = LEADING_CONNECTIVES.iter().find_map(move |connective| {
            let head = current.get(..connective.len())?;
            let rest = &current[connective.len()..];
            (head.eq_ignore_ascii_case(connective) && rest.starts_with(' '))
                .then(|| rest.trim_start())
        });
        match stripped {
            Some(rest) => text = rest,
            None => return text,
        }
    }
}

fn clean(text: &str) -> String {
    strip_connectives(text)
        .trim_end_matches(|c: char| matches!(c, '.' | '!' | '?' | ';' | ':' | ','))
        .trim()
        .to_string()
}
