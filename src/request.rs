use crate::error::{GenerationError, RequestConversionError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Everything the engine needs to generate one workflow.
///
/// Field names follow the form that collects them, so a JSON payload such as
/// `{"workflowName": "...", "prompt": "...", "timezone": "UTC", "includeNotes": true}`
/// deserializes directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub workflow_name: String,
    pub prompt: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_include_notes")]
    pub include_notes: bool,
}

fn default_timezone() -> String {
    Timezone::Utc.as_str().to_string()
}

fn default_include_notes() -> bool {
    true
}

impl GenerationRequest {
    pub fn new(workflow_name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            workflow_name: workflow_name.into(),
            prompt: prompt.into(),
            timezone: default_timezone(),
            include_notes: default_include_notes(),
        }
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    pub fn with_notes(mut self, include_notes: bool) -> Self {
        self.include_notes = include_notes;
        self
    }
}

/// The closed set of timezones a generated workflow may be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timezone {
    Utc,
    AmericaNewYork,
    AmericaLosAngeles,
    EuropeLondon,
    EuropeBerlin,
    AsiaSingapore,
    AustraliaSydney,
}

impl Timezone {
    pub const ALL: [Timezone; 7] = [
        Timezone::Utc,
        Timezone::AmericaNewYork,
        Timezone::AmericaLosAngeles,
        Timezone::EuropeLondon,
        Timezone::EuropeBerlin,
        Timezone::AsiaSingapore,
        Timezone::AustraliaSydney,
    ];

    /// The IANA identifier written into the workflow settings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Timezone::Utc => "UTC",
            Timezone::AmericaNewYork => "America/New_York",
            Timezone::AmericaLosAngeles => "America/Los_Angeles",
            Timezone::EuropeLondon => "Europe/London",
            Timezone::EuropeBerlin => "Europe/Berlin",
            Timezone::AsiaSingapore => "Asia/Singapore",
            Timezone::AustraliaSydney => "Australia/Sydney",
        }
    }
}

impl FromStr for Timezone {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timezone::ALL
            .iter()
            .copied()
            .find(|zone| zone.as_str() == s.trim())
            .ok_or_else(|| GenerationError::InvalidTimezone(s.to_string()))
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Timezone {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A trait for front-end form models that can be converted into a `GenerationRequest`.
///
/// Implement it on whatever struct your UI or transport layer deserializes, so the
/// engine never has to know about that format.
///
/// # Example
///
/// ```rust,no_run
/// use flowsmith::error::RequestConversionError;
/// use flowsmith::request::{GenerationRequest, IntoRequest};
///
/// struct ChatCommand { title: Option<String>, text: String }
///
/// impl IntoRequest for ChatCommand {
///     fn into_request(self) -> Result<GenerationRequest, RequestConversionError> {
///         let title = self.title.ok_or(RequestConversionError::MissingField("title"))?;
///         Ok(GenerationRequest::new(title, self.text))
///     }
/// }
/// ```
pub trait IntoRequest {
    /// Consumes the object and converts it into an engine request.
    fn into_request(self) -> Result<GenerationRequest, RequestConversionError>;
}

impl IntoRequest for GenerationRequest {
    fn into_request(self) -> Result<GenerationRequest, RequestConversionError> {
        Ok(self)
    }
}
