use crate::graph::NodeId;
use thiserror::Error;

/// Errors that can occur while turning a request into a workflow document.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Workflow name must not be empty")]
    InvalidName,

    #[error(
        "Describe the workflow in at least {min_length} characters (received {actual})"
    )]
    EmptyPrompt { min_length: usize, actual: usize },

    #[error("Timezone '{0}' is not supported")]
    InvalidTimezone(String),

    #[error("{}", unresolved_trigger_message(.clause))]
    UnresolvedTrigger { clause: Option<String> },

    #[error("Invalid request: {0}")]
    Request(#[from] RequestConversionError),

    #[error("Failed to compile parameter pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Failed to encode workflow document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Workflow graph is inconsistent: {0}")]
    Graph(#[from] GraphError),
}

/// Structural violations detected while wiring or checking a `WorkflowGraph`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Workflow graph has no nodes")]
    Empty,

    #[error("Connection references node {0}, which does not exist")]
    UnknownNode(NodeId),

    #[error("Node '{0}' cannot connect to itself")]
    SelfLoop(String),

    #[error("Connection from '{from}' to '{to}' points backwards in execution order")]
    BackwardEdge { from: String, to: String },

    #[error("Node name '{0}' is used more than once")]
    DuplicateName(String),

    #[error("Expected the trigger to be the only node without inputs, found {roots:?}")]
    RootMismatch { roots: Vec<String> },
}

impl GenerationError {
    /// Returns `true` for failures caused by the request itself, as opposed to
    /// internal encoder or pattern errors.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GenerationError::InvalidName
                | GenerationError::EmptyPrompt { .. }
                | GenerationError::InvalidTimezone(_)
                | GenerationError::UnresolvedTrigger { .. }
                | GenerationError::Request(_)
        )
    }
}

fn unresolved_trigger_message(clause: &Option<String>) -> String {
    match clause {
        Some(text) => format!("Could not determine how the workflow starts from '{}'", text),
        None => "Could not find any trigger or action in the description".to_string(),
    }
}

/// Errors that can occur when converting a front end's own form model into a
/// `GenerationRequest`.
#[derive(Error, Debug, Clone)]
pub enum RequestConversionError {
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Invalid value for '{field}': {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
}
