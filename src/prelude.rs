//! Prelude module for convenient imports
//!
//! Re-exports the request, generator and document types most callers need.
//!
//! ```rust,no_run
//! use flowsmith::prelude::*;
//!
//! # fn run() -> Result<(), GenerationError> {
//! let request = GenerationRequest::new("Daily Digest", "Every morning, fetch the news and email it to me");
//! let workflow = generate_workflow(&request)?;
//! let document = workflow.parse_document()?;
//! println!("{} nodes", document.nodes.len());
//! # Ok(())
//! # }
//! ```

// Requests and generation
pub use crate::generator::builder::LayoutConfig;
pub use crate::generator::{Generator, GeneratorBuilder, generate_workflow};
pub use crate::request::{GenerationRequest, IntoRequest, Timezone};

// Output
pub use crate::document::{GeneratedWorkflow, NodeSummary, WorkflowDocument};

// Catalog and graph
pub use crate::catalog::{NodeCatalog, NodeTypeDescriptor, TriggerKind};
pub use crate::graph::{NodeId, Position, WorkflowGraph, WorkflowNode};

// Error types
pub use crate::error::{GenerationError, GraphError, RequestConversionError};
