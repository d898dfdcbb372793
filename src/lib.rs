//! # Flowsmith - Natural-Language Workflow Generator
//!
//! **Flowsmith** turns a plain-English description of an automation into an
//! importable [n8n](https://n8n.io) workflow document. The engine is entirely
//! rule-based: no network access, no model calls, and the same request always
//! produces byte-identical output.
//!
//! ## Pipeline
//!
//! 1.  **Segment**: the prompt is split into ordered clauses. The first clause
//!     says how the workflow starts; a manual trigger is assumed when it does not.
//! 2.  **Classify**: each clause is matched against the static node catalog.
//!     Rules are evaluated in order and the first keyword hit wins.
//! 3.  **Build**: resolved intents become nodes in an arena graph, wired as a
//!     chain with optional side-by-side delivery branches, laid out on a grid.
//! 4.  **Serialize**: the graph is rendered as n8n workflow JSON.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowsmith::prelude::*;
//!
//! fn main() -> Result<(), GenerationError> {
//!     let request = GenerationRequest::new(
//!         "Support Escalation",
//!         "When a new support ticket is created, fetch the customer's details, \
//!          create a page in Notion, and post a summary to Slack.",
//!     )
//!     .with_timezone("Europe/Berlin");
//!
//!     let generator = Generator::builder().build()?;
//!     let workflow = generator.generate(&request)?;
//!
//!     for node in &workflow.node_summaries {
//!         println!("{:<16} {}", node.name, node.summary);
//!     }
//!     std::fs::write(workflow.file_name(), &workflow.document).ok();
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod document;
pub mod error;
pub mod generator;
pub mod graph;
pub mod prelude;
pub mod request;
pub mod text;

pub use generator::generate_workflow;
