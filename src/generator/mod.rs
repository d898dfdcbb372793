//! The generation pipeline: segment, classify, build, serialize.

pub mod builder;
pub mod classifier;
pub mod parameters;
pub mod segmenter;

use crate::catalog::NodeCatalog;
use crate::document::{self, DocumentMeta, GeneratedWorkflow, NodeSummary};
use crate::error::GenerationError;
use crate::graph::WorkflowGraph;
use crate::graph::visualizer::visualize_graph;
use crate::request::{GenerationRequest, IntoRequest, Timezone};
use builder::{GraphBuilder, LayoutConfig};
use classifier::IntentClassifier;
use parameters::ParameterExtractor;
use segmenter::{ClauseSegmenter, DEFAULT_MIN_PROMPT_LENGTH};
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

static DEFAULT_GENERATOR: LazyLock<Result<Generator, GenerationError>> = LazyLock::new(Generator::new);

/// Turns natural-language requests into n8n workflow documents.
///
/// A `Generator` holds no per-request state, so one instance can serve any
/// number of requests, including from several threads.
#[derive(Debug, Clone)]
pub struct Generator {
    catalog: &'static NodeCatalog,
    segmenter: ClauseSegmenter,
    extractor: ParameterExtractor,
    layout: LayoutConfig,
    branching: bool,
}

pub struct GeneratorBuilder {
    min_prompt_length: usize,
    layout: LayoutConfig,
    branching: bool,
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorBuilder {
    pub fn new() -> Self {
        Self {
            min_prompt_length: DEFAULT_MIN_PROMPT_LENGTH,
            layout: LayoutConfig::default(),
            branching: true,
        }
    }

    pub fn with_min_prompt_length(mut self, min_prompt_length: usize) -> Self {
        self.min_prompt_length = min_prompt_length;
        self
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Enables or disables side-by-side delivery branches. When disabled,
    /// every workflow is a single linear chain.
    pub fn with_branching(mut self, branching: bool) -> Self {
        self.branching = branching;
        self
    }

    pub fn build(self) -> Result<Generator, GenerationError> {
        Ok(Generator {
            catalog: NodeCatalog::global(),
            segmenter: ClauseSegmenter::new(self.min_prompt_length),
            extractor: ParameterExtractor::new()?,
            layout: self.layout,
            branching: self.branching,
        })
    }
}

impl Generator {
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }

    /// A generator with the default settings.
    pub fn new() -> Result<Self, GenerationError> {
        Self::builder().build()
    }

    pub fn catalog(&self) -> &'static NodeCatalog {
        self.catalog
    }

    /// Generates a workflow document from any request-like input.
    pub fn generate_from<R: IntoRequest>(&self, input: R) -> Result<GeneratedWorkflow, GenerationError> {
        let request = input.into_request()?;
        self.generate(&request)
    }

    /// Runs the full pipeline for one request.
    ///
    /// Validation happens before any processing, in this order: workflow
    /// name, prompt length, timezone.
    pub fn generate(&self, request: &GenerationRequest) -> Result<GeneratedWorkflow, GenerationError> {
        let (graph, timezone) = self.build_graph(request)?;
        let workflow_name = request.workflow_name.trim().to_string();

        let meta = DocumentMeta::new(workflow_name.clone(), timezone.as_str());
        let document = document::serialize(&graph, &meta)?;
        let node_summaries = graph
            .nodes()
            .iter()
            .map(|node| NodeSummary {
                name: node.name.clone(),
                type_id: node.type_id.clone(),
                summary: node.summary.clone(),
            })
            .collect();

        info!(
            workflow = %workflow_name,
            nodes = graph.len(),
            connections = graph.connections().len(),
            "generated workflow"
        );
        Ok(GeneratedWorkflow {
            workflow_name,
            document,
            node_summaries,
        })
    }

    /// Runs the pipeline up to the graph and renders it as a text outline.
    pub fn explain(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let (graph, _) = self.build_graph(request)?;
        Ok(visualize_graph(&graph, request.workflow_name.trim()))
    }

    /// Validates the request and builds its graph.
    pub fn build_graph(
        &self,
        request: &GenerationRequest,
    ) -> Result<(WorkflowGraph, Timezone), GenerationError> {
        if request.workflow_name.trim().is_empty() {
            return Err(GenerationError::InvalidName);
        }
        self.segmenter.check_length(&request.prompt)?;
        let timezone = Timezone::from_str(&request.timezone)?;

        let clauses = self.segmenter.segment(&request.prompt)?;
        let intents = IntentClassifier::new(self.catalog).classify_all(&clauses)?;
        debug!(intents = intents.len(), "classified clauses");

        let graph = GraphBuilder::new(&self.extractor, self.layout)
            .with_notes(request.include_notes)
            .with_branching(self.branching)
            .build(&intents)?;
        graph.validate()?;
        Ok((graph, timezone))
    }
}

/// Generates a workflow with the shared default `Generator`, built on first use.
pub fn generate_workflow(request: &GenerationRequest) -> Result<GeneratedWorkflow, GenerationError> {
    match DEFAULT_GENERATOR.as_ref() {
        Ok(generator) => generator.generate(request),
        Err(error) => {
            warn!(%error, "default generator unavailable, building a fresh one");
            Generator::new()?.generate(request)
        }
    }
}
