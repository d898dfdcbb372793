use super::classifier::{IntentKind, ResolvedIntent};
use super::parameters::ParameterExtractor;
use super::segmenter::ClauseLink;
use crate::document::SummaryFormatter;
use crate::error::GenerationError;
use crate::graph::{NodeId, Position, WorkflowGraph, WorkflowNode};
use crate::text::capitalize;
use ahash::AHashSet;
use tracing::debug;

/// Canvas placement of generated nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Where the trigger is placed.
    pub origin: Position,
    /// Horizontal distance between consecutive steps of the chain.
    pub column_step: i32,
    /// Vertical distance between sibling branches in one column.
    pub row_step: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin: Position::new(250, 300),
            column_step: 220,
            row_step: 160,
        }
    }
}

/// Hands out node names, suffixing " 2", " 3", ... on collision.
#[derive(Debug, Default)]
struct NameAllocator {
    taken: AHashSet<String>,
}

impl NameAllocator {
    fn allocate(&mut self, label: &str) -> String {
        let mut candidate = label.to_string();
        let mut ordinal = 2;
        while self.taken.contains(&candidate) {
            candidate = format!("{} {}", label, ordinal);
            ordinal += 1;
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}

/// Responsible for turning resolved intents into a wired, laid-out `WorkflowGraph`.
pub struct GraphBuilder<'a> {
    extractor: &'a ParameterExtractor,
    layout: LayoutConfig,
    include_notes: bool,
    branching: bool,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(extractor: &'a ParameterExtractor, layout: LayoutConfig) -> Self {
        Self {
            extractor,
            layout,
            include_notes: false,
            branching: true,
        }
    }

    pub fn with_notes(mut self, include_notes: bool) -> Self {
        self.include_notes = include_notes;
        self
    }

    pub fn with_branching(mut self, branching: bool) -> Self {
        self.branching = branching;
        self
    }

    /// Builds the graph in clause order.
    ///
    /// The first intent becomes the trigger. Each following node connects
    /// from the previous one, except fan-out siblings, which connect from the
    /// previous node's own predecessor and stack below it in the same column.
    pub fn build(&self, intents: &[ResolvedIntent<'_>]) -> Result<WorkflowGraph, GenerationError> {
        let mut graph = WorkflowGraph::new();
        let mut names = NameAllocator::default();

        let mut previous: Option<(NodeId, &ResolvedIntent<'_>)> = None;
        // The node the current column hangs off; siblings share it.
        let mut anchor: Option<NodeId> = None;
        let mut column = 0;
        let mut row = 0;

        for intent in intents {
            let sibling = self.branching
                && anchor.is_some()
                && previous.is_some_and(|(_, prev)| Self::is_sibling(prev, intent));

            if previous.is_some() {
                if sibling {
                    row += 1;
                } else {
                    column += 1;
                    row = 0;
                }
            }

            let node = WorkflowNode {
                name: names.allocate(intent.descriptor.label),
                type_id: intent.descriptor.type_id.to_string(),
                type_version: intent.descriptor.type_version,
                position: Position::new(
                    self.layout.origin.x + column * self.layout.column_step,
                    self.layout.origin.y + row * self.layout.row_step,
                ),
                parameters: self.extractor.apply(intent.descriptor, &intent.clause.text),
                notes: self
                    .include_notes
                    .then(|| capitalize(intent.clause.text.trim())),
                summary: SummaryFormatter::describe(intent),
            };
            let id = graph.add_node(node);

            let source = if sibling {
                anchor
            } else {
                let prev_id = previous.map(|(prev_id, _)| prev_id);
                anchor = prev_id;
                prev_id
            };
            if let Some(source) = source {
                graph.connect(source, id)?;
            }

            previous = Some((id, intent));
        }

        debug!(
            nodes = graph.len(),
            connections = graph.connections().len(),
            "built workflow graph"
        );
        Ok(graph)
    }

    /// Two delivery actions joined by a bare "and" run side by side.
    fn is_sibling(previous: &ResolvedIntent<'_>, current: &ResolvedIntent<'_>) -> bool {
        current.clause.link == ClauseLink::Parallel
            && previous.kind == IntentKind::Action
            && current.kind == IntentKind::Action
            && previous.descriptor.fan_out
            && current.descriptor.fan_out
    }
}
