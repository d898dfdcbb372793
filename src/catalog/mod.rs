//! The fixed table of node types the generator knows how to emit.

pub mod descriptor;
mod standard;

pub use descriptor::*;

use std::sync::LazyLock;

static STANDARD: LazyLock<NodeCatalog> = LazyLock::new(NodeCatalog::standard);

/// An ordered, read-only collection of node descriptors.
///
/// Order is significant: the classifier walks entries top to bottom and the
/// first keyword hit wins.
#[derive(Debug, Clone)]
pub struct NodeCatalog {
    entries: Vec<NodeTypeDescriptor>,
    fallback: usize,
}

impl NodeCatalog {
    /// The process-wide standard catalog, built on first use.
    pub fn global() -> &'static NodeCatalog {
        &STANDARD
    }

    /// Builds the standard catalog: triggers first, then actions, with the
    /// "Edit Fields" node last so it doubles as the action fallback.
    pub fn standard() -> Self {
        let mut entries = standard::trigger_entries();
        entries.extend(standard::action_entries());
        let fallback = entries
            .iter()
            .rposition(|d| d.type_id == standard::FALLBACK_TYPE_ID)
            .unwrap_or(entries.len() - 1);
        Self { entries, fallback }
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeTypeDescriptor> {
        self.entries.iter()
    }

    pub fn triggers(&self) -> impl Iterator<Item = &NodeTypeDescriptor> {
        self.entries.iter().filter(|d| d.is_trigger())
    }

    pub fn actions(&self) -> impl Iterator<Item = &NodeTypeDescriptor> {
        self.entries.iter().filter(|d| !d.is_trigger())
    }

    /// The no-op node used when an action clause matches nothing.
    pub fn fallback(&self) -> &NodeTypeDescriptor {
        &self.entries[self.fallback]
    }

    /// Finds a descriptor by its human label.
    pub fn by_label(&self, label: &str) -> Option<&NodeTypeDescriptor> {
        self.entries.iter().find(|d| d.label == label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
