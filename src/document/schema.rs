use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Top-level n8n workflow export, as accepted by the editor's import dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDocument {
    pub name: String,
    pub nodes: Vec<DocumentNode>,
    pub connections: ConnectionMap,
    pub active: bool,
    pub settings: WorkflowSettings,
    #[serde(default)]
    pub pin_data: Map<String, Value>,
}

impl WorkflowDocument {
    pub fn node(&self, name: &str) -> Option<&DocumentNode> {
        self.nodes.iter().find(|node| node.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentNode {
    pub parameters: Map<String, Value>,
    pub name: String,
    #[serde(rename = "type")]
    pub type_id: String,
    #[serde(serialize_with = "serialize_version")]
    pub type_version: f64,
    pub position: [i32; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_in_flow: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSettings {
    pub execution_order: String,
    pub timezone: String,
}

impl WorkflowSettings {
    pub fn new(timezone: impl Into<String>) -> Self {
        Self {
            execution_order: "v1".to_string(),
            timezone: timezone.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionTarget {
    pub node: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub index: u32,
}

impl ConnectionTarget {
    pub fn main(node: impl Into<String>, index: u32) -> Self {
        Self {
            node: node.into(),
            kind: "main".to_string(),
            index,
        }
    }
}

/// The targets reachable from one source node, grouped by output index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeOutputs {
    pub main: Vec<Vec<ConnectionTarget>>,
}

impl NodeOutputs {
    pub fn push(&mut self, output_index: u32, target: ConnectionTarget) {
        let slot = output_index as usize;
        if self.main.len() <= slot {
            self.main.resize_with(slot + 1, Vec::new);
        }
        self.main[slot].push(target);
    }

    pub fn targets(&self) -> impl Iterator<Item = &ConnectionTarget> {
        self.main.iter().flatten()
    }
}

/// Source-name keyed connections that serialize in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionMap(IndexMap<String, NodeOutputs>);

impl ConnectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the outputs for `source`, inserting an empty entry on first use.
    pub fn entry(&mut self, source: &str) -> &mut NodeOutputs {
        self.0.entry(source.to_string()).or_default()
    }

    pub fn get(&self, source: &str) -> Option<&NodeOutputs> {
        self.0.get(source)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NodeOutputs)> {
        self.0.iter().map(|(name, outputs)| (name.as_str(), outputs))
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Total number of `(source, target)` edges.
    pub fn edge_count(&self) -> usize {
        self.0.values().map(|outputs| outputs.targets().count()).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// n8n writes whole type versions as integers (`2`, not `2.0`).
fn serialize_version<S: Serializer>(version: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if version.fract() == 0.0 && *version >= 0.0 && *version <= u32::MAX as f64 {
        serializer.serialize_u32(*version as u32)
    } else {
        serializer.serialize_f64(*version)
    }
}
