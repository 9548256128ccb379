//! Serde model of the workflow document.
//!
//! The whole point of this crate is repairing documents that violate the
//! schema, so the model is lenient for *absence*: everything the structure
//! validator can repair is an `Option`. Unknown fields are kept in flattened
//! maps so a fix cycle hands back the document without dropping anything.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `source node id -> output slot name -> parallel groups -> targets`.
///
/// Multiple groups under one slot carry the branches of a multi-output node
/// (true/false of a conditional as group 0 / group 1).
pub type ConnectionMap = BTreeMap<String, PortMap>;
pub type PortMap = BTreeMap<String, Vec<ConnectionGroup>>;
pub type ConnectionGroup = Vec<ConnectionTarget>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionTarget {
    pub node: String,
    #[serde(rename = "type", default = "default_slot_kind")]
    pub kind: String,
    #[serde(default)]
    pub index: u32,
}

fn default_slot_kind() -> String {
    "main".into()
}

impl ConnectionTarget {
    pub fn to_node(id: impl Into<String>) -> Self {
        ConnectionTarget {
            node: id.into(),
            kind: default_slot_kind(),
            index: 0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connections: Option<ConnectionMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_version: Option<f64>,
    /// Canvas position. Length is validated separately so malformed arrays
    /// survive deserialization and can be repaired.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec<f64>>,
    /// `None` is distinct from an empty map: a missing parameter object is a
    /// structural warning, an empty one may be a parameter error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|s| !s.is_empty())
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.is_empty())
    }

    pub fn node_type(&self) -> Option<&str> {
        self.node_type.as_deref().filter(|s| !s.is_empty())
    }

    /// X coordinate used by the positional heuristics. Nodes without a
    /// usable position sort first.
    pub fn x(&self) -> f64 {
        self.position
            .as_ref()
            .and_then(|p| p.first())
            .copied()
            .unwrap_or(0.0)
    }

    pub fn param(&self, name: &str) -> Option<&Value> {
        self.parameters.as_ref().and_then(|p| p.get(name))
    }

    pub fn param_str(&self, name: &str) -> Option<&str> {
        self.param(name).and_then(Value::as_str)
    }

    pub fn has_parameters(&self) -> bool {
        self.parameters.as_ref().is_some_and(|p| !p.is_empty())
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.as_ref().is_some_and(|c| !c.is_empty())
    }
}

impl Workflow {
    pub fn node_by_id(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == Some(id))
    }

    pub fn node_ids(&self) -> std::collections::HashSet<&str> {
        self.nodes.iter().filter_map(Node::id).collect()
    }

    /// Nodes with ids, sorted by ascending x. Stable, so equal positions
    /// keep declaration order.
    pub fn nodes_by_x(&self) -> Vec<(&str, f64)> {
        let mut sorted: Vec<(&str, f64)> = self
            .nodes
            .iter()
            .filter_map(|n| n.id().map(|id| (id, n.x())))
            .collect();
        sorted.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        sorted
    }
}
