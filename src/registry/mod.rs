//! Static catalogue of known node types and their parameter schemas.
//!
//! A flat keyed collection built once at startup; pure lookups, no mutation,
//! safe for unsynchronized concurrent reads.

mod catalog;

use std::collections::HashMap;
use std::sync::LazyLock;

use serde_json::{Value, json};

/// Canonical type identifiers for the node types that get special-cased
/// validation or repair. Everything else is looked up by its literal string.
pub mod node_types {
    pub const MANUAL_TRIGGER: &str = "n8n-nodes-base.manualTrigger";
    pub const SCHEDULE_TRIGGER: &str = "n8n-nodes-base.scheduleTrigger";
    pub const CRON: &str = "n8n-nodes-base.cron";
    pub const WEBHOOK: &str = "n8n-nodes-base.webhook";
    pub const ERROR_TRIGGER: &str = "n8n-nodes-base.errorTrigger";
    pub const HTTP_REQUEST: &str = "n8n-nodes-base.httpRequest";
    pub const EMAIL_SEND: &str = "n8n-nodes-base.emailSend";
    pub const RESPOND_TO_WEBHOOK: &str = "n8n-nodes-base.respondToWebhook";
    pub const EXECUTE_COMMAND: &str = "n8n-nodes-base.executeCommand";
    pub const GMAIL: &str = "n8n-nodes-base.gmail";
    pub const SLACK: &str = "n8n-nodes-base.slack";
    pub const TELEGRAM: &str = "n8n-nodes-base.telegram";
    pub const DISCORD: &str = "n8n-nodes-base.discord";
    pub const GOOGLE_SHEETS: &str = "n8n-nodes-base.googleSheets";
    pub const AIRTABLE: &str = "n8n-nodes-base.airtable";
    pub const NOTION: &str = "n8n-nodes-base.notion";
    pub const POSTGRES: &str = "n8n-nodes-base.postgres";
    pub const GITHUB: &str = "n8n-nodes-base.github";
    pub const OPEN_AI: &str = "n8n-nodes-base.openAi";
    pub const SET: &str = "n8n-nodes-base.set";
    pub const MERGE: &str = "n8n-nodes-base.merge";
    pub const SPLIT_IN_BATCHES: &str = "n8n-nodes-base.splitInBatches";
    pub const ITEM_LISTS: &str = "n8n-nodes-base.itemLists";
    pub const IF: &str = "n8n-nodes-base.if";
    pub const SWITCH: &str = "n8n-nodes-base.switch";
    pub const FILTER: &str = "n8n-nodes-base.filter";
    pub const CODE: &str = "n8n-nodes-base.code";
    pub const NO_OP: &str = "n8n-nodes-base.noOp";
    pub const WAIT: &str = "n8n-nodes-base.wait";
    pub const STOP_AND_ERROR: &str = "n8n-nodes-base.stopAndError";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Trigger,
    Action,
    Integration,
    Data,
    Logic,
    Utility,
}

impl Category {
    pub fn parse(s: &str) -> Option<Category> {
        match s {
            "trigger" => Some(Category::Trigger),
            "action" => Some(Category::Action),
            "integration" => Some(Category::Integration),
            "data" => Some(Category::Data),
            "logic" => Some(Category::Logic),
            "utility" => Some(Category::Utility),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Trigger => write!(f, "trigger"),
            Category::Action => write!(f, "action"),
            Category::Integration => write!(f, "integration"),
            Category::Data => write!(f, "data"),
            Category::Logic => write!(f, "logic"),
            Category::Utility => write!(f, "utility"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Number,
    Boolean,
    Options,
    Collection,
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamKind::String => write!(f, "string"),
            ParamKind::Number => write!(f, "number"),
            ParamKind::Boolean => write!(f, "boolean"),
            ParamKind::Options => write!(f, "options"),
            ParamKind::Collection => write!(f, "collection"),
        }
    }
}

/// Const-friendly default value for a parameter spec.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamDefault {
    Str(&'static str),
    Num(f64),
    Bool(bool),
    EmptyObject,
    EmptyArray,
}

impl ParamDefault {
    pub fn to_value(self) -> Value {
        match self {
            ParamDefault::Str(s) => Value::String(s.into()),
            ParamDefault::Num(n) => json!(n),
            ParamDefault::Bool(b) => Value::Bool(b),
            ParamDefault::EmptyObject => json!({}),
            ParamDefault::EmptyArray => json!([]),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub default: Option<ParamDefault>,
    pub options: &'static [&'static str],
    pub placeholder: Option<&'static str>,
}

impl ParameterSpec {
    pub fn new(name: &'static str, kind: ParamKind) -> Self {
        ParameterSpec {
            name,
            kind,
            required: false,
            default: None,
            options: &[],
            placeholder: None,
        }
    }

    pub fn string(name: &'static str) -> Self {
        Self::new(name, ParamKind::String)
    }

    pub fn number(name: &'static str) -> Self {
        Self::new(name, ParamKind::Number)
    }

    pub fn boolean(name: &'static str) -> Self {
        Self::new(name, ParamKind::Boolean)
    }

    pub fn options(name: &'static str, options: &'static [&'static str]) -> Self {
        let mut spec = Self::new(name, ParamKind::Options);
        spec.options = options;
        spec
    }

    pub fn collection(name: &'static str) -> Self {
        Self::new(name, ParamKind::Collection)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default(mut self, value: ParamDefault) -> Self {
        self.default = Some(value);
        self
    }

    pub fn placeholder(mut self, text: &'static str) -> Self {
        self.placeholder = Some(text);
        self
    }
}

#[derive(Debug, Clone)]
pub struct NodeDefinition {
    pub type_name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub keywords: &'static [&'static str],
    pub parameters: Vec<ParameterSpec>,
    /// Input slot kinds. Empty for triggers.
    pub inputs: &'static [&'static str],
    /// Output slot kinds. More than one marks a branching node whose output
    /// semantics must never be collapsed into a single inferred successor.
    pub outputs: &'static [&'static str],
}

impl NodeDefinition {
    pub fn is_trigger(&self) -> bool {
        self.category == Category::Trigger
    }

    pub fn is_branching(&self) -> bool {
        self.outputs.len() > 1
    }

    pub fn required_parameters(&self) -> impl Iterator<Item = &ParameterSpec> {
        self.parameters.iter().filter(|p| p.required)
    }
}

pub struct NodeRegistry {
    nodes: Vec<NodeDefinition>,
    index: HashMap<&'static str, usize>,
}

static GLOBAL: LazyLock<NodeRegistry> = LazyLock::new(NodeRegistry::new);

impl NodeRegistry {
    pub fn new() -> Self {
        let nodes = catalog::builtin_nodes();
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, def)| (def.type_name, i))
            .collect();
        NodeRegistry { nodes, index }
    }

    /// The process-wide registry, constructed on first use.
    pub fn global() -> &'static NodeRegistry {
        &GLOBAL
    }

    pub fn get(&self, type_name: &str) -> Option<&NodeDefinition> {
        self.index.get(type_name).map(|&i| &self.nodes[i])
    }

    pub fn by_category(&self, category: Category) -> Vec<&NodeDefinition> {
        self.nodes
            .iter()
            .filter(|def| def.category == category)
            .collect()
    }

    /// Case-insensitive substring match over display name, description, and
    /// keywords, in declaration order.
    pub fn search(&self, query: &str) -> Vec<&NodeDefinition> {
        let query = query.to_ascii_lowercase();
        self.nodes
            .iter()
            .filter(|def| {
                def.display_name.to_ascii_lowercase().contains(&query)
                    || def.description.to_ascii_lowercase().contains(&query)
                    || def
                        .keywords
                        .iter()
                        .any(|k| k.to_ascii_lowercase().contains(&query))
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeDefinition> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
