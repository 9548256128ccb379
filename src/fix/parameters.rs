//! Parameter auto-fill: registry defaults, keyword placeholder templates,
//! per-type corrective defaults, and node normalization.
//!
//! Mutates the workflow in place. Only absent/empty values are ever filled;
//! a value the author set is never overwritten, even a badly typed one.

use serde::Serialize;
use serde_json::{Map, Value, json};

use super::idgen::IdGenerator;
use crate::parse::types::{Node, Workflow};
use crate::registry::{NodeDefinition, NodeRegistry, ParamKind, node_types as t};

/// Default body inserted into code nodes with nothing configured.
pub const CODE_TEMPLATE: &str = "\
// Loop over input items and add a new field.
for (const item of $input.all()) {
  item.json.processed = true;
}

return $input.all();
";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterChange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
    pub parameter: String,
    pub value: Value,
}

/// A repaired node or document field outside the parameter object.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldChange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    pub field: &'static str,
    pub value: Value,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterFixReport {
    pub filled: Vec<ParameterChange>,
    pub normalized: Vec<FieldChange>,
}

impl ParameterFixReport {
    pub fn is_empty(&self) -> bool {
        self.filled.is_empty() && self.normalized.is_empty()
    }

    pub fn change_count(&self) -> usize {
        self.filled.len() + self.normalized.len()
    }
}

pub fn fill_parameters(workflow: &mut Workflow, ids: &mut dyn IdGenerator) -> ParameterFixReport {
    let mut report = ParameterFixReport::default();
    let registry = NodeRegistry::global();

    normalize_document(workflow, ids, &mut report);

    for (index, node) in workflow.nodes.iter_mut().enumerate() {
        let def = node.node_type().and_then(|ty| registry.get(ty));

        if let Some(def) = def {
            if node.parameters.is_none() {
                node.parameters = Some(Map::new());
                report.normalized.push(FieldChange {
                    node_id: node.id().map(String::from),
                    field: "parameters",
                    value: json!({}),
                });
            }

            // Type-specific corrections first so they own their fields;
            // the generic schema pass fills whatever is still missing.
            apply_type_strategy(node, ids, &mut report);
            fill_from_schema(node, def, &mut report);
        }

        normalize_node(node, def, index, ids, &mut report);
    }

    tracing::debug!(
        filled = report.filled.len(),
        normalized = report.normalized.len(),
        "parameter auto-fill complete"
    );
    report
}

// ---------------------------------------------------------------------------
// Document-level repair of fixable structural findings
// ---------------------------------------------------------------------------

fn normalize_document(
    workflow: &mut Workflow,
    ids: &mut dyn IdGenerator,
    report: &mut ParameterFixReport,
) {
    if workflow.name.as_deref().is_none_or(str::is_empty) {
        workflow.name = Some("My workflow".into());
        record_doc(report, "name", json!("My workflow"));
    }
    if workflow.id.as_deref().is_none_or(str::is_empty) {
        let id = ids.next_id();
        record_doc(report, "id", json!(id));
        workflow.id = Some(id);
    }
    if workflow.active.is_none() {
        workflow.active = Some(false);
        record_doc(report, "active", json!(false));
    }
    if workflow.settings.is_none() {
        workflow.settings = Some(json!({}));
        record_doc(report, "settings", json!({}));
    }
}

fn record_doc(report: &mut ParameterFixReport, field: &'static str, value: Value) {
    report.normalized.push(FieldChange {
        node_id: None,
        field,
        value,
    });
}

// ---------------------------------------------------------------------------
// Schema-driven fill
// ---------------------------------------------------------------------------

fn fill_from_schema(node: &mut Node, def: &NodeDefinition, report: &mut ParameterFixReport) {
    let node_id = node.id().map(String::from);
    let node_name = node.name().map(String::from);
    let Some(params) = node.parameters.as_mut() else {
        return;
    };

    for spec in def.parameters.iter().filter(|p| p.required) {
        if !needs_fill(params.get(spec.name)) {
            continue;
        }
        let value = match spec.default {
            Some(default) => default.to_value(),
            None => synthetic_value(spec),
        };
        params.insert(spec.name.to_string(), value.clone());
        report.filled.push(ParameterChange {
            node_id: node_id.clone(),
            node_name: node_name.clone(),
            parameter: spec.name.to_string(),
            value,
        });
    }
}

fn needs_fill(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn synthetic_value(spec: &crate::registry::ParameterSpec) -> Value {
    match spec.kind {
        ParamKind::String => Value::String(
            spec.placeholder
                .map(String::from)
                .unwrap_or_else(|| string_placeholder(spec.name)),
        ),
        ParamKind::Number => json!(0),
        ParamKind::Boolean => json!(false),
        ParamKind::Options => Value::String(spec.options.first().copied().unwrap_or("").into()),
        ParamKind::Collection => json!({}),
    }
}

/// Keyword-to-template rules matched against the parameter's own name.
/// Order matters: the bare `id` class must come after the specific ones.
fn string_placeholder(name: &str) -> String {
    let key = name.to_ascii_lowercase();
    if key.contains("url") || key.contains("endpoint") {
        "={{ $json.url || \"https://example.com\" }}".into()
    } else if key.contains("email") || key.contains("recipient") || key.contains("sendto") {
        "={{ $json.email || \"user@example.com\" }}".into()
    } else if key.contains("channel") {
        "#general".into()
    } else if key.contains("subject") || key.contains("title") {
        "Automated workflow notification".into()
    } else if key.contains("message") || key.contains("text") || key.contains("content") {
        "={{ $json.message || \"Automated message\" }}".into()
    } else if key.contains("path") {
        "auto-generated-path".into()
    } else if key.contains("credential") || key.contains("token") || key.contains("secret") {
        "REPLACE_WITH_CREDENTIALS".into()
    } else if key.contains("id") {
        "={{ $json.id }}".into()
    } else {
        format!("={{{{ $json.{name} }}}}")
    }
}

// ---------------------------------------------------------------------------
// Corrective defaults for well-known node types
// ---------------------------------------------------------------------------

fn apply_type_strategy(
    node: &mut Node,
    ids: &mut dyn IdGenerator,
    report: &mut ParameterFixReport,
) {
    let Some(type_name) = node.node_type().map(String::from) else {
        return;
    };
    let node_id = node.id().map(String::from);
    let node_name = node.name().map(String::from);
    let Some(params) = node.parameters.as_mut() else {
        return;
    };

    let mut set = |params: &mut Map<String, Value>, name: &str, value: Value| {
        params.insert(name.to_string(), value.clone());
        report.filled.push(ParameterChange {
            node_id: node_id.clone(),
            node_name: node_name.clone(),
            parameter: name.to_string(),
            value,
        });
    };

    match type_name.as_str() {
        t::HTTP_REQUEST => {
            if needs_fill(params.get("method")) {
                set(params, "method", json!("GET"));
            }
        }
        t::WEBHOOK => {
            if needs_fill(params.get("httpMethod")) {
                set(params, "httpMethod", json!("POST"));
            }
            let blank_path = params
                .get("path")
                .and_then(Value::as_str)
                .is_none_or(|p| p.trim().is_empty());
            if blank_path {
                set(params, "path", json!(format!("webhook-{}", ids.suffix())));
            }
        }
        t::IF | t::FILTER => {
            let empty = match params.get("conditions") {
                None | Some(Value::Null) => true,
                Some(Value::Array(items)) => items.is_empty(),
                Some(Value::Object(map)) => map.is_empty(),
                Some(_) => false,
            };
            if empty {
                set(
                    params,
                    "conditions",
                    json!([{
                        "field": "={{ $json.status }}",
                        "operation": "equals",
                        "value": "success",
                    }]),
                );
            }
        }
        t::CODE => {
            let blank = params
                .get("jsCode")
                .and_then(Value::as_str)
                .is_none_or(|c| c.trim().is_empty());
            if blank {
                set(params, "jsCode", json!(CODE_TEMPLATE));
            }
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Registry-independent node normalization
// ---------------------------------------------------------------------------

fn normalize_node(
    node: &mut Node,
    def: Option<&NodeDefinition>,
    index: usize,
    ids: &mut dyn IdGenerator,
    report: &mut ParameterFixReport,
) {
    if node.id().is_none() {
        let id = ids.next_id();
        node.id = Some(id.clone());
        report.normalized.push(FieldChange {
            node_id: Some(id.clone()),
            field: "id",
            value: json!(id),
        });
    }
    let node_id = node.id().map(String::from);

    if node.name().is_none() {
        let name = def.map(|d| d.display_name).unwrap_or("Unnamed Node");
        node.name = Some(name.into());
        report.normalized.push(FieldChange {
            node_id: node_id.clone(),
            field: "name",
            value: json!(name),
        });
    }

    if node.type_version.is_none() {
        node.type_version = Some(1.0);
        report.normalized.push(FieldChange {
            node_id: node_id.clone(),
            field: "typeVersion",
            value: json!(1),
        });
    }

    let position_ok = node.position.as_ref().is_some_and(|p| p.len() == 2);
    if !position_ok {
        // Staggered from the origin so positional heuristics keep working.
        let position = vec![250.0 + 200.0 * index as f64, 300.0];
        node.position = Some(position.clone());
        report.normalized.push(FieldChange {
            node_id: node_id.clone(),
            field: "position",
            value: json!(position),
        });
    }

    if node.parameters.is_none() {
        node.parameters = Some(Map::new());
        report.normalized.push(FieldChange {
            node_id,
            field: "parameters",
            value: json!({}),
        });
    }
}
