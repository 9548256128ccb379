//! Document- and node-shape validation over raw JSON.
//!
//! Operates on `serde_json::Value` so arbitrarily malformed input can be
//! reported instead of rejected at deserialization. A present-but-wrong-type
//! field gets the same code as a missing one; `null` counts as missing.

use serde_json::Value;

use crate::issue::{ValidationIssue, ValidationResult};

/// Codes that make graph and parameter validation meaningless: downstream
/// checks are skipped entirely when any of these is present.
pub const CRITICAL_CODES: &[&str] = &[
    "INVALID_WORKFLOW",
    "MISSING_NODES",
    "INVALID_NODES",
    "EMPTY_NODES",
];

pub fn has_critical(result: &ValidationResult) -> bool {
    CRITICAL_CODES.iter().any(|code| result.has_code(code))
}

pub fn validate(raw: &Value) -> ValidationResult {
    let mut result = ValidationResult::new();

    let Some(doc) = raw.as_object() else {
        result.push(ValidationIssue::error(
            "INVALID_WORKFLOW",
            "Workflow must be a JSON object",
        ));
        return result;
    };

    if field_str(doc, "name").is_none() {
        result.push(
            ValidationIssue::error("MISSING_NAME", "Workflow is missing a name")
                .with_fix("Set a workflow name"),
        );
    }

    let nodes = check_nodes_shape(doc, &mut result);

    match present(doc, "connections") {
        None => result.push(
            ValidationIssue::error("MISSING_CONNECTIONS", "Workflow has no connections object")
                .with_fix("Initialize connections as an empty object"),
        ),
        Some(value) if !value.is_object() => result.push(
            ValidationIssue::error("INVALID_CONNECTIONS", "Workflow connections must be an object")
                .with_fix("Replace connections with an empty object"),
        ),
        Some(_) => {}
    }

    if present(doc, "active").is_none() {
        result.push(
            ValidationIssue::warning("MISSING_ACTIVE", "Workflow has no active flag")
                .with_fix("Default active to false"),
        );
    }
    if present(doc, "settings").is_none() {
        result.push(
            ValidationIssue::warning("MISSING_SETTINGS", "Workflow has no settings object")
                .with_fix("Default settings to an empty object"),
        );
    }
    if field_str(doc, "id").is_none() {
        result.push(
            ValidationIssue::warning("MISSING_WORKFLOW_ID", "Workflow has no id")
                .with_fix("Generate a workflow id"),
        );
    }

    // Node-level checks are meaningless without a usable node array.
    if let Some(nodes) = nodes {
        validate_nodes(nodes, &mut result);
    }

    result
}

/// Returns the node array only when it is usable for per-node checks.
fn check_nodes_shape<'a>(
    doc: &'a serde_json::Map<String, Value>,
    result: &mut ValidationResult,
) -> Option<&'a Vec<Value>> {
    let Some(value) = present(doc, "nodes") else {
        result.push(ValidationIssue::error(
            "MISSING_NODES",
            "Workflow has no nodes array",
        ));
        return None;
    };
    let Some(array) = value.as_array() else {
        result.push(ValidationIssue::error(
            "INVALID_NODES",
            "Workflow nodes must be an array",
        ));
        return None;
    };
    if array.is_empty() {
        result.push(ValidationIssue::error(
            "EMPTY_NODES",
            "Workflow has no nodes",
        ));
        return None;
    }
    if array.iter().any(|entry| !entry.is_object()) {
        result.push(ValidationIssue::error(
            "INVALID_NODES",
            "Every workflow node must be an object",
        ));
        return None;
    }
    Some(array)
}

fn validate_nodes(nodes: &[Value], result: &mut ValidationResult) {
    let mut seen_ids = std::collections::HashSet::new();

    for (index, entry) in nodes.iter().enumerate() {
        // check_nodes_shape guarantees objects.
        let Some(node) = entry.as_object() else { continue };
        let id = field_str(node, "id");
        let name = field_str(node, "name");
        let label = name
            .or(id)
            .map(String::from)
            .unwrap_or_else(|| format!("#{index}"));

        match id {
            None => result.push(
                ValidationIssue::error(
                    "MISSING_NODE_ID",
                    format!("Node {label} has no id"),
                )
                .with_node(None, name)
                .with_fix("Generate a node id"),
            ),
            Some(id) => {
                if !seen_ids.insert(id) {
                    result.push(
                        ValidationIssue::error(
                            "DUPLICATE_NODE_ID",
                            format!("Node id '{id}' is used more than once"),
                        )
                        .with_node(Some(id), name),
                    );
                }
            }
        }

        if name.is_none() {
            result.push(
                ValidationIssue::warning(
                    "MISSING_NODE_NAME",
                    format!("Node {label} has no name"),
                )
                .with_node(id, None)
                .with_fix("Derive a name from the node type"),
            );
        }

        if field_str(node, "type").is_none() {
            result.push(
                ValidationIssue::error(
                    "MISSING_NODE_TYPE",
                    format!("Node {label} has no type"),
                )
                .with_node(id, name),
            );
        }

        match present(node, "parameters") {
            Some(value) if value.is_object() => {}
            _ => result.push(
                ValidationIssue::warning(
                    "MISSING_PARAMETERS",
                    format!("Node {label} has no parameters object"),
                )
                .with_node(id, name)
                .with_fix("Default parameters to an empty object"),
            ),
        }

        if !position_is_valid(present(node, "position")) {
            result.push(
                ValidationIssue::warning(
                    "INVALID_POSITION",
                    format!("Node {label} has no valid [x, y] position"),
                )
                .with_node(id, name)
                .with_fix("Recompute the node position"),
            );
        }

        match present(node, "typeVersion") {
            Some(value) if value.is_number() => {}
            _ => result.push(
                ValidationIssue::warning(
                    "MISSING_TYPE_VERSION",
                    format!("Node {label} has no typeVersion"),
                )
                .with_node(id, name)
                .with_fix("Default typeVersion to 1"),
            ),
        }
    }
}

fn position_is_valid(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_array)
        .is_some_and(|p| p.len() == 2 && p.iter().all(Value::is_number))
}

/// Field access treating `null` the same as absent.
fn present<'a>(map: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

fn field_str<'a>(map: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a str> {
    present(map, key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
