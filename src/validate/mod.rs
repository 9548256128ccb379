//! Validation aggregator: structure first, then graph and parameter checks.

pub mod graph_rules;
pub mod node_rules;
pub mod structure;

use serde_json::Value;

use crate::issue::{ValidationIssue, ValidationResult};
use crate::parse::{self, types::Workflow};

/// Full validation of raw JSON.
///
/// Structural criticals (non-object input, missing/malformed/empty node
/// array) short-circuit: graph and parameter checks cannot run safely
/// against such a document.
pub fn validate_raw(raw: &Value) -> ValidationResult {
    let mut result = structure::validate(raw);
    if structure::has_critical(&result) {
        return result;
    }

    let workflow = match parse::from_value(raw.clone()) {
        Ok(workflow) => workflow,
        Err(err) => {
            result.push(ValidationIssue::error(
                "INVALID_WORKFLOW",
                format!("Workflow does not match the expected shape: {err}"),
            ));
            return result;
        }
    };

    result.merge(graph_rules::validate(&workflow));
    result.merge(node_rules::validate(&workflow));
    result
}

/// Full validation of an already-typed workflow.
///
/// The structural pass has a single implementation over raw JSON, so the
/// typed document is viewed through its serialized form.
pub fn validate(workflow: &Workflow) -> ValidationResult {
    let raw = serde_json::to_value(workflow).unwrap_or(Value::Null);
    let mut result = structure::validate(&raw);
    if structure::has_critical(&result) {
        return result;
    }
    result.merge(graph_rules::validate(workflow));
    result.merge(node_rules::validate(workflow));
    result
}

/// Structure-only validation of raw JSON.
pub fn validate_structure(raw: &Value) -> ValidationResult {
    structure::validate(raw)
}
