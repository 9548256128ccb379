//! Parse phase: JSON → typed `Workflow` + adjacency view.

pub mod graph;
pub mod types;

pub use graph::WorkflowGraph;
pub use types::*;

use crate::error::Error;

/// Deserialize a workflow JSON string.
pub fn parse(json: &str) -> Result<Workflow, Error> {
    Ok(serde_json::from_str(json)?)
}

/// Deserialize an already-parsed JSON value.
///
/// Intended for values that passed the critical structural checks; a value
/// with flagrantly mistyped leaf fields (e.g. a numeric `name`) is rejected
/// here rather than coerced.
pub fn from_value(value: serde_json::Value) -> Result<Workflow, Error> {
    Ok(serde_json::from_value(value)?)
}
