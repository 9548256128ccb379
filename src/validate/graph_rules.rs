//! Graph-level validation: connectivity, reachability, cycles, and
//! dangling references, built on top of `analyze`.

use serde_json::json;

use crate::analyze;
use crate::issue::{ValidationIssue, ValidationResult};
use crate::parse::types::Workflow;

pub fn validate(workflow: &Workflow) -> ValidationResult {
    let mut result = ValidationResult::new();
    let analysis = analyze::analyze(workflow);

    if !analysis.has_trigger {
        result.push(ValidationIssue::error(
            "NO_TRIGGER",
            "Workflow has no trigger node to start execution",
        ));
    }

    for id in &analysis.orphaned_nodes {
        let name = workflow.node_by_id(id).and_then(|n| n.name());
        result.push(
            ValidationIssue::error(
                "ORPHANED_NODE",
                format!("Node '{}' is not connected to the workflow", name.unwrap_or(id)),
            )
            .with_node(Some(id), name)
            .with_fix("Connect the node to its positional neighbors"),
        );
    }

    for id in &analysis.unreachable_nodes {
        let name = workflow.node_by_id(id).and_then(|n| n.name());
        result.push(
            ValidationIssue::error(
                "UNREACHABLE_NODE",
                format!(
                    "Node '{}' can never be reached from a trigger",
                    name.unwrap_or(id)
                ),
            )
            .with_node(Some(id), name)
            .with_fix("Connect the node to an upstream node"),
        );
    }

    if analysis.circular_references {
        result.push(ValidationIssue::warning(
            "CIRCULAR_REFERENCE",
            "Workflow contains a connection cycle; loops only make sense for retry or polling constructs",
        ));
    }

    validate_references(workflow, &mut result);

    for suggestion in &analysis.missing_connections {
        result.push(
            ValidationIssue::info(
                "SUGGESTED_CONNECTION",
                format!(
                    "Nodes '{}' and '{}' are adjacent on the canvas but not connected",
                    suggestion.from, suggestion.to
                ),
            )
            .with_details(json!({ "from": suggestion.from, "to": suggestion.to })),
        );
    }

    result
}

/// Every id inside the connection map must name an existing node.
fn validate_references(workflow: &Workflow, result: &mut ValidationResult) {
    let Some(connections) = &workflow.connections else {
        return;
    };
    let ids = workflow.node_ids();

    for (source, ports) in connections {
        if !ids.contains(source.as_str()) {
            result.push(
                ValidationIssue::error(
                    "INVALID_CONNECTION_SOURCE",
                    format!("Connections reference unknown source node '{source}'"),
                )
                .with_fix("Remove the connection entry")
                .with_details(json!({ "source": source })),
            );
        }
        for (slot, groups) in ports {
            for targets in groups {
                for target in targets {
                    if !ids.contains(target.node.as_str()) {
                        result.push(
                            ValidationIssue::error(
                                "INVALID_CONNECTION_TARGET",
                                format!(
                                    "Connection from '{source}' references unknown target node '{}'",
                                    target.node
                                ),
                            )
                            .with_fix("Remove the connection target")
                            .with_details(json!({
                                "source": source,
                                "slot": slot,
                                "target": target.node,
                            })),
                        );
                    }
                }
            }
        }
    }
}
