//! Per-node parameter validation against the registry.
//!
//! Generic checks are schema-driven; well-known node types get an extra
//! semantic check through the dispatch table at the bottom. Adding a
//! special-cased type means adding one match arm and one function.

use serde_json::{Value, json};

use crate::issue::{ValidationIssue, ValidationResult};
use crate::parse::types::{Node, Workflow};
use crate::registry::{Category, NodeRegistry, ParamKind, node_types as t};

/// Node types that may legitimately run without credentials.
const CREDENTIAL_EXEMPT: &[&str] = &[
    t::HTTP_REQUEST,
    t::WEBHOOK,
    t::MANUAL_TRIGGER,
    t::SCHEDULE_TRIGGER,
];

pub fn validate(workflow: &Workflow) -> ValidationResult {
    let mut result = ValidationResult::new();
    for node in &workflow.nodes {
        validate_node(node, &mut result);
    }
    result
}

pub fn validate_node(node: &Node, result: &mut ValidationResult) {
    // A node without a type already carries a structural error.
    let Some(type_name) = node.node_type() else {
        return;
    };
    let Some(def) = NodeRegistry::global().get(type_name) else {
        result.push(
            ValidationIssue::error(
                "UNKNOWN_NODE_TYPE",
                format!("Node type '{type_name}' is not in the registry"),
            )
            .with_node(node.id(), node.name()),
        );
        return;
    };

    let required: Vec<_> = def.required_parameters().collect();
    if !required.is_empty() && !node.has_parameters() {
        result.push(
            ValidationIssue::error(
                "EMPTY_REQUIRED_PARAMETERS",
                format!(
                    "Node '{}' has no parameters but its type declares required ones",
                    node.name().or(node.id()).unwrap_or(type_name)
                ),
            )
            .with_node(node.id(), node.name())
            .with_fix("Fill required parameters with defaults"),
        );
    } else {
        for spec in &def.parameters {
            check_parameter(node, spec, result);
        }
    }

    if let Some(check) = semantic_check(type_name) {
        check(node, result);
    }

    if def.category == Category::Integration
        && !CREDENTIAL_EXEMPT.contains(&type_name)
        && !node.has_credentials()
    {
        result.push(
            ValidationIssue::warning(
                "MISSING_CREDENTIALS",
                format!("Node '{}' has no credentials attached", label(node)),
            )
            .with_node(node.id(), node.name()),
        );
    }
}

/// Missing-value errors apply to required parameters; type and option
/// checks apply to any declared parameter that carries a value.
fn check_parameter(
    node: &Node,
    spec: &crate::registry::ParameterSpec,
    result: &mut ValidationResult,
) {
    let value = node.param(spec.name);
    let missing = match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    };
    if missing {
        if spec.required {
            result.push(
                ValidationIssue::error(
                    "MISSING_REQUIRED_PARAMETER",
                    format!(
                        "Node '{}' is missing required parameter '{}'",
                        label(node),
                        spec.name
                    ),
                )
                .with_node(node.id(), node.name())
                .with_fix("Fill the parameter with a default value")
                .with_details(json!({ "parameter": spec.name })),
            );
        }
        return;
    }

    let value = match value {
        Some(v) => v,
        None => return,
    };
    // Any field may carry an `=`-prefixed expression; those are opaque here.
    if value.as_str().is_some_and(|s| s.starts_with('=')) {
        return;
    }

    let type_ok = match spec.kind {
        ParamKind::String => value.is_string(),
        ParamKind::Number => value.is_number(),
        ParamKind::Boolean => value.is_boolean(),
        ParamKind::Options => value.is_string(),
        ParamKind::Collection => return,
    };
    if !type_ok {
        result.push(
            ValidationIssue::error(
                "INVALID_PARAMETER_TYPE",
                format!(
                    "Parameter '{}' of node '{}' must be a {}",
                    spec.name,
                    label(node),
                    spec.kind
                ),
            )
            .with_node(node.id(), node.name())
            .with_details(json!({ "parameter": spec.name })),
        );
        return;
    }

    // Option lists may be incomplete; membership failures stay survivable.
    if spec.kind == ParamKind::Options
        && let Some(s) = value.as_str()
        && !spec.options.contains(&s)
    {
        result.push(
            ValidationIssue::warning(
                "INVALID_OPTION_VALUE",
                format!(
                    "Parameter '{}' of node '{}' has unexpected value '{s}'",
                    spec.name,
                    label(node),
                ),
            )
            .with_node(node.id(), node.name())
            .with_details(json!({ "parameter": spec.name, "value": s })),
        );
    }
}

// ---------------------------------------------------------------------------
// Semantic checks for well-known node types
// ---------------------------------------------------------------------------

type SemanticCheck = fn(&Node, &mut ValidationResult);

fn semantic_check(type_name: &str) -> Option<SemanticCheck> {
    Some(match type_name {
        t::HTTP_REQUEST => check_http_request,
        t::WEBHOOK => check_webhook,
        t::EMAIL_SEND | t::GMAIL => check_email,
        t::GOOGLE_SHEETS | t::AIRTABLE => check_table_document,
        t::SLACK | t::TELEGRAM | t::DISCORD => check_messaging,
        t::IF | t::FILTER => check_conditions,
        t::CODE => check_code,
        _ => return None,
    })
}

fn check_http_request(node: &Node, result: &mut ValidationResult) {
    let Some(url) = node.param_str("url") else {
        return;
    };
    let looks_resolvable =
        url.starts_with("http://") || url.starts_with("https://") || url.starts_with('=');
    if !url.trim().is_empty() && !looks_resolvable {
        result.push(
            ValidationIssue::warning(
                "INVALID_URL",
                format!(
                    "URL of node '{}' is neither an absolute URL nor an expression",
                    label(node)
                ),
            )
            .with_node(node.id(), node.name())
            .with_details(json!({ "url": url })),
        );
    }
}

fn check_webhook(node: &Node, result: &mut ValidationResult) {
    if let Some(path) = node.param_str("path")
        && path.trim().is_empty()
    {
        result.push(
            ValidationIssue::error(
                "MISSING_WEBHOOK_PATH",
                format!("Webhook node '{}' has a blank path", label(node)),
            )
            .with_node(node.id(), node.name())
            .with_fix("Generate a webhook path"),
        );
    }
}

fn check_email(node: &Node, result: &mut ValidationResult) {
    let recipient_field = if node.node_type() == Some(t::GMAIL) {
        "sendTo"
    } else {
        "toEmail"
    };
    if blank(node.param(recipient_field)) {
        result.push(
            ValidationIssue::error(
                "MISSING_EMAIL_RECIPIENT",
                format!("Mail node '{}' has a blank recipient", label(node)),
            )
            .with_node(node.id(), node.name())
            .with_fix("Fill the recipient with a placeholder address"),
        );
    }
    if blank_or_missing(node.param("subject")) {
        result.push(
            ValidationIssue::warning(
                "MISSING_EMAIL_SUBJECT",
                format!("Mail node '{}' has no subject", label(node)),
            )
            .with_node(node.id(), node.name()),
        );
    }
}

fn check_table_document(node: &Node, result: &mut ValidationResult) {
    let field = if node.node_type() == Some(t::AIRTABLE) {
        "baseId"
    } else {
        "documentId"
    };
    if blank(node.param(field)) {
        result.push(
            ValidationIssue::error(
                "MISSING_DOCUMENT_ID",
                format!("Node '{}' has a blank document identifier", label(node)),
            )
            .with_node(node.id(), node.name())
            .with_fix("Fill the document identifier with a placeholder"),
        );
    }
}

fn check_messaging(node: &Node, result: &mut ValidationResult) {
    let (channel_field, text_field) = match node.node_type() {
        Some(t::TELEGRAM) => ("chatId", "text"),
        Some(t::DISCORD) => ("channelId", "content"),
        _ => ("channel", "text"),
    };
    if blank(node.param(channel_field)) {
        result.push(
            ValidationIssue::error(
                "MISSING_CHANNEL",
                format!("Messaging node '{}' has a blank target channel", label(node)),
            )
            .with_node(node.id(), node.name())
            .with_fix("Fill the channel with a placeholder"),
        );
    }
    if blank_or_missing(node.param(text_field)) {
        result.push(
            ValidationIssue::warning(
                "MISSING_MESSAGE_TEXT",
                format!("Messaging node '{}' has no message text", label(node)),
            )
            .with_node(node.id(), node.name()),
        );
    }
}

fn check_conditions(node: &Node, result: &mut ValidationResult) {
    let empty = match node.param("conditions") {
        None | Some(Value::Null) => true,
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(_) => false,
    };
    if empty {
        result.push(
            ValidationIssue::error(
                "MISSING_CONDITIONS",
                format!("Conditional node '{}' has no conditions configured", label(node)),
            )
            .with_node(node.id(), node.name())
            .with_fix("Add a placeholder condition"),
        );
    }
}

fn check_code(node: &Node, result: &mut ValidationResult) {
    match node.param_str("jsCode") {
        None => result.push(
            ValidationIssue::warning(
                "EMPTY_CODE_BODY",
                format!("Code node '{}' has no code", label(node)),
            )
            .with_node(node.id(), node.name())
            .with_fix("Insert the documented code template"),
        ),
        Some(code) if code.trim().is_empty() => result.push(
            ValidationIssue::warning(
                "EMPTY_CODE_BODY",
                format!("Code node '{}' has an empty code body", label(node)),
            )
            .with_node(node.id(), node.name())
            .with_fix("Insert the documented code template"),
        ),
        Some(code) if code.trim() == crate::fix::parameters::CODE_TEMPLATE.trim() => result.push(
            ValidationIssue::warning(
                "DEFAULT_CODE_BODY",
                format!("Code node '{}' still contains the default template", label(node)),
            )
            .with_node(node.id(), node.name()),
        ),
        Some(_) => {}
    }
}

fn label(node: &Node) -> &str {
    node.name()
        .or(node.id())
        .or(node.node_type())
        .unwrap_or("?")
}

fn blank(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|s| s.trim().is_empty())
}

fn blank_or_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}
