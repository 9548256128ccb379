//! Registry-driven parameter validation and per-type semantic checks.

mod helpers;

use flowdoctor::fix::parameters::CODE_TEMPLATE;
use flowdoctor::registry::node_types as t;
use flowdoctor::validate;
use helpers::{connect, node, node_with_params, workflow};
use serde_json::json;

/// A trigger wired to the node under test, so graph findings stay quiet.
fn wired(target: flowdoctor::parse::types::Node) -> flowdoctor::parse::types::Workflow {
    let id = target.id.clone().expect("test node needs an id");
    let mut wf = workflow(vec![node("trigger", t::MANUAL_TRIGGER, 100.0), target]);
    connect(&mut wf, "trigger", &id);
    wf
}

#[test]
fn unknown_node_type_skips_parameter_checks() {
    let wf = wired(node_with_params(
        "mystery",
        "custom-nodes.doesNotExist",
        450.0,
        json!({}),
    ));
    let result = validate::validate(&wf);
    let issue = result
        .errors
        .iter()
        .find(|i| i.code == "UNKNOWN_NODE_TYPE")
        .expect("should flag unknown type");
    assert!(issue.fix.is_none());
    assert!(!result.has_code("EMPTY_REQUIRED_PARAMETERS"));
}

#[test]
fn empty_parameters_with_required_specs_is_one_aggregate_error() {
    let wf = wired(node_with_params("http", t::HTTP_REQUEST, 450.0, json!({})));
    let result = validate::validate(&wf);
    assert!(result.has_code("EMPTY_REQUIRED_PARAMETERS"));
    // The aggregate subsumes the per-parameter findings.
    assert!(!result.has_code("MISSING_REQUIRED_PARAMETER"));
}

#[test]
fn missing_required_parameter_is_flagged_individually() {
    let wf = wired(node_with_params(
        "slack",
        t::SLACK,
        450.0,
        json!({ "resource": "message", "text": "hello" }),
    ));
    let result = validate::validate(&wf);
    assert!(result.has_code("MISSING_REQUIRED_PARAMETER"));
}

#[test]
fn wrong_primitive_type_is_an_error() {
    let wf = wired(node_with_params(
        "http",
        t::HTTP_REQUEST,
        450.0,
        json!({ "url": 42 }),
    ));
    let result = validate::validate(&wf);
    assert!(result.has_code("INVALID_PARAMETER_TYPE"));
}

#[test]
fn unknown_option_value_is_only_a_warning() {
    let wf = wired(node_with_params(
        "sheets",
        t::GOOGLE_SHEETS,
        450.0,
        json!({ "operation": "transmogrify", "documentId": "abc", "sheetName": "Sheet1" }),
    ));
    let result = validate::validate(&wf);
    assert!(result.warnings.iter().any(|i| i.code == "INVALID_OPTION_VALUE"));
    assert!(!result.errors.iter().any(|i| i.code == "INVALID_OPTION_VALUE"));
}

#[test]
fn expression_values_bypass_type_checks() {
    let wf = wired(node_with_params(
        "http",
        t::HTTP_REQUEST,
        450.0,
        json!({ "url": "={{ $json.endpoint }}", "method": "GET" }),
    ));
    let result = validate::validate(&wf);
    assert!(!result.has_code("INVALID_PARAMETER_TYPE"));
    assert!(!result.has_code("INVALID_URL"));
}

#[test]
fn relative_url_gets_a_soft_warning() {
    let wf = wired(node_with_params(
        "http",
        t::HTTP_REQUEST,
        450.0,
        json!({ "url": "api.example.com/status", "method": "GET" }),
    ));
    let result = validate::validate(&wf);
    assert!(result.warnings.iter().any(|i| i.code == "INVALID_URL"));
}

#[test]
fn blank_webhook_path_is_an_error() {
    let mut wf = workflow(vec![node_with_params(
        "hook",
        t::WEBHOOK,
        250.0,
        json!({ "path": "   ", "httpMethod": "POST" }),
    )]);
    connect(&mut wf, "hook", "hook");
    let result = validate::validate(&wf);
    assert!(result.has_code("MISSING_WEBHOOK_PATH"));
}

#[test]
fn mail_nodes_require_recipient_and_want_a_subject() {
    let wf = wired(node_with_params(
        "mail",
        t::EMAIL_SEND,
        450.0,
        json!({ "fromEmail": "bot@example.com", "toEmail": "  ", "text": "hi" }),
    ));
    let result = validate::validate(&wf);
    assert!(result.errors.iter().any(|i| i.code == "MISSING_EMAIL_RECIPIENT"));
    assert!(result.warnings.iter().any(|i| i.code == "MISSING_EMAIL_SUBJECT"));
}

#[test]
fn messaging_nodes_want_message_text() {
    let wf = wired(node_with_params(
        "tg",
        t::TELEGRAM,
        450.0,
        json!({ "chatId": "12345" }),
    ));
    let result = validate::validate(&wf);
    assert!(result.warnings.iter().any(|i| i.code == "MISSING_MESSAGE_TEXT"));
}

#[test]
fn conditional_without_conditions_is_an_error() {
    let wf = wired(node_with_params(
        "gate",
        t::IF,
        450.0,
        json!({ "conditions": [], "combineOperation": "all" }),
    ));
    let result = validate::validate(&wf);
    assert!(result.has_code("MISSING_CONDITIONS"));
}

#[test]
fn code_node_warns_on_empty_and_default_bodies() {
    let empty = wired(node_with_params("code", t::CODE, 450.0, json!({ "jsCode": "" })));
    assert!(validate::validate(&empty).has_code("EMPTY_CODE_BODY"));

    let templated = wired(node_with_params(
        "code",
        t::CODE,
        450.0,
        json!({ "jsCode": CODE_TEMPLATE }),
    ));
    let result = validate::validate(&templated);
    assert!(result.warnings.iter().any(|i| i.code == "DEFAULT_CODE_BODY"));
    assert!(result.is_valid());
}

#[test]
fn integration_nodes_without_credentials_warn() {
    let wf = wired(node_with_params(
        "slack",
        t::SLACK,
        450.0,
        json!({ "channel": "#ops", "text": "hi" }),
    ));
    let result = validate::validate(&wf);
    assert!(result.warnings.iter().any(|i| i.code == "MISSING_CREDENTIALS"));
}

#[test]
fn credential_exempt_types_do_not_warn() {
    let wf = wired(node_with_params(
        "http",
        t::HTTP_REQUEST,
        450.0,
        json!({ "url": "https://api.example.com", "method": "GET" }),
    ));
    let result = validate::validate(&wf);
    assert!(!result.has_code("MISSING_CREDENTIALS"));
}
