//! Parameter auto-filler: registry defaults, keyword placeholders,
//! per-type corrective defaults, and normalization.

mod helpers;

use flowdoctor::fix::parameters::CODE_TEMPLATE;
use flowdoctor::fix::{RandomIds, fill_parameters};
use flowdoctor::parse::types::Node;
use flowdoctor::registry::node_types as t;
use helpers::{node, node_with_params, workflow};
use serde_json::{Map, json};

#[test]
fn registry_defaults_win_over_synthetic_placeholders() {
    let mut wf = workflow(vec![node_with_params(
        "sheets",
        t::GOOGLE_SHEETS,
        250.0,
        json!({}),
    )]);
    let mut ids = RandomIds::seeded(1);
    fill_parameters(&mut wf, &mut ids);

    let sheets = &wf.nodes[0];
    // sheetName declares a default; documentId falls back to the id template.
    assert_eq!(sheets.param_str("sheetName"), Some("Sheet1"));
    assert_eq!(sheets.param_str("documentId"), Some("={{ $json.id }}"));
}

#[test]
fn keyword_templates_match_parameter_names() {
    let mut wf = workflow(vec![
        node_with_params("mail", t::EMAIL_SEND, 250.0, json!({})),
        node_with_params("slack", t::SLACK, 450.0, json!({})),
    ]);
    let mut ids = RandomIds::seeded(1);
    fill_parameters(&mut wf, &mut ids);

    let mail = &wf.nodes[0];
    assert_eq!(
        mail.param_str("toEmail"),
        Some("={{ $json.email || \"user@example.com\" }}")
    );

    // Declared placeholders beat the keyword rules.
    let slack = &wf.nodes[1];
    assert_eq!(slack.param_str("channel"), Some("#general"));
}

#[test]
fn http_request_gets_a_read_method_and_url_template() {
    let mut wf = workflow(vec![node_with_params(
        "http",
        t::HTTP_REQUEST,
        250.0,
        json!({}),
    )]);
    let mut ids = RandomIds::seeded(1);
    fill_parameters(&mut wf, &mut ids);

    let http = &wf.nodes[0];
    assert_eq!(http.param_str("method"), Some("GET"));
    assert_eq!(
        http.param_str("url"),
        Some("={{ $json.url || \"https://example.com\" }}")
    );
}

#[test]
fn webhook_gets_a_post_method_and_a_suffixed_path() {
    let mut wf = workflow(vec![node_with_params(
        "hook",
        t::WEBHOOK,
        250.0,
        json!({ "path": "" }),
    )]);
    let mut ids = RandomIds::seeded(42);
    fill_parameters(&mut wf, &mut ids);

    let hook = &wf.nodes[0];
    assert_eq!(hook.param_str("httpMethod"), Some("POST"));
    let path = hook.param_str("path").expect("path must be filled");
    assert!(path.starts_with("webhook-"), "got: {path}");
    assert!(path.len() > "webhook-".len());
}

#[test]
fn seeded_generators_repair_identically() {
    let build = || {
        workflow(vec![node_with_params(
            "hook",
            t::WEBHOOK,
            250.0,
            json!({}),
        )])
    };
    let mut a = build();
    let mut b = build();
    fill_parameters(&mut a, &mut RandomIds::seeded(7));
    fill_parameters(&mut b, &mut RandomIds::seeded(7));
    assert_eq!(a.nodes[0].param_str("path"), b.nodes[0].param_str("path"));
}

#[test]
fn conditional_gets_one_placeholder_condition() {
    let mut wf = workflow(vec![node_with_params(
        "gate",
        t::IF,
        250.0,
        json!({ "conditions": [] }),
    )]);
    let mut ids = RandomIds::seeded(1);
    fill_parameters(&mut wf, &mut ids);

    let conditions = wf.nodes[0]
        .param("conditions")
        .and_then(|v| v.as_array())
        .expect("conditions must be an array");
    assert_eq!(conditions.len(), 1);
}

#[test]
fn empty_code_body_gets_the_documented_template() {
    let mut wf = workflow(vec![node_with_params(
        "code",
        t::CODE,
        250.0,
        json!({ "jsCode": "  " }),
    )]);
    let mut ids = RandomIds::seeded(1);
    fill_parameters(&mut wf, &mut ids);

    assert_eq!(wf.nodes[0].param_str("jsCode"), Some(CODE_TEMPLATE));
}

#[test]
fn set_values_are_never_overwritten() {
    let mut wf = workflow(vec![node_with_params(
        "http",
        t::HTTP_REQUEST,
        250.0,
        json!({ "url": "https://internal.example.com", "method": "POST" }),
    )]);
    let mut ids = RandomIds::seeded(1);
    let report = fill_parameters(&mut wf, &mut ids);

    let http = &wf.nodes[0];
    assert_eq!(http.param_str("url"), Some("https://internal.example.com"));
    assert_eq!(http.param_str("method"), Some("POST"));
    assert!(report.filled.is_empty(), "nothing to fill: {report:?}");
}

#[test]
fn bare_nodes_are_normalized() {
    let bare = Node {
        id: None,
        name: None,
        node_type: Some(t::NO_OP.into()),
        type_version: None,
        position: None,
        parameters: None,
        credentials: None,
        extra: Map::new(),
    };
    let mut wf = workflow(vec![node("trigger", t::MANUAL_TRIGGER, 250.0), bare]);
    let mut ids = RandomIds::seeded(3);
    fill_parameters(&mut wf, &mut ids);

    let fixed = &wf.nodes[1];
    assert!(fixed.id().expect("id generated").starts_with("node-"));
    assert_eq!(fixed.name(), Some("No Operation"));
    assert_eq!(fixed.type_version, Some(1.0));
    assert_eq!(fixed.position.as_ref().map(Vec::len), Some(2));
    assert!(fixed.parameters.is_some());
}

#[test]
fn document_fields_are_normalized() {
    let mut wf = workflow(vec![node("trigger", t::MANUAL_TRIGGER, 250.0)]);
    wf.name = None;
    wf.id = None;
    wf.active = None;
    wf.settings = None;

    let mut ids = RandomIds::seeded(3);
    let report = fill_parameters(&mut wf, &mut ids);

    assert_eq!(wf.name.as_deref(), Some("My workflow"));
    assert!(wf.id.is_some());
    assert_eq!(wf.active, Some(false));
    assert!(wf.settings.is_some());
    assert_eq!(report.normalized.len(), 4);
}
