//! Graph analysis and graph-level validation rules.

mod helpers;

use flowdoctor::analyze;
use flowdoctor::registry::node_types as t;
use flowdoctor::validate;
use helpers::{connect, node, workflow};

#[test]
fn missing_trigger_is_an_error() {
    let mut wf = workflow(vec![
        node("a", t::SET, 250.0),
        node("b", t::NO_OP, 450.0),
    ]);
    connect(&mut wf, "a", "b");

    let analysis = analyze::analyze(&wf);
    assert!(!analysis.has_trigger);

    let result = validate::validate(&wf);
    assert!(result.has_code("NO_TRIGGER"));
}

#[test]
fn trigger_without_outgoing_edges_is_orphaned() {
    let mut wf = workflow(vec![
        node("trigger", t::MANUAL_TRIGGER, 250.0),
        node("a", t::NO_OP, 450.0),
        node("b", t::NO_OP, 650.0),
    ]);
    connect(&mut wf, "a", "b");

    let analysis = analyze::analyze(&wf);
    assert_eq!(analysis.orphaned_nodes, vec!["trigger".to_string()]);
}

#[test]
fn fully_disconnected_node_is_orphaned_and_unreachable() {
    let mut wf = workflow(vec![
        node("trigger", t::MANUAL_TRIGGER, 250.0),
        node("a", t::NO_OP, 450.0),
        node("island", t::NO_OP, 650.0),
    ]);
    connect(&mut wf, "trigger", "a");

    let analysis = analyze::analyze(&wf);
    assert_eq!(analysis.orphaned_nodes, vec!["island".to_string()]);
    assert_eq!(analysis.unreachable_nodes, vec!["island".to_string()]);
    assert!(!analysis.all_nodes_connected);
}

#[test]
fn node_with_edges_but_no_path_from_trigger_is_unreachable_only() {
    let mut wf = workflow(vec![
        node("trigger", t::MANUAL_TRIGGER, 250.0),
        node("a", t::NO_OP, 450.0),
        node("side", t::NO_OP, 650.0),
    ]);
    connect(&mut wf, "trigger", "a");
    connect(&mut wf, "side", "a");

    let analysis = analyze::analyze(&wf);
    assert!(analysis.orphaned_nodes.is_empty());
    assert_eq!(analysis.unreachable_nodes, vec!["side".to_string()]);

    let result = validate::validate(&wf);
    assert!(result.has_code("UNREACHABLE_NODE"));
    assert!(!result.has_code("ORPHANED_NODE"));
}

#[test]
fn triggers_are_exempt_from_reachability() {
    let mut wf = workflow(vec![
        node("trigger-a", t::MANUAL_TRIGGER, 250.0),
        node("trigger-b", t::WEBHOOK, 260.0),
        node("x", t::NO_OP, 450.0),
    ]);
    connect(&mut wf, "trigger-a", "x");
    connect(&mut wf, "trigger-b", "x");

    let analysis = analyze::analyze(&wf);
    assert_eq!(analysis.trigger_nodes.len(), 2);
    assert!(analysis.unreachable_nodes.is_empty());
    assert!(analysis.all_nodes_connected);
}

#[test]
fn cycle_is_reported_as_a_warning_not_an_error() {
    let mut wf = workflow(vec![
        node("trigger", t::MANUAL_TRIGGER, 250.0),
        node("a", t::NO_OP, 450.0),
        node("b", t::NO_OP, 650.0),
    ]);
    connect(&mut wf, "trigger", "a");
    connect(&mut wf, "a", "b");
    connect(&mut wf, "b", "a");

    let analysis = analyze::analyze(&wf);
    assert!(analysis.circular_references);

    let result = validate::validate(&wf);
    assert!(result.warnings.iter().any(|i| i.code == "CIRCULAR_REFERENCE"));
    assert!(result.is_valid(), "loops alone must not invalidate: {result:?}");
}

#[test]
fn cycle_detection_is_order_independent() {
    let build = |order: &[usize]| {
        let pool = [
            node("trigger", t::MANUAL_TRIGGER, 250.0),
            node("a", t::NO_OP, 450.0),
            node("b", t::NO_OP, 650.0),
        ];
        let mut wf = workflow(order.iter().map(|&i| pool[i].clone()).collect());
        connect(&mut wf, "trigger", "a");
        connect(&mut wf, "a", "b");
        connect(&mut wf, "b", "a");
        wf
    };

    for order in [[0, 1, 2], [2, 1, 0], [1, 2, 0]] {
        assert!(analyze::analyze(&build(&order)).circular_references);
    }
}

#[test]
fn dangling_source_and_target_are_flagged() {
    let mut wf = workflow(vec![
        node("trigger", t::MANUAL_TRIGGER, 250.0),
        node("a", t::NO_OP, 450.0),
    ]);
    connect(&mut wf, "trigger", "a");
    connect(&mut wf, "ghost-source", "a");
    connect(&mut wf, "a", "ghost-target");

    let result = validate::validate(&wf);
    assert!(result.has_code("INVALID_CONNECTION_SOURCE"));
    assert!(result.has_code("INVALID_CONNECTION_TARGET"));
    assert!(result.fixable());
}

#[test]
fn adjacent_unconnected_pair_yields_a_suggestion() {
    let mut wf = workflow(vec![
        node("trigger", t::MANUAL_TRIGGER, 250.0),
        node("a", t::NO_OP, 450.0),
        node("island", t::NO_OP, 650.0),
    ]);
    connect(&mut wf, "trigger", "a");

    let analysis = analyze::analyze(&wf);
    assert_eq!(analysis.missing_connections.len(), 1);
    assert_eq!(analysis.missing_connections[0].from, "a");
    assert_eq!(analysis.missing_connections[0].to, "island");

    // Advisory only: info severity and no fix hint of its own.
    let result = validate::validate(&wf);
    let suggestion = result
        .info
        .iter()
        .find(|i| i.code == "SUGGESTED_CONNECTION")
        .expect("should suggest a -> island");
    assert!(suggestion.fix.is_none());
}

#[test]
fn orphaned_predecessors_do_not_generate_suggestions() {
    let wf = workflow(vec![
        node("trigger", t::MANUAL_TRIGGER, 250.0),
        node("a", t::NO_OP, 450.0),
    ]);
    // Both disconnected: the trigger is orphaned, so no suggestion is made.
    let analysis = analyze::analyze(&wf);
    assert!(analysis.missing_connections.is_empty());
}
