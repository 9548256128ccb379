#![allow(dead_code)]

use flowdoctor::parse::types::{ConnectionTarget, Node, Workflow};
use serde_json::{Map, Value, json};

/// A fully-populated node: id, name, typeVersion, position, empty parameters.
pub fn node(id: &str, type_name: &str, x: f64) -> Node {
    Node {
        id: Some(id.into()),
        name: Some(format!("{id} node")),
        node_type: Some(type_name.into()),
        type_version: Some(1.0),
        position: Some(vec![x, 300.0]),
        parameters: Some(Map::new()),
        credentials: None,
        extra: Map::new(),
    }
}

pub fn node_with_params(id: &str, type_name: &str, x: f64, params: Value) -> Node {
    let mut n = node(id, type_name, x);
    n.parameters = params.as_object().cloned();
    n
}

/// A document with every recommended top-level field present.
pub fn workflow(nodes: Vec<Node>) -> Workflow {
    Workflow {
        name: Some("Test Workflow".into()),
        nodes,
        connections: Some(Default::default()),
        active: Some(false),
        settings: Some(json!({})),
        id: Some("wf-test".into()),
        meta: None,
        tags: None,
        extra: Map::new(),
    }
}

/// Adds `source -> target` on the default main slot, group 0.
pub fn connect(workflow: &mut Workflow, source: &str, target: &str) {
    let connections = workflow.connections.get_or_insert_with(Default::default);
    let groups = connections
        .entry(source.to_string())
        .or_default()
        .entry("main".to_string())
        .or_default();
    if groups.is_empty() {
        groups.push(Vec::new());
    }
    groups[0].push(ConnectionTarget::to_node(target));
}

/// True when `source -> target` exists on any slot of the connection map.
pub fn has_edge(workflow: &Workflow, source: &str, target: &str) -> bool {
    workflow
        .connections
        .as_ref()
        .and_then(|c| c.get(source))
        .is_some_and(|ports| {
            ports
                .values()
                .flatten()
                .flatten()
                .any(|t| t.node == target)
        })
}

/// Every `{node: id}` reference inside the connection map names a real node.
pub fn references_are_sound(workflow: &Workflow) -> bool {
    let ids = workflow.node_ids();
    let Some(connections) = &workflow.connections else {
        return true;
    };
    connections.iter().all(|(source, ports)| {
        ids.contains(source.as_str())
            && ports
                .values()
                .flatten()
                .flatten()
                .all(|t| ids.contains(t.node.as_str()))
    })
}
