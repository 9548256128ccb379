//! Graph-theoretic analysis of the connection map.
//!
//! `GraphAnalysis` is a derived, disposable view: recomputed from the
//! current workflow state on every call, never persisted or cached.

use std::collections::HashSet;

use petgraph::algo::is_cyclic_directed;
use petgraph::visit::Bfs;
use serde::Serialize;

use crate::parse::graph::WorkflowGraph;
use crate::parse::types::Workflow;
use crate::registry::NodeRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedConnection {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphAnalysis {
    pub has_trigger: bool,
    /// Trigger node ids in declaration order.
    pub trigger_nodes: Vec<String>,
    pub orphaned_nodes: Vec<String>,
    /// Non-trigger nodes not reachable from any trigger. A fully
    /// disconnected node appears in both lists.
    pub unreachable_nodes: Vec<String>,
    pub circular_references: bool,
    pub all_nodes_connected: bool,
    pub missing_connections: Vec<SuggestedConnection>,
}

pub fn analyze(workflow: &Workflow) -> GraphAnalysis {
    let registry = NodeRegistry::global();
    let graph = WorkflowGraph::build(workflow);

    let trigger_nodes: Vec<String> = workflow
        .nodes
        .iter()
        .filter_map(|node| {
            let id = node.id()?;
            let def = registry.get(node.node_type()?)?;
            def.is_trigger().then(|| id.to_string())
        })
        .collect();
    let trigger_set: HashSet<&str> = trigger_nodes.iter().map(String::as_str).collect();

    // Orphan rule: a trigger with nothing downstream is useless; a regular
    // node is orphaned only when fully disconnected.
    let mut orphaned_nodes = Vec::new();
    for node in &workflow.nodes {
        let Some(id) = node.id() else { continue };
        let outgoing = graph.outgoing_count(id);
        let incoming = graph.incoming_count(id);
        let orphaned = if trigger_set.contains(id) {
            outgoing == 0
        } else {
            incoming == 0 && outgoing == 0
        };
        if orphaned {
            orphaned_nodes.push(id.to_string());
        }
    }
    let orphan_set: HashSet<&str> = orphaned_nodes.iter().map(String::as_str).collect();

    // Forward reachability from the union of all triggers.
    let mut reachable: HashSet<String> = HashSet::new();
    for trigger in &trigger_nodes {
        let Some(&start) = graph.node_indices.get(trigger) else {
            continue;
        };
        let mut bfs = Bfs::new(&graph.graph, start);
        while let Some(nx) = bfs.next(&graph.graph) {
            reachable.insert(graph.graph[nx].clone());
        }
    }

    let mut unreachable_nodes = Vec::new();
    for node in &workflow.nodes {
        let Some(id) = node.id() else { continue };
        if !trigger_set.contains(id) && !reachable.contains(id) {
            unreachable_nodes.push(id.to_string());
        }
    }

    // Existence is all that's required; loops may be intentional.
    let circular_references = is_cyclic_directed(&graph.graph);

    // Advisory only: positionally-adjacent pairs that look like a broken
    // sequence. The fixer re-derives its own repairs independently.
    let sorted = workflow.nodes_by_x();
    let mut missing_connections = Vec::new();
    for pair in sorted.windows(2) {
        let (earlier, later) = (pair[0].0, pair[1].0);
        if orphan_set.contains(earlier)
            || trigger_set.contains(later)
            || graph.has_edge(earlier, later)
        {
            continue;
        }
        missing_connections.push(SuggestedConnection {
            from: earlier.to_string(),
            to: later.to_string(),
        });
    }

    let all_nodes_connected = orphaned_nodes.is_empty() && unreachable_nodes.is_empty();

    GraphAnalysis {
        has_trigger: !trigger_nodes.is_empty(),
        trigger_nodes,
        orphaned_nodes,
        unreachable_nodes,
        circular_references,
        all_nodes_connected,
        missing_connections,
    }
}
