//! Connection auto-fix: dangling-reference removal followed by positional
//! reconnection heuristics.
//!
//! Repairs are sequenced so each stage works from a consistent view: prune,
//! re-analyze, then reconnect orphans, unreachable nodes, and silent
//! triggers, and finally sweep positionally-adjacent pairs that are still
//! isolated. Every added connection lands on the default `main` slot and is
//! idempotent over the `(source, slot, target)` triple.

use std::collections::HashSet;

use serde::Serialize;

use crate::analyze;
use crate::parse::types::{ConnectionMap, ConnectionTarget, PortMap, Workflow};
use crate::registry::NodeRegistry;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovedConnection {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub reason: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedConnection {
    pub source: String,
    pub target: String,
    pub reason: &'static str,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionFixReport {
    pub removed: Vec<RemovedConnection>,
    pub added: Vec<AddedConnection>,
}

impl ConnectionFixReport {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }

    pub fn change_count(&self) -> usize {
        self.removed.len() + self.added.len()
    }
}

pub fn fix_connections(workflow: &mut Workflow) -> ConnectionFixReport {
    let mut report = ConnectionFixReport::default();
    let registry = NodeRegistry::global();

    let node_ids: HashSet<String> = workflow
        .node_ids()
        .into_iter()
        .map(String::from)
        .collect();

    // Stage 1: drop references to nodes that do not exist.
    let mut connections = workflow.connections.take().unwrap_or_default();
    remove_dangling(&mut connections, &node_ids, &mut report);
    workflow.connections = Some(connections);

    // Stage 2: a fresh analysis of the pruned graph drives the repairs.
    let analysis = analyze::analyze(workflow);
    let trigger_set: HashSet<&str> = analysis.trigger_nodes.iter().map(String::as_str).collect();
    let first_trigger = analysis.trigger_nodes.first().cloned();
    let sorted: Vec<(String, f64)> = workflow
        .nodes_by_x()
        .into_iter()
        .map(|(id, x)| (id.to_string(), x))
        .collect();
    let branching: HashSet<&str> = workflow
        .nodes
        .iter()
        .filter_map(|n| {
            let def = registry.get(n.node_type()?)?;
            def.is_branching().then(|| n.id()).flatten()
        })
        .collect();

    let mut connections = workflow.connections.take().unwrap_or_default();

    // Stage 3: reconnect orphans through their positional neighbors.
    for orphan in &analysis.orphaned_nodes {
        if trigger_set.contains(orphan.as_str()) {
            if let Some(succ) = successor_of(&sorted, orphan) {
                add_connection(&mut connections, orphan, &succ, "reconnect orphaned trigger", &mut report);
            }
        } else {
            if let Some(pred) = predecessor_of(&sorted, orphan) {
                add_connection(&mut connections, &pred, orphan, "reconnect orphaned node", &mut report);
            }
            if let Some(succ) = successor_of(&sorted, orphan) {
                add_connection(&mut connections, orphan, &succ, "reconnect orphaned node", &mut report);
            }
        }
    }

    // Stage 4: give unreachable nodes an upstream edge, falling back to the
    // first-declared trigger when nothing sits before them.
    for id in &analysis.unreachable_nodes {
        if let Some(pred) = predecessor_of(&sorted, id) {
            add_connection(&mut connections, &pred, id, "reconnect unreachable node", &mut report);
        } else if let Some(trigger) = &first_trigger {
            add_connection(&mut connections, trigger, id, "reconnect unreachable node", &mut report);
        }
    }

    // Stage 5: no trigger may remain without a downstream edge.
    for trigger in &analysis.trigger_nodes {
        if out_degree(&connections, trigger) == 0
            && let Some(succ) = successor_of(&sorted, trigger)
        {
            add_connection(&mut connections, trigger, &succ, "connect silent trigger", &mut report);
        }
    }

    // Stage 6: sequential sweep over adjacent pairs that are still isolated.
    // Branch-output predecessors are exempt: collapsing their slots into one
    // inferred successor would silently discard branch logic.
    for pair in sorted.windows(2) {
        let (current, next) = (pair[0].0.as_str(), pair[1].0.as_str());
        if has_edge(&connections, current, next)
            || trigger_set.contains(next)
            || branching.contains(current)
        {
            continue;
        }
        if out_degree(&connections, current) > 0 && in_degree(&connections, next) > 0 {
            continue;
        }
        add_connection(&mut connections, current, next, "sequential connection", &mut report);
    }

    workflow.connections = Some(connections);

    tracing::debug!(
        removed = report.removed.len(),
        added = report.added.len(),
        "connection auto-fix complete"
    );
    report
}

fn remove_dangling(
    connections: &mut ConnectionMap,
    node_ids: &HashSet<String>,
    report: &mut ConnectionFixReport,
) {
    connections.retain(|source, _| {
        let keep = node_ids.contains(source);
        if !keep {
            report.removed.push(RemovedConnection {
                source: source.clone(),
                slot: None,
                target: None,
                reason: "unknown source node",
            });
        }
        keep
    });

    for (source, ports) in connections.iter_mut() {
        for (slot, groups) in ports.iter_mut() {
            for targets in groups.iter_mut() {
                targets.retain(|target| {
                    let keep = node_ids.contains(&target.node);
                    if !keep {
                        report.removed.push(RemovedConnection {
                            source: source.clone(),
                            slot: Some(slot.clone()),
                            target: Some(target.node.clone()),
                            reason: "unknown target node",
                        });
                    }
                    keep
                });
            }
        }
    }
}

/// Smallest x strictly greater than the node's own, among all nodes.
fn successor_of(sorted: &[(String, f64)], id: &str) -> Option<String> {
    let x = sorted.iter().find(|(n, _)| n == id)?.1;
    sorted
        .iter()
        .find(|(_, other)| *other > x)
        .map(|(n, _)| n.clone())
}

/// Largest x strictly smaller than the node's own, among all nodes.
fn predecessor_of(sorted: &[(String, f64)], id: &str) -> Option<String> {
    let x = sorted.iter().find(|(n, _)| n == id)?.1;
    sorted
        .iter()
        .rev()
        .find(|(_, other)| *other < x)
        .map(|(n, _)| n.clone())
}

fn add_connection(
    connections: &mut ConnectionMap,
    source: &str,
    target: &str,
    reason: &'static str,
    report: &mut ConnectionFixReport,
) {
    if has_edge(connections, source, target) {
        return;
    }
    let groups = connections
        .entry(source.to_string())
        .or_default()
        .entry("main".to_string())
        .or_default();
    if groups.is_empty() {
        groups.push(Vec::new());
    }
    groups[0].push(ConnectionTarget::to_node(target));
    report.added.push(AddedConnection {
        source: source.to_string(),
        target: target.to_string(),
        reason,
    });
}

fn has_edge(connections: &ConnectionMap, source: &str, target: &str) -> bool {
    connections
        .get(source)
        .is_some_and(|ports| all_targets(ports).any(|t| t.node == target))
}

fn out_degree(connections: &ConnectionMap, id: &str) -> usize {
    connections
        .get(id)
        .map(|ports| all_targets(ports).count())
        .unwrap_or(0)
}

fn in_degree(connections: &ConnectionMap, id: &str) -> usize {
    connections
        .values()
        .flat_map(all_targets)
        .filter(|t| t.node == id)
        .count()
}

fn all_targets(ports: &PortMap) -> impl Iterator<Item = &ConnectionTarget> {
    ports.values().flatten().flatten()
}
