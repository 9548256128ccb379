//! petgraph-based directed adjacency view of the connection map.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use super::types::Workflow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeLabel {
    pub slot: String,
    pub group: usize,
}

/// Flattened view: one edge per `{node: target}` entry across every output
/// slot and parallel group. Only resolvable edges are present; dangling
/// references are the graph-rule validator's concern, checked against the
/// raw connection map.
pub struct WorkflowGraph {
    pub graph: DiGraph<String, EdgeLabel>,
    pub node_indices: HashMap<String, NodeIndex>,
}

impl WorkflowGraph {
    pub fn build(workflow: &Workflow) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();

        for node in &workflow.nodes {
            let Some(id) = node.id() else { continue };
            node_indices
                .entry(id.to_string())
                .or_insert_with(|| graph.add_node(id.to_string()));
        }

        if let Some(connections) = &workflow.connections {
            for (source, ports) in connections {
                let Some(&source_idx) = node_indices.get(source) else {
                    continue;
                };
                for (slot, groups) in ports {
                    for (group, targets) in groups.iter().enumerate() {
                        for target in targets {
                            let Some(&target_idx) = node_indices.get(&target.node) else {
                                continue;
                            };
                            graph.add_edge(
                                source_idx,
                                target_idx,
                                EdgeLabel {
                                    slot: slot.clone(),
                                    group,
                                },
                            );
                        }
                    }
                }
            }
        }

        WorkflowGraph {
            graph,
            node_indices,
        }
    }

    pub fn successors(&self, node_id: &str) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return vec![];
        };
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .map(|n| self.graph[n].as_str())
            .collect()
    }

    pub fn predecessors(&self, node_id: &str) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return vec![];
        };
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .map(|n| self.graph[n].as_str())
            .collect()
    }

    pub fn incoming_count(&self, node_id: &str) -> usize {
        self.predecessors(node_id).len()
    }

    pub fn outgoing_count(&self, node_id: &str) -> usize {
        self.successors(node_id).len()
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        match (self.node_indices.get(source), self.node_indices.get(target)) {
            (Some(&s), Some(&t)) => self.graph.find_edge(s, t).is_some(),
            _ => false,
        }
    }
}
