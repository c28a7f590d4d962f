//! Undirected connectivity projection over a circuit snapshot.
//!
//! Built on petgraph for degree, neighborhood, and grouping queries the
//! canvas host and CLI summary use. Connections whose endpoints are missing
//! from the snapshot are skipped, matching the validator's tolerance rule.

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use petgraph::visit::{EdgeRef, NodeIndexable};

use super::Circuit;

pub struct Connectivity {
    graph: UnGraph<String, String>,
    indices: HashMap<String, NodeIndex>,
}

impl Connectivity {
    pub fn build(circuit: &Circuit) -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut indices = HashMap::new();

        for component in circuit.components() {
            let index = graph.add_node(component.id.clone());
            indices.insert(component.id.clone(), index);
        }
        for connection in circuit.connections() {
            match (indices.get(&connection.source), indices.get(&connection.target)) {
                (Some(&source), Some(&target)) => {
                    graph.add_edge(source, target, connection.id.clone());
                }
                // Dangling endpoint: the wire contributes nothing.
                _ => {}
            }
        }

        Self { graph, indices }
    }

    /// Number of wires attached to the component (self-loops count once).
    pub fn degree(&self, component_id: &str) -> usize {
        self.indices
            .get(component_id)
            .map_or(0, |&index| self.graph.edges(index).count())
    }

    /// Component ids wired to the given component, in wiring order,
    /// deduplicated.
    pub fn neighbors(&self, component_id: &str) -> Vec<&str> {
        let Some(&index) = self.indices.get(component_id) else {
            return Vec::new();
        };
        let mut seen = Vec::new();
        for neighbor in self.graph.neighbors(index) {
            let id = self.graph[neighbor].as_str();
            if !seen.contains(&id) {
                seen.push(id);
            }
        }
        seen
    }

    /// Components with no wires at all, in placement order.
    pub fn isolated(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .filter(|&index| self.graph.edges(index).next().is_none())
            .map(|index| self.graph[index].as_str())
            .collect()
    }

    /// Groups of mutually-reachable components, in placement order within
    /// and across groups.
    pub fn groups(&self) -> Vec<Vec<String>> {
        let mut sets = UnionFind::new(self.graph.node_bound());
        for edge in self.graph.edge_references() {
            sets.union(edge.source().index(), edge.target().index());
        }

        let mut group_of_root: HashMap<usize, usize> = HashMap::new();
        let mut groups: Vec<Vec<String>> = Vec::new();
        for index in self.graph.node_indices() {
            let root = sets.find(index.index());
            let slot = *group_of_root.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(self.graph[index].clone());
        }
        groups
    }

    pub fn component_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn wire_count(&self) -> usize {
        self.graph.edge_count()
    }
}
