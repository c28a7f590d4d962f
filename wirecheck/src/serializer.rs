//! Graph serialization.
//!
//! One projection step, [`describe`], turns a circuit snapshot into a
//! [`CircuitDescription`]; two independent formatters render it. The JSON
//! form is the interchange contract with external consumers (analysis
//! providers, code generators); the compact line form is a token-cheap
//! rendition of the same data for display and model prompts.
//!
//! Both formatters iterate nodes and connections in snapshot order (no
//! sorting, no deduplication) and emit byte-identical output for
//! identical input.

use serde::{Deserialize, Serialize};

use crate::graph::{Circuit, Component, Connection};

/// Projection of a circuit snapshot: exactly the fields downstream
/// consumers see, in snapshot order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CircuitDescription {
    pub nodes: Vec<NodeDescription>,
    pub connections: Vec<ConnectionDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescription {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDescription {
    pub source: String,
    pub source_pin: String,
    pub target: String,
    pub target_pin: String,
}

/// Project a snapshot. Labels default to the component kind; connection
/// ids and colors are display state and do not survive projection.
pub fn describe(circuit: &Circuit) -> CircuitDescription {
    CircuitDescription {
        nodes: circuit
            .components()
            .iter()
            .map(|component| NodeDescription {
                id: component.id.clone(),
                kind: component.kind.clone(),
                label: component.display_label().to_string(),
            })
            .collect(),
        connections: circuit
            .connections()
            .iter()
            .map(|connection| ConnectionDescription {
                source: connection.source.clone(),
                source_pin: connection.source_pin.clone(),
                target: connection.target.clone(),
                target_pin: connection.target_pin.clone(),
            })
            .collect(),
    }
}

/// Render the structured JSON form: stable key order, 2-space indentation.
pub fn to_json(description: &CircuitDescription) -> String {
    // Plain structs of strings; serialization cannot fail.
    serde_json::to_string_pretty(description).expect("description serializes to JSON")
}

/// Render the compact line-oriented form.
///
/// Values are concatenated raw: a label containing a comma will visually
/// misalign its row. That is a documented property of the format, kept so
/// output stays byte-for-byte predictable from the input.
pub fn to_compact(description: &CircuitDescription) -> String {
    let mut out = String::new();

    out.push_str("# NODES\n");
    out.push_str("id, type, label\n");
    for node in &description.nodes {
        out.push_str(&node.id);
        out.push_str(", ");
        out.push_str(&node.kind);
        out.push_str(", ");
        out.push_str(&node.label);
        out.push('\n');
    }

    out.push('\n');
    out.push_str("# CONNECTIONS\n");
    out.push_str("source, source_pin, target, target_pin\n");
    for connection in &description.connections {
        out.push_str(&connection.source);
        out.push_str(", ");
        out.push_str(&connection.source_pin);
        out.push_str(", ");
        out.push_str(&connection.target);
        out.push_str(", ");
        out.push_str(&connection.target_pin);
        out.push('\n');
    }

    out
}

impl CircuitDescription {
    /// Hydrate a description back into an editable circuit. Connections
    /// get fresh ids; colors are not part of the description.
    pub fn to_circuit(&self) -> Circuit {
        let components = self
            .nodes
            .iter()
            .map(|node| {
                Component::new(&node.kind)
                    .with_id(&node.id)
                    .with_label(&node.label)
            })
            .collect();
        let connections = self
            .connections
            .iter()
            .map(|c| Connection::new(&c.source, &c.source_pin, &c.target, &c.target_pin))
            .collect();
        Circuit::from_parts(components, connections)
    }
}
