//! Circuit graph model.
//!
//! A [`Circuit`] is the ordered pairing of placed components and the wires
//! between their pins. It doubles as the mutable model a canvas host drives
//! (place, wire, recolor, delete with cascade) and as the immutable snapshot
//! the validator and serializer read. Component and connection order is
//! insertion order and is never normalized; every downstream projection
//! iterates in that order.

pub mod connectivity;

pub use connectivity::Connectivity;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors for editor-contract violations. The read-only core (validation,
/// serialization) never returns these; it tolerates bad snapshots instead.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("unknown component: {0}")]
    UnknownComponent(String),
    #[error("duplicate id: {0}")]
    DuplicateId(String),
    #[error("connection joins pin {pin} of {component} to itself")]
    SelfLoop { component: String, pin: String },
}

/// A placed component instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Opaque unique id, stable for the component's lifetime.
    pub id: String,
    /// Template tag, e.g. `arduinoUno`, `servoMotor`, `customComponent`.
    pub kind: String,
    /// Display name; falls back to `kind` when unset.
    pub label: Option<String>,
}

impl Component {
    /// Create a component of the given kind with a generated id.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: kind.into(),
            label: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The label shown to users, defaulting to the kind.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.kind)
    }
}

/// A wire between two pins on two components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    /// Id of the component the wire starts at.
    pub source: String,
    /// Pin id on the source component's template.
    pub source_pin: String,
    /// Id of the component the wire ends at.
    pub target: String,
    /// Pin id on the target component's template.
    pub target_pin: String,
    /// Display color; no effect on validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Connection {
    /// Create a connection with a generated id.
    pub fn new(
        source: impl Into<String>,
        source_pin: impl Into<String>,
        target: impl Into<String>,
        target_pin: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            source: source.into(),
            source_pin: source_pin.into(),
            target: target.into(),
            target_pin: target_pin.into(),
            color: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// True if either endpoint references the given component id.
    pub fn involves(&self, component_id: &str) -> bool {
        self.source == component_id || self.target == component_id
    }
}

/// Circuit metadata carried alongside the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitMetadata {
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Default for CircuitMetadata {
    fn default() -> Self {
        Self {
            name: None,
            created_at: Utc::now(),
        }
    }
}

/// The graph snapshot: ordered component and connection collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circuit {
    pub metadata: CircuitMetadata,
    components: Vec<Component>,
    connections: Vec<Connection>,
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

impl Circuit {
    pub fn new() -> Self {
        Self {
            metadata: CircuitMetadata::default(),
            components: Vec::new(),
            connections: Vec::new(),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        let mut circuit = Self::new();
        circuit.metadata.name = Some(name.into());
        circuit
    }

    /// Build a circuit directly from already-materialized collections.
    ///
    /// No invariants are checked: a host that hands over a snapshot with
    /// dangling connection endpoints gets a circuit the validator and
    /// serializer will still process without failing.
    pub fn from_parts(components: Vec<Component>, connections: Vec<Connection>) -> Self {
        Self {
            metadata: CircuitMetadata::default(),
            components,
            connections,
        }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.connections.is_empty()
    }

    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn component_mut(&mut self, id: &str) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.id == id)
    }

    pub fn connection(&self, id: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    pub fn connection_mut(&mut self, id: &str) -> Option<&mut Connection> {
        self.connections.iter_mut().find(|c| c.id == id)
    }

    /// Append a component, preserving placement order. Returns its id.
    pub fn add_component(&mut self, component: Component) -> Result<String, GraphError> {
        if self.component(&component.id).is_some() {
            return Err(GraphError::DuplicateId(component.id));
        }
        let id = component.id.clone();
        self.components.push(component);
        Ok(id)
    }

    /// Append a connection, preserving wiring order. Returns its id.
    ///
    /// Both endpoints must exist, and a component may connect to itself
    /// only through two different pins.
    pub fn add_connection(&mut self, connection: Connection) -> Result<String, GraphError> {
        if self.connection(&connection.id).is_some() {
            return Err(GraphError::DuplicateId(connection.id));
        }
        if self.component(&connection.source).is_none() {
            return Err(GraphError::UnknownComponent(connection.source));
        }
        if self.component(&connection.target).is_none() {
            return Err(GraphError::UnknownComponent(connection.target));
        }
        if connection.source == connection.target
            && connection.source_pin == connection.target_pin
        {
            return Err(GraphError::SelfLoop {
                component: connection.source,
                pin: connection.source_pin,
            });
        }
        let id = connection.id.clone();
        self.connections.push(connection);
        Ok(id)
    }

    /// Remove a component and every connection that references it, so the
    /// snapshot never holds a dangling wire.
    pub fn remove_component(&mut self, id: &str) -> Option<Component> {
        let index = self.components.iter().position(|c| c.id == id)?;
        let removed = self.components.remove(index);
        let before = self.connections.len();
        self.connections.retain(|c| !c.involves(id));
        tracing::debug!(
            component = id,
            cascaded = before - self.connections.len(),
            "removed component"
        );
        Some(removed)
    }

    pub fn remove_connection(&mut self, id: &str) -> Option<Connection> {
        let index = self.connections.iter().position(|c| c.id == id)?;
        Some(self.connections.remove(index))
    }

    /// Recolor a wire. Returns false when the connection does not exist.
    pub fn set_connection_color(&mut self, id: &str, color: impl Into<String>) -> bool {
        match self.connection_mut(id) {
            Some(connection) => {
                connection.color = Some(color.into());
                true
            }
            None => false,
        }
    }

    /// Undirected connectivity projection for analysis queries.
    pub fn connectivity(&self) -> Connectivity {
        Connectivity::build(self)
    }
}
