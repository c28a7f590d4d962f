//! Wirecheck - connection validation and serialization core for visual
//! circuit builders.
//!
//! This library is the semantic heart of a drag-and-drop microcontroller
//! wiring tool: it classifies pins by their identifier, checks every wire
//! of a circuit against an ordered table of compatibility rules, and
//! projects the graph into deterministic textual forms for display and for
//! external analysis consumers.
//!
//! # Quick Start
//!
//! ```
//! use wirecheck::prelude::*;
//! use wirecheck::graph::{Component, Connection};
//!
//! let mut circuit = Circuit::new();
//! let board = circuit
//!     .add_component(Component::new("arduinoUno"))
//!     .unwrap();
//! let servo = circuit
//!     .add_component(Component::new("servoMotor"))
//!     .unwrap();
//! circuit
//!     .add_connection(Connection::new(&board, "5V", &servo, "GND"))
//!     .unwrap();
//!
//! let result = WirecheckCore::validate(&circuit);
//! assert!(result.has_errors()); // power wired straight to ground
//! for item in &result.feedback {
//!     println!("{:?}: {}", item.severity, item.message);
//! }
//! ```
//!
//! # Features
//!
//! - **Pin classification**: power/ground/GPIO/analog/signal roles from
//!   raw pin identifiers
//! - **Connection validation**: short circuits, voltage mismatches, and
//!   miswired signal pins, plus component-specific rule sets
//! - **Serialization**: structured JSON and a compact line-oriented form,
//!   both order-preserving
//! - **Analysis boundary**: pluggable providers for deeper AI review
//!   (used by GUI/CLI hosts)

pub mod ai;
pub mod core;
pub mod graph;
pub mod pins;
pub mod rules;
pub mod serializer;
pub mod templates;

// Re-export main types
pub use crate::core::{
    Evaluation, ValidationOptions, ValidationResult, ValidationStats, WirecheckCore,
    WirecheckError,
};
pub use crate::graph::{Circuit, Component, Connection, GraphError};
pub use crate::pins::{classify, PinClass, PinRole};
pub use crate::rules::{Feedback, RuleEngine, Severity};
pub use crate::serializer::{describe, to_compact, to_json, CircuitDescription};
pub use crate::templates::{ComponentTemplate, TemplateLibrary};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Circuit, Feedback, RuleEngine, Severity, ValidationOptions, ValidationResult,
        WirecheckCore, WirecheckError,
    };
}
