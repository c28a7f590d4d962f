//! Component templates.
//!
//! A template describes a droppable component: its kind tag, display name,
//! color, and pin list with the side each pin header sits on. The builtin
//! boards ship as JSON embedded at compile time; hosts register further
//! templates (e.g. user-defined components extracted from a datasheet) at
//! runtime. Persisting user templates is the host's concern; the library
//! only holds the in-memory registry it is handed.

use serde::{Deserialize, Serialize};

use crate::graph::Component;

const EMBEDDED_ARDUINO_UNO: &str = include_str!("../templates/arduino_uno.json");
const EMBEDDED_ARDUINO_NANO: &str = include_str!("../templates/arduino_nano.json");
const EMBEDDED_ESP32: &str = include_str!("../templates/esp32.json");
const EMBEDDED_SERVO_MOTOR: &str = include_str!("../templates/servo_motor.json");
const EMBEDDED_STEPPER_MOTOR: &str = include_str!("../templates/stepper_motor.json");

/// Which edge of the component a pin header sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinSide {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinSpec {
    /// Pin identifier, unique within the owning template.
    pub id: String,
    /// Label printed next to the pin.
    pub label: String,
    pub side: PinSide,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentTemplate {
    /// Tag stored on placed components, e.g. `arduinoUno`.
    pub kind: String,
    /// Display name, used as the label of placed components.
    pub name: String,
    /// Hex body color for rendering hosts.
    pub color: String,
    pub pins: Vec<PinSpec>,
}

impl ComponentTemplate {
    pub fn pin(&self, id: &str) -> Option<&PinSpec> {
        self.pins.iter().find(|p| p.id == id)
    }

    pub fn has_pin(&self, id: &str) -> bool {
        self.pin(id).is_some()
    }

    /// Create a placeable component from this template.
    pub fn instantiate(&self) -> Component {
        Component::new(&self.kind).with_label(&self.name)
    }
}

/// Parse the embedded builtin templates. A malformed entry is logged and
/// skipped rather than failing the whole set.
pub fn builtin_templates() -> Vec<ComponentTemplate> {
    let embedded = [
        EMBEDDED_ARDUINO_UNO,
        EMBEDDED_ARDUINO_NANO,
        EMBEDDED_ESP32,
        EMBEDDED_SERVO_MOTOR,
        EMBEDDED_STEPPER_MOTOR,
    ];

    let mut templates = Vec::new();
    for raw in embedded {
        match serde_json::from_str::<ComponentTemplate>(raw) {
            Ok(template) => templates.push(template),
            Err(e) => {
                tracing::warn!("failed to parse embedded component template: {}", e);
            }
        }
    }
    templates
}

/// Registry of available component templates, builtin plus host-supplied.
pub struct TemplateLibrary {
    templates: Vec<ComponentTemplate>,
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self {
            templates: Vec::new(),
        }
    }

    pub fn with_builtins() -> Self {
        Self {
            templates: builtin_templates(),
        }
    }

    /// Register a template, replacing any existing template of the same
    /// kind (re-importing a user component updates it in place).
    pub fn register(&mut self, template: ComponentTemplate) {
        match self.templates.iter_mut().find(|t| t.kind == template.kind) {
            Some(slot) => *slot = template,
            None => self.templates.push(template),
        }
    }

    pub fn get(&self, kind: &str) -> Option<&ComponentTemplate> {
        self.templates.iter().find(|t| t.kind == kind)
    }

    pub fn kinds(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.kind.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for TemplateLibrary {
    fn default() -> Self {
        Self::with_builtins()
    }
}
