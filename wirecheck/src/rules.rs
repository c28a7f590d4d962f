//! Connection rule engine.
//!
//! Walks the wire list of a circuit snapshot and evaluates an ordered table
//! of compatibility rules against each wire's two endpoints, producing
//! [`Feedback`] items. Two layers of rules exist:
//!
//! - generic edge rules, applied to every wire in fixed priority order;
//! - component rules, keyed by the kind of either endpoint's component and
//!   applied after the generic table, so new component-specific rule sets
//!   plug in without touching the evaluation loop.
//!
//! A wire that trips a terminal rule (short circuit, voltage mismatch) is
//! not analyzed further; non-terminal rules accumulate freely. Output order
//! is wire order (outer) crossed with rule order (inner).

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::graph::{Circuit, Component, Connection};
use crate::pins::{classify, PinClass};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// One validation finding. Carries no identity: the full list is replaced
/// on every recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl Feedback {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            recommendation: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            recommendation: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
            recommendation: None,
        }
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }
}

/// Everything a rule may look at for one wire. Endpoint components are
/// optional: a dangling wire only disables kind-specific rules.
pub struct EdgeContext<'a> {
    pub connection: &'a Connection,
    pub source: Option<&'a Component>,
    pub target: Option<&'a Component>,
    pub source_class: PinClass,
    pub target_class: PinClass,
    source_upper: String,
    target_upper: String,
}

impl<'a> EdgeContext<'a> {
    pub fn new(connection: &'a Connection, circuit: &'a Circuit) -> Self {
        Self {
            connection,
            source: circuit.component(&connection.source),
            target: circuit.component(&connection.target),
            source_class: classify(&connection.source_pin),
            target_class: classify(&connection.target_pin),
            source_upper: connection.source_pin.to_uppercase(),
            target_upper: connection.target_pin.to_uppercase(),
        }
    }

    /// Raw source pin id, as the host supplied it.
    pub fn source_pin(&self) -> &str {
        &self.connection.source_pin
    }

    /// Raw target pin id.
    pub fn target_pin(&self) -> &str {
        &self.connection.target_pin
    }

    pub fn source_upper(&self) -> &str {
        &self.source_upper
    }

    pub fn target_upper(&self) -> &str {
        &self.target_upper
    }

    /// True when one endpoint matches `a` and the other matches `b`, in
    /// either direction.
    pub fn crossed(
        &self,
        a: impl Fn(&PinClass) -> bool,
        b: impl Fn(&PinClass) -> bool,
    ) -> bool {
        (a(&self.source_class) && b(&self.target_class))
            || (a(&self.target_class) && b(&self.source_class))
    }

    /// Raw pin id of whichever side matches, source checked first.
    pub fn side_where(&self, pick: impl Fn(&PinClass) -> bool) -> &str {
        if pick(&self.source_class) {
            self.source_pin()
        } else {
            self.target_pin()
        }
    }

    /// True when either endpoint's component has the given kind.
    pub fn kind_matches(&self, kind: &str) -> bool {
        self.source.map_or(false, |c| c.kind == kind)
            || self.target.map_or(false, |c| c.kind == kind)
    }

    /// Kinds present on this wire, source first, deduplicated.
    fn kinds(&self) -> Vec<&str> {
        let mut kinds = Vec::with_capacity(2);
        if let Some(component) = self.source {
            kinds.push(component.kind.as_str());
        }
        if let Some(component) = self.target {
            if !kinds.contains(&component.kind.as_str()) {
                kinds.push(component.kind.as_str());
            }
        }
        kinds
    }
}

/// A generic per-wire compatibility rule.
pub trait EdgeRule: Send + Sync {
    fn id(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn severity(&self) -> Severity;
    /// Terminal rules end evaluation of the current wire when they match.
    fn terminal(&self) -> bool {
        false
    }
    fn check(&self, cx: &EdgeContext<'_>) -> Option<Feedback>;
}

/// A rule that only applies to wires touching a specific component kind.
pub trait ComponentRule: Send + Sync {
    fn id(&self) -> &'static str;
    /// Component kind this rule is registered under.
    fn kind(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn check(&self, cx: &EdgeContext<'_>) -> Option<Feedback>;
}

pub struct RuleEngine {
    edge_rules: Vec<Arc<dyn EdgeRule>>,
    component_rules: HashMap<String, Vec<Arc<dyn ComponentRule>>>,
    /// Kinds in first-registration order, for deterministic listings.
    component_kinds: Vec<String>,
}

impl RuleEngine {
    pub fn new() -> Self {
        Self {
            edge_rules: Vec::new(),
            component_rules: HashMap::new(),
            component_kinds: Vec::new(),
        }
    }

    /// The standard rule table, in evaluation order.
    pub fn with_default_rules() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Arc::new(ShortCircuitRule));
        engine.add_rule(Arc::new(CrossVoltageRule));
        engine.add_rule(Arc::new(PowerToGpioRule));
        engine.add_rule(Arc::new(GroundToGpioRule));
        engine.add_rule(Arc::new(PowerToSignalRule));
        engine.add_rule(Arc::new(GroundToSignalRule));
        engine.add_rule(Arc::new(TxConflictRule));
        engine.add_rule(Arc::new(AnalogToPowerRule));
        engine.add_component_rule(Arc::new(ServoPowerRule));
        engine.add_component_rule(Arc::new(ServoSignalRule));
        engine
    }

    pub fn add_rule(&mut self, rule: Arc<dyn EdgeRule>) {
        self.edge_rules.push(rule);
    }

    pub fn add_component_rule(&mut self, rule: Arc<dyn ComponentRule>) {
        let kind = rule.kind().to_string();
        if !self.component_kinds.contains(&kind) {
            self.component_kinds.push(kind.clone());
        }
        self.component_rules.entry(kind).or_default().push(rule);
    }

    pub fn edge_rules(&self) -> &[Arc<dyn EdgeRule>] {
        &self.edge_rules
    }

    /// Component rules grouped by kind, in registration order.
    pub fn component_rules(&self) -> impl Iterator<Item = &Arc<dyn ComponentRule>> + '_ {
        self.component_kinds
            .iter()
            .filter_map(|kind| self.component_rules.get(kind))
            .flatten()
    }

    /// Evaluate every wire of the snapshot. Pure: the only output is the
    /// returned feedback sequence.
    pub fn validate(&self, circuit: &Circuit) -> Vec<Feedback> {
        let mut feedback = Vec::new();

        for connection in circuit.connections() {
            let cx = EdgeContext::new(connection, circuit);

            let mut stop = false;
            for rule in &self.edge_rules {
                if let Some(item) = rule.check(&cx) {
                    feedback.push(item);
                    if rule.terminal() {
                        // A short on this wire makes further analysis moot.
                        stop = true;
                        break;
                    }
                }
            }
            if stop {
                continue;
            }

            for kind in cx.kinds() {
                if let Some(rules) = self.component_rules.get(kind) {
                    for rule in rules {
                        if let Some(item) = rule.check(&cx) {
                            feedback.push(item);
                        }
                    }
                }
            }
        }

        feedback
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

// Generic rules, in table order.

/// Rule 1: a wire joining a power pin to a ground pin.
pub struct ShortCircuitRule;

impl EdgeRule for ShortCircuitRule {
    fn id(&self) -> &'static str {
        "short_circuit"
    }

    fn description(&self) -> &'static str {
        "Power pin wired directly to a ground pin"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn terminal(&self) -> bool {
        true
    }

    fn check(&self, cx: &EdgeContext<'_>) -> Option<Feedback> {
        if cx.crossed(|c| c.power, |c| c.ground) {
            return Some(Feedback::error(format!(
                "Short circuit: connecting {} to {} will damage your circuit.",
                cx.source_pin(),
                cx.target_pin()
            )));
        }
        None
    }
}

/// Rule 2: 5V wired to a 3.3V rail.
pub struct CrossVoltageRule;

impl EdgeRule for CrossVoltageRule {
    fn id(&self) -> &'static str {
        "voltage_mismatch"
    }

    fn description(&self) -> &'static str {
        "5V pin wired to a 3.3V pin"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn terminal(&self) -> bool {
        true
    }

    fn check(&self, cx: &EdgeContext<'_>) -> Option<Feedback> {
        let s = cx.source_upper();
        let t = cx.target_upper();
        let is_3v3 = |h: &str| h.contains("3V3") || h.contains("3.3V");
        if (s.contains("5V") && is_3v3(t)) || (t.contains("5V") && is_3v3(s)) {
            return Some(Feedback::error(format!(
                "Voltage mismatch: connecting {} to {} may damage 3.3V components.",
                cx.source_pin(),
                cx.target_pin()
            )));
        }
        None
    }
}

/// Rule 3: power wired straight into a GPIO pin.
pub struct PowerToGpioRule;

impl EdgeRule for PowerToGpioRule {
    fn id(&self) -> &'static str {
        "power_to_gpio"
    }

    fn description(&self) -> &'static str {
        "GPIO pin wired directly to power"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, cx: &EdgeContext<'_>) -> Option<Feedback> {
        if cx.crossed(|c| c.power, |c| c.gpio) {
            return Some(Feedback::warning(format!(
                "Incorrect connection: GPIO pin ({}) should not be wired directly to power. \
                 This will not work as a signal connection.",
                cx.side_where(|c| c.gpio)
            )));
        }
        None
    }
}

/// Rule 4: ground wired straight into a GPIO pin.
pub struct GroundToGpioRule;

impl EdgeRule for GroundToGpioRule {
    fn id(&self) -> &'static str {
        "ground_to_gpio"
    }

    fn description(&self) -> &'static str {
        "GPIO pin wired directly to ground"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, cx: &EdgeContext<'_>) -> Option<Feedback> {
        if cx.crossed(|c| c.ground, |c| c.gpio) {
            return Some(Feedback::warning(format!(
                "Incorrect connection: GPIO pin ({}) connected to ground will always read LOW. \
                 This is likely not what you want.",
                cx.side_where(|c| c.gpio)
            )));
        }
        None
    }
}

/// Rule 5: power wired to a signal pin. VCC pins are exempt, a VCC-to-power
/// wire is expected.
pub struct PowerToSignalRule;

impl EdgeRule for PowerToSignalRule {
    fn id(&self) -> &'static str {
        "power_to_signal"
    }

    fn description(&self) -> &'static str {
        "Signal pin wired directly to power (VCC pins exempt)"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, cx: &EdgeContext<'_>) -> Option<Feedback> {
        if cx.crossed(|c| c.power, |c| c.signal) {
            let signal_pin = cx.side_where(|c| c.signal);
            if !signal_pin.contains("VCC") {
                return Some(Feedback::warning(format!(
                    "Signal pin issue: {signal_pin} should connect to a GPIO/PWM pin, \
                     not directly to power."
                )));
            }
        }
        None
    }
}

/// Rule 6: ground wired to a signal pin. GND-named pins are exempt.
pub struct GroundToSignalRule;

impl EdgeRule for GroundToSignalRule {
    fn id(&self) -> &'static str {
        "ground_to_signal"
    }

    fn description(&self) -> &'static str {
        "Signal pin wired directly to ground (GND pins exempt)"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, cx: &EdgeContext<'_>) -> Option<Feedback> {
        if cx.crossed(|c| c.ground, |c| c.signal) {
            let signal_pin = cx.side_where(|c| c.signal);
            if !signal_pin.contains("GND") {
                return Some(Feedback::warning(format!(
                    "Signal pin issue: {signal_pin} should connect to a GPIO/PWM pin, \
                     not directly to ground."
                )));
            }
        }
        None
    }
}

/// Rule 7: two transmit pins wired together.
pub struct TxConflictRule;

impl EdgeRule for TxConflictRule {
    fn id(&self) -> &'static str {
        "tx_conflict"
    }

    fn description(&self) -> &'static str {
        "Two TX (transmit) pins wired together"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, cx: &EdgeContext<'_>) -> Option<Feedback> {
        if cx.source_upper().contains("TX") && cx.target_upper().contains("TX") {
            return Some(Feedback::warning(format!(
                "Signal conflict: connecting {} to {} joins two TX (transmit) pins, \
                 which may cause issues.",
                cx.source_pin(),
                cx.target_pin()
            )));
        }
        None
    }
}

/// Rule 8: analog input wired to a power rail. Ground does not trip this
/// rule, only power does.
pub struct AnalogToPowerRule;

impl EdgeRule for AnalogToPowerRule {
    fn id(&self) -> &'static str {
        "analog_to_power"
    }

    fn description(&self) -> &'static str {
        "Analog pin wired directly to power"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, cx: &EdgeContext<'_>) -> Option<Feedback> {
        if cx.crossed(|c| c.power, |c| c.analog) {
            return Some(Feedback::warning(format!(
                "Analog pin issue: {} should read varying voltages, \
                 not be wired directly to power.",
                cx.side_where(|c| c.analog)
            )));
        }
        None
    }
}

// Component rules. Servo motors ship by default; further kinds register
// through RuleEngine::add_component_rule.

const SERVO_KIND: &str = "servoMotor";

/// Servo VCC must see power (or a GPIO driving it).
pub struct ServoPowerRule;

impl ComponentRule for ServoPowerRule {
    fn id(&self) -> &'static str {
        "servo_power"
    }

    fn kind(&self) -> &'static str {
        SERVO_KIND
    }

    fn description(&self) -> &'static str {
        "Servo VCC must be wired to a 5V or 3.3V supply"
    }

    fn check(&self, cx: &EdgeContext<'_>) -> Option<Feedback> {
        let ok = |class: &PinClass| class.power || class.gpio;
        let other = if cx.source_upper() == "VCC" && !ok(&cx.target_class) {
            cx.target_pin()
        } else if cx.target_upper() == "VCC" && !ok(&cx.source_class) {
            cx.source_pin()
        } else {
            return None;
        };
        Some(Feedback::warning(format!(
            "Servo power: VCC is connected to {other}, but should go to a \
             5V or 3.3V power supply."
        )))
    }
}

/// Servo SIG must see a GPIO (or another signal pin).
pub struct ServoSignalRule;

impl ComponentRule for ServoSignalRule {
    fn id(&self) -> &'static str {
        "servo_signal"
    }

    fn kind(&self) -> &'static str {
        SERVO_KIND
    }

    fn description(&self) -> &'static str {
        "Servo SIG must be wired to a PWM-capable GPIO pin"
    }

    fn check(&self, cx: &EdgeContext<'_>) -> Option<Feedback> {
        let ok = |class: &PinClass| class.gpio || class.signal;
        let other = if cx.source_upper() == "SIG" && !ok(&cx.target_class) {
            cx.target_pin()
        } else if cx.target_upper() == "SIG" && !ok(&cx.source_class) {
            cx.source_pin()
        } else {
            return None;
        };
        Some(Feedback::warning(format!(
            "Servo signal: SIG is connected to {other}, but should go to a \
             PWM-capable GPIO pin (like D9, D10, D11)."
        )))
    }
}
