//! Tests for the connection rule table.

use wirecheck::graph::{Circuit, Component, Connection};
use wirecheck::prelude::*;

/// Build a snapshot from (id, kind) components and
/// (source, source_pin, target, target_pin) wires. Goes through
/// `from_parts` so tests can also build deliberately broken snapshots.
fn snapshot(components: &[(&str, &str)], wires: &[(&str, &str, &str, &str)]) -> Circuit {
    let components = components
        .iter()
        .map(|(id, kind)| Component::new(*kind).with_id(*id))
        .collect();
    let connections = wires
        .iter()
        .enumerate()
        .map(|(i, (source, source_pin, target, target_pin))| {
            Connection::new(*source, *source_pin, *target, *target_pin)
                .with_id(format!("w{i}"))
        })
        .collect();
    Circuit::from_parts(components, connections)
}

fn validate(circuit: &Circuit) -> Vec<Feedback> {
    WirecheckCore::validate(circuit).feedback
}

fn wire(source_pin: &str, target_pin: &str) -> Circuit {
    snapshot(
        &[("a", "arduinoUno"), ("b", "customComponent")],
        &[("a", source_pin, "b", target_pin)],
    )
}

#[test]
fn short_circuit_is_a_single_terminal_error() {
    let feedback = validate(&wire("5V", "GND"));
    assert_eq!(feedback.len(), 1);
    assert_eq!(feedback[0].severity, Severity::Error);
    assert!(feedback[0].message.contains("5V"));
    assert!(feedback[0].message.contains("GND"));
}

#[test]
fn short_circuit_fires_in_either_direction() {
    let forward = validate(&wire("5V", "GND"));
    let reverse = validate(&wire("GND", "5V"));
    assert_eq!(forward.len(), 1);
    assert_eq!(reverse.len(), 1);
    assert_eq!(reverse[0].severity, Severity::Error);
}

#[test]
fn voltage_mismatch_is_a_single_terminal_error() {
    for (s, t) in [("5V", "3V3"), ("3V3", "5V"), ("5V", "3.3V")] {
        let feedback = validate(&wire(s, t));
        assert_eq!(feedback.len(), 1, "{s} <-> {t}");
        assert_eq!(feedback[0].severity, Severity::Error);
        assert!(feedback[0].message.contains(s));
        assert!(feedback[0].message.contains(t));
    }
}

#[test]
fn power_to_gpio_names_the_gpio_pin() {
    let feedback = validate(&wire("VIN", "D2"));
    assert_eq!(feedback.len(), 1);
    assert_eq!(feedback[0].severity, Severity::Warning);
    assert!(feedback[0].message.contains("(D2)"));
}

#[test]
fn ground_to_gpio_warns_about_constant_low() {
    let feedback = validate(&wire("GND", "D7"));
    assert_eq!(feedback.len(), 1);
    assert!(feedback[0].message.contains("(D7)"));
    assert!(feedback[0].message.contains("always read LOW"));
}

#[test]
fn gpio_to_signal_is_silent_without_a_servo() {
    // Neither side is power or ground, so rules 3-6 do not apply, and
    // no endpoint kind pulls in component rules.
    let circuit = snapshot(
        &[("a", "customComponent"), ("b", "customComponent")],
        &[("a", "D9", "b", "SIG")],
    );
    assert!(validate(&circuit).is_empty());
}

#[test]
fn power_to_signal_warns_unless_vcc_named() {
    let feedback = validate(&wire("5V", "TX0"));
    assert_eq!(feedback.len(), 1);
    assert!(feedback[0].message.contains("TX0 should connect"));

    // A signal pin whose id carries VCC is expected to sit on power.
    let feedback = validate(&wire("5V", "TX_VCC"));
    assert!(feedback.is_empty());
}

#[test]
fn ground_to_signal_warns_unless_gnd_named() {
    let feedback = validate(&wire("GND", "SDA"));
    assert_eq!(feedback.len(), 1);
    assert!(feedback[0].message.contains("SDA should connect"));
    assert!(feedback[0].message.contains("ground"));

    let feedback = validate(&wire("GND", "SDA_GND"));
    assert!(feedback.is_empty());
}

#[test]
fn tx_to_tx_is_a_conflict() {
    let feedback = validate(&wire("TX0", "TX1"));
    assert_eq!(feedback.len(), 1);
    assert_eq!(feedback[0].severity, Severity::Warning);
    assert!(feedback[0].message.contains("TX0"));
    assert!(feedback[0].message.contains("TX1"));
}

#[test]
fn analog_to_power_warns_but_analog_to_ground_does_not() {
    let feedback = validate(&wire("3V3", "A0"));
    assert_eq!(feedback.len(), 1);
    assert!(feedback[0].message.contains("A0"));

    // Only power trips the analog rule.
    let feedback = validate(&wire("GND", "A0"));
    assert!(feedback.is_empty());
}

#[test]
fn servo_sig_to_ground_gets_both_warnings() {
    let circuit = snapshot(
        &[("servo", "servoMotor"), ("board", "arduinoUno")],
        &[("servo", "SIG", "board", "GND_1")],
    );
    let feedback = validate(&circuit);
    assert_eq!(feedback.len(), 2);
    // Generic ground-to-signal first (SIG does not contain GND)...
    assert!(feedback[0].message.contains("SIG should connect"));
    // ...then the servo-specific rule.
    assert!(feedback[1].message.contains("Servo signal"));
    assert!(feedback[1].message.contains("GND_1"));
}

#[test]
fn servo_vcc_must_see_power_or_gpio() {
    let miswired = snapshot(
        &[("servo", "servoMotor"), ("board", "esp32")],
        &[("servo", "VCC", "board", "EN")],
    );
    let feedback = validate(&miswired);
    assert_eq!(feedback.len(), 1);
    assert!(feedback[0].message.contains("VCC is connected to EN"));

    let powered = snapshot(
        &[("servo", "servoMotor"), ("board", "arduinoUno")],
        &[("servo", "VCC", "board", "5V")],
    );
    assert!(validate(&powered).is_empty());
}

#[test]
fn servo_sig_to_gpio_is_correct_wiring() {
    let circuit = snapshot(
        &[("servo", "servoMotor"), ("board", "arduinoUno")],
        &[("servo", "SIG", "board", "D9")],
    );
    assert!(validate(&circuit).is_empty());
}

#[test]
fn servo_rules_apply_regardless_of_wire_direction() {
    let circuit = snapshot(
        &[("board", "arduinoNano"), ("servo", "servoMotor")],
        &[("board", "AREF", "servo", "SIG")],
    );
    let feedback = validate(&circuit);
    assert_eq!(feedback.len(), 1);
    assert!(feedback[0].message.contains("SIG is connected to AREF"));
}

#[test]
fn dangling_endpoints_never_panic() {
    // The wire references components that are not in the snapshot. Pin
    // rules still run; kind-specific rules silently do not apply.
    let circuit = snapshot(&[], &[("ghost1", "5V", "ghost2", "GND")]);
    let feedback = validate(&circuit);
    assert_eq!(feedback.len(), 1);
    assert_eq!(feedback[0].severity, Severity::Error);

    let circuit = snapshot(&[], &[("ghost1", "VCC", "ghost2", "EN")]);
    assert!(validate(&circuit).is_empty());
}

#[test]
fn output_follows_edge_order_not_severity() {
    let circuit = snapshot(
        &[("a", "arduinoUno"), ("b", "customComponent")],
        &[
            ("a", "VIN", "b", "D2"),  // warning
            ("a", "5V", "b", "GND"),  // error
            ("a", "TX1", "b", "TX0"), // warning
        ],
    );
    let feedback = validate(&circuit);
    assert_eq!(feedback.len(), 3);
    assert_eq!(feedback[0].severity, Severity::Warning);
    assert_eq!(feedback[1].severity, Severity::Error);
    assert_eq!(feedback[2].severity, Severity::Warning);
}

#[test]
fn every_edge_is_evaluated() {
    let circuit = snapshot(
        &[("a", "arduinoUno"), ("b", "customComponent")],
        &[
            ("a", "5V", "b", "GND"),
            ("a", "3V3", "b", "GROUND"),
            ("a", "VCC", "b", "GND_2"),
        ],
    );
    let result = WirecheckCore::validate(&circuit);
    assert_eq!(result.feedback.len(), 3);
    assert_eq!(result.stats.errors, 3);
    assert!(result.has_errors());
}
