//! Tests for the two serialization forms.

use wirecheck::graph::{Circuit, Component, Connection};
use wirecheck::serializer::{describe, to_compact, to_json, CircuitDescription};

fn sample() -> Circuit {
    let board = Component::new("arduinoUno").with_id("board");
    let servo = Component::new("servoMotor")
        .with_id("servo")
        .with_label("Pan Servo");
    let power = Connection::new("board", "5V", "servo", "VCC").with_id("w1");
    let signal = Connection::new("board", "D9", "servo", "SIG")
        .with_id("w2")
        .with_color("#8B5CF6");
    Circuit::from_parts(vec![board, servo], vec![power, signal])
}

#[test]
fn compact_form_is_idempotent() {
    let circuit = sample();
    let first = to_compact(&describe(&circuit));
    let second = to_compact(&describe(&circuit));
    assert_eq!(first, second);
}

#[test]
fn json_form_is_idempotent() {
    let circuit = sample();
    assert_eq!(to_json(&describe(&circuit)), to_json(&describe(&circuit)));
}

#[test]
fn order_is_preserved_not_normalized() {
    let circuit = sample();
    let compact = to_compact(&describe(&circuit));

    // Same collections, reversed: the output must reflect the new order.
    let reordered = Circuit::from_parts(
        circuit.components().iter().rev().cloned().collect(),
        circuit.connections().iter().rev().cloned().collect(),
    );
    let reordered_compact = to_compact(&describe(&reordered));

    assert_ne!(compact, reordered_compact);
    let lines: Vec<&str> = reordered_compact.lines().collect();
    assert_eq!(lines[2], "servo, servoMotor, Pan Servo");
    assert_eq!(lines[3], "board, arduinoUno, arduinoUno");
}

#[test]
fn json_round_trips_exactly() {
    let description = describe(&sample());
    let parsed: CircuitDescription =
        serde_json::from_str(&to_json(&description)).expect("output parses");
    assert_eq!(parsed, description);
}

#[test]
fn hydrated_circuit_projects_identically() {
    let description = describe(&sample());
    let rebuilt = description.to_circuit();
    assert_eq!(describe(&rebuilt), description);
}

#[test]
fn connection_lines_keep_both_pin_ids() {
    let compact = to_compact(&describe(&sample()));
    assert!(compact.contains("board, 5V, servo, VCC"));
    assert!(compact.contains("board, D9, servo, SIG"));
    // Wire color is display state and never serializes.
    assert!(!compact.contains("#8B5CF6"));
    assert!(!to_json(&describe(&sample())).contains("#8B5CF6"));
}

#[test]
fn commas_in_labels_are_not_escaped() {
    let component = Component::new("customComponent")
        .with_id("n1")
        .with_label("Driver, rev B");
    let circuit = Circuit::from_parts(vec![component], vec![]);

    // The raw value is concatenated as-is; the row visually misaligns and
    // that is the documented behavior.
    let compact = to_compact(&describe(&circuit));
    assert!(compact.contains("n1, customComponent, Driver, rev B"));
}

#[test]
fn empty_sections_keep_headers() {
    let compact = to_compact(&describe(&Circuit::new()));
    assert!(compact.starts_with("# NODES\n"));
    assert!(compact.contains("# CONNECTIONS\n"));
}
