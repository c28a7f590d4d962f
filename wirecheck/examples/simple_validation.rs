//! Simple validation example: validate a circuit file (or a built-in demo)
//! and print the findings.
//!
//! Run with: cargo run --example simple_validation [path/to/circuit.json]

use std::path::Path;

use wirecheck::graph::{Circuit, Connection};
use wirecheck::prelude::*;
use wirecheck::templates::TemplateLibrary;

fn demo_circuit() -> anyhow::Result<Circuit> {
    let library = TemplateLibrary::with_builtins();
    let mut circuit = Circuit::named("demo");

    let board = circuit.add_component(library.get("arduinoUno").unwrap().instantiate())?;
    let servo = circuit.add_component(library.get("servoMotor").unwrap().instantiate())?;

    // Deliberately miswired: signal to ground, power to an analog input.
    circuit.add_connection(Connection::new(&board, "GND_1", &servo, "SIG"))?;
    circuit.add_connection(Connection::new(&board, "5V", &board, "A0"))?;
    Ok(circuit)
}

fn main() -> anyhow::Result<()> {
    let circuit = match std::env::args().nth(1) {
        Some(path) => WirecheckCore::load_circuit(Path::new(&path))?,
        None => demo_circuit()?,
    };

    let result = WirecheckCore::validate(&circuit);

    println!(
        "Validated {} components, {} wires: {} finding(s)",
        circuit.component_count(),
        circuit.connection_count(),
        result.total()
    );
    for item in &result.feedback {
        println!("  [{:?}] {}", item.severity, item.message);
        if let Some(ref recommendation) = item.recommendation {
            println!("    -> {}", recommendation);
        }
    }

    if result.has_errors() {
        println!("\nValidation failed (errors present).");
        std::process::exit(1);
    }

    println!("\nValidation passed (no errors).");
    Ok(())
}
