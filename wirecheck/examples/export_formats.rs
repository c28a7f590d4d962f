//! Example: project a circuit into both serialized forms.
//!
//! Run with: cargo run --example export_formats

use wirecheck::graph::{Circuit, Connection};
use wirecheck::serializer::{describe, to_compact, to_json};
use wirecheck::templates::TemplateLibrary;

fn main() -> anyhow::Result<()> {
    let library = TemplateLibrary::with_builtins();
    let mut circuit = Circuit::named("export demo");

    let board = circuit.add_component(library.get("esp32").unwrap().instantiate())?;
    let servo = circuit.add_component(library.get("servoMotor").unwrap().instantiate())?;
    circuit.add_connection(Connection::new(&board, "VIN", &servo, "VCC"))?;
    circuit.add_connection(Connection::new(&board, "GND_L", &servo, "GND"))?;
    circuit.add_connection(Connection::new(&board, "D13", &servo, "SIG"))?;

    let description = describe(&circuit);

    println!("--- structured JSON ---");
    println!("{}", to_json(&description));
    println!();
    println!("--- compact ---");
    print!("{}", to_compact(&description));
    Ok(())
}
