use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wirecheck::graph::{Circuit, Component, Connection};
use wirecheck::prelude::*;
use wirecheck::serializer::{describe, to_compact, to_json};

/// A canvas-scale snapshot: boards plus a spread of peripherals, with a
/// mix of clean and offending wires.
fn synthetic_circuit(boards: usize) -> Circuit {
    let mut components = Vec::new();
    let mut connections = Vec::new();

    for i in 0..boards {
        components.push(Component::new("arduinoUno").with_id(format!("board{i}")));
        components.push(Component::new("servoMotor").with_id(format!("servo{i}")));

        let pins = [
            ("5V", "VCC"),
            ("GND_1", "GND"),
            ("D9", "SIG"),
            ("VIN", "D2"),
            ("5V", "GND"),
            ("3V3", "A0"),
        ];
        for (j, (source_pin, target_pin)) in pins.iter().enumerate() {
            connections.push(
                Connection::new(
                    format!("board{i}"),
                    *source_pin,
                    format!("servo{i}"),
                    *target_pin,
                )
                .with_id(format!("w{i}_{j}")),
            );
        }
    }

    Circuit::from_parts(components, connections)
}

fn bench_validate(c: &mut Criterion) {
    let circuit = synthetic_circuit(50);
    c.bench_function("validate_300_wires", |b| {
        b.iter(|| WirecheckCore::validate(black_box(&circuit)));
    });
}

fn bench_serialize(c: &mut Criterion) {
    let circuit = synthetic_circuit(50);
    c.bench_function("describe_and_format", |b| {
        b.iter(|| {
            let description = describe(black_box(&circuit));
            (to_json(&description), to_compact(&description))
        });
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let circuit = synthetic_circuit(50);
    c.bench_function("full_evaluation", |b| {
        b.iter(|| WirecheckCore::evaluate(black_box(&circuit)));
    });
}

criterion_group!(benches, bench_validate, bench_serialize, bench_evaluate);
criterion_main!(benches);
