//! QASM emitter for serializing circuits.

use std::f64::consts::PI;
use std::fmt::Write;

use alsvid_ir::{Circuit, Op, OpKind};

/// Emit a circuit as `OpenQASM` 2 source.
///
/// Pauli-form operations use the extension instructions the parser also
/// accepts (`t_pauli(+XIZ);`), so PBCs round-trip. A flipped measurement is
/// re-materialized as an `x` gate in front of the `measure`, keeping the
/// output standard.
pub fn emit(circuit: &Circuit) -> String {
    let mut out = String::new();
    out.push_str("OPENQASM 2.0;\n");
    out.push_str("include \"qelib1.inc\";\n");

    if circuit.num_qubits() > 0 {
        let _ = writeln!(out, "qreg q[{}];", circuit.num_qubits());
    }
    if circuit.num_clbits() > 0 {
        let _ = writeln!(out, "creg c[{}];", circuit.num_clbits());
    }

    for op in circuit.ops() {
        emit_op(&mut out, op);
    }
    out
}

fn emit_op(out: &mut String, op: &Op) {
    match &op.kind {
        OpKind::Gate(gate) => {
            let qubits = qubit_list(op);
            let params = gate.params();
            if params.is_empty() {
                let _ = writeln!(out, "{} {qubits};", gate.name());
            } else {
                let rendered: Vec<String> = params.iter().map(|&p| angle(p)).collect();
                let _ = writeln!(out, "{}({}) {qubits};", gate.name(), rendered.join(", "));
            }
        }

        OpKind::Measure { flipped } => {
            let q = op.qubits[0].0;
            if *flipped {
                let _ = writeln!(out, "x q[{q}];");
            }
            let _ = writeln!(out, "measure q[{q}] -> c[{}];", op.clbits[0].0);
        }

        OpKind::Reset => {
            let _ = writeln!(out, "reset q[{}];", op.qubits[0].0);
        }

        OpKind::Barrier => {
            if op.qubits.is_empty() {
                out.push_str("barrier;\n");
            } else {
                let _ = writeln!(out, "barrier {};", qubit_list(op));
            }
        }

        OpKind::Pauli { word, .. } => {
            if let Some(clbit) = op.clbits.first() {
                let _ = writeln!(out, "{}({word}) -> c[{}];", op.name(), clbit.0);
            } else {
                let _ = writeln!(out, "{}({word});", op.name());
            }
        }
    }
}

fn qubit_list(op: &Op) -> String {
    op.qubits
        .iter()
        .map(|q| format!("q[{}]", q.0))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render an angle, preferring exact π fractions where they apply.
///
/// Comparisons are bit-exact: an approximate match would print a π
/// fraction that parses back to a different float.
#[allow(clippy::float_cmp)]
fn angle(value: f64) -> String {
    const NAMED: &[(f64, &str)] = &[
        (PI, "pi"),
        (-PI, "-pi"),
        (PI / 2.0, "pi/2"),
        (-PI / 2.0, "-pi/2"),
        (PI / 4.0, "pi/4"),
        (-PI / 4.0, "-pi/4"),
        (3.0 * PI / 4.0, "3*pi/4"),
        (-3.0 * PI / 4.0, "-3*pi/4"),
    ];
    for &(v, s) in NAMED {
        if value == v {
            return s.to_string();
        }
    }
    // f64 Display round-trips exactly.
    format!("{value}")
}
