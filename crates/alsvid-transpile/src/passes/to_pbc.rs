//! Conversion to Pauli-based circuit form.

use std::f64::consts::FRAC_PI_4;

use alsvid_ir::{Circuit, Op, OpKind, PauliKind, QubitId, StandardGate};

use crate::error::{TranspileError, TranspileResult};
use crate::pass::Pass;
use crate::tableau::Tableau;

/// Converts a Clifford + {T, RZ(k·π/4)} circuit into an equivalent PBC.
///
/// Clifford gates are absorbed into a running [`Tableau`]; T gates emit
/// `t_pauli` rotations about the tableau's image of `Z_q`, and measurements
/// emit `m_pauli` of the same. With `keep_cx`, a final tableau that is
/// CNOT-expressible is re-emitted as trailing CX gates instead of being
/// dropped.
pub struct ToPbc {
    keep_cx: bool,
}

impl ToPbc {
    /// Create the pass. `keep_cx` retains CX gates where legal.
    pub fn new(keep_cx: bool) -> Self {
        Self { keep_cx }
    }

    fn unsupported(op: &Op) -> TranspileError {
        TranspileError::UnsupportedOp {
            pass: "TO_PBC",
            op: op.name().to_string(),
        }
    }
}

impl Pass for ToPbc {
    fn name(&self) -> &'static str {
        "TO_PBC"
    }

    fn run(&self, circuit: &mut Circuit) -> TranspileResult<bool> {
        if circuit.is_pbc() {
            return Ok(false);
        }

        let mut tableau = Tableau::identity(circuit.num_qubits());
        let mut out: Vec<Op> = Vec::with_capacity(circuit.num_ops());

        for op in circuit.ops() {
            match &op.kind {
                OpKind::Gate(gate) => match gate {
                    StandardGate::T => {
                        let q = op.qubits[0].index();
                        out.push(Op::pauli_rot(PauliKind::TRot, tableau.z_row(q).clone()));
                    }
                    StandardGate::Tdg => {
                        let q = op.qubits[0].index();
                        out.push(Op::pauli_rot(PauliKind::TRot, tableau.z_row(q).negated()));
                    }
                    StandardGate::Rz(theta) => {
                        // Only multiples of π/4 survive to this point; the
                        // Clifford share is absorbed and the T residue emitted.
                        let steps = theta / FRAC_PI_4;
                        let k = steps.round();
                        if (steps - k).abs() > 1e-9 {
                            return Err(TranspileError::UnsupportedOp {
                                pass: "TO_PBC",
                                op: format!("rz({theta})"),
                            });
                        }
                        #[allow(clippy::cast_possible_truncation)]
                        let mut m = (k as i64).rem_euclid(8);
                        let q = op.qubits[0].index();
                        if m % 2 == 1 {
                            out.push(Op::pauli_rot(PauliKind::TRot, tableau.z_row(q).clone()));
                            m -= 1;
                        }
                        for _ in 0..m / 2 {
                            tableau.apply_gate(StandardGate::S, &op.qubits);
                        }
                    }
                    _ => {
                        if !tableau.apply_gate(*gate, &op.qubits) {
                            return Err(Self::unsupported(op));
                        }
                    }
                },
                OpKind::Measure { flipped } => {
                    let q = op.qubits[0].index();
                    let mut word = tableau.z_row(q).clone();
                    if *flipped {
                        word.negate();
                    }
                    out.push(Op::pauli_measure(word, op.clbits.first().copied()));
                }
                // Reset becomes a Pauli measurement; the classically
                // controlled correction is left to the execution layer.
                OpKind::Reset => {
                    let q = op.qubits[0].index();
                    out.push(Op::pauli_measure(tableau.z_row(q).clone(), None));
                }
                OpKind::Barrier | OpKind::Pauli { .. } => out.push(op.clone()),
            }
        }

        if self.keep_cx {
            if let Some(pairs) = tableau.as_cx_circuit() {
                for (c, t) in pairs {
                    out.push(Op::two_qubit_gate(StandardGate::CX, QubitId(c), QubitId(t)));
                }
            }
        }

        let modified = out.as_slice() != circuit.ops();
        if modified {
            circuit.replace_ops(out)?;
        }
        Ok(modified)
    }
}
