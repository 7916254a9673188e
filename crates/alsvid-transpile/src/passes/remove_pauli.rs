//! Trailing-Pauli removal pass.

use alsvid_ir::{Circuit, Op, OpKind, Pauli, PauliWord, StandardGate};

use crate::error::TranspileResult;
use crate::pass::Pass;

/// Removes `X`, `Y`, `Z` gates whose effect is observable only as a
/// classical bit-flip of later measurements.
///
/// The op list is walked in reverse; each Pauli gate is commuted forward
/// through the rest of the circuit as a signed Pauli word using the
/// standard Clifford conjugation rules. A gate that reaches the end of the
/// circuit is dropped; crossing a measurement it anticommutes with toggles
/// that measurement's recorded-outcome flip. Gates blocked by non-Clifford
/// ops stay where they are.
pub struct RemovePauli;

impl RemovePauli {
    /// Create the pass.
    pub fn new() -> Self {
        Self
    }
}

impl Default for RemovePauli {
    fn default() -> Self {
        Self::new()
    }
}

enum Step {
    /// The word commuted through (possibly transformed).
    Passed,
    /// The word was fully absorbed; nothing left to place.
    Absorbed,
    /// The op does not admit Pauli commutation; give up on this gate.
    Blocked,
}

/// Push the word forward past one op: `P ← U P U†`. Measurements that
/// anticommute with the word on their qubit report a flip.
fn step(word: &mut PauliWord, op: &Op, flip: &mut bool) -> Step {
    match &op.kind {
        OpKind::Gate(gate) => {
            let q = op.qubits[0].index();
            match gate {
                StandardGate::I => {}
                StandardGate::H => word.conjugate_h(q),
                StandardGate::S => word.conjugate_s(q),
                StandardGate::Sdg => word.conjugate_sdg(q),
                StandardGate::X => word.conjugate_x(q),
                StandardGate::Y => word.conjugate_y(q),
                StandardGate::Z => word.conjugate_z(q),
                StandardGate::CX => {
                    word.conjugate_cx(q, op.qubits[1].index());
                }
                StandardGate::CZ => {
                    word.conjugate_cz(q, op.qubits[1].index());
                }
                StandardGate::Swap => {
                    word.conjugate_swap(q, op.qubits[1].index());
                }
                // Z-diagonal non-Cliffords commute with Z-or-identity words.
                StandardGate::T | StandardGate::Tdg | StandardGate::Rz(_) => {
                    if !matches!(word.get(q), Pauli::I | Pauli::Z) {
                        return Step::Blocked;
                    }
                }
                // X-axis gates commute with X-or-identity words.
                StandardGate::SX | StandardGate::SXdg | StandardGate::Rx(_) => {
                    if !matches!(word.get(q), Pauli::I | Pauli::X) {
                        return Step::Blocked;
                    }
                }
                StandardGate::Ry(_) => {
                    if !matches!(word.get(q), Pauli::I | Pauli::Y) {
                        return Step::Blocked;
                    }
                }
                // CCX conjugates Z-on-control and X-on-target to themselves;
                // anything else leaves the Pauli group.
                StandardGate::CCX => {
                    let ok = matches!(word.get(q), Pauli::I | Pauli::Z)
                        && matches!(word.get(op.qubits[1].index()), Pauli::I | Pauli::Z)
                        && matches!(word.get(op.qubits[2].index()), Pauli::I | Pauli::X);
                    if !ok {
                        return Step::Blocked;
                    }
                }
            }
            Step::Passed
        }
        OpKind::Measure { .. } => {
            let q = op.qubits[0].index();
            if matches!(word.get(q), Pauli::X | Pauli::Y) {
                *flip = true;
            }
            Step::Passed
        }
        OpKind::Reset => {
            word.set(op.qubits[0].index(), Pauli::I);
            if word.is_identity() {
                Step::Absorbed
            } else {
                Step::Passed
            }
        }
        OpKind::Barrier => Step::Passed,
        OpKind::Pauli { .. } => Step::Blocked,
    }
}

impl Pass for RemovePauli {
    fn name(&self) -> &'static str {
        "REMOVE_PAULI"
    }

    fn run(&self, circuit: &mut Circuit) -> TranspileResult<bool> {
        let n = circuit.num_qubits();
        let mut ops = circuit.ops().to_vec();
        let mut modified = false;

        let mut i = ops.len();
        while i > 0 {
            i -= 1;
            let Some(pauli) = (match ops[i].kind {
                OpKind::Gate(StandardGate::X) => Some(Pauli::X),
                OpKind::Gate(StandardGate::Y) => Some(Pauli::Y),
                OpKind::Gate(StandardGate::Z) => Some(Pauli::Z),
                _ => None,
            }) else {
                continue;
            };

            let mut word = PauliWord::single(n, ops[i].qubits[0].index(), pauli);
            let mut flips: Vec<usize> = vec![];
            let mut removable = true;
            for j in i + 1..ops.len() {
                let mut flip = false;
                let step = step(&mut word, &ops[j], &mut flip);
                if flip {
                    flips.push(j);
                }
                match step {
                    Step::Passed => {}
                    Step::Absorbed => break,
                    Step::Blocked => {
                        removable = false;
                        break;
                    }
                }
            }
            if removable {
                for &j in &flips {
                    if let OpKind::Measure { flipped } = &mut ops[j].kind {
                        *flipped = !*flipped;
                    }
                }
                ops.remove(i);
                modified = true;
            }
        }

        if modified {
            circuit.replace_ops(ops)?;
        }
        Ok(modified)
    }
}
