//! Clifford reduction (TACO) pipeline pass.

use alsvid_ir::{Circuit, Op, OpKind, PauliKind, PauliWord};

use crate::error::TranspileResult;
use crate::pass::Pass;
use crate::passes::to_pbc::ToPbc;

/// Sinks `s_pauli` and `z_pauli` rotations to the end of a PBC and drops
/// them there, folding their effect into the words of the `t_pauli` and
/// `m_pauli` operations they cross.
///
/// A gate-form circuit is first lowered with the PBC conversion. The pass
/// is idempotent: its output contains no Clifford rotations to sink.
pub struct CliffordReduction;

impl CliffordReduction {
    /// Create the pass.
    pub fn new() -> Self {
        Self
    }
}

impl Default for CliffordReduction {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for CliffordReduction {
    fn name(&self) -> &'static str {
        "CLIFFORD_REDUCTION"
    }

    fn run(&self, circuit: &mut Circuit) -> TranspileResult<bool> {
        let mut modified = false;
        if circuit.ops().iter().any(Op::is_gate_form) {
            modified |= ToPbc::new(false).run(circuit)?;
        }

        // Clifford rotations being sunk, in program order. Crossing ops
        // conjugate by the most recent first.
        let mut carried: Vec<(PauliKind, PauliWord)> = vec![];
        let mut out: Vec<Op> = Vec::with_capacity(circuit.num_ops());

        for op in circuit.ops() {
            match &op.kind {
                OpKind::Pauli { kind, word }
                    if matches!(kind, PauliKind::SRot | PauliKind::ZRot) =>
                {
                    carried.push((*kind, word.clone()));
                }
                OpKind::Pauli { kind, word } => {
                    let mut w = word.clone();
                    for (ck, cw) in carried.iter().rev() {
                        w = match ck {
                            PauliKind::SRot => w.conjugated_by_quarter(cw),
                            PauliKind::ZRot => w.conjugated_by_half(cw),
                            _ => unreachable!("only Clifford rotations are carried"),
                        };
                    }
                    let mut new_op = op.clone();
                    new_op.kind = OpKind::Pauli {
                        kind: *kind,
                        word: w,
                    };
                    out.push(new_op);
                }
                // A retained gate (keep_cx) ends the commutation region:
                // flush the carried rotations in front of it.
                OpKind::Gate(_) | OpKind::Measure { .. } | OpKind::Reset => {
                    for (ck, cw) in carried.drain(..) {
                        out.push(Op::pauli_rot(ck, cw));
                    }
                    out.push(op.clone());
                }
                OpKind::Barrier => out.push(op.clone()),
            }
        }
        // Rotations that reach the end trail every measurement and are
        // unobservable: drop them.

        let changed = out.as_slice() != circuit.ops();
        if changed {
            circuit.replace_ops(out)?;
        }
        Ok(modified || changed)
    }
}
