//! Adjacent-gate fusion pass.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use alsvid_ir::{Circuit, Op, OpKind, StandardGate};

use crate::error::TranspileResult;
use crate::pass::Pass;
use crate::passes::remove_trivial_rz::{classify_rz, RzForm};

/// Fuses adjacent gates on identical qubit sequences in a single linear
/// scan.
///
/// Adjacent self-inverse pairs annihilate; adjacent Z-diagonal gates
/// (`Z`, `S`, `Sdg`, `T`, `Tdg`, `Rz`) merge by angle addition and
/// re-canonicalize through the trivial-RZ table. "Adjacent" means separated
/// only by operations on disjoint qubit sets, tracked with a per-qubit
/// last-op cursor; a fused result may cascade into an earlier partner.
pub struct GateFusion;

impl GateFusion {
    /// Create the pass.
    pub fn new() -> Self {
        Self
    }
}

impl Default for GateFusion {
    fn default() -> Self {
        Self::new()
    }
}

enum FuseOutcome {
    NoRule,
    Annihilate,
    Merged(StandardGate),
}

fn z_diagonal_angle(gate: StandardGate) -> Option<f64> {
    match gate {
        StandardGate::Z => Some(PI),
        StandardGate::S => Some(FRAC_PI_2),
        StandardGate::Sdg => Some(-FRAC_PI_2),
        StandardGate::T => Some(FRAC_PI_4),
        StandardGate::Tdg => Some(-FRAC_PI_4),
        StandardGate::Rz(theta) => Some(theta),
        _ => None,
    }
}

fn try_fuse(earlier: StandardGate, later: StandardGate) -> FuseOutcome {
    if earlier == later && earlier.is_self_inverse() {
        return FuseOutcome::Annihilate;
    }
    if let (Some(a), Some(b)) = (z_diagonal_angle(earlier), z_diagonal_angle(later)) {
        return match classify_rz(a + b) {
            RzForm::Identity => FuseOutcome::Annihilate,
            RzForm::Gate(gate) => FuseOutcome::Merged(gate),
            RzForm::Rotation(t) => FuseOutcome::Merged(StandardGate::Rz(t)),
        };
    }
    FuseOutcome::NoRule
}

fn touches(op: &Op, q: usize) -> bool {
    match &op.kind {
        OpKind::Pauli { word, .. } => word.get(q) != alsvid_ir::Pauli::I,
        _ => op.qubits.iter().any(|id| id.index() == q),
    }
}

fn touched_qubits(op: &Op) -> Vec<usize> {
    match &op.kind {
        OpKind::Pauli { word, .. } => word.support().collect(),
        _ => op.qubits.iter().map(|id| id.index()).collect(),
    }
}

fn place(out: &mut Vec<Option<Op>>, last: &mut [Option<usize>], op: Op) {
    let qs = touched_qubits(&op);
    let idx = out.len();
    out.push(Some(op));
    for q in qs {
        last[q] = Some(idx);
    }
}

fn rewind(out: &[Option<Op>], last: &mut [Option<usize>], qs: &[usize]) {
    for &q in qs {
        last[q] = out
            .iter()
            .enumerate()
            .rev()
            .find(|(_, slot)| slot.as_ref().is_some_and(|op| touches(op, q)))
            .map(|(j, _)| j);
    }
}

impl Pass for GateFusion {
    fn name(&self) -> &'static str {
        "GATE_FUSION"
    }

    fn run(&self, circuit: &mut Circuit) -> TranspileResult<bool> {
        let mut out: Vec<Option<Op>> = Vec::with_capacity(circuit.num_ops());
        let mut last: Vec<Option<usize>> = vec![None; circuit.num_qubits()];

        for op in circuit.ops() {
            let mut current = op.clone();
            if !current.is_gate() {
                place(&mut out, &mut last, current);
                continue;
            }
            loop {
                let qs: Vec<usize> = current.qubits.iter().map(|id| id.index()).collect();
                let partner = qs
                    .first()
                    .and_then(|&q0| last[q0])
                    .filter(|&i| qs.iter().all(|&q| last[q] == Some(i)))
                    .filter(|&i| {
                        matches!(&out[i],
                            Some(prev) if prev.is_gate() && prev.qubits == current.qubits)
                    });
                let Some(i) = partner else {
                    place(&mut out, &mut last, current);
                    break;
                };
                let earlier = *out[i].as_ref().and_then(Op::as_gate).expect("gate partner");
                let later = *current.as_gate().expect("gate op");
                match try_fuse(earlier, later) {
                    FuseOutcome::NoRule => {
                        place(&mut out, &mut last, current);
                        break;
                    }
                    FuseOutcome::Annihilate => {
                        out[i] = None;
                        rewind(&out, &mut last, &qs);
                        break;
                    }
                    FuseOutcome::Merged(gate) => {
                        out[i] = None;
                        rewind(&out, &mut last, &qs);
                        current = Op::gate(gate, current.qubits.iter().copied());
                    }
                }
            }
        }

        let new_ops: Vec<Op> = out.into_iter().flatten().collect();
        let modified = new_ops.as_slice() != circuit.ops();
        if modified {
            circuit.replace_ops(new_ops)?;
        }
        Ok(modified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::QubitId;

    #[test]
    fn test_hh_annihilates() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit.h(QubitId(0)).unwrap().h(QubitId(0)).unwrap();

        let modified = GateFusion.run(&mut circuit).unwrap();
        assert!(modified);
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_cx_pair_annihilates() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();

        assert!(GateFusion.run(&mut circuit).unwrap());
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_cx_blocked_by_intervening_gate() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.x(QubitId(1)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();

        assert!(!GateFusion.run(&mut circuit).unwrap());
        assert_eq!(circuit.num_ops(), 3);
    }

    #[test]
    fn test_disjoint_qubits_do_not_block() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.x(QubitId(1)).unwrap();
        circuit.h(QubitId(0)).unwrap();

        assert!(GateFusion.run(&mut circuit).unwrap());
        assert_eq!(circuit.count_ops().get("h"), None);
        assert_eq!(circuit.count_ops().get("x"), Some(&1));
    }

    #[test]
    fn test_z_diagonal_algebra() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit.t(QubitId(0)).unwrap().t(QubitId(0)).unwrap();
        assert!(GateFusion.run(&mut circuit).unwrap());
        assert_eq!(circuit.count_ops().get("s"), Some(&1));

        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit.s(QubitId(0)).unwrap().t(QubitId(0)).unwrap();
        assert!(GateFusion.run(&mut circuit).unwrap());
        assert_eq!(circuit.count_ops().get("rz"), Some(&1));

        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit.s(QubitId(0)).unwrap().sdg(QubitId(0)).unwrap();
        assert!(GateFusion.run(&mut circuit).unwrap());
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_rz_merge_with_trivial_check() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit.rz(0.3, QubitId(0)).unwrap();
        circuit.rz(-0.3, QubitId(0)).unwrap();
        assert!(GateFusion.run(&mut circuit).unwrap());
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_cascading_fusion() {
        // H X X H collapses completely: the inner pair first, then the
        // now-adjacent outer pair.
        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit
            .h(QubitId(0))
            .unwrap()
            .x(QubitId(0))
            .unwrap()
            .x(QubitId(0))
            .unwrap()
            .h(QubitId(0))
            .unwrap();

        assert!(GateFusion.run(&mut circuit).unwrap());
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_barrier_blocks_fusion() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.barrier([QubitId(0)]).unwrap();
        circuit.h(QubitId(0)).unwrap();

        assert!(!GateFusion.run(&mut circuit).unwrap());
        assert_eq!(circuit.num_ops(), 3);
    }
}
