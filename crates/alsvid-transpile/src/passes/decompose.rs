//! Decomposition into the basic gate set.

use alsvid_ir::{Circuit, Op, QubitId, StandardGate};

use crate::error::TranspileResult;
use crate::pass::Pass;

/// Rewrites every gate outside the basic set into an equivalent
/// sub-circuit.
///
/// The target set is `{H, S, Sdg, T, Tdg, X, Y, Z, Rz(θ), CX}` plus
/// measure/reset/barrier, and CCX when `keep_ccx` is set. Running the pass
/// twice is a no-op.
pub struct Decompose {
    keep_ccx: bool,
}

impl Decompose {
    /// Create the pass. `keep_ccx` leaves Toffoli gates intact.
    pub fn new(keep_ccx: bool) -> Self {
        Self { keep_ccx }
    }

    fn expand(&self, op: &Op, out: &mut Vec<Op>) -> bool {
        let Some(&gate) = op.as_gate() else {
            out.push(op.clone());
            return false;
        };
        let single = |g: StandardGate, q: QubitId| Op::single_qubit_gate(g, q);
        match gate {
            StandardGate::I => true,

            // SX = H·S·H up to global phase.
            StandardGate::SX => {
                let q = op.qubits[0];
                out.extend([
                    single(StandardGate::H, q),
                    single(StandardGate::S, q),
                    single(StandardGate::H, q),
                ]);
                true
            }

            StandardGate::SXdg => {
                let q = op.qubits[0];
                out.extend([
                    single(StandardGate::H, q),
                    single(StandardGate::Sdg, q),
                    single(StandardGate::H, q),
                ]);
                true
            }

            StandardGate::Rx(theta) => {
                let q = op.qubits[0];
                out.extend([
                    single(StandardGate::H, q),
                    single(StandardGate::Rz(theta), q),
                    single(StandardGate::H, q),
                ]);
                true
            }

            StandardGate::Ry(theta) => {
                let q = op.qubits[0];
                out.extend([
                    single(StandardGate::Sdg, q),
                    single(StandardGate::H, q),
                    single(StandardGate::Rz(theta), q),
                    single(StandardGate::H, q),
                    single(StandardGate::S, q),
                ]);
                true
            }

            StandardGate::CZ => {
                let (c, t) = (op.qubits[0], op.qubits[1]);
                out.extend([
                    single(StandardGate::H, t),
                    Op::two_qubit_gate(StandardGate::CX, c, t),
                    single(StandardGate::H, t),
                ]);
                true
            }

            StandardGate::Swap => {
                let (a, b) = (op.qubits[0], op.qubits[1]);
                out.extend([
                    Op::two_qubit_gate(StandardGate::CX, a, b),
                    Op::two_qubit_gate(StandardGate::CX, b, a),
                    Op::two_qubit_gate(StandardGate::CX, a, b),
                ]);
                true
            }

            StandardGate::CCX if !self.keep_ccx => {
                let (a, b, t) = (op.qubits[0], op.qubits[1], op.qubits[2]);
                let cx = |c, t| Op::two_qubit_gate(StandardGate::CX, c, t);
                // Standard 6-CX, T-count-7 expansion.
                out.extend([
                    single(StandardGate::H, t),
                    cx(b, t),
                    single(StandardGate::Tdg, t),
                    cx(a, t),
                    single(StandardGate::T, t),
                    cx(b, t),
                    single(StandardGate::Tdg, t),
                    cx(a, t),
                    single(StandardGate::T, b),
                    single(StandardGate::T, t),
                    single(StandardGate::H, t),
                    cx(a, b),
                    single(StandardGate::T, a),
                    single(StandardGate::Tdg, b),
                    cx(a, b),
                ]);
                true
            }

            _ => {
                out.push(op.clone());
                false
            }
        }
    }
}

impl Pass for Decompose {
    fn name(&self) -> &'static str {
        "DECOMPOSE"
    }

    fn run(&self, circuit: &mut Circuit) -> TranspileResult<bool> {
        let mut modified = false;
        let mut new_ops = Vec::with_capacity(circuit.num_ops());
        for op in circuit.ops() {
            modified |= self.expand(op, &mut new_ops);
        }
        if modified {
            circuit.replace_ops(new_ops)?;
        }
        Ok(modified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_3;

    #[test]
    fn test_ccx_expansion_t_count() {
        let mut circuit = Circuit::with_size("test", 3, 0);
        circuit.ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap();

        let modified = Decompose::new(false).run(&mut circuit).unwrap();
        assert!(modified);
        assert_eq!(circuit.count_ops().get("ccx"), None);
        assert_eq!(circuit.t_count(), 7);
        assert_eq!(circuit.count_ops().get("cx"), Some(&6));
    }

    #[test]
    fn test_keep_ccx() {
        let mut circuit = Circuit::with_size("test", 3, 0);
        circuit.ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap();

        let modified = Decompose::new(true).run(&mut circuit).unwrap();
        assert!(!modified);
        assert_eq!(circuit.count_ops().get("ccx"), Some(&1));
    }

    #[test]
    fn test_two_qubit_rewrites() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.cz(QubitId(0), QubitId(1)).unwrap();
        circuit.swap(QubitId(0), QubitId(1)).unwrap();

        assert!(Decompose::new(false).run(&mut circuit).unwrap());
        let counts = circuit.count_ops();
        assert_eq!(counts.get("cz"), None);
        assert_eq!(counts.get("swap"), None);
        // CZ gives 1 CX, SWAP gives 3.
        assert_eq!(counts.get("cx"), Some(&4));
        assert_eq!(counts.get("h"), Some(&2));
    }

    #[test]
    fn test_rotations_become_rz() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit.rx(FRAC_PI_3, QubitId(0)).unwrap();
        circuit.ry(FRAC_PI_3, QubitId(0)).unwrap();

        assert!(Decompose::new(false).run(&mut circuit).unwrap());
        let counts = circuit.count_ops();
        assert_eq!(counts.get("rx"), None);
        assert_eq!(counts.get("ry"), None);
        assert_eq!(counts.get("rz"), Some(&2));
    }

    #[test]
    fn test_idempotent() {
        let mut circuit = Circuit::with_size("test", 3, 0);
        circuit.sx(QubitId(0)).unwrap();
        circuit.ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap();
        circuit.measure_all().unwrap();

        let pass = Decompose::new(false);
        assert!(pass.run(&mut circuit).unwrap());
        let snapshot = circuit.clone();
        assert!(!pass.run(&mut circuit).unwrap());
        assert_eq!(circuit, snapshot);
    }
}
