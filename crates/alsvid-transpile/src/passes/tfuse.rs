//! T-count fusion on Pauli-based circuits.

use alsvid_ir::{Circuit, Op, OpKind, PauliKind};

use crate::error::TranspileResult;
use crate::pass::Pass;

/// Fuses pairs of `t_pauli` rotations on a PBC.
///
/// A left-to-right sweep propagates each new `t_pauli` word backward
/// through the window of already-emitted rotations: past commuting entries
/// unchanged, past anticommuting `s_pauli`/`z_pauli` entries by the π/2 and
/// π conjugation rules. Meeting a `t_pauli` on the same axis fuses the pair
/// into an `s_pauli` (equal signs) or cancels both (opposite signs); an
/// anticommuting `t_pauli` blocks. Measurements and barriers flush the
/// window. The T-count never increases.
pub struct Tfuse;

impl Tfuse {
    /// Create the pass.
    pub fn new() -> Self {
        Self
    }
}

impl Default for Tfuse {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for Tfuse {
    fn name(&self) -> &'static str {
        "TFUSE"
    }

    fn run(&self, circuit: &mut Circuit) -> TranspileResult<bool> {
        let mut out: Vec<Op> = Vec::with_capacity(circuit.num_ops());
        let mut modified = false;

        enum Hit {
            /// Same axis, same sign: the pair merges into an `s_pauli`.
            Fuse(usize),
            /// Same axis, opposite sign: the pair is the identity.
            Cancel(usize),
            /// No partner reachable: keep the op as written.
            Append,
        }

        for op in circuit.ops() {
            let OpKind::Pauli {
                kind: PauliKind::TRot,
                word,
            } = &op.kind
            else {
                out.push(op.clone());
                continue;
            };

            // Propagate a working copy leftward; the original op is kept
            // verbatim if the propagation is blocked before finding a
            // partner.
            let mut w = word.clone();
            let mut hit = Hit::Append;
            for idx in (0..out.len()).rev() {
                match &out[idx].kind {
                    OpKind::Pauli {
                        kind: PauliKind::TRot,
                        word: earlier,
                    } => {
                        if earlier.same_axis(&w) {
                            hit = if earlier.is_negative() == w.is_negative() {
                                Hit::Fuse(idx)
                            } else {
                                Hit::Cancel(idx)
                            };
                            break;
                        }
                        if !earlier.commutes_with(&w) {
                            break;
                        }
                    }
                    OpKind::Pauli {
                        kind: PauliKind::SRot,
                        word: earlier,
                    } => {
                        w = w.conjugated_by_quarter(earlier);
                    }
                    OpKind::Pauli {
                        kind: PauliKind::ZRot,
                        word: earlier,
                    } => {
                        w = w.conjugated_by_half(earlier);
                    }
                    _ => break,
                }
            }
            match hit {
                Hit::Fuse(idx) => {
                    let axis = out[idx].pauli_word().expect("t_pauli partner").clone();
                    out[idx] = Op::pauli_rot(PauliKind::SRot, axis);
                    modified = true;
                }
                Hit::Cancel(idx) => {
                    out.remove(idx);
                    modified = true;
                }
                Hit::Append => out.push(op.clone()),
            }
        }

        if modified {
            circuit.replace_ops(out)?;
        }
        Ok(modified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t_counts(circuit: &Circuit) -> (usize, usize) {
        let counts = circuit.count_ops();
        (
            counts.get("t_pauli").copied().unwrap_or(0),
            counts.get("s_pauli").copied().unwrap_or(0),
        )
    }

    #[test]
    fn test_three_equal_rotations() {
        let mut circuit = Circuit::with_size("pbc", 2, 0);
        circuit.t_pauli("+ZI").unwrap();
        circuit.t_pauli("+ZI").unwrap();
        circuit.t_pauli("+ZI").unwrap();

        assert!(Tfuse.run(&mut circuit).unwrap());
        // Two rotations combine to one s_pauli; the third remains.
        assert_eq!(circuit.num_ops(), 2);
        assert_eq!(circuit.ops()[0].name(), "s_pauli");
        assert_eq!(circuit.ops()[1].name(), "t_pauli");
        assert_eq!(
            circuit.ops()[0].pauli_word().unwrap().to_string(),
            "+ZI"
        );
    }

    #[test]
    fn test_opposite_signs_cancel() {
        let mut circuit = Circuit::with_size("pbc", 1, 0);
        circuit.t_pauli("+Z").unwrap();
        circuit.t_pauli("-Z").unwrap();

        assert!(Tfuse.run(&mut circuit).unwrap());
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_commuting_entries_are_transparent() {
        let mut circuit = Circuit::with_size("pbc", 2, 0);
        circuit.t_pauli("+ZI").unwrap();
        circuit.t_pauli("+IZ").unwrap();
        circuit.t_pauli("+ZI").unwrap();

        assert!(Tfuse.run(&mut circuit).unwrap());
        let (t, s) = t_counts(&circuit);
        assert_eq!((t, s), (1, 1));
    }

    #[test]
    fn test_anticommuting_t_blocks() {
        let mut circuit = Circuit::with_size("pbc", 1, 0);
        circuit.t_pauli("+Z").unwrap();
        circuit.t_pauli("+X").unwrap();
        circuit.t_pauli("+Z").unwrap();

        assert!(!Tfuse.run(&mut circuit).unwrap());
        assert_eq!(circuit.num_ops(), 3);
    }

    #[test]
    fn test_propagation_through_s_pauli() {
        // The s_pauli(+Z) conjugates the incoming +X into +Y, which no
        // longer matches the first rotation: nothing fuses.
        let mut circuit = Circuit::with_size("pbc", 1, 0);
        circuit.t_pauli("+X").unwrap();
        circuit.s_pauli("+Z").unwrap();
        circuit.t_pauli("+X").unwrap();
        assert!(!Tfuse.run(&mut circuit).unwrap());

        // But t_pauli(+Y) behind the same s_pauli becomes +X and fuses.
        let mut circuit = Circuit::with_size("pbc", 1, 0);
        circuit.t_pauli("+X").unwrap();
        circuit.s_pauli("+Z").unwrap();
        circuit.t_pauli("+Y").unwrap();
        assert!(Tfuse.run(&mut circuit).unwrap());
        let (t, s) = t_counts(&circuit);
        assert_eq!(t, 0);
        assert_eq!(s, 2);
        assert_eq!(
            circuit.ops()[0].pauli_word().unwrap().to_string(),
            "+X"
        );
    }

    #[test]
    fn test_measurement_flushes_window() {
        let mut circuit = Circuit::with_size("pbc", 1, 1);
        circuit.t_pauli("+Z").unwrap();
        circuit.m_pauli("+Z", Some(alsvid_ir::ClbitId(0))).unwrap();
        circuit.t_pauli("+Z").unwrap();

        assert!(!Tfuse.run(&mut circuit).unwrap());
        assert_eq!(circuit.num_ops(), 3);
    }

    #[test]
    fn test_t_count_never_increases() {
        let mut circuit = Circuit::with_size("pbc", 2, 0);
        for word in ["+ZI", "+XZ", "+ZI", "-XZ", "+IZ"] {
            circuit.t_pauli(word).unwrap();
        }
        let before = circuit.t_count();
        Tfuse.run(&mut circuit).unwrap();
        assert!(circuit.t_count() <= before);
    }
}
