//! Trivial-RZ elimination pass.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use alsvid_ir::{Circuit, Op, OpKind, StandardGate};

use crate::error::TranspileResult;
use crate::pass::Pass;
use crate::passes::ANGLE_EPS;

/// The canonical form of an RZ angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum RzForm {
    /// A multiple of 2π: the rotation is the identity.
    Identity,
    /// A named Clifford+T diagonal gate (Z, S, Sdg, T or Tdg).
    Gate(StandardGate),
    /// A genuine rotation; carries the angle reduced into (−π, π].
    Rotation(f64),
}

/// Reduce an angle into (−π, π].
pub(crate) fn normalize_angle(theta: f64) -> f64 {
    let mut t = theta % TAU;
    if t > PI {
        t -= TAU;
    } else if t <= -PI {
        t += TAU;
    }
    t
}

/// Classify an RZ angle against the named diagonal gates.
pub(crate) fn classify_rz(theta: f64) -> RzForm {
    let t = normalize_angle(theta);
    if t.abs() < ANGLE_EPS {
        RzForm::Identity
    } else if (t - PI).abs() < ANGLE_EPS || (t + PI).abs() < ANGLE_EPS {
        RzForm::Gate(StandardGate::Z)
    } else if (t - FRAC_PI_2).abs() < ANGLE_EPS {
        RzForm::Gate(StandardGate::S)
    } else if (t + FRAC_PI_2).abs() < ANGLE_EPS {
        RzForm::Gate(StandardGate::Sdg)
    } else if (t - FRAC_PI_4).abs() < ANGLE_EPS {
        RzForm::Gate(StandardGate::T)
    } else if (t + FRAC_PI_4).abs() < ANGLE_EPS {
        RzForm::Gate(StandardGate::Tdg)
    } else {
        RzForm::Rotation(t)
    }
}

/// Drops every RZ whose angle reduces to a multiple of 2π and rewrites
/// angles that reduce to ±π, ±π/2, ±π/4 as Z, S/Sdg, T/Tdg.
pub struct RemoveTrivialRz;

impl RemoveTrivialRz {
    /// Create the pass.
    pub fn new() -> Self {
        Self
    }
}

impl Default for RemoveTrivialRz {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for RemoveTrivialRz {
    fn name(&self) -> &'static str {
        "REMOVE_TRIVIAL_RZ"
    }

    fn run(&self, circuit: &mut Circuit) -> TranspileResult<bool> {
        let mut modified = false;
        let mut new_ops = Vec::with_capacity(circuit.num_ops());
        for op in circuit.ops() {
            if let OpKind::Gate(StandardGate::Rz(theta)) = op.kind {
                match classify_rz(theta) {
                    RzForm::Identity => {
                        modified = true;
                        continue;
                    }
                    RzForm::Gate(gate) => {
                        modified = true;
                        new_ops.push(Op::gate(gate, op.qubits.iter().copied()));
                        continue;
                    }
                    RzForm::Rotation(_) => {}
                }
            }
            new_ops.push(op.clone());
        }
        if modified {
            circuit.replace_ops(new_ops)?;
        }
        Ok(modified)
    }
}
