//! Circuit operations: gate-form and Pauli-form.

use serde::{Deserialize, Serialize};

use crate::gate::StandardGate;
use crate::pauli::PauliWord;
use crate::qubit::{ClbitId, QubitId};

/// The Pauli-form operation family of a Pauli-based circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PauliKind {
    /// Rotation by π/4 about a Pauli word: `exp(-i·π/8·P)`.
    TRot,
    /// Rotation by π/2 about a Pauli word.
    SRot,
    /// Rotation by π about a Pauli word (a Pauli operator up to phase).
    ZRot,
    /// Projective measurement of a Pauli word.
    Measure,
}

impl PauliKind {
    /// Get the name of this operation.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            PauliKind::TRot => "t_pauli",
            PauliKind::SRot => "s_pauli",
            PauliKind::ZRot => "z_pauli",
            PauliKind::Measure => "m_pauli",
        }
    }
}

/// The kind of operation in a circuit.
///
/// Gate-form kinds (`Gate`, `Measure`, `Reset`) and Pauli-form kinds
/// (`Pauli`) must not coexist in one circuit; `Barrier` is neutral. The
/// guarded construction surface in [`crate::Circuit`] enforces this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OpKind {
    /// A unitary gate operation.
    Gate(StandardGate),
    /// Z-basis measurement of a qubit into a classical bit.
    ///
    /// `flipped` records a classical inversion of the recorded outcome,
    /// folded in when a Pauli gate is commuted past the measurement.
    Measure {
        /// Invert the recorded outcome.
        flipped: bool,
    },
    /// Reset qubit to |0⟩.
    Reset,
    /// Barrier (synchronization marker, not a gate).
    Barrier,
    /// A Pauli-form operation over a word spanning all qubits.
    Pauli {
        /// Which Pauli-form operation.
        kind: PauliKind,
        /// The signed Pauli word.
        word: PauliWord,
    },
}

/// A complete operation with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Op {
    /// The kind of operation.
    pub kind: OpKind,
    /// Qubits this operation names (empty for Pauli-form kinds, whose word
    /// spans every qubit).
    pub qubits: Vec<QubitId>,
    /// Classical bits this operation writes (measurements only).
    pub clbits: Vec<ClbitId>,
}

impl Op {
    /// Create a gate operation.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: OpKind::Gate(gate),
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a single-qubit gate operation.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate operation.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a measurement operation.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: OpKind::Measure { flipped: false },
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    /// Create a reset operation.
    pub fn reset(qubit: QubitId) -> Self {
        Self {
            kind: OpKind::Reset,
            qubits: vec![qubit],
            clbits: vec![],
        }
    }

    /// Create a barrier over the given qubits.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: OpKind::Barrier,
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a Pauli rotation (`t_pauli`, `s_pauli` or `z_pauli`).
    pub fn pauli_rot(kind: PauliKind, word: PauliWord) -> Self {
        debug_assert!(kind != PauliKind::Measure);
        Self {
            kind: OpKind::Pauli { kind, word },
            qubits: vec![],
            clbits: vec![],
        }
    }

    /// Create a Pauli measurement (`m_pauli`).
    pub fn pauli_measure(word: PauliWord, clbit: Option<ClbitId>) -> Self {
        Self {
            kind: OpKind::Pauli {
                kind: PauliKind::Measure,
                word,
            },
            qubits: vec![],
            clbits: clbit.into_iter().collect(),
        }
    }

    /// Check if this is a gate operation.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, OpKind::Gate(_))
    }

    /// Check if this is a qubit measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, OpKind::Measure { .. })
    }

    /// Check if this is a reset.
    pub fn is_reset(&self) -> bool {
        matches!(self.kind, OpKind::Reset)
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, OpKind::Barrier)
    }

    /// Check if this is a Pauli-form operation.
    pub fn is_pauli(&self) -> bool {
        matches!(self.kind, OpKind::Pauli { .. })
    }

    /// Check if this is a gate-form operation other than a barrier.
    pub fn is_gate_form(&self) -> bool {
        matches!(
            self.kind,
            OpKind::Gate(_) | OpKind::Measure { .. } | OpKind::Reset
        )
    }

    /// Get the gate if this is a gate operation.
    pub fn as_gate(&self) -> Option<&StandardGate> {
        match &self.kind {
            OpKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Get the Pauli word if this is a Pauli-form operation.
    pub fn pauli_word(&self) -> Option<&PauliWord> {
        match &self.kind {
            OpKind::Pauli { word, .. } => Some(word),
            _ => None,
        }
    }

    /// Get the name of the operation.
    pub fn name(&self) -> &'static str {
        match &self.kind {
            OpKind::Gate(g) => g.name(),
            OpKind::Measure { .. } => "measure",
            OpKind::Reset => "reset",
            OpKind::Barrier => "barrier",
            OpKind::Pauli { kind, .. } => kind.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pauli::PauliWord;

    #[test]
    fn test_gate_op() {
        let op = Op::single_qubit_gate(StandardGate::H, QubitId(0));
        assert!(op.is_gate());
        assert!(op.is_gate_form());
        assert_eq!(op.qubits.len(), 1);
        assert_eq!(op.name(), "h");
    }

    #[test]
    fn test_measure_op() {
        let op = Op::measure(QubitId(0), ClbitId(0));
        assert!(op.is_measure());
        assert!(op.is_gate_form());
        assert_eq!(op.clbits, vec![ClbitId(0)]);
        assert!(matches!(op.kind, OpKind::Measure { flipped: false }));
    }

    #[test]
    fn test_barrier_is_neither_family() {
        let op = Op::barrier([QubitId(0), QubitId(1)]);
        assert!(op.is_barrier());
        assert!(!op.is_gate_form());
        assert!(!op.is_pauli());
    }

    #[test]
    fn test_pauli_ops() {
        let word = PauliWord::parse("+XZ").unwrap();
        let rot = Op::pauli_rot(PauliKind::TRot, word.clone());
        assert!(rot.is_pauli());
        assert_eq!(rot.name(), "t_pauli");
        assert_eq!(rot.pauli_word(), Some(&word));

        let m = Op::pauli_measure(word, Some(ClbitId(1)));
        assert_eq!(m.name(), "m_pauli");
        assert_eq!(m.clbits, vec![ClbitId(1)]);
    }
}
