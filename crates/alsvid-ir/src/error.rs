//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit index out of range for the circuit.
    #[error("Qubit {qubit} out of range for circuit with {num_qubits} qubits (op: {op})")]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Number of qubits in the circuit.
        num_qubits: usize,
        /// Name of the operation for context.
        op: &'static str,
    },

    /// Classical bit index out of range for the circuit.
    #[error("Classical bit {clbit} out of range for circuit with {num_clbits} bits (op: {op})")]
    ClbitOutOfRange {
        /// The offending classical bit.
        clbit: ClbitId,
        /// Number of classical bits in the circuit.
        num_clbits: usize,
        /// Name of the operation for context.
        op: &'static str,
    },

    /// The same qubit appears twice in one operation.
    #[error("Duplicate qubit {qubit} in operation {op}")]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Name of the operation for context.
        op: &'static str,
    },

    /// A Pauli word does not span the circuit's qubits.
    #[error("Pauli word has length {len}, expected {num_qubits}")]
    PauliLengthMismatch {
        /// Length of the word.
        len: usize,
        /// Number of qubits in the circuit.
        num_qubits: usize,
    },

    /// A Pauli string contains characters outside `{I, X, Y, Z}` or is empty.
    #[error("Malformed Pauli string: '{0}'")]
    MalformedPauli(String),

    /// Gate-form and Pauli-form operations in one circuit.
    #[error("Cannot mix Pauli-form operations with standard gates in one circuit")]
    MixedOpFamilies,

    /// Gate applied to the wrong number of qubits.
    #[error("Gate '{gate}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate: &'static str,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: usize,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
