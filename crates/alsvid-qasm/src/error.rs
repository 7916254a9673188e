//! Error types for the QASM front-end.

use thiserror::Error;

/// Errors that can occur during parsing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Lexer error (invalid token).
    #[error("Lexer error at position {position}: {message}")]
    Lexer {
        /// Byte offset of the bad token.
        position: usize,
        /// Description of the problem.
        message: String,
    },

    /// Unexpected token.
    #[error("Unexpected token: expected {expected}, found {found}")]
    UnexpectedToken {
        /// What the parser was looking for.
        expected: String,
        /// What it found instead.
        found: String,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of input: {0}")]
    UnexpectedEof(String),

    /// Unsupported OPENQASM version.
    #[error("Unsupported OPENQASM version: {0}")]
    UnsupportedVersion(String),

    /// Undefined register.
    #[error("Undefined register: {0}")]
    UndefinedRegister(String),

    /// Duplicate register declaration.
    #[error("Duplicate register declaration: {0}")]
    DuplicateRegister(String),

    /// Unknown gate name.
    #[error("Unknown gate: {0}")]
    UnknownGate(String),

    /// Wrong number of qubit arguments.
    #[error("Gate '{gate}' expects {expected} qubits, got {got}")]
    WrongQubitCount {
        /// Gate name.
        gate: String,
        /// Expected count.
        expected: usize,
        /// Provided count.
        got: usize,
    },

    /// Wrong number of parameters.
    #[error("Gate '{gate}' expects {expected} parameters, got {got}")]
    WrongParameterCount {
        /// Gate name.
        gate: String,
        /// Expected count.
        expected: usize,
        /// Provided count.
        got: usize,
    },

    /// Index out of bounds for a register.
    #[error("Index {index} out of bounds for register '{register}' of size {size}")]
    IndexOutOfBounds {
        /// Register name.
        register: String,
        /// Offending index.
        index: usize,
        /// Register size.
        size: usize,
    },

    /// IR error during circuit construction.
    #[error("Circuit error: {0}")]
    Circuit(#[from] alsvid_ir::IrError),

    /// Failure reading a source file.
    #[error("Failed to read '{path}': {source}")]
    Io {
        /// Path of the file.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Generic parse error.
    #[error("Parse error: {0}")]
    Generic(String),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
