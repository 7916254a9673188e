//! Error types for the transpile crate.

use alsvid_ir::IrError;
use thiserror::Error;

/// Errors that can occur during transpilation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TranspileError {
    /// IR invariant violation.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),

    /// Failure writing the statistics report.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A pass met an operation outside its precondition.
    ///
    /// Passes never silently drop operations they do not understand:
    /// unknown-but-harmless ops pass through unchanged, and ops that would
    /// make the output ill-formed surface here.
    #[error("Pass {pass} cannot handle operation '{op}'")]
    UnsupportedOp {
        /// Name of the pass.
        pass: &'static str,
        /// Description of the offending operation.
        op: String,
    },
}

/// Result type for transpilation operations.
pub type TranspileResult<T> = Result<T, TranspileError>;
