//! `OpenQASM` 2 front-end for the Alsvid transpiler.
//!
//! Parses the QASM 2 subset matching the IR's gate set into an
//! [`alsvid_ir::Circuit`], and serializes circuits back to text. Pauli-based
//! circuits use extension instructions (`t_pauli(+XIZ);`) that both sides
//! understand, so every circuit the transpiler can produce round-trips.
//!
//! ```rust
//! let source = r#"OPENQASM 2.0;
//! include "qelib1.inc";
//! qreg q[2];
//! creg c[2];
//! h q[0];
//! cx q[0], q[1];
//! measure q -> c;
//! "#;
//!
//! let circuit = alsvid_qasm::parse(source).unwrap();
//! assert_eq!(circuit.num_qubits(), 2);
//!
//! let emitted = alsvid_qasm::emit(&circuit);
//! let reparsed = alsvid_qasm::parse(&emitted).unwrap();
//! assert_eq!(circuit.ops(), reparsed.ops());
//! ```

pub mod emitter;
pub mod error;
pub mod lexer;
pub mod parser;

pub use emitter::emit;
pub use error::{ParseError, ParseResult};
pub use parser::parse;

use alsvid_ir::Circuit;

/// Parse a QASM file from disk.
pub fn parse_file(path: impl AsRef<std::path::Path>) -> ParseResult<Circuit> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse(&source)
}
