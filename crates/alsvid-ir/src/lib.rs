//! Alsvid Circuit Intermediate Representation
//!
//! Core data structures for representing quantum circuits on their way to
//! fault-tolerant form. The IR is the only contract shared between
//! transpilation passes: a circuit is a pair of registers plus an ordered
//! operation sequence in program order.
//!
//! # Overview
//!
//! Two operation families share one sequence:
//!
//! - **Gate-form**: named-qubit gates (`H`, `CX`, `Rz(θ)`, …) plus
//!   measure/reset/barrier. See [`StandardGate`] and [`OpKind`].
//! - **Pauli-form**: π/4, π/2 and π rotations about a signed [`PauliWord`]
//!   plus Pauli measurements. A circuit holding only these (barriers
//!   allowed) is a Pauli-based circuit (PBC).
//!
//! The two families must not coexist; the builder surface on [`Circuit`]
//! enforces this at construction time.
//!
//! # Example: Building a Bell pair
//!
//! ```rust
//! use alsvid_ir::{Circuit, ClbitId, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell", 2, 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure(QubitId(0), ClbitId(0)).unwrap();
//! circuit.measure(QubitId(1), ClbitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 3);
//! assert!(circuit.is_clifford_t());
//! ```
//!
//! # Example: A Pauli-based circuit
//!
//! ```rust
//! use alsvid_ir::Circuit;
//!
//! let mut pbc = Circuit::with_size("pbc", 2, 1);
//! pbc.t_pauli("+ZZ").unwrap();
//! pbc.m_pauli("+ZI", Some(alsvid_ir::ClbitId(0))).unwrap();
//!
//! assert!(pbc.is_pbc());
//! assert_eq!(pbc.t_count(), 1);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod op;
pub mod pauli;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use op::{Op, OpKind, PauliKind};
pub use pauli::{Pauli, PauliWord};
pub use qubit::{Clbit, ClbitId, Qubit, QubitId};
