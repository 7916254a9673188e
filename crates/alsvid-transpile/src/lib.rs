//! Alsvid Transpilation Framework
//!
//! Lowers high-level quantum circuits into forms suitable for
//! fault-tolerant execution: a **Clifford+T** circuit, or a **Pauli-based
//! circuit** (PBC) of π/4, π/2 and π Pauli rotations plus Pauli
//! measurements. A configurable pass manager drives the lowering;
//! individual passes implement well-defined rewrites on the shared
//! [`alsvid_ir`] representation.
//!
//! # Architecture
//!
//! ```text
//! Input Circuit
//!       │
//!       ▼
//! ┌─────────────┐
//! │ Transpiler  │ ◄── PassConfig (keep_ccx, keep_cx, ε, silent)
//! └─────────────┘
//!       │
//!       ├── Decompose / RemoveTrivialRz / GateFusion / RemovePauli
//!       ├── SynthesizeRz            (external backend via RzSynthesizer)
//!       └── ToPbc / Tfuse / CliffordReduction
//!       │
//!       ▼
//! Output Circuit (Clifford+T or PBC)
//! ```
//!
//! # Example: Clifford+T+RZ lowering
//!
//! ```rust
//! use alsvid_ir::{Circuit, QubitId};
//! use alsvid_transpile::{sequences, PassConfig, Transpiler};
//!
//! let mut circuit = Circuit::with_size("demo", 2, 0);
//! circuit.sx(QubitId(0)).unwrap();
//! circuit.cz(QubitId(0), QubitId(1)).unwrap();
//!
//! let config = PassConfig { silent: true, ..PassConfig::default() };
//! let lowered = Transpiler::new()
//!     .execute(circuit, sequences::TO_CLIFFORD_T_RZ, &config)
//!     .unwrap();
//!
//! assert!(lowered.is_clifford_t());
//! ```
//!
//! # Custom passes
//!
//! Implement the [`Pass`] trait to run your own rewrites:
//!
//! ```rust
//! use alsvid_ir::Circuit;
//! use alsvid_transpile::{Pass, TranspileResult};
//!
//! struct MyPass;
//!
//! impl Pass for MyPass {
//!     fn name(&self) -> &'static str { "my_pass" }
//!
//!     fn run(&self, circuit: &mut Circuit) -> TranspileResult<bool> {
//!         let _ = circuit;
//!         Ok(false)
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod manager;
pub mod pass;
pub mod synth;
pub mod tableau;

// Built-in passes
pub mod passes;

pub use config::PassConfig;
pub use error::{TranspileError, TranspileResult};
pub use manager::Transpiler;
pub use pass::{sequences, Pass, PassType};
pub use synth::RzSynthesizer;
pub use tableau::Tableau;
