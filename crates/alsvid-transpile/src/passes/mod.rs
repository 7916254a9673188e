//! Built-in transpilation passes.

mod clifford_reduction;
mod decompose;
mod gate_fusion;
mod remove_pauli;
mod remove_trivial_rz;
mod synthesize_rz;
mod tfuse;
mod to_pbc;

pub use clifford_reduction::CliffordReduction;
pub use decompose::Decompose;
pub use gate_fusion::GateFusion;
pub use remove_pauli::RemovePauli;
pub use remove_trivial_rz::RemoveTrivialRz;
pub use synthesize_rz::SynthesizeRz;
pub use tfuse::Tfuse;
pub use to_pbc::ToPbc;

/// Tolerance for recognizing named rotation angles.
pub(crate) const ANGLE_EPS: f64 = 1e-12;
