//! Pass trait, pass registry, and predefined sequences.

use alsvid_ir::Circuit;

use crate::error::TranspileResult;

/// A transpilation pass: one rewrite of the circuit's operation sequence.
///
/// `run` returns `true` iff the pass changed `ops`. Passes are constructed
/// with their own configuration; the manager does not inspect pass
/// internals.
pub trait Pass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &'static str;

    /// Run the pass on the given circuit.
    fn run(&self, circuit: &mut Circuit) -> TranspileResult<bool>;
}

/// The available transpilation passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassType {
    /// Decompose gates to the basic gate set.
    Decompose,
    /// Remove RZ gates with zero or named trivial angles.
    RemoveTrivialRz,
    /// Fuse adjacent gates where possible.
    GateFusion,
    /// Remove trailing Pauli gates, folding flips into measurements.
    RemovePauli,
    /// Convert to Pauli-based circuit format.
    ToPbc,
    /// Apply the Clifford reduction (TACO) pipeline.
    CliffordReduction,
    /// Synthesize RZ gates to Clifford+T (needs a synthesis backend).
    SynthesizeRz,
    /// T-count optimization for PBC circuits.
    Tfuse,
}

impl PassType {
    /// The name used in the statistics table.
    pub fn name(&self) -> &'static str {
        match self {
            PassType::Decompose => "DECOMPOSE",
            PassType::RemoveTrivialRz => "REMOVE_TRIVIAL_RZ",
            PassType::GateFusion => "GATE_FUSION",
            PassType::RemovePauli => "REMOVE_PAULI",
            PassType::ToPbc => "TO_PBC",
            PassType::CliffordReduction => "CLIFFORD_REDUCTION",
            PassType::SynthesizeRz => "SYNTHESIZE_RZ",
            PassType::Tfuse => "TFUSE",
        }
    }
}

/// Predefined pass sequences for common workflows.
pub mod sequences {
    use super::PassType;

    /// Convert to Clifford+T (requires a synthesis backend).
    pub const TO_CLIFFORD_T: &[PassType] = &[
        PassType::Decompose,
        PassType::RemoveTrivialRz,
        PassType::SynthesizeRz,
        PassType::GateFusion,
    ];

    /// Convert to Clifford+T+RZ; stops before RZ synthesis, so no backend
    /// is needed.
    pub const TO_CLIFFORD_T_RZ: &[PassType] = &[PassType::Decompose, PassType::RemoveTrivialRz];

    /// Convert to PBC format.
    pub const TO_PBC: &[PassType] = &[
        PassType::Decompose,
        PassType::RemoveTrivialRz,
        PassType::SynthesizeRz,
        PassType::ToPbc,
    ];

    /// PBC with T-count optimization.
    pub const TO_PBC_OPTIMIZED: &[PassType] = &[
        PassType::Decompose,
        PassType::RemoveTrivialRz,
        PassType::SynthesizeRz,
        PassType::ToPbc,
        PassType::Tfuse,
    ];

    /// Clifford reduction (TACO) pipeline.
    pub const TO_CLIFFORD_REDUCTION: &[PassType] = &[
        PassType::Decompose,
        PassType::RemoveTrivialRz,
        PassType::SynthesizeRz,
        PassType::CliffordReduction,
    ];

    /// Post-synthesis cleanup.
    pub const CLEANUP: &[PassType] = &[PassType::GateFusion, PassType::RemoveTrivialRz];
}
