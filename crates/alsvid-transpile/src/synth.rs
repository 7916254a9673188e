//! RZ-synthesis backend boundary.

use alsvid_ir::StandardGate;

/// An approximate single-qubit Z-rotation synthesizer.
///
/// Implementations return a word over `{H, S, Sdg, T, Tdg}` whose unitary
/// approximates `RZ(angle)` to absolute precision `epsilon` in the operator
/// norm. The number-theoretic kernel (Ross–Selinger / gridsynth) lives
/// behind this trait; the transpiler only consumes the word.
///
/// Implementations must be safe to share across independent transpiles.
pub trait RzSynthesizer: Send + Sync {
    /// Synthesize an approximating word for `RZ(angle)`.
    fn synth(&self, angle: f64, epsilon: f64) -> Vec<StandardGate>;
}
