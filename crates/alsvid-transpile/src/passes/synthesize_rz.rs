//! Approximate RZ synthesis pass.

use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

use alsvid_ir::{Circuit, Op, OpKind, StandardGate};

use crate::error::TranspileResult;
use crate::pass::Pass;
use crate::passes::remove_trivial_rz::normalize_angle;
use crate::synth::RzSynthesizer;

/// Replaces each continuous `RZ(θ)` with an approximating word over
/// `{H, S, Sdg, T, Tdg}` to absolute precision ε.
///
/// The pass only exists when a synthesis backend is linked; the manager
/// warns and skips it otherwise. Words are memoized per rounded angle and
/// ε; the table is internally synchronized so one pass instance may serve
/// parallel transpiles.
pub struct SynthesizeRz {
    backend: Arc<dyn RzSynthesizer>,
    epsilon: f64,
    cache: Mutex<FxHashMap<(i64, u64), Vec<StandardGate>>>,
}

impl SynthesizeRz {
    /// Default absolute precision target.
    pub const DEFAULT_EPSILON: f64 = 1e-10;

    /// Create the pass. A negative `epsilon_override` selects the default.
    pub fn new(backend: Arc<dyn RzSynthesizer>, epsilon_override: f64) -> Self {
        let epsilon = if epsilon_override >= 0.0 {
            epsilon_override
        } else {
            Self::DEFAULT_EPSILON
        };
        Self {
            backend,
            epsilon,
            cache: Mutex::new(FxHashMap::default()),
        }
    }

    /// The precision target in use.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    // Angles are keyed at 32 fractional bits; synthesis is far coarser
    // than that for any reachable ε.
    fn cache_key(&self, angle: f64) -> (i64, u64) {
        #[allow(clippy::cast_possible_truncation)]
        let quantized = (normalize_angle(angle) * f64::from(1u32 << 31) * 2.0).round() as i64;
        (quantized, self.epsilon.to_bits())
    }

    fn word_for(&self, angle: f64) -> Vec<StandardGate> {
        let key = self.cache_key(angle);
        let mut cache = self.cache.lock().expect("synthesis cache poisoned");
        cache
            .entry(key)
            .or_insert_with(|| self.backend.synth(angle, self.epsilon))
            .clone()
    }
}

impl Pass for SynthesizeRz {
    fn name(&self) -> &'static str {
        "SYNTHESIZE_RZ"
    }

    fn run(&self, circuit: &mut Circuit) -> TranspileResult<bool> {
        let mut modified = false;
        let mut new_ops = Vec::with_capacity(circuit.num_ops());
        for op in circuit.ops() {
            if let OpKind::Gate(StandardGate::Rz(theta)) = op.kind {
                let q = op.qubits[0];
                for gate in self.word_for(theta) {
                    new_ops.push(Op::single_qubit_gate(gate, q));
                }
                modified = true;
            } else {
                new_ops.push(op.clone());
            }
        }
        if modified {
            circuit.replace_ops(new_ops)?;
        }
        Ok(modified)
    }
}
