//! Transpiler engine: executes sequences of passes.

use std::io::{self, Write};
use std::sync::Arc;

use tracing::{debug, info, warn};

use alsvid_ir::Circuit;

use crate::config::PassConfig;
use crate::error::TranspileResult;
use crate::pass::{Pass, PassType};
use crate::passes::{
    CliffordReduction, Decompose, GateFusion, RemovePauli, RemoveTrivialRz, SynthesizeRz, Tfuse,
    ToPbc,
};
use crate::synth::RzSynthesizer;

/// Core transpiler engine.
///
/// Owns the circuit for the duration of a run and calls passes serially in
/// the order given; passes are never reordered, deduplicated, or iterated
/// to a fixpoint. Pass types whose backend is absent (RZ synthesis without
/// a synthesizer) are skipped with a warning.
pub struct Transpiler {
    synthesizer: Option<Arc<dyn RzSynthesizer>>,
}

impl Transpiler {
    /// Create a transpiler without a synthesis backend; the
    /// `SYNTHESIZE_RZ` pass will be skipped.
    pub fn new() -> Self {
        Self { synthesizer: None }
    }

    /// Create a transpiler with an RZ-synthesis backend.
    pub fn with_synthesizer(synthesizer: Arc<dyn RzSynthesizer>) -> Self {
        Self {
            synthesizer: Some(synthesizer),
        }
    }

    /// Execute a sequence of passes on a circuit, writing the statistics
    /// table to stdout unless `config.silent`.
    pub fn execute(
        &self,
        circuit: Circuit,
        passes: &[PassType],
        config: &PassConfig,
    ) -> TranspileResult<Circuit> {
        let mut stdout = io::stdout();
        self.execute_with_sink(circuit, passes, config, &mut stdout)
    }

    /// Execute a sequence of passes, writing the statistics table to the
    /// given sink.
    pub fn execute_with_sink(
        &self,
        mut circuit: Circuit,
        passes: &[PassType],
        config: &PassConfig,
        sink: &mut dyn Write,
    ) -> TranspileResult<Circuit> {
        info!(
            passes = passes.len(),
            qubits = circuit.num_qubits(),
            "running transpiler"
        );
        if !config.silent {
            writeln!(sink, "\n=== Pass Execution Summary ===")?;
            writeln!(
                sink,
                "{:<25}{:<10}{:<15}{:<15}{:<10}",
                "Pass", "Modified", "Gates Before", "Gates After", "Depth"
            )?;
            writeln!(sink, "{}", "-".repeat(75))?;
        }

        for &pass_type in passes {
            let Some(pass) = self.create_pass(pass_type, config) else {
                warn!(pass = pass_type.name(), "pass unavailable, skipping");
                continue;
            };
            let gates_before = circuit.num_ops();
            debug!(pass = pass.name(), "running pass");
            let modified = pass.run(&mut circuit)?;
            debug!(
                pass = pass.name(),
                modified,
                ops = circuit.num_ops(),
                "pass completed"
            );
            if !config.silent {
                writeln!(
                    sink,
                    "{:<25}{:<10}{:<15}{:<15}{:<10}",
                    pass_type.name(),
                    if modified { "Yes" } else { "No" },
                    gates_before,
                    circuit.num_ops(),
                    circuit.depth()
                )?;
            }
        }

        if !config.silent {
            writeln!(sink, "\n=== Final Statistics ===")?;
            circuit.print_stats(sink)?;
        }
        info!(
            ops = circuit.num_ops(),
            depth = circuit.depth(),
            "transpiler completed"
        );
        Ok(circuit)
    }

    /// Instantiate a pass with the current config. Returns `None` when the
    /// pass type has no implementation available.
    fn create_pass(&self, pass_type: PassType, config: &PassConfig) -> Option<Box<dyn Pass>> {
        match pass_type {
            PassType::Decompose => Some(Box::new(Decompose::new(config.keep_ccx))),
            PassType::RemoveTrivialRz => Some(Box::new(RemoveTrivialRz::new())),
            PassType::GateFusion => Some(Box::new(GateFusion::new())),
            PassType::RemovePauli => Some(Box::new(RemovePauli::new())),
            PassType::ToPbc => Some(Box::new(ToPbc::new(config.keep_cx))),
            PassType::CliffordReduction => Some(Box::new(CliffordReduction::new())),
            PassType::Tfuse => Some(Box::new(Tfuse::new())),
            PassType::SynthesizeRz => {
                let backend = self.synthesizer.as_ref()?;
                Some(Box::new(SynthesizeRz::new(
                    Arc::clone(backend),
                    config.epsilon_override,
                )))
            }
        }
    }
}

impl Default for Transpiler {
    fn default() -> Self {
        Self::new()
    }
}
