//! Configuration options for pass execution.

/// Knobs recognized by the pass registry.
#[derive(Debug, Clone, Copy)]
pub struct PassConfig {
    /// Preserve CCX gates during decomposition.
    pub keep_ccx: bool,
    /// Preserve CX gates in PBC format where legal.
    pub keep_cx: bool,
    /// Override epsilon for RZ synthesis; negative means "use the pass
    /// default".
    pub epsilon_override: f64,
    /// Suppress the per-pass statistics table.
    pub silent: bool,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            keep_ccx: false,
            keep_cx: false,
            epsilon_override: -1.0,
            silent: false,
        }
    }
}
