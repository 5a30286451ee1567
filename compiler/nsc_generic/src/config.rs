//! Settings for the generic-component passes.

use nsc_diagnostic::{DiagnosticConfig, DiagnosticQueue};

/// Configuration for elaboration and constant folding.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct GenericsConfig {
    /// Upper bound on whole-program fixed-point passes.
    ///
    /// Every productive pass resolves at least one constant slot, so a
    /// program never needs more passes than it has slots. Hitting this bound
    /// is a compiler defect, not a user error.
    pub max_fold_passes: usize,
    /// Accept an integral constant for a floating-point parameter.
    pub promote_integral_to_float: bool,
    /// Maximum number of errors collected (0 = unlimited).
    pub error_limit: usize,
}

impl Default for GenericsConfig {
    fn default() -> Self {
        GenericsConfig {
            max_fold_passes: 1024,
            promote_integral_to_float: true,
            error_limit: 0,
        }
    }
}

impl GenericsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_fold_passes(mut self, passes: usize) -> Self {
        self.max_fold_passes = passes;
        self
    }

    #[must_use]
    pub fn with_integral_promotion(mut self, promote: bool) -> Self {
        self.promote_integral_to_float = promote;
        self
    }

    #[must_use]
    pub fn with_error_limit(mut self, limit: usize) -> Self {
        self.error_limit = limit;
        self
    }

    /// A diagnostic queue honouring `error_limit`.
    ///
    /// Repeats are kept: one template error is reported once per instance.
    pub fn diagnostic_queue(&self) -> DiagnosticQueue {
        DiagnosticQueue::with_config(
            DiagnosticConfig::default()
                .with_error_limit(self.error_limit)
                .with_deduplication(false),
        )
    }
}
