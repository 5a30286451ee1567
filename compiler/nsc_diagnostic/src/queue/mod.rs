//! Diagnostic queue for collecting, deduplicating, and sorting diagnostics.
//!
//! Passes push every problem they find and keep going, so one run reports
//! the whole batch. The queue orders the batch by source position on flush.

use nsc_ir::Span;

use crate::Diagnostic;

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors before further errors are dropped (0 = unlimited).
    pub error_limit: usize,
    /// Drop an error identical to the previous one in primary span, message
    /// and notes.
    pub deduplicate: bool,
}

impl DiagnosticConfig {
    #[must_use]
    pub fn with_error_limit(mut self, limit: usize) -> Self {
        self.error_limit = limit;
        self
    }

    #[must_use]
    pub fn with_deduplication(mut self, deduplicate: bool) -> Self {
        self.deduplicate = deduplicate;
        self
    }
}

/// Queue for collecting, deduplicating, and sorting diagnostics.
///
/// # Example
///
/// ```text
/// let mut queue = DiagnosticQueue::new();
/// queue.add(diagnostic);
/// // ... add more diagnostics
/// let sorted = queue.flush();
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    /// Primary span, message and notes of the last error, for dedup.
    ///
    /// Notes take part because instance clones share the template's spans:
    /// the same template error reported for two instances differs only in
    /// its `in instance` note.
    last_error: Option<(Option<Span>, String, Vec<String>)>,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    /// Create a new diagnostic queue with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a diagnostic queue with custom configuration.
    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            config,
            ..Self::default()
        }
    }

    /// Add a diagnostic.
    ///
    /// Returns `true` if the diagnostic was added, `false` if it was filtered.
    pub fn add(&mut self, diag: Diagnostic) -> bool {
        if self.limit_reached() {
            return false;
        }

        if self.config.deduplicate && self.is_duplicate(&diag) {
            return false;
        }

        self.last_error = Some((diag.primary_span(), diag.message.clone(), diag.notes.clone()));
        self.diagnostics.push(diag);
        true
    }

    /// Check if the error limit has been reached.
    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.diagnostics.len() >= self.config.error_limit
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Sort diagnostics by primary span and return them, clearing the queue.
    ///
    /// The sort is stable, so diagnostics at the same position keep their
    /// emission order. Diagnostics without a span sort first.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.sort_by_key(Diagnostic::primary_span);
        self.last_error = None;
        std::mem::take(&mut self.diagnostics)
    }

    fn is_duplicate(&self, diag: &Diagnostic) -> bool {
        match &self.last_error {
            Some((span, message, notes)) => {
                *span == diag.primary_span() && *message == diag.message && *notes == diag.notes
            }
            None => false,
        }
    }
}
