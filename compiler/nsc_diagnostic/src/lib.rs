//! Diagnostic system for the generic-component passes.
//!
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Primary span (where it went wrong)
//! - Notes naming the component instance it went wrong in
//!
//! Every diagnostic the passes produce is an error. Passes push them onto a
//! [`DiagnosticQueue`] and keep going; the driver flushes the sorted batch.

mod diagnostic;
mod error_code;
pub mod queue;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
