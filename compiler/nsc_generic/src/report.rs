//! Diagnostic helpers shared by the passes.

use nsc_diagnostic::{Diagnostic, ErrorCode};
use nsc_ir::{Location, NodeId, Program};

/// Attach an `in instance` note when `loc` was stamped by an instantiation.
pub(crate) fn in_instance(program: &Program, loc: Location, diag: Diagnostic) -> Diagnostic {
    match loc.container {
        Some(component) => diag.with_note(format!(
            "in instance `{}`",
            program.component(component).instance_name
        )),
        None => diag,
    }
}

/// Label `diag` at `node` and note its instance.
pub(crate) fn at_node(
    program: &Program,
    node: NodeId,
    label: impl Into<String>,
    diag: Diagnostic,
) -> Diagnostic {
    let loc = program.node(node).loc;
    in_instance(program, loc, diag.with_label(loc.span, label))
}

/// Panic with an internal compiler error tagged `E9001`.
///
/// Used for broken invariants that no user input can cause.
#[track_caller]
pub(crate) fn ice(message: std::fmt::Arguments<'_>) -> ! {
    panic!("internal compiler error [{}]: {message}", ErrorCode::E9001)
}
