//! Validation of folded generic arguments.
//!
//! Uses the `folded` stamps left by folding as the visited set, resetting
//! each to zero, so it covers exactly the components the last folding pass
//! reached.

use nsc_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode};
use nsc_ir::{ComponentId, NodeId, NodeKind, Program};
use nsc_stack::ensure_sufficient_stack;

use crate::config::GenericsConfig;
use crate::report::{self, ice};
use crate::services::GenericArgChecker;
use crate::walk::{component_refs, is_materialized};

pub(super) fn check_component<C: GenericArgChecker + ?Sized>(
    program: &mut Program,
    component: ComponentId,
    checker: &C,
    config: &GenericsConfig,
    queue: &mut DiagnosticQueue,
) {
    ensure_sufficient_stack(|| {
        if program.component(component).folded == 0 {
            return;
        }
        program.component_mut(component).folded = 0;
        if !program.component(component).is_configuration() {
            return;
        }

        check_graph(program, component, checker, queue);
        for node in component_refs(program, component) {
            let NodeKind::ComponentRef {
                component: used, ..
            } = program.node(node).kind
            else {
                continue;
            };
            if !is_materialized(program, used) {
                continue;
            }
            check_parameter_values(program, node, used, config, queue);
            check_component(program, used, checker, config, queue);
        }
    });
}

/// Check the generic arguments written at each wiring endpoint.
fn check_graph<C: GenericArgChecker + ?Sized>(
    program: &Program,
    component: ComponentId,
    checker: &C,
    queue: &mut DiagnosticQueue,
) {
    let graph = &program.component(component).connections;
    for id in graph.nodes() {
        let endpoint = graph.endpoint(id);
        let Some(args_node) = endpoint.args_node else {
            continue;
        };
        let params = match (endpoint.interface, endpoint.function) {
            (Some(interface), _) => &program.decl(interface).gparms,
            (None, Some(function)) => &program.decl(function).gparms,
            (None, None) => continue,
        };
        checker.check_generic_arguments(program, args_node, params, queue);
    }
}

/// Check each argument bound to `used`'s parameters at `node`.
fn check_parameter_values(
    program: &Program,
    node: NodeId,
    used: ComponentId,
    config: &GenericsConfig,
    queue: &mut DiagnosticQueue,
) {
    let NodeKind::ComponentRef { args, .. } = &program.node(node).kind else {
        return;
    };
    let params = &program.component(used).parameters;

    for (&param, &arg) in params.iter().zip(args) {
        let Some(decl) = program.node(param).kind.decl() else {
            continue;
        };
        let decl = program.decl(decl);
        let name = program.name_text(decl.name);
        let ty = decl.ty;
        let value = program.node(arg).cst;

        if program.types.is_integral(ty) {
            match value {
                Some(value) if value.is_integral() => {
                    if !program.types.in_range(value, ty) {
                        queue.add(report::at_node(
                            program,
                            arg,
                            format!("`{value}` does not fit the type of parameter `{name}`"),
                            Diagnostic::error(ErrorCode::E4002)
                                .with_message("constant out of range for argument type"),
                        ));
                    }
                }
                _ => {
                    queue.add(report::at_node(
                        program,
                        arg,
                        format!("parameter `{name}` needs an integer constant"),
                        Diagnostic::error(ErrorCode::E4001)
                            .with_message("integer constant expected"),
                    ));
                }
            }
        } else if program.types.is_floating(ty) {
            let accepted = match value {
                Some(value) => {
                    value.is_floating() || (value.is_integral() && config.promote_integral_to_float)
                }
                None => false,
            };
            if !accepted {
                queue.add(report::at_node(
                    program,
                    arg,
                    format!("parameter `{name}` needs a floating-point constant"),
                    Diagnostic::error(ErrorCode::E4003)
                        .with_message("floating-point constant expected"),
                ));
            }
        } else {
            ice(format_args!(
                "parameter `{name}` of `{}` has a non-arithmetic type",
                program.component(used).instance_name
            ));
        }
    }
}
