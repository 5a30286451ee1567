//! Elaboration: instantiating every component use reachable from the root.
//!
//! Each used component is pushed on the [`InstanceStack`] before anything
//! else happens to it, so instances are named after the chain of uses that
//! led to them. Instances are checked for recursion, instantiated and then
//! elaborated in turn. Written components are elaborated once, however many
//! configurations use them.

use rustc_hash::FxHashSet;

use nsc_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode};
use nsc_ir::{ComponentId, NodeId, NodeKind, Program};
use nsc_stack::ensure_sufficient_stack;

use crate::instance_stack::InstanceStack;
use crate::instantiate::instantiate;
use crate::report;
use crate::services::TypeSubst;
use crate::walk::component_refs;

/// Outcome of [`elaborate`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ElaborationReport {
    /// Instantiated components, in instantiation order.
    pub instantiated: Vec<ComponentId>,
    /// Abandoned recursive uses: `(use, enclosing instance of the same template)`.
    pub cycles: Vec<(ComponentId, ComponentId)>,
}

/// Instantiate every generic component use reachable from `root`.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(root = root.raw(), name = %program.component(root).instance_name)
)]
pub fn elaborate<S: TypeSubst + ?Sized>(
    program: &mut Program,
    root: ComponentId,
    subst: &S,
    queue: &mut DiagnosticQueue,
) -> ElaborationReport {
    let mut elaborator = Elaborator {
        program,
        subst,
        queue,
        stack: InstanceStack::new(),
        visited: FxHashSet::default(),
        report: ElaborationReport::default(),
    };
    elaborator.visited.insert(root);
    elaborator.stack.push(elaborator.program, root);
    elaborator.elaborate_uses(root);
    elaborator.stack.pop();

    tracing::debug!(
        instances = elaborator.report.instantiated.len(),
        cycles = elaborator.report.cycles.len(),
        "elaborated"
    );
    elaborator.report
}

struct Elaborator<'a, S: TypeSubst + ?Sized> {
    program: &'a mut Program,
    subst: &'a S,
    queue: &'a mut DiagnosticQueue,
    stack: InstanceStack,
    /// Written components already elaborated.
    visited: FxHashSet<ComponentId>,
    report: ElaborationReport,
}

impl<S: TypeSubst + ?Sized> Elaborator<'_, S> {
    fn elaborate_uses(&mut self, component: ComponentId) {
        ensure_sufficient_stack(|| {
            for node in component_refs(self.program, component) {
                let NodeKind::ComponentRef { component: used, .. } = self.program.node(node).kind
                else {
                    continue;
                };
                self.elaborate_use(node, used);
            }
        });
    }

    fn elaborate_use(&mut self, node: NodeId, used: ComponentId) {
        if !self.program.component(used).is_instance() {
            if !self.visited.insert(used) {
                return;
            }
            self.stack.push(self.program, used);
            self.elaborate_uses(used);
            self.stack.pop();
            return;
        }

        self.stack.push(self.program, used);
        match self.stack.recursion_check(self.program) {
            Some(ancestor) => self.report_recursion(node, used, ancestor),
            None => {
                instantiate(self.program, self.subst, used);
                self.report.instantiated.push(used);
                self.elaborate_uses(used);
            }
        }
        self.stack.pop();
    }

    fn report_recursion(&mut self, node: NodeId, used: ComponentId, ancestor: ComponentId) {
        let template = self.program.original_component(used);
        let template_name = self.program.name_text(self.program.component(template).name);
        let instance = &self.program.component(used).instance_name;
        let enclosing = &self.program.component(ancestor).instance_name;
        tracing::debug!(
            instance = %instance,
            enclosing = %enclosing,
            "recursive instantiation"
        );

        let diag = report::at_node(
            self.program,
            node,
            format!("`{instance}` would instantiate `{template_name}` again"),
            Diagnostic::error(ErrorCode::E4010)
                .with_message(format!(
                    "component `{template_name}` instantiates itself recursively"
                ))
                .with_note(format!(
                    "`{template_name}` is already being instantiated as `{enclosing}`"
                )),
        );
        self.queue.add(diag);
        self.report.cycles.push((used, ancestor));
    }
}
