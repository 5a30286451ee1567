//! Whole-program constant folding and generic-argument validation.
//!
//! Folding runs in passes. Each pass folds the global declarations, then
//! walks the component tree from the root: it folds a component's body,
//! binds each used component's parameters to the argument constants folded
//! so far and descends into it. A component's `folded` stamp holds the
//! number of the last pass that visited it, so a component shared by many
//! uses is folded once per pass.
//!
//! Passes repeat until one resolves nothing new. Constant slots only ever go
//! from unknown to known, so every pass but the last resolves at least one
//! slot and the number of passes is bounded by the number of slots.
//!
//! Validation then checks every component use and every wiring endpoint
//! carrying generic arguments, reporting all problems it finds.

mod eval;
mod validate;

use nsc_diagnostic::DiagnosticQueue;
use nsc_ir::{ComponentId, Constant, NodeId, NodeKind, Program, TagKind};
use nsc_stack::ensure_sufficient_stack;

use crate::config::GenericsConfig;
use crate::report::ice;
use crate::services::GenericArgChecker;
use crate::walk::{component_refs, is_materialized};

use eval::eval;

/// Outcome of [`fold_program`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FoldReport {
    /// Passes run, including the final one that resolved nothing.
    pub passes: u32,
}

/// Fold every constant in the program to a fixed point, then validate
/// generic arguments.
///
/// Run once, after elaboration has built the whole component tree. `root`
/// is `None` when the program has only global declarations.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(root = ?root, globals = program.globals.len())
)]
pub fn fold_program<C: GenericArgChecker + ?Sized>(
    program: &mut Program,
    root: Option<ComponentId>,
    checker: &C,
    config: &GenericsConfig,
    queue: &mut DiagnosticQueue,
) -> FoldReport {
    let globals = program.globals.clone();
    let limit = u32::try_from(config.max_fold_passes).unwrap_or(u32::MAX);
    let mut pass: u32 = 1;
    loop {
        if pass > limit {
            ice(format_args!(
                "constant folding did not converge within {} passes",
                config.max_fold_passes
            ));
        }

        let mut folder = Folder {
            program: &mut *program,
            pass,
            progress: false,
        };
        for &global in &globals {
            folder.fold_node(global);
        }
        if let Some(root) = root {
            folder.fold_component(root);
        }

        let progress = folder.progress;
        tracing::debug!(pass, progress, "fold pass");
        if !progress {
            break;
        }
        pass += 1;
    }

    if let Some(root) = root {
        validate::check_component(program, root, checker, config, queue);
    }
    FoldReport { passes: pass }
}

struct Folder<'p> {
    program: &'p mut Program,
    pass: u32,
    progress: bool,
}

impl Folder<'_> {
    fn fold_component(&mut self, component: ComponentId) {
        ensure_sufficient_stack(|| {
            let comp = self.program.component(component);
            if comp.folded == self.pass {
                return;
            }
            let body = comp.body;
            self.program.component_mut(component).folded = self.pass;

            if let Some(body) = body {
                self.fold_node(body);
            }
            for node in component_refs(self.program, component) {
                let NodeKind::ComponentRef {
                    component: used, ..
                } = self.program.node(node).kind
                else {
                    continue;
                };
                if !is_materialized(self.program, used) {
                    continue;
                }
                self.set_parameter_values(node, used);
                self.fold_component(used);
            }
        });
    }

    /// Bind `used`'s parameters to the constants folded so far for the
    /// arguments written at `node`.
    fn set_parameter_values(&mut self, node: NodeId, used: ComponentId) {
        let args = match &self.program.node(node).kind {
            NodeKind::ComponentRef { args, .. } => args.clone(),
            _ => return,
        };
        let params = self.program.component(used).parameters.clone();
        if args.len() != params.len() {
            ice(format_args!(
                "`{}` is used with {} argument(s) but declares {} parameter(s)",
                self.program.component(used).instance_name,
                args.len(),
                params.len()
            ));
        }

        for (param, arg) in params.into_iter().zip(args) {
            let Some(decl) = self.program.node(param).kind.decl() else {
                ice(format_args!("parameter node {param:?} declares nothing"));
            };
            let Some(value) = self.program.node(arg).cst else {
                continue;
            };
            match self.program.decl(decl).value {
                None => {
                    self.program.decl_mut(decl).value = Some(value);
                    self.progress = true;
                }
                Some(bound) if bound == value => {}
                Some(bound) => ice(format_args!(
                    "parameter `{}` rebound from {bound} to {value}",
                    self.program.name_text(self.program.decl(decl).name)
                )),
            }
        }
    }

    fn fold_node(&mut self, node: NodeId) {
        ensure_sufficient_stack(|| {
            let kind = &self.program.node(node).kind;
            if let NodeKind::TagRef {
                kind: TagKind::Enum,
                members,
                ..
            } = kind
            {
                let members = members.clone();
                self.fold_enumerators(&members);
                return;
            }

            let is_expression = kind.is_expression();
            for child in kind.children() {
                self.fold_node(child);
            }
            if is_expression && self.program.node(node).cst.is_none() {
                if let Some(value) = eval(self.program, node) {
                    self.program.node_mut(node).cst = Some(value);
                    self.progress = true;
                }
            }
        });
    }

    /// Enumerators take their written value, or one more than the previous
    /// enumerator's; the first defaults to zero.
    fn fold_enumerators(&mut self, members: &[NodeId]) {
        let mut previous: Option<Constant> = None;
        for (index, &member) in members.iter().enumerate() {
            let NodeKind::Enumerator { decl, value, .. } = self.program.node(member).kind else {
                continue;
            };
            let folded = match value {
                Some(value) => {
                    self.fold_node(value);
                    self.program.node(value).cst
                }
                None if index == 0 => Some(Constant::int(0)),
                None => previous.and_then(eval::successor),
            };
            let slot = &mut self.program.decl_mut(decl).value;
            if slot.is_none() && folded.is_some() {
                *slot = folded;
                self.progress = true;
            }
            previous = self.program.decl(decl).value;
        }
    }
}
