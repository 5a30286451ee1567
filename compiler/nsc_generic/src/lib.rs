//! Generic component instantiation for the nsc component compiler.
//!
//! A generic (abstract) module or configuration is a template. Each use of
//! it with concrete arguments becomes an independent copy: its own
//! declarations, tags, syntax tree and wiring graph, with every reference
//! inside the copy redirected to the copy.
//!
//! # Passes
//!
//! - [`elaborate`]: walks the component tree from the root, naming each
//!   use on an [`InstanceStack`], rejecting recursive instantiation and
//!   calling [`instantiate`] for each generic use
//! - [`fold_program`]: folds constants across the whole program to a fixed
//!   point, binds component parameters to their arguments and validates them
//!
//! [`expand_program`] runs both with one diagnostic queue.
//!
//! # Services
//!
//! Type substitution and wiring-argument checking are consumed through the
//! [`TypeSubst`] and [`GenericArgChecker`] traits; [`BindingSubst`] and
//! [`ConstantArgChecker`] are the stock implementations.
//!
//! # Tracing
//!
//! Set `RUST_LOG=nsc_generic=debug` after calling [`init_tracing`] to see
//! each instantiation and fold pass as an indented tree.

mod config;
mod context;
mod elaborate;
mod fold;
mod graph;
mod instance_stack;
mod instantiate;
mod map;
mod report;
mod services;
mod walk;

#[cfg(test)]
mod test_helpers;

use std::sync::Once;

use nsc_diagnostic::Diagnostic;
use nsc_ir::{ComponentId, Program};

pub use config::GenericsConfig;
pub use context::InstanceContext;
pub use elaborate::{elaborate, ElaborationReport};
pub use fold::{fold_program, FoldReport};
pub use graph::instantiate_graph;
pub use instance_stack::InstanceStack;
pub use instantiate::{instantiate, specification_copy, InstantiationSummary};
pub use map::InstantiationMap;
pub use services::{
    BindingSubst, ConstantArgChecker, GenericArgChecker, SubstEnv, TypeSubst,
};

static TRACING_INIT: Once = Once::new();

/// Install a tree-shaped tracing subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

/// Elaborate `root`, then fold and validate the whole program.
///
/// Returns every diagnostic produced, sorted by source position.
pub fn expand_program<S, C>(
    program: &mut Program,
    root: ComponentId,
    subst: &S,
    checker: &C,
    config: &GenericsConfig,
) -> Vec<Diagnostic>
where
    S: TypeSubst + ?Sized,
    C: GenericArgChecker + ?Sized,
{
    let mut queue = config.diagnostic_queue();
    elaborate(program, root, subst, &mut queue);
    fold_program(program, Some(root), checker, config, &mut queue);
    queue.flush()
}
