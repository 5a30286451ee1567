use smallvec::SmallVec;

use nsc_ir::{ComponentId, NodeId, NodeKind, Program};

/// `ComponentRef` nodes of a configuration's body, in source order.
///
/// Empty for modules and for configurations not yet instantiated.
pub(crate) fn component_refs(program: &Program, component: ComponentId) -> SmallVec<[NodeId; 8]> {
    let comp = program.component(component);
    let Some(body) = comp.body else {
        return SmallVec::new();
    };
    match &program.node(body).kind {
        NodeKind::Configuration { components, .. } => components
            .iter()
            .copied()
            .filter(|&node| matches!(program.node(node).kind, NodeKind::ComponentRef { .. }))
            .collect(),
        _ => SmallVec::new(),
    }
}

/// Whether `component`'s body exists: written components always qualify,
/// instances only once instantiated.
pub(crate) fn is_materialized(program: &Program, component: ComponentId) -> bool {
    let comp = program.component(component);
    !comp.is_abstract && (!comp.is_instance() || comp.body.is_some())
}
