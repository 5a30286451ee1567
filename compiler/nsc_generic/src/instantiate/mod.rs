//! Generic component instantiation.
//!
//! [`instantiate`] turns a concrete component derived from an abstract
//! template into an independent copy of that template: parameters, body and
//! wiring graph. Every reference inside the copy is redirected to the copied
//! declaration, tag, field or nested component through one
//! [`InstantiationMap`] owned by the call.
//!
//! # Order
//!
//! 1. Parameters are cloned into a fresh scope.
//! 2. The component's specification declarations are linked back to the
//!    template's, so references in the body resolve before their defining
//!    node is reached.
//! 3. The template's body is cloned, which forwards declarations and tags
//!    as their defining nodes are met and copies nested abstract
//!    components shallowly.
//! 4. For configurations, the wiring graph is rebuilt from the links.

mod clone;
mod forward;
mod spec;

use nsc_ir::{ComponentId, NodeId, Program, TypeBinding, TypeId};

use crate::context::InstanceContext;
use crate::map::InstantiationMap;
use crate::report::ice;
use crate::services::{SubstEnv, TypeSubst};

pub use spec::specification_copy;

/// Sizes of one instantiation, for logging and tests.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct InstantiationSummary {
    pub nodes: usize,
    pub decls: usize,
    pub tags: usize,
    /// Components forwarded: the template itself and each nested abstract
    /// use given a specification copy.
    pub components: usize,
}

/// State of one instantiation call.
pub(crate) struct Instantiator<'p, S: TypeSubst + ?Sized> {
    program: &'p mut Program,
    subst: &'p S,
    map: InstantiationMap,
    cx: InstanceContext,
    bindings: Vec<TypeBinding>,
}

impl<'p, S: TypeSubst + ?Sized> Instantiator<'p, S> {
    pub(crate) fn new(program: &'p mut Program, subst: &'p S, cx: InstanceContext) -> Self {
        let bindings = program.component(cx.container).type_bindings.clone();
        Instantiator {
            program,
            subst,
            map: InstantiationMap::new(),
            cx,
            bindings,
        }
    }

    fn subst_type(&mut self, ty: TypeId) -> TypeId {
        let mut env = SubstEnv {
            types: &mut self.program.types,
            bindings: &self.bindings,
            map: &self.map,
        };
        self.subst.instantiate_type(&mut env, ty)
    }

    fn subst_types(&mut self, tys: &[TypeId]) -> Vec<TypeId> {
        let mut env = SubstEnv {
            types: &mut self.program.types,
            bindings: &self.bindings,
            map: &self.map,
        };
        self.subst.instantiate_type_list(&mut env, tys)
    }

    fn clone_list(&mut self, nodes: &[NodeId]) -> Vec<NodeId> {
        nodes.iter().map(|&node| self.clone_node(node)).collect()
    }

    fn into_summary(self) -> InstantiationSummary {
        InstantiationSummary {
            nodes: self.map.node_count(),
            decls: self.map.decl_count(),
            tags: self.map.tag_count(),
            components: self.map.component_count(),
        }
    }
}

/// Instantiate `component` from its template.
///
/// `component` must be concrete and derived from a template; its type
/// bindings must already be set. Breaking either precondition is an
/// internal compiler error.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(
        component = component.raw(),
        instance = %program.component(component).instance_name,
    )
)]
pub fn instantiate<S: TypeSubst + ?Sized>(
    program: &mut Program,
    subst: &S,
    component: ComponentId,
) -> InstantiationSummary {
    let comp = program.component(component);
    if comp.is_abstract {
        ice(format_args!(
            "cannot instantiate abstract component `{}`",
            comp.instance_name
        ));
    }
    if comp.original.is_none() {
        ice(format_args!(
            "component `{}` has no template to instantiate",
            comp.instance_name
        ));
    }
    let spec_scope = comp.scope;
    let parameters = comp.parameters.clone();
    let template = program.original_component(component);
    let template_body = program.component(template).body;

    let param_scope = program.new_scope(Some(spec_scope));
    let mut inst = Instantiator::new(
        program,
        subst,
        InstanceContext::new(component, param_scope),
    );

    // Endpoints naming the template's own specification now name the instance.
    inst.map.record_component(template, component);

    let parameters = inst.clone_list(&parameters);
    for &param in &parameters {
        inst.set_parents(param);
    }

    inst.set_specification_instantiations(template);

    let body_scope = inst.program.new_scope(Some(param_scope));
    inst.cx = inst.cx.with_scope(body_scope);
    let body = template_body.map(|body| inst.clone_node(body));
    if let Some(body) = body {
        inst.set_parents(body);
    }

    let comp = inst.program.component_mut(component);
    comp.parameters = parameters;
    comp.body = body;

    let summary = inst.into_summary();
    tracing::debug!(
        nodes = summary.nodes,
        decls = summary.decls,
        tags = summary.tags,
        components = summary.components,
        "instantiated"
    );
    summary
}
