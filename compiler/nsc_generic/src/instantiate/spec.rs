//! Specification copies of abstract components.

use nsc_ir::{Component, ComponentId, DeclId, Program};

use super::Instantiator;
use crate::report::ice;
use crate::services::TypeSubst;

/// Create a copy of `component`'s specification for one use of it.
///
/// The copy gets fresh interface-reference and function declarations in a
/// new scope, each shadowing the declaration it was copied from. It shares
/// the parameter list and type bindings of `component`. Its body and wiring
/// graph stay empty until the copy is instantiated.
pub fn specification_copy(
    program: &mut Program,
    component: ComponentId,
    local_name: &str,
    copy_is_abstract: bool,
) -> ComponentId {
    let scope = program.new_scope(Some(Program::GLOBAL_SCOPE));
    let source = program.component(component);
    let mut copy = Component::new(
        source.name,
        local_name,
        source.kind,
        copy_is_abstract,
        scope,
    );
    copy.original = Some(component);
    copy.parameters = source.parameters.clone();
    copy.type_bindings = source.type_bindings.clone();
    let specification = source.specification.clone();
    let copy = program.push_component(copy);

    let mut copied = Vec::with_capacity(specification.len());
    for decl in specification {
        let interface = program.declare_copy(scope, decl);
        program.decl_mut(interface).container = Some(copy);

        let functions = program.decl(decl).functions.clone();
        let functions: Vec<DeclId> = functions
            .into_iter()
            .map(|function| {
                let function = program.copy_decl(function);
                let copied_function = program.decl_mut(function);
                copied_function.container = Some(copy);
                copied_function.interface = Some(interface);
                function
            })
            .collect();
        program.decl_mut(interface).functions = functions;
        copied.push(interface);
    }
    program.component_mut(copy).specification = copied;
    copy
}

impl<S: TypeSubst + ?Sized> Instantiator<'_, S> {
    /// Link each of the template's specification declarations to this
    /// instance's copy of it, and substitute the copy's types.
    pub(super) fn set_specification_instantiations(&mut self, template: ComponentId) {
        let depth = self.program.template_depth(self.cx.container);
        for decl in self.program.spec_decls(self.cx.container) {
            self.subst_decl_types(decl);
            match self.program.shadow_origin(decl, template, depth) {
                Some(origin) => self.map.record_decl(origin, decl),
                None => ice(format_args!(
                    "specification of `{}` does not derive from its template",
                    self.program.component(self.cx.container).instance_name
                )),
            }
        }
    }

    /// Link a nested specification copy's declarations one level deep.
    pub(super) fn set_specification_instantiations_shallow(&mut self, copy: ComponentId) {
        for decl in self.program.spec_decls(copy) {
            if let Some(original) = self.program.decl(decl).shadowed {
                self.map.record_decl(original, decl);
            }
        }
    }
}
