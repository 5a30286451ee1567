//! Syntax tree cloning.
//!
//! Every node is shallow-copied, stamped with the instance it now belongs
//! to and linked from its original. The per-kind rules below then redirect
//! references into the copy. Written types, tag references and
//! configuration bodies apply their rule after their children are cloned:
//! a type may name a tag defined inside it, and a configuration's components
//! must exist before its wiring graph can be rebuilt from them.

use nsc_ir::{ComponentId, DeclId, Name, NodeId, NodeKind, TypeBinding};
use nsc_stack::ensure_sufficient_stack;

use super::{spec::specification_copy, Instantiator};
use crate::graph::instantiate_graph;
use crate::services::TypeSubst;

impl<S: TypeSubst + ?Sized> Instantiator<'_, S> {
    pub(super) fn clone_node(&mut self, old: NodeId) -> NodeId {
        ensure_sufficient_stack(|| self.clone_node_inner(old))
    }

    fn clone_node_inner(&mut self, old: NodeId) -> NodeId {
        let mut node = self.program.node(old).clone();
        node.loc = node.loc.in_container(self.cx.container);
        node.parent = None;
        let children_first = matches!(
            node.kind,
            NodeKind::TypeRef { .. } | NodeKind::TagRef { .. } | NodeKind::Configuration { .. }
        );
        let new = self.program.push_node(node);
        self.map.record_node(old, new);

        if children_first {
            self.clone_children(new);
            self.apply_rule(old, new);
        } else {
            self.apply_rule(old, new);
            self.clone_children(new);
        }
        new
    }

    fn clone_children(&mut self, node: NodeId) {
        let children = self.program.node(node).kind.children();
        if children.is_empty() {
            return;
        }
        let copies: Vec<NodeId> = children
            .iter()
            .map(|&child| self.clone_node(child))
            .collect();
        let kind = &mut self.program.node_mut(node).kind;
        for (slot, copy) in kind.children_mut().into_iter().zip(copies) {
            *slot = copy;
        }
    }

    fn apply_rule(&mut self, old: NodeId, new: NodeId) {
        let node = self.program.node(new);
        if node.kind.is_expression() || matches!(node.kind, NodeKind::TypeRef { .. }) {
            if let Some(ty) = node.ty {
                let ty = self.subst_type(ty);
                self.program.node_mut(new).ty = Some(ty);
            }
        }

        match self.program.node(new).kind {
            NodeKind::Identifier { decl, .. }
            | NodeKind::InterfaceDeref { decl, .. }
            | NodeKind::TypeName { decl, .. } => {
                if let Some(copy) = self.map.decl(decl) {
                    self.redirect_decl(new, copy);
                }
            }
            NodeKind::FieldRef { field, .. } => {
                if let Some(copy) = self.map.field(field) {
                    if let NodeKind::FieldRef { field, .. } = &mut self.program.node_mut(new).kind {
                        *field = copy;
                    }
                }
            }
            NodeKind::FunctionDef { decl, .. } => {
                self.clone_decl(decl);
                if let Some(copy) = self.map.decl(decl) {
                    let copied = self.program.decl_mut(copy);
                    copied.definition = Some(new);
                    if copied.ast == Some(old) {
                        copied.ast = Some(new);
                    }
                    self.redirect_decl(new, copy);
                }
            }
            NodeKind::VariableDecl { decl, .. } => {
                self.clone_decl(decl);
                if let Some(copy) = self.map.decl(decl) {
                    let copied = self.program.decl_mut(copy);
                    if copied.definition == Some(old) {
                        copied.definition = Some(new);
                    }
                    if copied.ast == Some(old) {
                        copied.ast = Some(new);
                    }
                    self.redirect_decl(new, copy);
                }
            }
            NodeKind::Enumerator { decl, .. } => {
                self.clone_decl(decl);
                if let Some(copy) = self.map.decl(decl) {
                    let copied = self.program.decl_mut(copy);
                    copied.definition = Some(new);
                    copied.ast = Some(new);
                    self.redirect_decl(new, copy);
                }
            }
            NodeKind::TagRef { .. } => self.forward_tag_ref(new),
            NodeKind::ComponentRef {
                name, component, ..
            } => self.copy_nested_component(new, name, component),
            NodeKind::Configuration { .. } => {
                let template = self.program.original_component(self.cx.container);
                let graph =
                    instantiate_graph(&self.program.component(template).connections, &self.map);
                self.program.component_mut(self.cx.container).connections = graph;
            }
            _ => {}
        }
    }

    fn redirect_decl(&mut self, node: NodeId, copy: DeclId) {
        if let Some(decl) = self.program.node_mut(node).kind.decl_mut() {
            *decl = copy;
        }
    }

    /// Give a nested abstract component its own specification copy.
    ///
    /// Only the specification is copied here. Its body is cloned when the
    /// copy is itself instantiated.
    fn copy_nested_component(
        &mut self,
        node: NodeId,
        local: Name,
        component: ComponentId,
    ) {
        if !self.program.component(component).is_abstract {
            return;
        }
        let local = self.program.name_text(local);
        let copy = specification_copy(self.program, component, local, false);

        let bindings = self.program.component(copy).type_bindings.clone();
        let bindings: Vec<TypeBinding> = bindings
            .into_iter()
            .map(|binding| TypeBinding {
                param: binding.param,
                arg: self.subst_type(binding.arg),
            })
            .collect();
        self.program.component_mut(copy).type_bindings = bindings;

        self.set_specification_instantiations_shallow(copy);
        self.map.record_component(component, copy);
        if let NodeKind::ComponentRef { component, .. } = &mut self.program.node_mut(node).kind {
            *component = copy;
        }
    }

    /// Point every child's `parent` at its node, through the whole subtree.
    pub(super) fn set_parents(&mut self, root: NodeId) {
        ensure_sufficient_stack(|| {
            let children = self.program.node(root).kind.children();
            for child in children {
                self.program.node_mut(child).parent = Some(root);
                self.set_parents(child);
            }
        });
    }
}
