//! Declaration and tag forwarding.
//!
//! A forwarded declaration is a copy owned by the component being
//! instantiated, registered in its working scope, with `shadowed` pointing
//! at the original and its type substituted.

use nsc_ir::{DeclId, DeclKind, FieldDecl, NodeId, NodeKind, TagId};

use super::Instantiator;
use crate::report::ice;
use crate::services::TypeSubst;

impl<S: TypeSubst + ?Sized> Instantiator<'_, S> {
    /// Forward `decl` into the current container, at most once per call.
    ///
    /// Globals and interface references are left alone; commands and events
    /// are copied with their interface by the specification copy and must
    /// never reach here.
    pub(super) fn clone_decl(&mut self, decl: DeclId) {
        if let Some(copy) = self.map.decl(decl) {
            if self.program.decl(copy).container == Some(self.cx.container) {
                return;
            }
        }

        let original = self.program.decl(decl);
        if original.kind.is_command_or_event() {
            ice(format_args!(
                "command or event `{}` cannot be forwarded",
                self.program.name_text(original.name)
            ));
        }
        if !original.kind.is_forwardable() || original.container.is_none() {
            return;
        }

        let copy = self.program.declare_copy(self.cx.scope, decl);
        self.program.decl_mut(copy).container = Some(self.cx.container);
        self.map.record_decl(decl, copy);
        self.subst_decl_types(copy);

        tracing::trace!(
            decl = decl.raw(),
            copy = copy.raw(),
            name = self.program.name_text(self.program.decl(copy).name),
            "forwarded declaration"
        );
    }

    /// Run a declaration's types through the substitution service.
    pub(super) fn subst_decl_types(&mut self, decl: DeclId) {
        let ty = self.program.decl(decl).ty;
        let ty = self.subst_type(ty);
        self.program.decl_mut(decl).ty = ty;

        if self.program.decl(decl).kind == DeclKind::InterfaceRef {
            let gparms = self.program.decl(decl).gparms.clone();
            let gparms = self.subst_types(&gparms);
            self.program.decl_mut(decl).gparms = gparms;
        }
    }

    /// Point a `TagRef` node at the forwarded copy of its tag.
    pub(super) fn forward_tag_ref(&mut self, node: NodeId) {
        let NodeKind::TagRef { tag, defined, .. } = self.program.node(node).kind else {
            return;
        };
        let Some(copy) = self.forward_tag(tag) else {
            return;
        };

        if let NodeKind::TagRef { tag, .. } = &mut self.program.node_mut(node).kind {
            *tag = copy;
        }
        if defined {
            self.program.tag_mut(copy).definition = Some(node);
            self.link_field_asts(copy);
        }
    }

    /// Forward a tag owned by a component, copying its fields if defined.
    ///
    /// Tags with no owning component are shared, not copied.
    fn forward_tag(&mut self, tag: TagId) -> Option<TagId> {
        let original = self.program.tag(tag);
        if original.container.is_none() {
            return None;
        }
        if let Some(copy) = self.map.tag(tag) {
            if self.program.tag(copy).container == Some(self.cx.container) {
                return Some(copy);
            }
        }
        let reptype = original.reptype;
        let defined = original.defined;
        let flags = original.flags;

        let copy = self.program.declare_tag_copy(self.cx.scope, tag);
        // Recorded before the fields so self-referential field types resolve.
        self.map.record_tag(tag, copy);
        if defined {
            self.copy_fields(tag, copy);
        }

        let copied = self.program.tag_mut(copy);
        copied.reptype = reptype;
        copied.defined = defined;
        copied.flags = flags;
        copied.container = Some(self.cx.container);

        tracing::trace!(
            tag = tag.raw(),
            copy = copy.raw(),
            fields = self.program.tag(copy).fields.len(),
            "forwarded tag"
        );
        Some(copy)
    }

    fn copy_fields(&mut self, original: TagId, copy: TagId) {
        let fields = self.program.tag(original).fields.clone();
        for field in fields {
            let old = self.program.field(field).clone();
            let ty = self.subst_type(old.ty);
            let new = self.program.add_field(
                copy,
                FieldDecl {
                    name: old.name,
                    ty,
                    ast: old.ast.and_then(|ast| self.map.node(ast)),
                    shadowed: Some(field),
                },
            );
            self.map.record_field(field, new);
        }
    }

    /// Fill in field `ast` links that were not cloned yet when the tag was
    /// forwarded from a use preceding its definition.
    fn link_field_asts(&mut self, copy: TagId) {
        let fields = self.program.tag(copy).fields.clone();
        for field in fields {
            let copied = self.program.field(field);
            if copied.ast.is_some() {
                continue;
            }
            let Some(original) = copied.shadowed else {
                continue;
            };
            let ast = self
                .program
                .field(original)
                .ast
                .and_then(|ast| self.map.node(ast));
            self.program.field_mut(field).ast = ast;
        }
    }
}
