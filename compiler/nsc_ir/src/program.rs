//! Compilation-scoped arena.
//!
//! Every node, declaration, tag, field, component and scope of one
//! compilation lives in a [`Program`]. Nothing is freed individually;
//! dropping the `Program` frees everything at once.

use crate::{
    Component, ComponentId, DeclId, Declaration, FieldDecl, FieldId, Name, Node, NodeId, Scope,
    ScopeId, StringInterner, TagDecl, TagId, TypePool,
};

/// Arena of one compilation.
#[derive(Debug)]
pub struct Program {
    pub interner: StringInterner,
    pub types: TypePool,
    /// Free-standing declarations outside any component, folded first on
    /// every constant-folding pass.
    pub globals: Vec<NodeId>,
    nodes: Vec<Node>,
    decls: Vec<Declaration>,
    tags: Vec<TagDecl>,
    fields: Vec<FieldDecl>,
    components: Vec<Component>,
    scopes: Vec<Scope>,
}

impl Program {
    /// The outermost scope, holding global declarations.
    pub const GLOBAL_SCOPE: ScopeId = ScopeId::new(0);

    pub fn new() -> Self {
        Program {
            interner: StringInterner::new(),
            types: TypePool::new(),
            globals: Vec::new(),
            nodes: Vec::new(),
            decls: Vec::new(),
            tags: Vec::new(),
            fields: Vec::new(),
            components: Vec::new(),
            scopes: vec![Scope::new(None)],
        }
    }

    /// Intern `text`.
    #[inline]
    pub fn name(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    #[inline]
    pub fn name_text(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    // Nodes

    pub fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId::from_usize(self.nodes.len());
        self.nodes.push(node);
        id
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // Declarations

    pub fn push_decl(&mut self, decl: Declaration) -> DeclId {
        let id = DeclId::from_usize(self.decls.len());
        self.decls.push(decl);
        id
    }

    #[inline]
    pub fn decl(&self, id: DeclId) -> &Declaration {
        &self.decls[id.index()]
    }

    #[inline]
    pub fn decl_mut(&mut self, id: DeclId) -> &mut Declaration {
        &mut self.decls[id.index()]
    }

    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }

    // Tags and fields

    pub fn push_tag(&mut self, tag: TagDecl) -> TagId {
        let id = TagId::from_usize(self.tags.len());
        self.tags.push(tag);
        id
    }

    #[inline]
    pub fn tag(&self, id: TagId) -> &TagDecl {
        &self.tags[id.index()]
    }

    #[inline]
    pub fn tag_mut(&mut self, id: TagId) -> &mut TagDecl {
        &mut self.tags[id.index()]
    }

    pub fn push_field(&mut self, field: FieldDecl) -> FieldId {
        let id = FieldId::from_usize(self.fields.len());
        self.fields.push(field);
        id
    }

    #[inline]
    pub fn field(&self, id: FieldId) -> &FieldDecl {
        &self.fields[id.index()]
    }

    #[inline]
    pub fn field_mut(&mut self, id: FieldId) -> &mut FieldDecl {
        &mut self.fields[id.index()]
    }

    /// Append `field` to `tag`'s field list and name index.
    pub fn add_field(&mut self, tag: TagId, field: FieldDecl) -> FieldId {
        let name = field.name;
        let id = self.push_field(field);
        let tag = self.tag_mut(tag);
        tag.fields.push(id);
        if let Some(name) = name {
            tag.field_index.insert(name, id);
        }
        id
    }

    // Components

    pub fn push_component(&mut self, component: Component) -> ComponentId {
        let id = ComponentId::from_usize(self.components.len());
        self.components.push(component);
        id
    }

    #[inline]
    pub fn component(&self, id: ComponentId) -> &Component {
        &self.components[id.index()]
    }

    #[inline]
    pub fn component_mut(&mut self, id: ComponentId) -> &mut Component {
        &mut self.components[id.index()]
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// The generic template `component` ultimately derives from, or
    /// `component` itself when it is not an instance.
    pub fn original_component(&self, component: ComponentId) -> ComponentId {
        let mut current = component;
        while let Some(original) = self.component(current).original {
            current = original;
        }
        current
    }

    /// Number of `original` links between `component` and its template.
    pub fn template_depth(&self, component: ComponentId) -> usize {
        let mut depth = 0;
        let mut current = component;
        while let Some(original) = self.component(current).original {
            current = original;
            depth += 1;
        }
        depth
    }

    /// Specification declarations of `component`: each interface reference
    /// followed by its commands and events, then bare commands and events.
    pub fn spec_decls(&self, component: ComponentId) -> Vec<DeclId> {
        let mut out = Vec::new();
        for &decl in &self.component(component).specification {
            out.push(decl);
            out.extend(self.decl(decl).functions.iter().copied());
        }
        out
    }

    /// Follow `decl`'s `shadowed` chain to the declaration owned by
    /// `template`, taking at most `max_steps` steps.
    pub fn shadow_origin(
        &self,
        decl: DeclId,
        template: ComponentId,
        max_steps: usize,
    ) -> Option<DeclId> {
        let mut current = decl;
        for _ in 0..=max_steps {
            if self.decl(current).container == Some(template) {
                return Some(current);
            }
            current = self.decl(current).shadowed?;
        }
        None
    }

    // Scopes

    pub fn new_scope(&mut self, parent: Option<ScopeId>) -> ScopeId {
        let id = ScopeId::from_usize(self.scopes.len());
        self.scopes.push(Scope::new(parent));
        id
    }

    #[inline]
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    /// Bind `name` to `decl` in `scope`, replacing any previous binding.
    pub fn bind(&mut self, scope: ScopeId, name: Name, decl: DeclId) {
        self.scopes[scope.index()].ids.insert(name, decl);
    }

    /// Allocate `decl` and bind its name in `scope`.
    pub fn declare(&mut self, scope: ScopeId, decl: Declaration) -> DeclId {
        let name = decl.name;
        let id = self.push_decl(decl);
        self.bind(scope, name, id);
        id
    }

    /// Allocate a copy of `original` without binding it in any scope.
    ///
    /// The copy keeps every field of the original except its use lists,
    /// which start empty, and `shadowed`, which points at `original`.
    pub fn copy_decl(&mut self, original: DeclId) -> DeclId {
        let mut copy = self.decl(original).clone();
        copy.shadowed = Some(original);
        copy.uses.clear();
        copy.fn_uses.clear();
        self.push_decl(copy)
    }

    /// Declare a copy of `original` in `scope`. See [`Program::copy_decl`].
    pub fn declare_copy(&mut self, scope: ScopeId, original: DeclId) -> DeclId {
        let copy = self.copy_decl(original);
        let name = self.decl(copy).name;
        self.bind(scope, name, copy);
        copy
    }

    /// Resolve `name` in `scope` or its ancestors.
    pub fn lookup(&self, scope: ScopeId, name: Name) -> Option<DeclId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id);
            if let Some(&decl) = scope.ids.get(&name) {
                return Some(decl);
            }
            current = scope.parent;
        }
        None
    }

    /// Allocate `tag` and bind its name, if any, in `scope`.
    pub fn declare_tag(&mut self, scope: ScopeId, tag: TagDecl) -> TagId {
        let name = tag.name;
        let id = self.push_tag(tag);
        if let Some(name) = name {
            self.scopes[scope.index()].tags.insert(name, id);
        }
        id
    }

    /// Declare an empty copy of `original` (same name and kind, no fields)
    /// in `scope`, with `shadowed` pointing at `original`.
    pub fn declare_tag_copy(&mut self, scope: ScopeId, original: TagId) -> TagId {
        let orig = self.tag(original);
        let mut copy = TagDecl::new(orig.name, orig.kind);
        copy.shadowed = Some(original);
        self.declare_tag(scope, copy)
    }

    pub fn lookup_tag(&self, scope: ScopeId, name: Name) -> Option<TagId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id);
            if let Some(&tag) = scope.tags.get(&name) {
                return Some(tag);
            }
            current = scope.parent;
        }
        None
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
