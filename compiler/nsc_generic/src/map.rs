//! Original-to-copy links for one instantiation.
//!
//! Each `instantiate` call owns one map and drops it when the call returns,
//! so a link can never leak into a later instantiation of the same template.

use rustc_hash::FxHashMap;

use nsc_ir::{ComponentId, DeclId, FieldId, NodeId, TagId};

#[derive(Clone, Debug, Default)]
pub struct InstantiationMap {
    nodes: FxHashMap<NodeId, NodeId>,
    decls: FxHashMap<DeclId, DeclId>,
    tags: FxHashMap<TagId, TagId>,
    fields: FxHashMap<FieldId, FieldId>,
    /// Nested abstract components to their specification copies.
    components: FxHashMap<ComponentId, ComponentId>,
}

impl InstantiationMap {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn node(&self, original: NodeId) -> Option<NodeId> {
        self.nodes.get(&original).copied()
    }

    #[inline]
    pub fn decl(&self, original: DeclId) -> Option<DeclId> {
        self.decls.get(&original).copied()
    }

    #[inline]
    pub fn tag(&self, original: TagId) -> Option<TagId> {
        self.tags.get(&original).copied()
    }

    #[inline]
    pub fn field(&self, original: FieldId) -> Option<FieldId> {
        self.fields.get(&original).copied()
    }

    #[inline]
    pub fn component(&self, original: ComponentId) -> Option<ComponentId> {
        self.components.get(&original).copied()
    }

    /// The copy of `original`, or `original` itself when it was not copied.
    #[inline]
    pub fn forward_decl(&self, original: DeclId) -> DeclId {
        self.decl(original).unwrap_or(original)
    }

    #[inline]
    pub fn forward_component(&self, original: ComponentId) -> ComponentId {
        self.component(original).unwrap_or(original)
    }

    pub fn record_node(&mut self, original: NodeId, copy: NodeId) {
        self.nodes.insert(original, copy);
    }

    pub fn record_decl(&mut self, original: DeclId, copy: DeclId) {
        self.decls.insert(original, copy);
    }

    pub fn record_tag(&mut self, original: TagId, copy: TagId) {
        self.tags.insert(original, copy);
    }

    pub fn record_field(&mut self, original: FieldId, copy: FieldId) {
        self.fields.insert(original, copy);
    }

    pub fn record_component(&mut self, original: ComponentId, copy: ComponentId) {
        self.components.insert(original, copy);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}
