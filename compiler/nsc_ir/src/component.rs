//! Modules and configurations.

use crate::{ComponentId, ConnectionGraph, DeclId, Name, NodeId, ScopeId, TypeId};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ComponentKind {
    Module,
    Configuration,
}

/// Binding of a component type parameter to a type argument.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeBinding {
    /// A `TypeKind::Param` type.
    pub param: TypeId,
    pub arg: TypeId,
}

/// A module or configuration declaration.
///
/// A generic component written in source is abstract. Each use of it gets
/// its own copy of the specification (`original` points at the component
/// it was copied from); a concrete copy is later instantiated, which clones
/// the template's parameters and body into it.
#[derive(Clone, Debug)]
pub struct Component {
    pub name: Name,
    pub kind: ComponentKind,
    pub is_abstract: bool,
    /// The component this was copied from.
    pub original: Option<ComponentId>,
    /// Dotted display name, e.g. `Top.radio.queue`. Holds the local name
    /// until the instance is pushed.
    pub instance_name: String,
    /// `VariableDecl` nodes of the value parameters.
    pub parameters: Vec<NodeId>,
    pub type_bindings: Vec<TypeBinding>,
    /// Interface references and bare commands/events.
    pub specification: Vec<DeclId>,
    pub scope: ScopeId,
    /// `Module` or `Configuration` node.
    pub body: Option<NodeId>,
    pub connections: ConnectionGraph,
    /// Number of the fold pass that last visited this component; 0 when
    /// not visited since the last validation.
    pub folded: u32,
}

impl Component {
    /// A component as written in source.
    pub fn new(
        name: Name,
        display: impl Into<String>,
        kind: ComponentKind,
        is_abstract: bool,
        scope: ScopeId,
    ) -> Self {
        Component {
            name,
            kind,
            is_abstract,
            original: None,
            instance_name: display.into(),
            parameters: Vec::new(),
            type_bindings: Vec::new(),
            specification: Vec::new(),
            scope,
            body: None,
            connections: ConnectionGraph::new(),
            folded: 0,
        }
    }

    /// Whether this component was copied from a generic template.
    #[inline]
    pub fn is_instance(&self) -> bool {
        self.original.is_some()
    }

    #[inline]
    pub fn is_configuration(&self) -> bool {
        self.kind == ComponentKind::Configuration
    }
}
