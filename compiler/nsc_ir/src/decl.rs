//! Data declarations.

use crate::{ComponentId, Constant, DeclId, Name, NodeId, TypeId};

/// What a data declaration names.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DeclKind {
    Variable,
    Function,
    /// Enumerator or other compile-time constant.
    Constant,
    Typedef,
    /// `provides interface X as y` / `uses interface X as y`.
    InterfaceRef,
    Command,
    Event,
}

impl DeclKind {
    #[inline]
    pub const fn is_command_or_event(self) -> bool {
        matches!(self, DeclKind::Command | DeclKind::Event)
    }

    /// Kinds a component body may own and that are copied per instance.
    #[inline]
    pub const fn is_forwardable(self) -> bool {
        matches!(
            self,
            DeclKind::Variable | DeclKind::Function | DeclKind::Constant | DeclKind::Typedef
        )
    }
}

/// A symbol-table entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: Name,
    pub kind: DeclKind,
    pub ty: TypeId,
    /// Owning component, `None` for globals.
    pub container: Option<ComponentId>,
    /// The declaration this one was copied from. Set once, never changed.
    pub shadowed: Option<DeclId>,
    /// Generic parameter types of an interface reference.
    pub gparms: Vec<TypeId>,
    /// Commands and events of an interface reference.
    pub functions: Vec<DeclId>,
    /// Interface reference a command or event belongs to.
    pub interface: Option<DeclId>,
    /// Syntax nodes that use this declaration.
    pub uses: Vec<NodeId>,
    /// Functions called from this function.
    pub fn_uses: Vec<DeclId>,
    /// Defining occurrence.
    pub definition: Option<NodeId>,
    /// Declaring occurrence.
    pub ast: Option<NodeId>,
    /// Folded value (component parameters and enumerators).
    pub value: Option<Constant>,
}

impl Declaration {
    /// A bare declaration with no links.
    pub fn new(name: Name, kind: DeclKind, ty: TypeId) -> Self {
        Declaration {
            name,
            kind,
            ty,
            container: None,
            shadowed: None,
            gparms: Vec::new(),
            functions: Vec::new(),
            interface: None,
            uses: Vec::new(),
            fn_uses: Vec::new(),
            definition: None,
            ast: None,
            value: None,
        }
    }

    #[must_use]
    pub fn in_container(mut self, container: ComponentId) -> Self {
        self.container = Some(container);
        self
    }
}
