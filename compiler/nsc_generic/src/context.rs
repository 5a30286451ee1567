use nsc_ir::{ComponentId, ScopeId};

/// Where cloned declarations go: the component being instantiated and the
/// scope new copies are registered in.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct InstanceContext {
    pub container: ComponentId,
    pub scope: ScopeId,
}

impl InstanceContext {
    pub const fn new(container: ComponentId, scope: ScopeId) -> Self {
        InstanceContext { container, scope }
    }

    #[must_use]
    pub const fn with_scope(self, scope: ScopeId) -> Self {
        InstanceContext {
            container: self.container,
            scope,
        }
    }
}
