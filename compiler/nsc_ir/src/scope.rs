//! Symbol scopes.

use rustc_hash::FxHashMap;

use crate::{DeclId, Name, ScopeId, TagId};

/// One level of name bindings for ordinary identifiers and tags.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub ids: FxHashMap<Name, DeclId>,
    pub tags: FxHashMap<Name, TagId>,
}

impl Scope {
    pub fn new(parent: Option<ScopeId>) -> Self {
        Scope {
            parent,
            ..Scope::default()
        }
    }
}
