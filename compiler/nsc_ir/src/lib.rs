//! nsc IR - typed syntax tree and symbol graph
//!
//! This crate holds the data the component compiler's middle end works on:
//! - Arena ids (`NodeId`, `DeclId`, `TagId`, ...) and the [`Program`] arena
//! - Spans and instance-stamped locations
//! - Interned names and types
//! - Declarations, tags and fields, with their `shadowed` copy links
//! - Syntax nodes as a closed [`NodeKind`] enum
//! - Components and their wiring [`ConnectionGraph`]
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings → `Name(u32)`, Types → `TypeId(u32)`
//! - **Flatten Everything**: no boxed subtrees, children are `NodeId` indices
//! - **One Arena**: nothing is freed before the `Program` is dropped
//!
//! Constants store floats as u64 bits so they are `Eq + Hash`.

mod component;
mod constant;
mod decl;
mod graph;
mod ids;
mod interner;
mod name;
mod node;
mod program;
mod scope;
mod span;
mod tag;
mod types;

pub use component::{Component, ComponentKind, TypeBinding};
pub use constant::Constant;
pub use decl::{DeclKind, Declaration};
pub use graph::{ConnectionGraph, Endpoint};
pub use ids::{ComponentId, DeclId, EndpointId, FieldId, NodeId, ScopeId, TagId, TypeId};
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use node::{BinaryOp, Node, NodeKind, UnaryOp};
pub use program::Program;
pub use scope::Scope;
pub use span::{Location, Span};
pub use tag::{FieldDecl, TagDecl, TagFlags, TagKind};
pub use types::{TypeKind, TypePool};
