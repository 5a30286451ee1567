//! Struct, union and enum declarations.

use bitflags::bitflags;
use rustc_hash::FxHashMap;

use crate::{ComponentId, FieldId, Name, NodeId, TagId, TypeId};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TagKind {
    Struct,
    Union,
    Enum,
}

bitflags! {
    /// Qualifiers and layout facts of a tag, copied verbatim to instances.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TagFlags: u8 {
        /// Some field is `const`.
        const FIELDS_CONST = 1 << 0;
        /// Some field is `volatile`.
        const FIELDS_VOLATILE = 1 << 1;
        const TRANSPARENT_UNION = 1 << 2;
        /// Layout collapsed to the representation type.
        const COLLAPSED = 1 << 3;
    }
}

/// A tag declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagDecl {
    /// `None` for anonymous tags.
    pub name: Option<Name>,
    pub kind: TagKind,
    pub container: Option<ComponentId>,
    pub shadowed: Option<TagId>,
    /// Whether the tag is complete (its body has been seen).
    pub defined: bool,
    /// The defining `TagRef` node.
    pub definition: Option<NodeId>,
    /// Representation type of an enum.
    pub reptype: Option<TypeId>,
    pub flags: TagFlags,
    /// Fields in declaration order.
    pub fields: Vec<FieldId>,
    /// Name lookup over `fields`.
    pub field_index: FxHashMap<Name, FieldId>,
}

impl TagDecl {
    pub fn new(name: Option<Name>, kind: TagKind) -> Self {
        TagDecl {
            name,
            kind,
            container: None,
            shadowed: None,
            defined: false,
            definition: None,
            reptype: None,
            flags: TagFlags::empty(),
            fields: Vec::new(),
            field_index: FxHashMap::default(),
        }
    }
}

/// A field of a struct or union.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDecl {
    /// `None` for unnamed bit-fields.
    pub name: Option<Name>,
    pub ty: TypeId,
    /// The `FieldDecl` syntax node declaring this field.
    pub ast: Option<NodeId>,
    pub shadowed: Option<FieldId>,
}
