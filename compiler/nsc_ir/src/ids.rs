//! Arena index newtypes.
//!
//! Every structure in a [`Program`](crate::Program) is addressed by a `u32`
//! index into one of its arenas. The newtypes keep the index spaces apart:
//! a `DeclId` can never be used where a `NodeId` is expected.

/// Macro to define arena index types.
///
/// Each generated type has:
/// - `new()`, `index()`, `raw()` accessors
/// - `from_usize()` for arena allocation (panics past `u32::MAX` entries)
/// - `Debug` implementation showing the index as `TypeName(n)`
macro_rules! define_id {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => { $(
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            /// Convert an arena length into the id of the next slot.
            ///
            /// # Panics
            /// Panics if the arena already holds `u32::MAX` entries.
            #[inline]
            pub fn from_usize(index: usize) -> Self {
                match u32::try_from(index) {
                    Ok(raw) => Self(raw),
                    Err(_) => panic!(
                        "internal compiler error: {} arena exceeded u32::MAX entries",
                        stringify!($name)
                    ),
                }
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    )* };
}

define_id!(
    /// Index of a syntax node.
    NodeId,
    /// Index of a data declaration (variable, function, constant, typedef,
    /// interface reference, command or event).
    DeclId,
    /// Index of a struct/union/enum declaration.
    TagId,
    /// Index of a struct/union field declaration.
    FieldId,
    /// Index of a module or configuration.
    ComponentId,
    /// Index of an interned type.
    TypeId,
    /// Index of a symbol scope.
    ScopeId,
    /// Index of a node in a [`ConnectionGraph`](crate::ConnectionGraph).
    EndpointId,
);
