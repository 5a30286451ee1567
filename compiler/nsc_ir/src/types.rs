//! Interned types.
//!
//! Types are hash-consed in a [`TypePool`]: structurally equal types share a
//! [`TypeId`], so comparing two types is an integer comparison and type
//! substitution never duplicates a type it leaves unchanged.

use rustc_hash::FxHashMap;

use crate::{ComponentId, Constant, Name, TagId, TypeId};

/// Structure of an interned type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    Void,
    Int { bits: u8, signed: bool },
    Float { bits: u8 },
    Pointer(TypeId),
    Array { elem: TypeId, len: Option<u64> },
    Function { ret: TypeId, params: Vec<TypeId> },
    /// A struct, union or enum type.
    Tag(TagId),
    /// A type parameter of a generic component (`typedef t` in its
    /// parameter list). Replaced by its binding when the component is
    /// instantiated.
    Param { owner: ComponentId, name: Name },
}

/// Hash-consing pool of types.
#[derive(Clone, Debug)]
pub struct TypePool {
    kinds: Vec<TypeKind>,
    index: FxHashMap<TypeKind, TypeId>,
}

impl TypePool {
    pub const VOID: TypeId = TypeId::new(0);
    pub const I8: TypeId = TypeId::new(1);
    pub const U8: TypeId = TypeId::new(2);
    pub const I16: TypeId = TypeId::new(3);
    pub const U16: TypeId = TypeId::new(4);
    pub const I32: TypeId = TypeId::new(5);
    pub const U32: TypeId = TypeId::new(6);
    pub const I64: TypeId = TypeId::new(7);
    pub const U64: TypeId = TypeId::new(8);
    pub const F32: TypeId = TypeId::new(9);
    pub const F64: TypeId = TypeId::new(10);

    /// Create a pool with the builtin types pre-interned at their constant ids.
    pub fn new() -> Self {
        let mut pool = TypePool {
            kinds: Vec::new(),
            index: FxHashMap::default(),
        };
        pool.intern(TypeKind::Void);
        for bits in [8, 16, 32, 64] {
            pool.intern(TypeKind::Int { bits, signed: true });
            pool.intern(TypeKind::Int {
                bits,
                signed: false,
            });
        }
        pool.intern(TypeKind::Float { bits: 32 });
        pool.intern(TypeKind::Float { bits: 64 });
        pool
    }

    pub fn intern(&mut self, kind: TypeKind) -> TypeId {
        if let Some(&id) = self.index.get(&kind) {
            return id;
        }
        let id = TypeId::from_usize(self.kinds.len());
        self.kinds.push(kind.clone());
        self.index.insert(kind, id);
        id
    }

    /// # Panics
    /// Panics if `id` was not created by this pool.
    #[inline]
    pub fn kind(&self, id: TypeId) -> &TypeKind {
        &self.kinds[id.index()]
    }

    pub fn pointer(&mut self, pointee: TypeId) -> TypeId {
        self.intern(TypeKind::Pointer(pointee))
    }

    pub fn array(&mut self, elem: TypeId, len: Option<u64>) -> TypeId {
        self.intern(TypeKind::Array { elem, len })
    }

    pub fn function(&mut self, ret: TypeId, params: Vec<TypeId>) -> TypeId {
        self.intern(TypeKind::Function { ret, params })
    }

    pub fn tag(&mut self, tag: TagId) -> TypeId {
        self.intern(TypeKind::Tag(tag))
    }

    pub fn param(&mut self, owner: ComponentId, name: Name) -> TypeId {
        self.intern(TypeKind::Param { owner, name })
    }

    pub fn is_integral(&self, ty: TypeId) -> bool {
        matches!(self.kind(ty), TypeKind::Int { .. })
    }

    pub fn is_floating(&self, ty: TypeId) -> bool {
        matches!(self.kind(ty), TypeKind::Float { .. })
    }

    pub fn is_arithmetic(&self, ty: TypeId) -> bool {
        self.is_integral(ty) || self.is_floating(ty)
    }

    /// Inclusive value range of an integral type, or `None` for other types.
    ///
    /// Integer widths outside `1..=127` have no representable range.
    pub fn int_range(&self, ty: TypeId) -> Option<(i128, i128)> {
        match *self.kind(ty) {
            TypeKind::Int { bits, .. } if !Self::valid_int_bits(bits) => None,
            TypeKind::Int { bits, signed: true } => {
                let half = 1i128 << (bits - 1);
                Some((-half, half - 1))
            }
            TypeKind::Int {
                bits,
                signed: false,
            } => Some((0, i128::MAX >> (127 - bits))),
            _ => None,
        }
    }

    fn valid_int_bits(bits: u8) -> bool {
        (1..=127).contains(&bits)
    }

    /// Whether `value` is an integral constant representable in `ty`.
    ///
    /// Floating constants and non-integral types are never in range.
    pub fn in_range(&self, value: Constant, ty: TypeId) -> bool {
        match (value.as_int(), self.int_range(ty)) {
            (Some(v), Some((lo, hi))) => lo <= v && v <= hi,
            _ => false,
        }
    }

    /// Convert `value` to `ty` the way a C cast does.
    ///
    /// Integers are truncated to the target width and sign-extended for
    /// signed targets; floats truncate toward zero when cast to an integer
    /// type. Returns `None` for non-arithmetic targets, integer widths outside
    /// `1..=127`, or a float that does not fit in any integer.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss,
        reason = "C conversions truncate and reinterpret bits"
    )]
    pub fn convert(&self, value: Constant, ty: TypeId) -> Option<Constant> {
        match *self.kind(ty) {
            TypeKind::Int { bits, .. } if !Self::valid_int_bits(bits) => None,
            TypeKind::Int { bits, signed } => {
                let raw = match value {
                    Constant::Integral(v) => v,
                    Constant::Floating(_) => {
                        let f = value.as_f64().trunc();
                        if !f.is_finite() || f.abs() >= 2f64.powi(127) {
                            return None;
                        }
                        f as i128
                    }
                };
                let shift = 128 - u32::from(bits);
                let wrapped = if signed {
                    (raw << shift) >> shift
                } else {
                    ((raw << shift) as u128 >> shift) as i128
                };
                Some(Constant::Integral(wrapped))
            }
            TypeKind::Float { .. } => Some(Constant::float(value.as_f64())),
            _ => None,
        }
    }
}

impl Default for TypePool {
    fn default() -> Self {
        Self::new()
    }
}
