//! Folded compile-time constants.

use std::fmt;

/// A folded compile-time constant.
///
/// Floats are stored as their bit pattern so that `Constant` is `Eq + Hash`
/// and can be compared directly when checking fixed-point idempotence.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub enum Constant {
    Integral(i128),
    Floating(u64),
}

impl Constant {
    #[inline]
    pub const fn int(value: i128) -> Self {
        Constant::Integral(value)
    }

    #[inline]
    pub fn float(value: f64) -> Self {
        Constant::Floating(value.to_bits())
    }

    #[inline]
    pub const fn is_integral(self) -> bool {
        matches!(self, Constant::Integral(_))
    }

    #[inline]
    pub const fn is_floating(self) -> bool {
        matches!(self, Constant::Floating(_))
    }

    /// The integral value, if this is an integral constant.
    #[inline]
    pub const fn as_int(self) -> Option<i128> {
        match self {
            Constant::Integral(v) => Some(v),
            Constant::Floating(_) => None,
        }
    }

    /// The value as a float, promoting integral constants.
    #[expect(
        clippy::cast_precision_loss,
        reason = "integral-to-floating promotion follows C conversion rules"
    )]
    pub fn as_f64(self) -> f64 {
        match self {
            Constant::Integral(v) => v as f64,
            Constant::Floating(bits) => f64::from_bits(bits),
        }
    }

    /// C truthiness: nonzero is true.
    pub fn is_truthy(self) -> bool {
        match self {
            Constant::Integral(v) => v != 0,
            Constant::Floating(bits) => f64::from_bits(bits) != 0.0,
        }
    }
}

impl fmt::Debug for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Integral(v) => write!(f, "Integral({v})"),
            Constant::Floating(bits) => write!(f, "Floating({})", f64::from_bits(*bits)),
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Integral(v) => write!(f, "{v}"),
            Constant::Floating(bits) => write!(f, "{}", f64::from_bits(*bits)),
        }
    }
}
