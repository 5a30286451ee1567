//! Error codes for generic-component diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E4001`) with the first digit
//! indicating the compiler phase.

use std::fmt;

/// Error codes reported by the instantiation and folding passes.
///
/// Format: E#### where first digit indicates phase:
/// - E4xxx: Generic component errors
/// - E9xxx: Internal compiler errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Generic Component Errors (E4xxx)
    /// Integer constant expected for a component argument
    E4001,
    /// Constant out of range for the argument type
    E4002,
    /// Floating-point constant expected for a component argument
    E4003,
    /// Wrong number of generic arguments at a wiring endpoint
    E4004,
    /// Generic argument at a wiring endpoint is not an integral constant
    E4005,
    /// Generic argument at a wiring endpoint is out of range
    E4006,
    /// Component instantiates itself recursively
    E4010,

    // Internal Errors (E9xxx)
    /// Internal compiler error, carried by the panic message of a broken
    /// invariant
    E9001,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    ///
    /// Kept in sync with `as_str()`. When adding a new variant: add it to the
    /// enum, `as_str()`, and here.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E4001,
        ErrorCode::E4002,
        ErrorCode::E4003,
        ErrorCode::E4004,
        ErrorCode::E4005,
        ErrorCode::E4006,
        ErrorCode::E4010,
        ErrorCode::E9001,
    ];

    /// Get the numeric code as a string (e.g., "E4001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E4003 => "E4003",
            ErrorCode::E4004 => "E4004",
            ErrorCode::E4005 => "E4005",
            ErrorCode::E4006 => "E4006",
            ErrorCode::E4010 => "E4010",
            ErrorCode::E9001 => "E9001",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E4001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
