//! Type dispatch for flaggable fields.
//!
//! Every supported field type maps to exactly one [`FlagKind`]. The literal
//! parsers in this module are shared by default application, registration
//! and the legacy generator so a default literal is always turned into a
//! value the same way.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

/// Registration strategy selected for a field's declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FlagKind {
    /// Free-form text; literals are used verbatim.
    String,
    /// `true`/`false` switch.
    Bool,
    /// Base-10 signed or unsigned integer of the field's width.
    Int,
}

impl FlagKind {
    /// Lower-case name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int => "int",
        }
    }
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a textual literal cannot become a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LiteralError {
    /// Boolean literals must be exactly `true` or `false`.
    #[error("expected `true` or `false`")]
    NotBoolean,
    /// Integer literal was non-numeric or out of range.
    #[error(transparent)]
    Integer(#[from] ParseIntError),
}

/// Parses a boolean literal.
///
/// Matching is case-sensitive: `"True"` and `"1"` are rejected.
pub(crate) fn parse_bool(literal: &str) -> Result<bool, LiteralError> {
    match literal {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(LiteralError::NotBoolean),
    }
}

/// Parses a base-10 integer literal into `T`.
pub(crate) fn parse_int<T>(literal: &str) -> Result<T, LiteralError>
where
    T: FromStr<Err = ParseIntError>,
{
    Ok(literal.parse::<T>()?)
}
