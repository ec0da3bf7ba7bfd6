//! Storage strategies for the supported field types.
//!
//! [`FlagValue`] is the object-safe view the binder holds over a field while
//! it is bound. Implementations exist for `String`, `bool` and the primitive
//! integer types.

use clap::ArgMatches;
use clap::builder::ValueParser;
use clap::parser::MatchesError;

use crate::kind::{FlagKind, LiteralError, parse_bool, parse_int};

/// Snapshot of a field's current value taken during extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Current value of a text field.
    Str(String),
    /// Current value of a boolean field.
    Bool(bool),
    /// Current value of an integer field, widened to `i128`.
    Int(i128),
    /// The field's type has no dispatch strategy.
    Unsupported,
}

impl FieldValue {
    /// Returns the dispatched kind, or `None` for unsupported fields.
    #[must_use]
    pub const fn kind(&self) -> Option<FlagKind> {
        match self {
            Self::Str(_) => Some(FlagKind::String),
            Self::Bool(_) => Some(FlagKind::Bool),
            Self::Int(_) => Some(FlagKind::Int),
            Self::Unsupported => None,
        }
    }

    /// Zero value of a supported kind.
    #[must_use]
    pub fn zero(kind: FlagKind) -> Self {
        match kind {
            FlagKind::String => Self::Str(String::new()),
            FlagKind::Bool => Self::Bool(false),
            FlagKind::Int => Self::Int(0),
        }
    }

    /// Returns `true` when the value equals its type's zero value.
    ///
    /// Unsupported fields are never considered zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Str(text) => text.is_empty(),
            Self::Bool(flag) => !flag,
            Self::Int(number) => *number == 0,
            Self::Unsupported => false,
        }
    }
}

/// Mutable access to a bound field.
///
/// The binder never copies field storage; it reads and writes through this
/// trait while holding the field's exclusive borrow.
pub trait FlagValue {
    /// Dispatch strategy for this type.
    fn kind(&self) -> FlagKind;

    /// Returns `true` when the field holds its type's zero value.
    fn is_zero(&self) -> bool;

    /// Copies the current value into a [`FieldValue`].
    fn snapshot(&self) -> FieldValue;

    /// Parses `literal` at this type's width without writing it.
    ///
    /// # Errors
    ///
    /// Returns a [`LiteralError`] describing why the literal is invalid.
    fn parse_literal(&self, literal: &str) -> Result<FieldValue, LiteralError>;

    /// Checks that `literal` parses as this type without writing it.
    ///
    /// # Errors
    ///
    /// Returns a [`LiteralError`] describing why the literal is invalid.
    fn check_literal(&self, literal: &str) -> Result<(), LiteralError> {
        self.parse_literal(literal).map(|_| ())
    }

    /// Parses `literal` and stores the result in the field.
    ///
    /// # Errors
    ///
    /// Returns a [`LiteralError`] and leaves the field unchanged when the
    /// literal is invalid.
    fn set_from_literal(&mut self, literal: &str) -> Result<(), LiteralError>;

    /// Value parser registered on the field's `clap` argument.
    fn value_parser(&self) -> ValueParser;

    /// Copies the parsed value for `id` from `matches` into the field.
    ///
    /// Returns `Ok(false)` when `matches` holds no value for `id`.
    ///
    /// # Errors
    ///
    /// Returns the [`MatchesError`] raised when the stored value has a
    /// different type.
    fn assign_from(&mut self, matches: &ArgMatches, id: &str) -> Result<bool, MatchesError>;
}

impl FlagValue for String {
    fn kind(&self) -> FlagKind {
        FlagKind::String
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn snapshot(&self) -> FieldValue {
        FieldValue::Str(self.clone())
    }

    fn parse_literal(&self, literal: &str) -> Result<FieldValue, LiteralError> {
        Ok(FieldValue::Str(literal.to_owned()))
    }

    fn set_from_literal(&mut self, literal: &str) -> Result<(), LiteralError> {
        literal.clone_into(self);
        Ok(())
    }

    fn value_parser(&self) -> ValueParser {
        ValueParser::string()
    }

    fn assign_from(&mut self, matches: &ArgMatches, id: &str) -> Result<bool, MatchesError> {
        let Some(parsed) = matches.try_get_one::<Self>(id)? else {
            return Ok(false);
        };
        parsed.clone_into(self);
        Ok(true)
    }
}

impl FlagValue for bool {
    fn kind(&self) -> FlagKind {
        FlagKind::Bool
    }

    fn is_zero(&self) -> bool {
        !*self
    }

    fn snapshot(&self) -> FieldValue {
        FieldValue::Bool(*self)
    }

    fn parse_literal(&self, literal: &str) -> Result<FieldValue, LiteralError> {
        parse_bool(literal).map(FieldValue::Bool)
    }

    fn set_from_literal(&mut self, literal: &str) -> Result<(), LiteralError> {
        *self = parse_bool(literal)?;
        Ok(())
    }

    fn value_parser(&self) -> ValueParser {
        ValueParser::new(parse_bool)
    }

    fn assign_from(&mut self, matches: &ArgMatches, id: &str) -> Result<bool, MatchesError> {
        let Some(parsed) = matches.try_get_one::<Self>(id)? else {
            return Ok(false);
        };
        *self = *parsed;
        Ok(true)
    }
}

macro_rules! integer_flag_value {
    ($($ty:ty),* $(,)?) => {$(
        impl FlagValue for $ty {
            fn kind(&self) -> FlagKind {
                FlagKind::Int
            }

            fn is_zero(&self) -> bool {
                *self == 0
            }

            fn snapshot(&self) -> FieldValue {
                // Every primitive up to 64 bits, pointer-sized ones included, fits.
                FieldValue::Int(i128::try_from(*self).unwrap_or(i128::MAX))
            }

            fn parse_literal(&self, literal: &str) -> Result<FieldValue, LiteralError> {
                parse_int::<$ty>(literal).map(|parsed| parsed.snapshot())
            }

            fn set_from_literal(&mut self, literal: &str) -> Result<(), LiteralError> {
                *self = parse_int::<$ty>(literal)?;
                Ok(())
            }

            fn value_parser(&self) -> ValueParser {
                ValueParser::new(parse_int::<$ty>)
            }

            fn assign_from(
                &mut self,
                matches: &ArgMatches,
                id: &str,
            ) -> Result<bool, MatchesError> {
                let Some(parsed) = matches.try_get_one::<$ty>(id)? else {
                    return Ok(false);
                };
                *self = *parsed;
                Ok(true)
            }
        }
    )*};
}

integer_flag_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
