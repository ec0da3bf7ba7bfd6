//! Error types produced while extracting, defaulting and registering flags.

use thiserror::Error;

use crate::field::FlagSpec;
use crate::kind::{FlagKind, LiteralError};

/// Errors raised by the binder.
///
/// None of these are recovered internally. Callers are expected to turn them
/// into a startup failure before argument parsing begins.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BindError {
    /// A flaggable field's declared type has no dispatch strategy.
    #[error("flag '{flag}' has unsupported type `{type_name}`")]
    UnsupportedType {
        /// Long name of the offending flag.
        flag: String,
        /// Declared type of the field as written in the record.
        type_name: String,
    },

    /// A default literal could not be parsed into the field's type.
    #[error("default '{literal}' for {kind} flag '{flag}' is invalid: {source}")]
    DefaultParse {
        /// Long name of the offending flag.
        flag: String,
        /// Literal that failed to parse.
        literal: String,
        /// Kind the literal was parsed as.
        kind: FlagKind,
        /// Reason reported by the literal parser.
        #[source]
        source: LiteralError,
    },

    /// A long flag name is already registered or reserved.
    #[error("flag '{flag}' is already registered")]
    DuplicateFlag {
        /// The conflicting long name.
        flag: String,
    },

    /// A short alias is already registered or reserved.
    #[error("short flag '-{short}' for '{flag}' is already registered")]
    DuplicateShort {
        /// Long name of the flag requesting the alias.
        flag: String,
        /// The conflicting alias.
        short: char,
    },

    /// Argument parsing failed.
    #[error("failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),

    /// A parsed value could not be read back with the field's type.
    #[error("failed to read parsed value for '{flag}': {source}")]
    MatchRetrieval {
        /// Long name of the flag being written back.
        flag: String,
        /// Error reported by `clap` while retrieving the value.
        #[source]
        source: clap::parser::MatchesError,
    },
}

/// Convenience alias for results returned by the binder.
pub type BindResult<T> = Result<T, BindError>;

impl BindError {
    pub(crate) fn unsupported(spec: &FlagSpec) -> Self {
        Self::UnsupportedType {
            flag: spec.long.to_owned(),
            type_name: spec.type_name.to_owned(),
        }
    }

    pub(crate) fn default_parse(spec: &FlagSpec, kind: FlagKind, source: LiteralError) -> Self {
        Self::DefaultParse {
            flag: spec.long.to_owned(),
            literal: spec.default.to_owned(),
            kind,
            source,
        }
    }

    pub(crate) fn duplicate_flag(long: &str) -> Self {
        Self::DuplicateFlag {
            flag: long.to_owned(),
        }
    }

    /// Returns `true` when the error wraps a `--help` or `--version` request
    /// rather than a genuine parse failure.
    #[must_use]
    pub fn is_display_request(&self) -> bool {
        matches!(
            self,
            Self::CliParsing(err) if matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp
                    | clap::error::ErrorKind::DisplayVersion
                    | clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            )
        )
    }
}

impl From<clap::Error> for BindError {
    fn from(err: clap::Error) -> Self {
        Self::CliParsing(Box::new(err))
    }
}
