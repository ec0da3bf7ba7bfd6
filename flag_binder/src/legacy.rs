//! Flags in the superseded flag vocabulary.
//!
//! Older releases described options as standalone string, bool and int flag
//! objects whose name packed the long form and the alias together
//! (`"address, a"`). [`generate_legacy`] rebuilds that flag set from the same
//! records the [`FlagBinder`](crate::FlagBinder) consumes, together with a
//! mapping from each current long name to the name the legacy flag is
//! addressed by. Test harnesses use it to check that both flag systems agree
//! on names, aliases and defaults.

use std::collections::BTreeMap;

use crate::error::{BindError, BindResult};
use crate::extract::extract;
use crate::field::{FieldDescriptor, FlagSource, FlagSpec};
use crate::kind::FlagKind;
use crate::value::FieldValue;

/// Free-form text flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringFlag {
    /// Comma-joined long name and alias.
    pub name: String,
    /// Default value.
    pub value: String,
    /// Help text.
    pub usage: String,
    /// Environment variable consulted when the flag is absent.
    pub env_var: Option<String>,
}

/// Boolean switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolFlag {
    /// Comma-joined long name and alias.
    pub name: String,
    /// Default value.
    pub value: bool,
    /// Help text.
    pub usage: String,
    /// Environment variable consulted when the flag is absent.
    pub env_var: Option<String>,
}

/// Integer flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntFlag {
    /// Comma-joined long name and alias.
    pub name: String,
    /// Default value, widened so every supported integer width fits.
    pub value: i128,
    /// Help text.
    pub usage: String,
    /// Environment variable consulted when the flag is absent.
    pub env_var: Option<String>,
}

/// One flag in the legacy vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyFlag {
    /// Text flag.
    String(StringFlag),
    /// Boolean flag.
    Bool(BoolFlag),
    /// Integer flag.
    Int(IntFlag),
}

impl LegacyFlag {
    /// The full comma-joined name, e.g. `"address, a"`.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::String(flag) => &flag.name,
            Self::Bool(flag) => &flag.name,
            Self::Int(flag) => &flag.name,
        }
    }

    /// Each name the flag answers to, long form first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.name()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// The name the flag is addressed by.
    #[must_use]
    pub fn addressing_name(&self) -> &str {
        self.names().next().unwrap_or_default()
    }

    /// The single-letter alias, if any.
    #[must_use]
    pub fn shorthand(&self) -> Option<char> {
        self.names().skip(1).find_map(|name| {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(short), None) => Some(short),
                _ => None,
            }
        })
    }

    /// Help text.
    #[must_use]
    pub fn usage(&self) -> &str {
        match self {
            Self::String(flag) => &flag.usage,
            Self::Bool(flag) => &flag.usage,
            Self::Int(flag) => &flag.usage,
        }
    }

    /// Environment variable consulted when the flag is absent.
    #[must_use]
    pub fn env_var(&self) -> Option<&str> {
        match self {
            Self::String(flag) => flag.env_var.as_deref(),
            Self::Bool(flag) => flag.env_var.as_deref(),
            Self::Int(flag) => flag.env_var.as_deref(),
        }
    }

    /// Kind of value the flag carries.
    #[must_use]
    pub const fn kind(&self) -> FlagKind {
        match self {
            Self::String(_) => FlagKind::String,
            Self::Bool(_) => FlagKind::Bool,
            Self::Int(_) => FlagKind::Int,
        }
    }

    /// Default value rendered as text.
    #[must_use]
    pub fn default_display(&self) -> String {
        match self {
            Self::String(flag) => flag.value.clone(),
            Self::Bool(flag) => flag.value.to_string(),
            Self::Int(flag) => flag.value.to_string(),
        }
    }
}

/// Legacy flags generated from a set of records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyFlags {
    flags: Vec<LegacyFlag>,
    mapping: BTreeMap<String, String>,
}

impl LegacyFlags {
    /// Flags in generation order.
    #[must_use]
    pub fn flags(&self) -> &[LegacyFlag] {
        &self.flags
    }

    /// Current long name mapped to the legacy addressing name.
    #[must_use]
    pub const fn mapping(&self) -> &BTreeMap<String, String> {
        &self.mapping
    }

    /// Looks up the legacy flag for a current long name.
    #[must_use]
    pub fn get(&self, current: &str) -> Option<&LegacyFlag> {
        let legacy = self.mapping.get(current)?;
        self.flags
            .iter()
            .find(|flag| flag.addressing_name() == legacy)
    }

    /// Number of generated flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Returns `true` when no record had a flaggable field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Splits into the flag list and the name mapping.
    #[must_use]
    pub fn into_parts(self) -> (Vec<LegacyFlag>, BTreeMap<String, String>) {
        (self.flags, self.mapping)
    }
}

/// Builds the legacy flag set for `records`.
///
/// # Errors
///
/// Returns [`BindError::UnsupportedType`] for a field without a dispatch
/// strategy, [`BindError::DefaultParse`] for a default that does not parse as
/// the field's type, and [`BindError::DuplicateFlag`] when two fields
/// share a long name.
pub fn generate_legacy(records: &[&dyn FlagSource]) -> BindResult<LegacyFlags> {
    generate(records, None)
}

/// Builds the legacy flag set with environment variables under `prefix`.
///
/// Variable names match those used by
/// [`FlagBinder::with_env_prefix`](crate::FlagBinder::with_env_prefix).
///
/// # Errors
///
/// Fails under the same conditions as [`generate_legacy`].
pub fn generate_legacy_with_env_prefix(
    records: &[&dyn FlagSource],
    prefix: &str,
) -> BindResult<LegacyFlags> {
    generate(records, Some(prefix))
}

fn generate(records: &[&dyn FlagSource], env_prefix: Option<&str>) -> BindResult<LegacyFlags> {
    let mut out = LegacyFlags::default();
    for record in records {
        for descriptor in extract(*record) {
            let flag = legacy_flag(&descriptor, env_prefix)?;
            let current = descriptor.spec.long.to_owned();
            if out.mapping.contains_key(&current) {
                return Err(BindError::duplicate_flag(&current));
            }
            out.mapping
                .insert(current, flag.addressing_name().to_owned());
            out.flags.push(flag);
        }
    }
    Ok(out)
}

fn legacy_flag(descriptor: &FieldDescriptor, env_prefix: Option<&str>) -> BindResult<LegacyFlag> {
    let spec = &descriptor.spec;
    let kind = descriptor.dispatch()?;
    let name = legacy_name(spec);
    let usage = spec.description.to_owned();
    let env_var = env_prefix.map(|prefix| spec.env_var(prefix));
    let default = match &descriptor.default {
        None => FieldValue::zero(kind),
        Some(Ok(value)) => value.clone(),
        Some(Err(source)) => return Err(BindError::default_parse(spec, kind, source.clone())),
    };
    let flag = match default {
        FieldValue::Str(value) => LegacyFlag::String(StringFlag {
            name,
            value,
            usage,
            env_var,
        }),
        FieldValue::Bool(value) => LegacyFlag::Bool(BoolFlag {
            name,
            value,
            usage,
            env_var,
        }),
        FieldValue::Int(value) => LegacyFlag::Int(IntFlag {
            name,
            value,
            usage,
            env_var,
        }),
        FieldValue::Unsupported => return Err(BindError::unsupported(spec)),
    };
    Ok(flag)
}

fn legacy_name(spec: &FlagSpec) -> String {
    spec.short.map_or_else(
        || spec.long.to_owned(),
        |short| format!("{}, {short}", spec.long),
    )
}
