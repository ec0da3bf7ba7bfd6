//! Field metadata and the [`FlagSource`] capability trait.

use crate::error::{BindError, BindResult};
use crate::kind::{FlagKind, LiteralError};
use crate::value::{FieldValue, FlagValue};

/// Static metadata attached to one flaggable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlagSpec {
    /// Canonical long flag name, used as the argument id.
    pub long: &'static str,
    /// Optional one-letter alias.
    pub short: Option<char>,
    /// Help text shown for the option.
    pub description: &'static str,
    /// Default literal; empty when the field declares no default.
    pub default: &'static str,
    /// Declared type of the field as written in the record.
    pub type_name: &'static str,
}

impl FlagSpec {
    /// Builds the metadata for one field.
    #[must_use]
    pub const fn new(
        long: &'static str,
        short: Option<char>,
        description: &'static str,
        default: &'static str,
        type_name: &'static str,
    ) -> Self {
        Self {
            long,
            short,
            description,
            default,
            type_name,
        }
    }

    /// Returns `true` when the field carries a long name.
    ///
    /// Fields without one are skipped by every operation.
    #[must_use]
    pub const fn is_flaggable(&self) -> bool {
        !self.long.is_empty()
    }

    /// Returns `true` when a default literal was declared.
    #[must_use]
    pub const fn has_default(&self) -> bool {
        !self.default.is_empty()
    }

    /// Environment variable consulted for this flag under `prefix`.
    ///
    /// The long name is upper-cased and `-` becomes `_`, so `permit-write`
    /// under `APP_` reads `APP_PERMIT_WRITE`.
    #[must_use]
    pub fn env_var(&self, prefix: &str) -> String {
        let mut name = String::with_capacity(prefix.len() + self.long.len());
        name.push_str(prefix);
        name.extend(self.long.chars().map(|c| match c {
            '-' => '_',
            other => other.to_ascii_uppercase(),
        }));
        name
    }
}

/// Read-only description of a flaggable field and its current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field metadata.
    pub spec: FlagSpec,
    /// Value held by the field when the descriptor was taken.
    pub value: FieldValue,
    /// Declared default parsed at the field's width; `None` when the field
    /// declares no default or has no dispatch strategy.
    pub default: Option<Result<FieldValue, LiteralError>>,
}

impl FieldDescriptor {
    /// Snapshots `field` and parses the declared default through it.
    #[must_use]
    pub fn new(spec: FlagSpec, field: &dyn FlagValue) -> Self {
        let default = spec
            .has_default()
            .then(|| field.parse_literal(spec.default));
        Self {
            spec,
            value: field.snapshot(),
            default,
        }
    }

    /// Describes a field whose type has no dispatch strategy.
    #[must_use]
    pub const fn unsupported(spec: FlagSpec) -> Self {
        Self {
            spec,
            value: FieldValue::Unsupported,
            default: None,
        }
    }

    /// Resolves the field's dispatch strategy.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::UnsupportedType`] when the field's type has no
    /// strategy.
    pub fn dispatch(&self) -> BindResult<FlagKind> {
        self.value
            .kind()
            .ok_or_else(|| BindError::unsupported(&self.spec))
    }
}

/// Mutable storage behind a flaggable field.
pub enum FieldSlot<'a> {
    /// The field's storage, viewed through its dispatch strategy.
    Value(&'a mut dyn FlagValue),
    /// The field's type has no dispatch strategy.
    Unsupported,
}

impl FieldSlot<'_> {
    /// Returns the dispatched kind, or `None` for unsupported fields.
    #[must_use]
    pub fn kind(&self) -> Option<FlagKind> {
        match self {
            Self::Value(value) => Some(value.kind()),
            Self::Unsupported => None,
        }
    }
}

/// A flaggable field paired with mutable access to its storage.
pub struct FlagField<'a> {
    /// Field metadata.
    pub spec: FlagSpec,
    /// Mutable access to the field.
    pub slot: FieldSlot<'a>,
}

impl<'a> FlagField<'a> {
    /// Pairs metadata with the field's storage.
    #[must_use]
    pub const fn new(spec: FlagSpec, slot: FieldSlot<'a>) -> Self {
        Self { spec, slot }
    }

    /// Resolves the field's storage, failing for unsupported types.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::UnsupportedType`] when the field's type has no
    /// strategy.
    pub fn into_target(self) -> BindResult<(FlagSpec, &'a mut dyn FlagValue)> {
        match self.slot {
            FieldSlot::Value(target) => Ok((self.spec, target)),
            FieldSlot::Unsupported => Err(BindError::unsupported(&self.spec)),
        }
    }
}

/// A configuration record whose fields can be bound to command-line flags.
///
/// Implementations list every field that carries a long flag name, in
/// declaration order, with fields of flattened sub-records spliced in at the
/// position of the flatten field. `describe` and `flag_fields` must list the
/// same fields in the same order.
///
/// The trait is normally derived:
///
/// ```rust
/// use flag_binder::{FieldValue, FlagSource};
///
/// #[derive(Default, FlagSource)]
/// struct Listen {
///     #[flag(name = "address", short = 'a', describe = "IP address to listen", default = "0.0.0.0")]
///     address: String,
///     // No `name`, so this field is not flaggable.
///     retries: u8,
/// }
///
/// let fields = Listen::default().describe();
/// assert_eq!(fields.len(), 1);
/// assert_eq!(fields[0].spec.long, "address");
/// assert_eq!(fields[0].value, FieldValue::Str(String::new()));
/// ```
pub trait FlagSource {
    /// Describes every flaggable field along with its current value.
    fn describe(&self) -> Vec<FieldDescriptor>;

    /// Borrows every flaggable field mutably.
    fn flag_fields(&mut self) -> Vec<FlagField<'_>>;
}

impl<T: FlagSource + ?Sized> FlagSource for Box<T> {
    fn describe(&self) -> Vec<FieldDescriptor> {
        (**self).describe()
    }

    fn flag_fields(&mut self) -> Vec<FlagField<'_>> {
        (**self).flag_fields()
    }
}
