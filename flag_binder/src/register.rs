//! Flag registration and write-back.
//!
//! [`FlagBinder`] owns the target [`Command`] together with the exclusive
//! borrows of every bound field. Parsing consumes the binder, writes values
//! supplied on the command line (or through the environment) into the
//! fields, and releases the borrows.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fmt;

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::error::{BindError, BindResult};
use crate::field::{FlagSource, FlagSpec};
use crate::kind::FlagKind;
use crate::value::FlagValue;

const RESERVED_LONGS: &[&str] = &["help", "version"];
const RESERVED_SHORTS: &[char] = &['h', 'V'];

struct Binding<'a> {
    spec: FlagSpec,
    target: &'a mut dyn FlagValue,
}

/// Registers flags for configuration records on a `clap` command.
///
/// # Examples
///
/// ```rust
/// use flag_binder::{FlagBinder, FlagSource};
///
/// #[derive(Default, FlagSource)]
/// struct Backend {
///     #[flag(name = "close-timeout", describe = "Seconds before force kill", default = "-1")]
///     close_timeout: i32,
/// }
///
/// # fn main() -> Result<(), flag_binder::BindError> {
/// let mut backend = Backend::default();
/// let mut binder = FlagBinder::new(clap::Command::new("app"));
/// binder.bind(&mut backend)?;
/// assert_eq!(binder.names(), ["close-timeout"]);
///
/// binder.try_parse_from(["app", "--close-timeout", "-5"])?;
/// assert_eq!(backend.close_timeout, -5);
/// # Ok(())
/// # }
/// ```
pub struct FlagBinder<'a> {
    command: Command,
    bindings: Vec<Binding<'a>>,
    env_prefix: Option<String>,
}

impl fmt::Debug for FlagBinder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagBinder")
            .field("command", &self.command.get_name())
            .field("flags", &self.names())
            .field("env_prefix", &self.env_prefix)
            .finish()
    }
}

impl<'a> FlagBinder<'a> {
    /// Starts binding flags onto `command`.
    #[must_use]
    pub const fn new(command: Command) -> Self {
        Self {
            command,
            bindings: Vec::new(),
            env_prefix: None,
        }
    }

    /// Lets every flag bound afterwards fall back to an environment variable.
    ///
    /// See [`FlagSpec::env_var`] for how variable names are derived.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Registers one option per flaggable field of `record`.
    ///
    /// The record is validated completely before any option is added, so a
    /// failed call leaves the command unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::UnsupportedType`] for a field without a dispatch
    /// strategy, [`BindError::DefaultParse`] for an invalid default literal,
    /// and [`BindError::DuplicateFlag`] or [`BindError::DuplicateShort`] when
    /// a name is already registered or reserved.
    pub fn bind<S: FlagSource + ?Sized>(&mut self, record: &'a mut S) -> BindResult<&mut Self> {
        let mut staged: Vec<(FlagKind, FlagSpec, &'a mut dyn FlagValue)> = Vec::new();
        let mut longs = HashSet::new();
        let mut shorts = HashSet::new();

        for field in record.flag_fields() {
            if !field.spec.is_flaggable() {
                tracing::trace!(
                    type_name = field.spec.type_name,
                    "skipped field without long name"
                );
                continue;
            }
            let (spec, target) = field.into_target()?;
            let kind = target.kind();
            if spec.has_default() {
                target
                    .check_literal(spec.default)
                    .map_err(|source| BindError::default_parse(&spec, kind, source))?;
            }
            if self.long_taken(spec.long) || !longs.insert(spec.long) {
                return Err(BindError::duplicate_flag(spec.long));
            }
            if let Some(short) = spec.short
                && (self.short_taken(short) || !shorts.insert(short))
            {
                return Err(BindError::DuplicateShort {
                    flag: spec.long.to_owned(),
                    short,
                });
            }
            staged.push((kind, spec, target));
        }

        let mut args = Vec::with_capacity(staged.len());
        for (kind, spec, target) in staged {
            args.push(self.build_arg(kind, &spec, &*target));
            tracing::debug!(
                flag = spec.long,
                short = ?spec.short,
                kind = %kind,
                default = spec.default,
                "registered flag"
            );
            self.bindings.push(Binding { spec, target });
        }
        self.command = std::mem::take(&mut self.command).args(args);
        Ok(self)
    }

    /// Long names of every bound flag in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.bindings.iter().map(|binding| binding.spec.long).collect()
    }

    /// The command with every bound option registered.
    #[must_use]
    pub const fn command(&self) -> &Command {
        &self.command
    }

    /// Releases the bound records and returns the augmented command.
    #[must_use]
    pub fn into_command(self) -> Command {
        self.command
    }

    /// Parses `args` and writes explicitly supplied values into the records.
    ///
    /// Options left at their registered default are not written back, so
    /// those fields keep whatever the caller or [`crate::apply_defaults`]
    /// stored in them.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::CliParsing`] when `clap` rejects the arguments
    /// (including `--help` requests) and [`BindError::MatchRetrieval`] when a
    /// parsed value cannot be read back.
    pub fn try_parse_from<I, T>(self, args: I) -> BindResult<ArgMatches>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let Self {
            command, bindings, ..
        } = self;
        let matches = command.try_get_matches_from(args)?;
        write_back(bindings, &matches)?;
        Ok(matches)
    }

    /// Writes explicitly supplied values from `matches` into the records.
    ///
    /// `matches` must come from [`FlagBinder::command`] or a command built
    /// from it.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::MatchRetrieval`] when a parsed value cannot be
    /// read back with the field's type.
    pub fn apply_matches(self, matches: &ArgMatches) -> BindResult<()> {
        write_back(self.bindings, matches)
    }

    fn long_taken(&self, long: &str) -> bool {
        RESERVED_LONGS.contains(&long)
            || self
                .command
                .get_arguments()
                .any(|arg| arg.get_id() == long || arg.get_long() == Some(long))
    }

    fn short_taken(&self, short: char) -> bool {
        RESERVED_SHORTS.contains(&short)
            || self
                .command
                .get_arguments()
                .any(|arg| arg.get_short() == Some(short))
    }

    fn build_arg(&self, kind: FlagKind, spec: &FlagSpec, target: &dyn FlagValue) -> Arg {
        let mut arg = Arg::new(spec.long)
            .long(spec.long)
            .help(spec.description)
            .value_parser(target.value_parser());
        if let Some(short) = spec.short {
            arg = arg.short(short);
        }
        if spec.has_default() {
            arg = arg.default_value(spec.default);
        }
        if let Some(prefix) = &self.env_prefix {
            arg = arg.env(spec.env_var(prefix));
        }
        match kind {
            FlagKind::Bool => arg
                .action(ArgAction::Set)
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true"),
            FlagKind::Int => arg.action(ArgAction::Set).allow_negative_numbers(true),
            FlagKind::String => arg.action(ArgAction::Set),
        }
    }
}

fn write_back(bindings: Vec<Binding<'_>>, matches: &ArgMatches) -> BindResult<()> {
    for Binding { spec, target } in bindings {
        match matches.value_source(spec.long) {
            None | Some(ValueSource::DefaultValue) => continue,
            Some(_) => {}
        }
        let written = target
            .assign_from(matches, spec.long)
            .map_err(|source| BindError::MatchRetrieval {
                flag: spec.long.to_owned(),
                source,
            })?;
        if written {
            tracing::trace!(flag = spec.long, "wrote parsed value into field");
        }
    }
    Ok(())
}

/// Registers every record on `command` in order.
///
/// Equivalent to calling [`FlagBinder::bind`] once per record. The returned
/// binder exposes the augmented command and the registered names.
///
/// # Errors
///
/// Returns the first error reported by [`FlagBinder::bind`].
pub fn register_flags<'a>(
    command: Command,
    records: Vec<&'a mut dyn FlagSource>,
) -> BindResult<FlagBinder<'a>> {
    let mut binder = FlagBinder::new(command);
    for record in records {
        binder.bind(record)?;
    }
    Ok(binder)
}
