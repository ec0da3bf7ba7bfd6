//! Assertions over registered options and generated legacy flags.

use std::collections::BTreeMap;

use anyhow::{Result, anyhow, ensure};
use clap::{Arg, Command};
use flag_binder::{FlagSource, LegacyFlag, LegacyFlags};

/// The observable shape of one option: names, help and default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedFlag {
    /// Long name.
    pub long: String,
    /// One-letter alias.
    pub short: Option<char>,
    /// Help text.
    pub description: String,
    /// Default literal, `None` when the option has none.
    pub default: Option<String>,
}

impl ExpectedFlag {
    /// Builds an expectation from literal parts.
    #[must_use]
    pub fn new(long: &str, short: Option<char>, description: &str, default: Option<&str>) -> Self {
        Self {
            long: long.to_owned(),
            short,
            description: description.to_owned(),
            default: default.map(str::to_owned),
        }
    }

    fn from_arg(arg: &Arg) -> Result<Self> {
        let long = arg
            .get_long()
            .ok_or_else(|| anyhow!("argument `{}` has no long name", arg.get_id()))?;
        let defaults: Vec<_> = arg
            .get_default_values()
            .iter()
            .map(|value| value.to_string_lossy().into_owned())
            .collect();
        Ok(Self {
            long: long.to_owned(),
            short: arg.get_short(),
            description: arg.get_help().map(ToString::to_string).unwrap_or_default(),
            default: (!defaults.is_empty()).then(|| defaults.join(",")),
        })
    }
}

/// Expectations for every flaggable field of `record`, keyed by long name.
#[must_use]
pub fn expected_flags(record: &dyn FlagSource) -> BTreeMap<String, ExpectedFlag> {
    record
        .describe()
        .into_iter()
        .map(|descriptor| {
            let spec = descriptor.spec;
            let default = spec.has_default().then_some(spec.default);
            let flag = ExpectedFlag::new(spec.long, spec.short, spec.description, default);
            (flag.long.clone(), flag)
        })
        .collect()
}

/// Reads back the option registered under `long` on `command`.
///
/// # Errors
///
/// Fails when no such option exists.
pub fn registered_flag(command: &Command, long: &str) -> Result<ExpectedFlag> {
    let arg = command
        .get_arguments()
        .find(|arg| arg.get_long() == Some(long))
        .ok_or_else(|| anyhow!("`--{long}` is not registered on `{}`", command.get_name()))?;
    ExpectedFlag::from_arg(arg)
}

/// Checks that every field of every record is registered as declared.
///
/// # Errors
///
/// Describes the first option that is missing or differs.
pub fn assert_flags_registered(command: &Command, records: &[&dyn FlagSource]) -> Result<()> {
    for record in records {
        for (long, expected) in expected_flags(*record) {
            let actual = registered_flag(command, &long)?;
            ensure!(
                actual == expected,
                "`--{long}` mismatch: expected {expected:?}, registered {actual:?}"
            );
        }
    }
    Ok(())
}

/// Checks that `legacy` agrees with the options registered for `names`.
///
/// Each name must map to a legacy flag carrying the same alias and help
/// text. Defaults are compared as values, so `"08"` agrees with `8`; an
/// option without a default must pair with a legacy zero value.
///
/// # Errors
///
/// Describes the first disagreement found.
pub fn assert_legacy_parity(command: &Command, names: &[&str], legacy: &LegacyFlags) -> Result<()> {
    ensure!(
        legacy.len() == names.len(),
        "{} legacy flags generated for {} registered options",
        legacy.len(),
        names.len()
    );
    for long in names {
        let current = registered_flag(command, long)?;
        let flag = legacy
            .get(long)
            .ok_or_else(|| anyhow!("no legacy flag mapped from `{long}`"))?;
        ensure!(
            flag.addressing_name() == *long,
            "`{long}` is addressed as `{}`",
            flag.addressing_name()
        );
        ensure!(
            flag.shorthand() == current.short,
            "`{long}` alias differs: legacy {:?}, current {:?}",
            flag.shorthand(),
            current.short
        );
        ensure!(
            flag.usage() == current.description,
            "`{long}` help differs: legacy {:?}, current {:?}",
            flag.usage(),
            current.description
        );
        ensure!(
            default_agrees(flag, current.default.as_deref()),
            "`{long}` default differs: legacy {:?}, current {:?}",
            flag.default_display(),
            current.default
        );
    }
    Ok(())
}

fn default_agrees(flag: &LegacyFlag, current: Option<&str>) -> bool {
    match flag {
        LegacyFlag::String(flag) => flag.value == current.unwrap_or_default(),
        LegacyFlag::Bool(flag) => {
            current.map_or(Some(false), |literal| literal.parse().ok()) == Some(flag.value)
        }
        LegacyFlag::Int(flag) => {
            current.map_or(Some(0), |literal| literal.parse().ok()) == Some(flag.value)
        }
    }
}
