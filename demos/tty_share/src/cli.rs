//! Root command and argument handling for `tty-share`.
//!
//! [`root_command`] builds the bare command. [`run`] fills the option records
//! with their declared defaults, binds them to the command, parses the
//! arguments, and writes the greeting.

use std::ffi::OsString;
use std::io::Write;

use clap::Command;
use flag_binder::{FlagBinder, FlagSource, apply_defaults};

use crate::backend::LocalCommandOptions;
use crate::error::CliResult;
use crate::server::ServerOptions;

/// Prefix of the environment variables consulted for absent flags.
pub const ENV_PREFIX: &str = "TTY_SHARE_";

/// Text printed when the command runs.
pub const GREETING: &str = "Share your terminal as a web application\n";

/// Fully resolved option records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Web server options.
    pub server: ServerOptions,
    /// Local command options.
    pub backend: LocalCommandOptions,
}

impl Settings {
    /// Records populated with every declared default.
    ///
    /// # Errors
    ///
    /// Returns an error when a declared default does not parse.
    pub fn with_defaults() -> CliResult<Self> {
        let mut settings = Self::default();
        apply_defaults(&mut settings.server)?;
        apply_defaults(&mut settings.backend)?;
        Ok(settings)
    }
}

/// The top-level command together with the greeting it prints.
#[derive(Debug, Clone)]
pub struct RootCommand {
    command: Command,
    greeting: String,
    env_prefix: Option<String>,
}

/// Builds the root command printing `greeting` when executed.
#[must_use]
pub fn root_command(greeting: impl Into<String>) -> RootCommand {
    let command = Command::new("tty-share")
        .about("Share your terminal as a web application")
        .version(env!("CARGO_PKG_VERSION"));
    RootCommand {
        command,
        greeting: greeting.into(),
        env_prefix: None,
    }
}

impl RootCommand {
    /// Reads absent flags from environment variables under `prefix`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// The command before any record is bound.
    #[must_use]
    pub const fn command(&self) -> &Command {
        &self.command
    }

    /// The text written by [`RootCommand::execute`].
    #[must_use]
    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    /// Binds `records`, parses `args` into them, and writes the greeting.
    ///
    /// # Errors
    ///
    /// Returns an error when a record cannot be bound, the arguments are
    /// rejected, or `out` cannot be written.
    pub fn execute<I, T, W>(
        self,
        records: Vec<&mut dyn FlagSource>,
        args: I,
        out: &mut W,
    ) -> CliResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
        W: Write + ?Sized,
    {
        let Self {
            command,
            greeting,
            env_prefix,
        } = self;
        let mut binder = FlagBinder::new(command);
        if let Some(prefix) = env_prefix {
            binder = binder.with_env_prefix(prefix);
        }
        for record in records {
            binder.bind(record)?;
        }
        tracing::debug!(flags = binder.names().len(), "bound option records");
        binder.try_parse_from(args)?;
        out.write_all(greeting.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Resolves [`Settings`] from defaults, the environment, and `args`.
///
/// # Errors
///
/// Returns an error when binding or parsing fails or the greeting cannot be
/// written.
pub fn run<I, T, W>(args: I, out: &mut W) -> CliResult<Settings>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write + ?Sized,
{
    let mut settings = Settings::with_defaults()?;
    let records = vec![
        &mut settings.server as &mut dyn FlagSource,
        &mut settings.backend as &mut dyn FlagSource,
    ];
    root_command(GREETING)
        .with_env_prefix(ENV_PREFIX)
        .execute(records, args, out)?;
    settings.server.enable_basic_auth = !settings.server.credential.is_empty();
    Ok(settings)
}
