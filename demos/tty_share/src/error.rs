//! Error types for the `tty-share` demo.
use std::io;

use flag_binder::BindError;
use thiserror::Error;

/// Errors raised while building or running the root command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Flag registration, default application, or argument parsing failed.
    #[error(transparent)]
    Bind(#[from] BindError),
    /// The greeting could not be written.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Result alias for the demo.
pub type CliResult<T> = Result<T, CliError>;
