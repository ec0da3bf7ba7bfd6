//! `tty-share` entry point: resolve options from the command line and the
//! environment, then report them.

use std::io;

use flag_binder::BindError;
use tracing_subscriber::EnvFilter;

use tty_share::cli;
use tty_share::error::CliError;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut stdout = io::stdout().lock();
    let settings = match cli::run(std::env::args_os(), &mut stdout) {
        Ok(settings) => settings,
        Err(CliError::Bind(BindError::CliParsing(err))) => err.exit(),
        Err(err) => return Err(err.into()),
    };
    tracing::info!(
        address = %settings.server.address,
        port = %settings.server.port,
        path = %settings.server.path,
        permit_write = settings.server.permit_write,
        close_timeout = settings.backend.close_timeout,
        "resolved options"
    );
    Ok(())
}
