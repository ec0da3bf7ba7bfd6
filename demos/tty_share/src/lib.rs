//! Library facade for the `tty-share` demo so integration tests can reuse the
//! option records and the root command.

pub mod backend;
pub mod cli;
pub mod error;
pub mod server;
