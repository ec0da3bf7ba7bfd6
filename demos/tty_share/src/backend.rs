//! Options for the local command backend.

use flag_binder::FlagSource;

/// How the shared process is torn down once its client leaves.
#[derive(Debug, Clone, Default, PartialEq, Eq, FlagSource)]
pub struct LocalCommandOptions {
    /// Signal number sent on close.
    #[flag(
        name = "close-signal",
        describe = "Signal sent to the command process when tty-share close it (default: SIGHUP)",
        default = "1"
    )]
    pub close_signal: i32,
    /// Seconds before the process is killed; negative waits forever.
    #[flag(
        name = "close-timeout",
        describe = "Time in seconds to force kill process after client is disconnected (default: -1)",
        default = "-1"
    )]
    pub close_timeout: i32,
}
