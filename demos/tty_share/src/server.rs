//! Options for the web terminal server.

use std::collections::BTreeMap;

use flag_binder::FlagSource;

/// Settings of the HTTP/WebSocket server that exposes the terminal.
///
/// Fields without a `#[flag]` attribute are configured programmatically and
/// never appear on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, FlagSource)]
pub struct ServerOptions {
    /// Listen address.
    #[flag(name = "address", short = 'a', describe = "IP address to listen", default = "0.0.0.0")]
    pub address: String,
    /// Listen port.
    #[flag(name = "port", short = 'p', describe = "Port number to listen", default = "8080")]
    pub port: String,
    /// URL path the terminal is served under.
    #[flag(name = "path", short = 'm', describe = "Base path", default = "/")]
    pub path: String,
    /// Forward client keystrokes to the process.
    #[flag(
        name = "permit-write",
        short = 'w',
        describe = "Permit clients to write to the TTY (BE CAREFUL)",
        default = "false"
    )]
    pub permit_write: bool,
    /// Set when `credential` is non-empty.
    pub enable_basic_auth: bool,
    /// `user:pass` for Basic authentication.
    #[flag(
        name = "credential",
        short = 'c',
        describe = "Credential for Basic Authentication (ex: user:pass, default disabled)"
    )]
    pub credential: String,
    /// Prefix the path with a random segment.
    #[flag(
        name = "random-url",
        short = 'r',
        describe = "Add a random string to the URL",
        default = "false"
    )]
    pub enable_random_url: bool,
    /// Length of the random segment.
    #[flag(name = "random-url-length", describe = "Random URL length", default = "8")]
    pub random_url_length: usize,
    /// Serve over TLS.
    #[flag(name = "tls", short = 't', describe = "Enable TLS/SSL", default = "false")]
    pub enable_tls: bool,
    /// Certificate file.
    #[flag(
        name = "tls-crt",
        describe = "TLS/SSL certificate file path",
        default = "~/.tty_share.crt"
    )]
    pub tls_crt_file: String,
    /// Private key file.
    #[flag(name = "tls-key", describe = "TLS/SSL key file path", default = "~/.tty_share.key")]
    pub tls_key_file: String,
    /// Require client certificates.
    pub enable_tls_client_auth: bool,
    /// CA bundle for client certificates.
    #[flag(
        name = "tls-ca-crt",
        describe = "TLS/SSL CA certificate file for client certifications",
        default = "~/.tty_share.ca.crt"
    )]
    pub tls_ca_crt_file: String,
    /// Replacement for the bundled index page.
    #[flag(name = "index", describe = "Custom index.html file")]
    pub index_file: String,
    /// Template for the browser window title.
    #[flag(
        name = "title-format",
        describe = "Title format of browser window",
        default = "{{ .command }}@{{ .hostname }}"
    )]
    pub title_format: String,
    /// Let the browser reconnect after a drop.
    #[flag(name = "reconnect", describe = "Enable reconnection", default = "false")]
    pub enable_reconnect: bool,
    /// Seconds between reconnection attempts.
    #[flag(name = "reconnect-time", describe = "Time to reconnect", default = "10")]
    pub reconnect_time: u32,
    /// Concurrent client limit; 0 is unlimited.
    #[flag(name = "max-connection", describe = "Maximum connection to tty-share", default = "0")]
    pub max_connection: u32,
    /// Exit after the first client disconnects.
    #[flag(
        name = "once",
        describe = "Accept only one client and exit on disconnection",
        default = "false"
    )]
    pub once: bool,
    /// Seconds to wait for the first client.
    #[flag(
        name = "timeout",
        describe = "Timeout seconds for waiting a client(0 to disable)",
        default = "0"
    )]
    pub timeout: u32,
    /// Accept `arg` query parameters as command arguments.
    #[flag(
        name = "permit-arguments",
        describe = "Permit clients to send command line arguments in URL (e.g. http://example.com:8080/?arg=AAA&arg=BBB)",
        default = "true"
    )]
    pub permit_arguments: bool,
    /// Terminal preferences sent to the browser.
    pub preferences: Preferences,
    /// Fixed terminal width in columns.
    #[flag(
        name = "width",
        describe = "Static width of the screen, 0(default) means dynamically resize",
        default = "0"
    )]
    pub width: u16,
    /// Fixed terminal height in rows.
    #[flag(
        name = "height",
        describe = "Static height of the screen, 0(default) means dynamically resize",
        default = "0"
    )]
    pub height: u16,
    /// Pattern of accepted WebSocket origins.
    #[flag(
        name = "ws-origin",
        describe = "A regular expression that matches origin URLs to be accepted by WebSocket. No cross origin requests are acceptable by default"
    )]
    pub ws_origin: String,
    /// Browser terminal implementation.
    #[flag(
        name = "term",
        describe = "Terminal name to use on the browser, one of xterm or hterm.",
        default = "xterm"
    )]
    pub term: String,
    /// Values substituted into `title_format`.
    pub title_variables: BTreeMap<String, String>,
}

/// Client-side terminal preferences forwarded to the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    /// CSS font family.
    pub font_family: Option<String>,
    /// Font size in pixels.
    pub font_size: Option<u16>,
    /// Blink the cursor.
    pub cursor_blink: Option<bool>,
    /// Show the scrollbar.
    pub scrollbar_visible: Option<bool>,
}
