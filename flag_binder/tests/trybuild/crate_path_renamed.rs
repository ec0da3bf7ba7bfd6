use flag_binder as binder_alias;
use binder_alias::FlagSource;

/// The runtime crate can be reached through a local alias.
#[derive(Debug, Default, FlagSource)]
#[flag(crate = "binder_alias")]
struct Backend {
    #[flag(name = "close-timeout", describe = "Seconds before force kill", default = "-1")]
    close_timeout: i32,
}

fn main() {
    let fields = binder_alias::extract(&Backend::default());
    assert_eq!(fields.len(), 1);
}
