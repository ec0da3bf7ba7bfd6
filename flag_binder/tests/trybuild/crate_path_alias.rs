use flag_binder::{FlagSource, apply_defaults};

/// `#[flag(crate = "flag_binder")]` names the runtime crate explicitly.
#[derive(Debug, Default, FlagSource)]
#[flag(crate = "flag_binder")]
struct Listen {
    #[flag(name = "address", short = 'a', describe = "IP address to listen", default = "0.0.0.0")]
    address: String,
}

fn main() {
    let mut listen = Listen::default();
    let _: flag_binder::BindResult<()> = apply_defaults(&mut listen);
}
