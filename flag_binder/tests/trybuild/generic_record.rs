use flag_binder::{FlagBinder, FlagSource};

#[derive(Debug, Default, FlagSource)]
struct Tls {
    #[flag(name = "tls", short = 't', describe = "Enable TLS/SSL", default = "false")]
    enabled: bool,
}

/// Generic parameters and where clauses are carried onto the impl.
#[derive(Debug, Default, FlagSource)]
struct Wrapper<T>
where
    T: FlagSource + Default,
{
    #[flag(flatten)]
    inner: T,
    #[flag(name = "port", short = 'p', default = "8080")]
    port: String,
}

fn main() {
    let mut wrapper = Wrapper::<Tls>::default();
    let mut binder = FlagBinder::new(clap::Command::new("app"));
    let _ = binder.bind(&mut wrapper);
}
