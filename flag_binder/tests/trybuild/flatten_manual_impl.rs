use flag_binder::{FieldDescriptor, FieldSlot, FlagField, FlagSource, FlagSpec, apply_defaults};

/// A record implementing the trait by hand.
#[derive(Debug, Default)]
struct Term {
    name: String,
}

const TERM: FlagSpec = FlagSpec::new("term", None, "Terminal name", "xterm", "String");

impl FlagSource for Term {
    fn describe(&self) -> Vec<FieldDescriptor> {
        vec![FieldDescriptor::new(TERM, &self.name)]
    }

    fn flag_fields(&mut self) -> Vec<FlagField<'_>> {
        vec![FlagField::new(TERM, FieldSlot::Value(&mut self.name))]
    }
}

#[derive(Debug, Default, FlagSource)]
struct Server {
    #[flag(flatten)]
    term: Term,
    #[flag(name = "width", default = "0")]
    width: u16,
}

fn main() {
    let mut server = Server::default();
    let _: flag_binder::BindResult<()> = apply_defaults(&mut server);
}
