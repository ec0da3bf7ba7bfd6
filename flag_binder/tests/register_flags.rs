//! Integration tests for registering record fields as `clap` options and
//! writing parsed values back into the records.

use anyhow::{Result, anyhow, ensure};
use clap::{Arg, Command};
use flag_binder::{
    BindError, FieldDescriptor, FieldSlot, FlagBinder, FlagField, FlagSource, FlagSpec,
    apply_defaults, register_flags,
};
use rstest::rstest;
use test_helpers::{ExpectedFlag, assert_flags_registered, registered_flag};

#[derive(Debug, Default, FlagSource)]
struct Listen {
    #[flag(name = "address", short = 'a', describe = "IP address to listen", default = "0.0.0.0")]
    address: String,
}

#[derive(Debug, Default, FlagSource)]
struct Access {
    #[flag(
        name = "permit-write",
        short = 'w',
        describe = "Permit clients to write to the TTY (BE CAREFUL)",
        default = "false"
    )]
    permit_write: bool,
}

#[derive(Debug, Default, FlagSource)]
struct RandomUrl {
    #[flag(name = "random-url-length", describe = "Random URL length", default = "8")]
    random_url_length: i32,
}

#[derive(Debug, Default, FlagSource)]
struct Server {
    #[flag(flatten)]
    listen: Listen,
    #[flag(flatten)]
    access: Access,
    #[flag(name = "port", short = 'p', describe = "Port number to listen", default = "8080")]
    port: String,
    #[flag(name = "max-connection", describe = "Maximum connections", default = "0")]
    max_connection: u32,
    enable_basic_auth: bool,
}

#[derive(Debug, Default, FlagSource)]
struct Tuning {
    #[flag(name = "ratio", describe = "Compression ratio", default = "0.5")]
    ratio: f64,
}

fn root() -> Command {
    Command::new("tty-share")
}

#[rstest]
#[case::string(ExpectedFlag::new("address", Some('a'), "IP address to listen", Some("0.0.0.0")))]
#[case::bool(ExpectedFlag::new(
    "permit-write",
    Some('w'),
    "Permit clients to write to the TTY (BE CAREFUL)",
    Some("false")
))]
#[case::int(ExpectedFlag::new("random-url-length", None, "Random URL length", Some("8")))]
fn registers_each_supported_kind(#[case] expected: ExpectedFlag) -> Result<()> {
    let mut listen = Listen::default();
    let mut access = Access::default();
    let mut random = RandomUrl::default();
    let records = vec![
        &mut listen as &mut dyn FlagSource,
        &mut access as &mut dyn FlagSource,
        &mut random as &mut dyn FlagSource,
    ];
    let binder = register_flags(root(), records)?;
    let actual = registered_flag(binder.command(), &expected.long)?;
    ensure!(actual == expected, "expected {expected:?}, registered {actual:?}");
    Ok(())
}

#[test]
fn flattened_records_register_in_declaration_order() -> Result<()> {
    let mut server = Server::default();
    let mut binder = FlagBinder::new(root());
    binder.bind(&mut server)?;
    ensure!(
        binder.names() == ["address", "permit-write", "port", "max-connection"],
        "unexpected order: {:?}",
        binder.names()
    );
    assert_flags_registered(binder.command(), &[&Server::default() as &dyn FlagSource])?;
    Ok(())
}

#[test]
fn field_without_name_is_not_registered() -> Result<()> {
    let mut server = Server::default();
    let binder = register_flags(root(), vec![&mut server as &mut dyn FlagSource])?;
    let command = binder.into_command();
    ensure!(
        command
            .get_arguments()
            .all(|arg| arg.get_long() != Some("enable-basic-auth")),
        "untagged field leaked onto the command"
    );
    ensure!(!server.enable_basic_auth, "untagged field was written");
    Ok(())
}

#[test]
fn unsupported_type_leaves_command_unchanged() -> Result<()> {
    let mut listen = Listen::default();
    let mut tuning = Tuning::default();
    let mut binder = FlagBinder::new(root());
    binder.bind(&mut listen)?;
    let err = binder
        .bind(&mut tuning)
        .err()
        .ok_or_else(|| anyhow!("f64 field should be rejected"))?;
    ensure!(
        matches!(
            &err,
            BindError::UnsupportedType { flag, type_name } if flag == "ratio" && type_name == "f64"
        ),
        "unexpected error: {err}"
    );
    ensure!(binder.names() == ["address"], "names changed: {:?}", binder.names());
    ensure!(
        registered_flag(binder.command(), "ratio").is_err(),
        "ratio must not be registered"
    );
    ensure!(tuning.ratio.abs() < f64::EPSILON, "rejected record was modified");
    Ok(())
}

#[test]
fn invalid_default_is_rejected_before_registration() -> Result<()> {
    #[derive(Default, FlagSource)]
    struct Broken {
        #[flag(name = "width", default = "wide")]
        width: u16,
    }

    let mut broken = Broken::default();
    let mut binder = FlagBinder::new(root());
    let err = binder
        .bind(&mut broken)
        .err()
        .ok_or_else(|| anyhow!("non-numeric default should fail"))?;
    ensure!(
        matches!(
            &err,
            BindError::DefaultParse { flag, literal, .. } if flag == "width" && literal == "wide"
        ),
        "unexpected error: {err}"
    );
    ensure!(binder.names().is_empty(), "nothing should be registered");
    Ok(())
}

#[test]
fn duplicate_long_names_across_records_fail() -> Result<()> {
    let mut first = Listen::default();
    let mut second = Listen::default();
    let records = vec![
        &mut first as &mut dyn FlagSource,
        &mut second as &mut dyn FlagSource,
    ];
    let err = register_flags(root(), records)
        .err()
        .ok_or_else(|| anyhow!("second `address` should be rejected"))?;
    ensure!(
        matches!(&err, BindError::DuplicateFlag { flag } if flag == "address"),
        "unexpected error: {err}"
    );
    Ok(())
}

#[test]
fn names_already_on_the_command_are_taken() -> Result<()> {
    let command = root().arg(Arg::new("verbose").long("verbose").short('w'));
    let mut access = Access::default();
    let err = register_flags(command, vec![&mut access as &mut dyn FlagSource])
        .err()
        .ok_or_else(|| anyhow!("`-w` is already taken"))?;
    ensure!(
        matches!(&err, BindError::DuplicateShort { flag, short: 'w' } if flag == "permit-write"),
        "unexpected error: {err}"
    );
    Ok(())
}

#[rstest]
#[case::flag_only(&["tty-share", "-w"], true)]
#[case::long_flag(&["tty-share", "--permit-write"], true)]
#[case::explicit_true(&["tty-share", "--permit-write=true"], true)]
#[case::explicit_false(&["tty-share", "--permit-write=false"], false)]
fn bool_flags_accept_optional_values(#[case] args: &[&str], #[case] expected: bool) -> Result<()> {
    let mut access = Access {
        permit_write: !expected,
    };
    let binder = register_flags(root(), vec![&mut access as &mut dyn FlagSource])?;
    binder.try_parse_from(args.iter().copied())?;
    ensure!(access.permit_write == expected, "permit-write for {args:?}");
    Ok(())
}

#[test]
fn bool_flag_rejects_non_boolean_value() -> Result<()> {
    let mut access = Access::default();
    let binder = register_flags(root(), vec![&mut access as &mut dyn FlagSource])?;
    let err = binder
        .try_parse_from(["tty-share", "--permit-write=yes"])
        .err()
        .ok_or_else(|| anyhow!("`yes` is not a boolean literal"))?;
    ensure!(matches!(err, BindError::CliParsing(_)), "unexpected error: {err}");
    Ok(())
}

#[test]
fn parsed_values_are_written_back() -> Result<()> {
    let mut server = Server::default();
    let mut random = RandomUrl::default();
    let records = vec![
        &mut server as &mut dyn FlagSource,
        &mut random as &mut dyn FlagSource,
    ];
    let binder = register_flags(root(), records)?;
    binder.try_parse_from([
        "tty-share",
        "-a",
        "127.0.0.1",
        "--port=9000",
        "--max-connection",
        "4",
        "--random-url-length",
        "-3",
    ])?;
    ensure!(server.listen.address == "127.0.0.1", "address: {}", server.listen.address);
    ensure!(server.port == "9000", "port: {}", server.port);
    ensure!(server.max_connection == 4, "max-connection: {}", server.max_connection);
    ensure!(random.random_url_length == -3, "random-url-length: {}", random.random_url_length);
    Ok(())
}

#[test]
fn unsupplied_flags_do_not_overwrite_fields() -> Result<()> {
    let mut server = Server::default();
    server.port = "9999".to_owned();
    let binder = register_flags(root(), vec![&mut server as &mut dyn FlagSource])?;
    binder.try_parse_from(["tty-share"])?;
    ensure!(server.port == "9999", "registered default overwrote the field");
    ensure!(server.listen.address.is_empty(), "address: {}", server.listen.address);
    Ok(())
}

#[test]
fn defaults_then_overrides() -> Result<()> {
    let mut server = Server::default();
    apply_defaults(&mut server)?;
    let binder = register_flags(root(), vec![&mut server as &mut dyn FlagSource])?;
    binder.try_parse_from(["tty-share", "-p", "7681"])?;
    ensure!(server.listen.address == "0.0.0.0", "address: {}", server.listen.address);
    ensure!(server.port == "7681", "port: {}", server.port);
    Ok(())
}

#[test]
fn out_of_range_integers_are_rejected_by_the_parser() -> Result<()> {
    let mut server = Server::default();
    let binder = register_flags(root(), vec![&mut server as &mut dyn FlagSource])?;
    let err = binder
        .try_parse_from(["tty-share", "--max-connection", "-1"])
        .err()
        .ok_or_else(|| anyhow!("negative u32 should be rejected"))?;
    ensure!(matches!(err, BindError::CliParsing(_)), "unexpected error: {err}");
    ensure!(server.max_connection == 0, "field changed on failure");
    Ok(())
}

#[test]
fn help_request_is_reported_as_display_request() -> Result<()> {
    let mut listen = Listen::default();
    let binder = register_flags(root(), vec![&mut listen as &mut dyn FlagSource])?;
    let err = binder
        .try_parse_from(["tty-share", "--help"])
        .err()
        .ok_or_else(|| anyhow!("--help should short-circuit"))?;
    ensure!(err.is_display_request(), "unexpected error: {err}");
    Ok(())
}

#[test]
fn apply_matches_writes_from_external_parse() -> Result<()> {
    let mut listen = Listen::default();
    let binder = register_flags(root(), vec![&mut listen as &mut dyn FlagSource])?;
    let matches = binder
        .command()
        .clone()
        .try_get_matches_from(["tty-share", "--address", "::1"])?;
    binder.apply_matches(&matches)?;
    ensure!(listen.address == "::1", "address: {}", listen.address);
    Ok(())
}

#[test]
fn environment_fallback_uses_prefixed_names() -> Result<()> {
    let _lock = test_helpers::env::lock();
    let _guard = test_helpers::env::set_var("BINDER_TEST_RANDOM_URL_LENGTH", "21");
    let mut random = RandomUrl::default();
    let mut binder = FlagBinder::new(root()).with_env_prefix("BINDER_TEST_");
    binder.bind(&mut random)?;
    binder.try_parse_from(["tty-share"])?;
    ensure!(random.random_url_length == 21, "value: {}", random.random_url_length);
    Ok(())
}

struct Nameless {
    term: String,
}

impl FlagSource for Nameless {
    fn describe(&self) -> Vec<FieldDescriptor> {
        vec![FieldDescriptor::new(
            FlagSpec::new("", Some('x'), "", "xterm", "String"),
            &self.term,
        )]
    }

    fn flag_fields(&mut self) -> Vec<FlagField<'_>> {
        vec![FlagField::new(
            FlagSpec::new("", Some('x'), "", "xterm", "String"),
            FieldSlot::Value(&mut self.term),
        )]
    }
}

#[test]
fn hand_written_field_without_long_name_is_skipped() -> Result<()> {
    let mut nameless = Nameless {
        term: String::new(),
    };
    let mut listen = Listen::default();
    let mut binder = FlagBinder::new(root());
    binder.bind(&mut nameless)?.bind(&mut listen)?;
    ensure!(binder.names() == ["address"], "names: {:?}", binder.names());
    ensure!(
        binder
            .command()
            .get_arguments()
            .all(|arg| !arg.get_id().as_str().is_empty() && arg.get_short() != Some('x')),
        "nameless field registered"
    );
    binder.try_parse_from(["tty-share", "-a", "::1"])?;
    ensure!(nameless.term.is_empty(), "term: {}", nameless.term);
    ensure!(listen.address == "::1", "address: {}", listen.address);
    Ok(())
}
