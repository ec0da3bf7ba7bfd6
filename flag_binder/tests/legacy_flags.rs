//! Integration tests for generating flags in the superseded vocabulary.

use anyhow::{Result, anyhow, ensure};
use flag_binder::legacy::{BoolFlag, IntFlag, StringFlag};
use flag_binder::{
    BindError, FieldDescriptor, FieldSlot, FlagBinder, FlagField, FlagKind, FlagSource, FlagSpec,
    LegacyFlag, generate_legacy, generate_legacy_with_env_prefix,
};
use test_helpers::assert_legacy_parity;

#[derive(Debug, Default, FlagSource)]
struct Server {
    #[flag(name = "address", short = 'a', describe = "IP address to listen", default = "0.0.0.0")]
    address: String,
    #[flag(name = "once", describe = "Accept only one client", default = "false")]
    once: bool,
    #[flag(name = "random-url-length", describe = "Random URL length", default = "8")]
    random_url_length: u32,
    #[flag(name = "credential", short = 'c', describe = "Credential for Basic Authentication")]
    credential: String,
}

#[derive(Debug, Default, FlagSource)]
struct Backend {
    #[flag(name = "close-timeout", describe = "Seconds before force kill", default = "-1")]
    close_timeout: i32,
}

#[test]
fn generates_typed_flags_with_joined_names() -> Result<()> {
    let legacy = generate_legacy(&[&Server::default() as &dyn FlagSource])?;
    let expected = vec![
        LegacyFlag::String(StringFlag {
            name: "address, a".to_owned(),
            value: "0.0.0.0".to_owned(),
            usage: "IP address to listen".to_owned(),
            env_var: None,
        }),
        LegacyFlag::Bool(BoolFlag {
            name: "once".to_owned(),
            value: false,
            usage: "Accept only one client".to_owned(),
            env_var: None,
        }),
        LegacyFlag::Int(IntFlag {
            name: "random-url-length".to_owned(),
            value: 8,
            usage: "Random URL length".to_owned(),
            env_var: None,
        }),
        LegacyFlag::String(StringFlag {
            name: "credential, c".to_owned(),
            value: String::new(),
            usage: "Credential for Basic Authentication".to_owned(),
            env_var: None,
        }),
    ];
    ensure!(legacy.flags() == expected, "unexpected flags: {:#?}", legacy.flags());
    Ok(())
}

#[test]
fn mapping_points_at_addressing_names() -> Result<()> {
    let legacy = generate_legacy(&[&Server::default() as &dyn FlagSource, &Backend::default()])?;
    ensure!(legacy.len() == 5, "flag count: {}", legacy.len());
    for (current, addressed) in legacy.mapping() {
        ensure!(current == addressed, "`{current}` mapped to `{addressed}`");
    }
    let timeout = legacy
        .get("close-timeout")
        .ok_or_else(|| anyhow!("close-timeout missing"))?;
    ensure!(timeout.kind() == FlagKind::Int, "kind: {}", timeout.kind());
    ensure!(timeout.default_display() == "-1", "default: {}", timeout.default_display());
    Ok(())
}

#[test]
fn legacy_and_current_flags_agree() -> Result<()> {
    let mut server = Server::default();
    let mut backend = Backend::default();
    let legacy = generate_legacy(&[&server as &dyn FlagSource, &backend])?;

    let mut binder = FlagBinder::new(clap::Command::new("tty-share"));
    binder.bind(&mut server)?.bind(&mut backend)?;
    let names = binder.names();
    assert_legacy_parity(binder.command(), &names, &legacy)?;
    Ok(())
}

#[test]
fn environment_names_follow_the_prefix() -> Result<()> {
    let backend = Backend::default();
    let legacy = generate_legacy_with_env_prefix(&[&backend as &dyn FlagSource], "APP_")?;
    let flag = legacy
        .get("close-timeout")
        .ok_or_else(|| anyhow!("close-timeout missing"))?;
    ensure!(flag.env_var() == Some("APP_CLOSE_TIMEOUT"), "env: {:?}", flag.env_var());
    Ok(())
}

#[test]
fn empty_record_set_generates_nothing() -> Result<()> {
    let legacy = generate_legacy(&[])?;
    ensure!(legacy.is_empty(), "unexpected flags: {legacy:?}");
    ensure!(legacy.mapping().is_empty(), "unexpected mapping");
    Ok(())
}

#[test]
fn duplicate_names_are_rejected() -> Result<()> {
    let err = generate_legacy(&[&Backend::default() as &dyn FlagSource, &Backend::default()])
        .err()
        .ok_or_else(|| anyhow!("duplicate close-timeout should fail"))?;
    ensure!(
        matches!(&err, BindError::DuplicateFlag { flag } if flag == "close-timeout"),
        "unexpected error: {err}"
    );
    Ok(())
}

#[test]
fn unsupported_types_are_rejected() -> Result<()> {
    #[derive(Default, FlagSource)]
    struct Timing {
        #[flag(name = "delay", default = "1s")]
        delay: std::time::Duration,
    }

    let timing = Timing::default();
    ensure!(timing.delay.is_zero(), "delay: {:?}", timing.delay);
    let err = generate_legacy(&[&timing as &dyn FlagSource])
        .err()
        .ok_or_else(|| anyhow!("Duration has no legacy flag type"))?;
    ensure!(
        matches!(
            &err,
            BindError::UnsupportedType { type_name, .. } if type_name == "std::time::Duration"
        ),
        "unexpected error: {err}"
    );
    Ok(())
}

#[test]
fn into_parts_preserves_order() -> Result<()> {
    let legacy = generate_legacy(&[&Server::default() as &dyn FlagSource])?;
    let (flags, mapping) = legacy.into_parts();
    let order: Vec<_> = flags.iter().map(LegacyFlag::addressing_name).collect();
    ensure!(
        order == ["address", "once", "random-url-length", "credential"],
        "order: {order:?}"
    );
    ensure!(mapping.len() == flags.len(), "mapping size {}", mapping.len());
    Ok(())
}

#[derive(Debug, Default, FlagSource)]
struct Limits {
    #[flag(name = "random-url-length", describe = "Random URL length", default = "08")]
    random_url_length: u32,
    #[flag(name = "max-bytes", describe = "Largest upload", default = "18446744073709551615")]
    max_bytes: u64,
    #[flag(name = "reconnect-time", describe = "Seconds between reconnects")]
    reconnect_time: u16,
}

#[test]
fn integer_defaults_agree_at_field_width() -> Result<()> {
    let mut limits = Limits::default();
    let legacy = generate_legacy(&[&limits as &dyn FlagSource])?;
    let max = legacy
        .get("max-bytes")
        .ok_or_else(|| anyhow!("max-bytes missing"))?;
    ensure!(
        max.default_display() == u64::MAX.to_string(),
        "default: {}",
        max.default_display()
    );

    let mut binder = FlagBinder::new(clap::Command::new("tty-share"));
    binder.bind(&mut limits)?;
    let names = binder.names();
    assert_legacy_parity(binder.command(), &names, &legacy)?;
    Ok(())
}

#[test]
fn out_of_range_default_fails_both_generators() -> Result<()> {
    #[derive(Debug, Default, FlagSource)]
    struct Narrow {
        #[flag(name = "width", default = "300")]
        width: u8,
    }

    let mut narrow = Narrow::default();
    let legacy_err = generate_legacy(&[&narrow as &dyn FlagSource])
        .err()
        .ok_or_else(|| anyhow!("300 does not fit in u8"))?;
    ensure!(
        matches!(
            &legacy_err,
            BindError::DefaultParse { flag, kind: FlagKind::Int, .. } if flag == "width"
        ),
        "unexpected legacy error: {legacy_err}"
    );
    let mut binder = FlagBinder::new(clap::Command::new("tty-share"));
    let bind_err = binder
        .bind(&mut narrow)
        .err()
        .ok_or_else(|| anyhow!("300 does not fit in u8"))?;
    ensure!(
        matches!(&bind_err, BindError::DefaultParse { flag, .. } if flag == "width"),
        "unexpected bind error: {bind_err}"
    );
    ensure!(narrow.width == 0, "width: {}", narrow.width);
    Ok(())
}

#[test]
fn fields_without_long_name_are_skipped() -> Result<()> {
    struct Nameless {
        term: String,
    }

    impl FlagSource for Nameless {
        fn describe(&self) -> Vec<FieldDescriptor> {
            vec![FieldDescriptor::new(
                FlagSpec::new("", None, "", "xterm", "String"),
                &self.term,
            )]
        }

        fn flag_fields(&mut self) -> Vec<FlagField<'_>> {
            vec![FlagField::new(
                FlagSpec::new("", None, "", "xterm", "String"),
                FieldSlot::Value(&mut self.term),
            )]
        }
    }

    let nameless = Nameless {
        term: String::new(),
    };
    let legacy = generate_legacy(&[&nameless as &dyn FlagSource, &Backend::default()])?;
    ensure!(legacy.len() == 1, "unexpected flags: {legacy:?}");
    ensure!(!legacy.mapping().contains_key(""), "empty name mapped");
    ensure!(nameless.term.is_empty(), "term: {}", nameless.term);
    Ok(())
}
