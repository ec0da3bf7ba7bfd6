//! Test helpers shared across crates.
//!
//! [`flags`] compares registered `clap` arguments and legacy flags against
//! the metadata a record declares. [`env`] provides guarded environment
//! variable mutation for tests of the environment fallback.

pub mod env;
pub mod flags;

pub use flags::{
    ExpectedFlag, assert_flags_registered, assert_legacy_parity, expected_flags, registered_flag,
};
