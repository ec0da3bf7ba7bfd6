//! Bind annotated configuration structs to `clap` command-line flags.
//!
//! A configuration record describes its flaggable fields through the
//! [`FlagSource`] trait, usually implemented with `#[derive(FlagSource)]`.
//! Each field tagged with `#[flag(name = "...")]` becomes one option on a
//! [`clap::Command`]; [`apply_defaults`] fills zero-valued fields from their
//! declared default literals, and [`FlagBinder`] writes parsed option values
//! straight back into the record.
//!
//! ```rust
//! use flag_binder::{FlagBinder, FlagSource, apply_defaults};
//!
//! #[derive(Debug, Default, FlagSource)]
//! struct ServerOptions {
//!     #[flag(name = "address", short = 'a', describe = "IP address to listen", default = "0.0.0.0")]
//!     address: String,
//!     #[flag(name = "permit-write", short = 'w', describe = "Permit clients to write", default = "false")]
//!     permit_write: bool,
//!     #[flag(name = "random-url-length", describe = "Random URL length", default = "8")]
//!     random_url_length: u32,
//! }
//!
//! # fn main() -> Result<(), flag_binder::BindError> {
//! let mut options = ServerOptions::default();
//! apply_defaults(&mut options)?;
//!
//! let mut binder = FlagBinder::new(clap::Command::new("serve"));
//! binder.bind(&mut options)?;
//! binder.try_parse_from(["serve", "-w", "--random-url-length", "12"])?;
//!
//! assert_eq!(options.address, "0.0.0.0");
//! assert!(options.permit_write);
//! assert_eq!(options.random_url_length, 12);
//! # Ok(())
//! # }
//! ```

pub use flag_binder_macros::FlagSource;

mod defaults;
mod error;
mod extract;
mod field;
mod kind;
pub mod legacy;
mod register;
mod value;

pub use defaults::apply_defaults;
pub use error::{BindError, BindResult};
pub use extract::extract;
pub use field::{FieldDescriptor, FieldSlot, FlagField, FlagSource, FlagSpec};
pub use kind::{FlagKind, LiteralError};
pub use legacy::{LegacyFlag, LegacyFlags, generate_legacy, generate_legacy_with_env_prefix};
pub use register::{FlagBinder, register_flags};
pub use value::{FieldValue, FlagValue};
