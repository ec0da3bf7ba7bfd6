//! Default-value application.

use crate::error::{BindError, BindResult};
use crate::field::{FlagSource, FlagSpec};
use crate::value::FlagValue;

/// Writes declared defaults into every zero-valued flaggable field.
///
/// A field is only written when it still holds its type's zero value (empty
/// string, `false` or `0`) and declares a non-empty default literal, so
/// values set by the caller survive and a second call changes nothing.
///
/// Every literal that would be applied is validated first; when one fails
/// the record is left exactly as it was.
///
/// The record must be passed by mutable reference:
///
/// ```rust,compile_fail
/// use flag_binder::{FlagSource, apply_defaults};
///
/// #[derive(Default, FlagSource)]
/// struct Opts {
///     #[flag(name = "port", default = "8080")]
///     port: String,
/// }
///
/// let opts = Opts::default();
/// let _ = apply_defaults(&opts);
/// ```
///
/// # Errors
///
/// Returns [`BindError::UnsupportedType`] when a flaggable field has no
/// dispatch strategy and [`BindError::DefaultParse`] when a default literal
/// does not parse as the field's type.
pub fn apply_defaults<S: FlagSource + ?Sized>(record: &mut S) -> BindResult<()> {
    let mut pending: Vec<(FlagSpec, &mut dyn FlagValue)> = Vec::new();
    let fields = record.flag_fields().into_iter();
    for field in fields.filter(|field| field.spec.is_flaggable()) {
        let (spec, target) = field.into_target()?;
        if !target.is_zero() || !spec.has_default() {
            continue;
        }
        target
            .check_literal(spec.default)
            .map_err(|source| BindError::default_parse(&spec, target.kind(), source))?;
        pending.push((spec, target));
    }

    for (spec, target) in pending {
        target
            .set_from_literal(spec.default)
            .map_err(|source| BindError::default_parse(&spec, target.kind(), source))?;
        tracing::debug!(flag = spec.long, default = spec.default, "applied default");
    }
    Ok(())
}
