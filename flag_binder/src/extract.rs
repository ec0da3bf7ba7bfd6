//! Read-only field extraction.

use crate::field::{FieldDescriptor, FlagSource};

/// Lists the flaggable fields of `record` with their current values.
///
/// Fields without a long name are not part of the result. Flattened
/// sub-records contribute their fields in declaration order.
#[must_use]
pub fn extract<S: FlagSource + ?Sized>(record: &S) -> Vec<FieldDescriptor> {
    let fields: Vec<_> = record
        .describe()
        .into_iter()
        .filter(|field| field.spec.is_flaggable())
        .collect();
    tracing::trace!(count = fields.len(), "extracted flaggable fields");
    fields
}
