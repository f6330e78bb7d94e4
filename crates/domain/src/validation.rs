// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Returns whether a submitted value is absent for validation purposes.
///
/// Whitespace-only input counts as blank; the stored value itself is never
/// trimmed.
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validates that a single required field is present and non-blank.
///
/// # Arguments
///
/// * `field` - The wire name of the field, used in the error
/// * `value` - The submitted value, if any
///
/// # Returns
///
/// The submitted value, unmodified.
///
/// # Errors
///
/// Returns `DomainError::MissingField` if the value is absent or blank.
pub fn require_field(field: &'static str, value: Option<&str>) -> Result<String, DomainError> {
    match value {
        Some(v) if !is_blank(v) => Ok(v.to_string()),
        _ => Err(DomainError::MissingField(field)),
    }
}

/// Validates a sequence of required fields, short-circuiting on the first
/// absent one.
///
/// This is the shared presence pipeline: each `(name, value)` pair is
/// checked in order and the first failure wins.
///
/// # Errors
///
/// Returns `DomainError::MissingField` naming the first absent field.
pub fn require_fields(fields: &[(&'static str, Option<&str>)]) -> Result<(), DomainError> {
    for (field, value) in fields {
        require_field(field, *value)?;
    }
    Ok(())
}
