//! Field-level validation rules for candidate records.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Violation;

/// `local@domain.tld`: no whitespace, a single `@`, at least one dot in the
/// domain and no empty domain labels.
#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email pattern must compile")
});

/// A value is present when it has at least one non-whitespace character.
///
/// # Errors
/// Returns [`Violation::Required`] for empty or whitespace-only values.
pub fn required(value: &str) -> Result<(), Violation> {
    if value.trim().is_empty() {
        return Err(Violation::Required);
    }
    Ok(())
}

/// Required, and shaped like an email address.
///
/// # Errors
/// Returns [`Violation::Required`] when blank and [`Violation::Invalid`]
/// when the value is not a well-formed address.
pub fn email(value: &str) -> Result<(), Violation> {
    required(value)?;
    if !is_valid_email(value) {
        return Err(Violation::Invalid);
    }
    Ok(())
}

/// Returns `true` if `value` is a well-formed email address.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}
