//! Input normalization shared by the entity services.

use crate::domain::error::DomainError;

/// Trims `value` and checks it is non-empty and at most `max_len` characters.
pub(super) fn normalize_name(
    field: &'static str,
    value: &str,
    max_len: usize,
) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    let len = trimmed.chars().count();
    if len > max_len {
        return Err(DomainError::validation(
            field,
            format!("must be at most {max_len} characters, got {len}"),
        ));
    }
    Ok(trimmed.to_owned())
}

/// Trims and lower-cases an email; uniqueness is therefore case-insensitive.
pub(super) fn normalize_email(value: &str) -> Result<String, DomainError> {
    let email = value.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(email)
        }
        _ => Err(DomainError::validation(
            "email",
            format!("'{}' is not a valid email address", value.trim()),
        )),
    }
}
