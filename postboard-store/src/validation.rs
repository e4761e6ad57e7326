//! Input checks applied at the service boundary
//!
//! Every helper returns `StoreError::Validation` naming the offending field,
//! so nothing malformed reaches a collection file.

use crate::error::{Result, StoreError};
use crate::schema::{MAX_EMAIL_LEN, MAX_ID_LEN, MAX_PASSWORD_LEN, MIN_PASSWORD_LEN};

/// Trimmed, non-empty, at most `max` characters
pub fn required_text(field: &str, value: &str, max: usize) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Validation(format!("{field} is required")));
    }
    bounded_text(field, trimmed, max)
}

/// Trimmed, possibly empty, at most `max` characters
pub fn optional_text(field: &str, value: &str, max: usize) -> Result<String> {
    bounded_text(field, value.trim(), max)
}

fn bounded_text(field: &str, value: &str, max: usize) -> Result<String> {
    if value.chars().count() > max {
        return Err(StoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(value.to_string())
}

/// Lowercased, trimmed address with a single `@` and non-empty halves
pub fn email(value: &str) -> Result<String> {
    let normalized = required_text("email", value, MAX_EMAIL_LEN)?.to_lowercase();
    let valid = match normalized.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !normalized.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(StoreError::Validation("email address is invalid".into()));
    }
    Ok(normalized)
}

/// Length policy only; the value is never trimmed or echoed back
pub fn password(value: &str) -> Result<()> {
    let len = value.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(StoreError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if len > MAX_PASSWORD_LEN {
        return Err(StoreError::Validation(format!(
            "password must be at most {MAX_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Caller-supplied record id
pub fn record_id(field: &str, value: &str) -> Result<String> {
    required_text(field, value, MAX_ID_LEN)
}
