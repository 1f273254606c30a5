//! Input validation helpers
//!
//! Centralized text length limits and checks shared by the submit and
//! featured-item handlers.

use thiserror::Error;

use crate::pricing::MAX_PRICE;
use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Names: customer, catalog labels, featured items
pub const MAX_NAME_LEN: usize = 200;

/// Notes and descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, catalog ids
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Delivery addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Why a text value was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TextViolation {
    #[error("is required")]
    Missing,

    #[error("too long ({len} chars, max {max_len})")]
    TooLong { len: usize, max_len: usize },
}

/// Non-blank and within `max_len` bytes
pub fn check_required_text(value: &str, max_len: usize) -> Result<(), TextViolation> {
    if value.trim().is_empty() {
        return Err(TextViolation::Missing);
    }
    check_len(value, max_len)
}

/// Within `max_len` bytes when present
pub fn check_optional_text(value: &Option<String>, max_len: usize) -> Result<(), TextViolation> {
    match value {
        Some(v) => check_len(v, max_len),
        None => Ok(()),
    }
}

fn check_len(value: &str, max_len: usize) -> Result<(), TextViolation> {
    if value.len() > max_len {
        return Err(TextViolation::TooLong {
            len: value.len(),
            max_len,
        });
    }
    Ok(())
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    check_required_text(value, max_len).map_err(|v| text_error(field, v))
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    check_optional_text(value, max_len).map_err(|v| text_error(field, v))
}

/// Validate that a price is finite and not negative.
pub fn validate_price(value: f64, field: &str) -> Result<(), AppError> {
    if !(0.0..=MAX_PRICE).contains(&value) {
        return Err(AppError::validation(format!(
            "{field} must be between 0 and {MAX_PRICE}"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Reject blank or oversized tenant ids taken from the path.
pub fn validate_tenant_id(tenant_id: &str) -> Result<(), AppError> {
    if tenant_id.trim().is_empty() || tenant_id.len() > MAX_SHORT_TEXT_LEN {
        return Err(AppError::with_message(
            ErrorCode::TenantNotFound,
            format!("Tenant not found: {tenant_id}"),
        ));
    }
    Ok(())
}

fn text_error(field: &str, violation: TextViolation) -> AppError {
    match violation {
        TextViolation::Missing => AppError::required_field(field),
        TextViolation::TooLong { .. } => {
            AppError::validation(format!("{field} is {violation}")).with_detail("field", field)
        }
    }
}
