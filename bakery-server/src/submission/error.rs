use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::utils::validation::TextViolation;

/// Why a submission was refused
///
/// Always caller-visible: the customer fixes the named field and submits again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("order has no {0}")]
    EmptyOrder(&'static str),

    #[error("Featured item not found: {0}")]
    FeaturedItemNotFound(String),

    #[error("Featured item is disabled: {0}")]
    FeaturedItemDisabled(String),
}

impl ValidationError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    pub fn from_text(field: &'static str, violation: TextViolation) -> Self {
        match violation {
            TextViolation::Missing => Self::MissingField(field),
            TextViolation::TooLong { .. } => Self::invalid(field, violation.to_string()),
        }
    }

    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField(field) | Self::EmptyOrder(field) => field,
            Self::InvalidField { field, .. } => field,
            Self::FeaturedItemNotFound(_) | Self::FeaturedItemDisabled(_) => "featuredItemId",
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::MissingField(_) => ErrorCode::RequiredField,
            ValidationError::InvalidField { .. } => ErrorCode::ValidationFailed,
            ValidationError::EmptyOrder(_) => ErrorCode::OrderEmpty,
            ValidationError::FeaturedItemNotFound(_) => ErrorCode::FeaturedItemNotFound,
            ValidationError::FeaturedItemDisabled(_) => ErrorCode::FeaturedItemDisabled,
        };
        AppError::with_message(code, err.to_string()).with_detail("field", err.field())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_maps_to_required_field() {
        let app: AppError = ValidationError::MissingField("eventDate").into();
        assert_eq!(app.code, ErrorCode::RequiredField);
        assert_eq!(app.message, "eventDate is required");
        assert_eq!(app.details.unwrap()["field"], "eventDate");
    }

    #[test]
    fn test_invalid_field_message() {
        let err = ValidationError::invalid("email", "must contain @");
        assert_eq!(err.to_string(), "email: must contain @");
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_text_violation_keeps_field() {
        let err = ValidationError::from_text("notes", TextViolation::TooLong { len: 9, max_len: 5 });
        assert_eq!(err.to_string(), "notes: too long (9 chars, max 5)");
        assert_eq!(
            ValidationError::from_text("name", TextViolation::Missing),
            ValidationError::MissingField("name")
        );
    }
}
