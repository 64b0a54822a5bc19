//! Shared error type and input checks for the per-user record services.

use sqlx::postgres::PgRow;
use sqlx::Row;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Invalid(String),
    #[error("not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl crate::error::ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid(_) => "E_INVALID_INPUT",
            Self::NotFound => "E_NOT_FOUND",
            Self::Database(_) => "E_DATABASE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)))
    }
}

/// Trimmed value of a required text field.
pub(crate) fn required_text(field: &str, value: &str) -> Result<String, StoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Invalid(format!("{field} is required")));
    }
    Ok(trimmed.to_owned())
}

/// Reject negative or non-finite quantities.
pub(crate) fn check_quantity(quantity: f64) -> Result<f64, StoreError> {
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(StoreError::Invalid("quantity must be a non-negative number".into()));
    }
    Ok(quantity)
}

/// Map "zero rows affected" to [`StoreError::NotFound`]. Rows hidden by
/// row-level security are indistinguishable from missing ones.
pub(crate) fn expect_affected(rows: u64) -> Result<(), StoreError> {
    if rows == 0 { Err(StoreError::NotFound) } else { Ok(()) }
}

/// Read a text column that may be NULL as an empty string.
pub(crate) fn text_or_empty(row: &PgRow, column: &str) -> String {
    row.try_get::<Option<String>, _>(column)
        .ok()
        .flatten()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn required_text_trims() {
        assert_eq!(required_text("name", "  양파 ").unwrap(), "양파");
    }

    #[test]
    fn required_text_rejects_blank() {
        let err = required_text("name", "   ").unwrap_err();
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn quantity_must_be_non_negative_and_finite() {
        assert!(check_quantity(0.0).is_ok());
        assert!(check_quantity(2.5).is_ok());
        assert!(check_quantity(-1.0).is_err());
        assert!(check_quantity(f64::NAN).is_err());
        assert!(check_quantity(f64::INFINITY).is_err());
    }

    #[test]
    fn zero_rows_is_not_found() {
        assert!(matches!(expect_affected(0), Err(StoreError::NotFound)));
        assert!(expect_affected(1).is_ok());
    }

    #[test]
    fn pool_timeout_is_retryable() {
        assert!(StoreError::Database(sqlx::Error::PoolTimedOut).retryable());
        assert!(!StoreError::NotFound.retryable());
        assert_eq!(StoreError::NotFound.error_code(), "E_NOT_FOUND");
    }
}
