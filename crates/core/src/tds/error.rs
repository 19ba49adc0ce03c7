//! TDS error types.
//!
//! Rate resolution itself never fails; only malformed input at the parsing
//! boundary does.

use thiserror::Error;
use tripbooks_shared::AppError;

/// Errors raised while preparing a TDS computation.
#[derive(Debug, Error)]
pub enum TdsError {
    /// The effective date could not be parsed.
    #[error("Invalid effective date: {0:?}")]
    InvalidDate(String),

    /// The gross or GST amount could not be parsed.
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),
}

impl TdsError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDate(_) => "INVALID_DATE",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        400
    }
}

impl From<TdsError> for AppError {
    fn from(err: TdsError) -> Self {
        Self::Validation(err.to_string())
    }
}
