//! Ledger error types for input validation and balance update errors.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use tripbooks_shared::{AppError, types::AccountId};

/// Errors that can occur while building books or updating balances.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// A transaction amount is negative; amounts are stored unsigned.
    #[error("Invalid amount {amount} at position {index}: amounts must not be negative")]
    InvalidAmount {
        /// Position of the offending transaction in the input.
        index: usize,
        /// The rejected amount.
        amount: Decimal,
    },

    /// Adding the transaction at `index` overflows the decimal range.
    #[error("Invalid amount at position {index}: running total overflows")]
    AmountOverflow {
        /// Position of the offending transaction in the input.
        index: usize,
    },

    /// An amount could not be parsed as a finite non-negative decimal.
    #[error("Invalid amount: {0:?} is not a valid amount")]
    UnparseableAmount(String),

    /// Statement range start is after its end.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    // ========== Concurrency Errors ==========
    /// Stored balance changed since the caller read it.
    #[error("Account version mismatch for account {account_id}: expected {expected}, got {actual}")]
    AccountVersionMismatch {
        /// The account ID.
        account_id: AccountId,
        /// The version the caller read.
        expected: i64,
        /// The version currently stored.
        actual: i64,
    },

    /// Applying a delta would overflow the stored balance or its version.
    #[error("Balance overflow for account {account_id}")]
    BalanceOverflow {
        /// The account ID.
        account_id: AccountId,
    },
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount { .. }
            | Self::AmountOverflow { .. }
            | Self::UnparseableAmount(_)
            | Self::BalanceOverflow { .. } => "INVALID_AMOUNT",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::AccountVersionMismatch { .. } => "ACCOUNT_VERSION_MISMATCH",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidAmount { .. }
            | Self::AmountOverflow { .. }
            | Self::UnparseableAmount(_)
            | Self::InvalidDateRange { .. }
            | Self::BalanceOverflow { .. } => 400,
            Self::AccountVersionMismatch { .. } => 409,
        }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::AccountVersionMismatch { .. })
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::AccountVersionMismatch { .. } => Self::Conflict(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn mismatch() -> LedgerError {
        LedgerError::AccountVersionMismatch {
            account_id: AccountId::new(),
            expected: 3,
            actual: 4,
        }
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LedgerError::InvalidAmount {
                index: 0,
                amount: dec!(-1)
            }
            .error_code(),
            "INVALID_AMOUNT"
        );
        assert_eq!(
            LedgerError::UnparseableAmount("NaN".into()).error_code(),
            "INVALID_AMOUNT"
        );
        assert_eq!(
            LedgerError::AmountOverflow { index: 2 }.error_code(),
            "INVALID_AMOUNT"
        );
        assert_eq!(mismatch().error_code(), "ACCOUNT_VERSION_MISMATCH");
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(
            LedgerError::UnparseableAmount(String::new()).http_status_code(),
            400
        );
        assert_eq!(
            LedgerError::BalanceOverflow {
                account_id: AccountId::new()
            }
            .http_status_code(),
            400
        );
        assert_eq!(mismatch().http_status_code(), 409);
    }

    #[test]
    fn test_retryable_errors() {
        assert!(mismatch().is_retryable());
        assert!(!LedgerError::UnparseableAmount(String::new()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = LedgerError::InvalidAmount {
            index: 2,
            amount: dec!(-50.00),
        };
        assert_eq!(
            err.to_string(),
            "Invalid amount -50.00 at position 2: amounts must not be negative"
        );

        let err = LedgerError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid date range: start 2024-04-01 is after end 2024-03-31"
        );
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = mismatch().into();
        assert_eq!(app.status_code(), 409);

        let app: AppError = LedgerError::UnparseableAmount("abc".into()).into();
        assert_eq!(app.status_code(), 400);
    }
}
