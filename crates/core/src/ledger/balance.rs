//! Versioned account balance updates.
//!
//! A stored `current_balance` carries a version that increases by one on
//! every update. An update is only applied when the caller still holds the
//! stored version, so two receipts posted against the same account cannot
//! silently overwrite each other.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;
use tripbooks_shared::types::AccountId;

use super::error::LedgerError;

/// Current balance of an account at a given version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedBalance {
    /// The account ID.
    pub account_id: AccountId,
    /// Monotonically increasing update counter.
    pub version: i64,
    /// Balance at this version.
    pub current_balance: Decimal,
}

impl VersionedBalance {
    /// Balance of a newly opened account.
    #[must_use]
    pub fn opening(account_id: AccountId, opening_balance: Decimal) -> Self {
        Self {
            account_id,
            version: 0,
            current_balance: opening_balance,
        }
    }

    /// Applies a signed `delta` if `expected_version` matches the stored version.
    ///
    /// The persistence layer runs this inside its transaction and writes the
    /// result with `WHERE version = expected_version`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AccountVersionMismatch`] if the stored version
    /// moved on since the caller read it, or [`LedgerError::BalanceOverflow`]
    /// if the new balance or version does not fit.
    pub fn apply(&self, expected_version: i64, delta: Decimal) -> Result<Self, LedgerError> {
        if self.version != expected_version {
            warn!(
                account_id = %self.account_id,
                expected = expected_version,
                actual = self.version,
                "stale balance update rejected"
            );
            return Err(LedgerError::AccountVersionMismatch {
                account_id: self.account_id,
                expected: expected_version,
                actual: self.version,
            });
        }

        let (Some(version), Some(current_balance)) = (
            self.version.checked_add(1),
            self.current_balance.checked_add(delta),
        ) else {
            warn!(account_id = %self.account_id, %delta, "balance update overflows");
            return Err(LedgerError::BalanceOverflow {
                account_id: self.account_id,
            });
        };

        Ok(Self {
            account_id: self.account_id,
            version,
            current_balance,
        })
    }
}

/// Amount a receipt adds to the account: the gross less any TDS withheld by the payer.
#[must_use]
pub fn receipt_delta(gross: Decimal, tds_amount: Option<Decimal>) -> Decimal {
    gross - tds_amount.unwrap_or(Decimal::ZERO)
}
