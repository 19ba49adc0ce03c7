//! Book transactions and their direction.
//!
//! Amounts are always stored unsigned; the transaction kind decides whether
//! the amount flows into or out of the account.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tripbooks_shared::types::TransactionId;

use super::error::LedgerError;

/// Anything that moves money in or out of a cash or bank account.
pub trait LedgerMovement {
    /// Unsigned amount of the movement.
    fn amount(&self) -> Decimal;

    /// True if the movement increases the account balance.
    fn is_inflow(&self) -> bool;

    /// Signed contribution to the running balance.
    fn signed_amount(&self) -> Decimal {
        if self.is_inflow() {
            self.amount()
        } else {
            -self.amount()
        }
    }
}

/// Kind of a book transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Money received from a customer.
    Receipt,
    /// Money paid to a supplier.
    Payment,
    /// Miscellaneous income.
    Income,
    /// Miscellaneous expense.
    Expense,
    /// Transfer into this account from another account.
    TransferIn,
    /// Transfer out of this account into another account.
    TransferOut,
}

impl TransactionKind {
    /// Receipts, incomes and incoming transfers are inflows.
    #[must_use]
    pub const fn is_inflow(self) -> bool {
        matches!(self, Self::Receipt | Self::Income | Self::TransferIn)
    }
}

/// A receipt, payment, income, expense or transfer posted to a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookTransaction {
    /// Transaction ID.
    #[serde(default)]
    pub id: TransactionId,
    /// When the transaction happened.
    pub date: DateTime<Utc>,
    /// Unsigned amount.
    pub amount: Decimal,
    /// Transaction kind.
    pub kind: TransactionKind,
    /// Narration shown on the book.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Voucher or cheque reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl BookTransaction {
    /// Creates a transaction with a fresh ID and no narration.
    #[must_use]
    pub fn new(date: DateTime<Utc>, amount: Decimal, kind: TransactionKind) -> Self {
        Self {
            id: TransactionId::new(),
            date,
            amount,
            kind,
            description: None,
            reference: None,
        }
    }

    /// Calendar day (UTC) the transaction is booked on.
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

impl LedgerMovement for BookTransaction {
    fn amount(&self) -> Decimal {
        self.amount
    }

    fn is_inflow(&self) -> bool {
        self.kind.is_inflow()
    }
}

/// A bare amount and direction, for callers that only hold those two fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    /// Unsigned amount.
    pub amount: Decimal,
    /// Direction.
    pub is_inflow: bool,
}

impl Movement {
    /// An inflow of `amount`.
    #[must_use]
    pub const fn inflow(amount: Decimal) -> Self {
        Self {
            amount,
            is_inflow: true,
        }
    }

    /// An outflow of `amount`.
    #[must_use]
    pub const fn outflow(amount: Decimal) -> Self {
        Self {
            amount,
            is_inflow: false,
        }
    }
}

impl LedgerMovement for Movement {
    fn amount(&self) -> Decimal {
        self.amount
    }

    fn is_inflow(&self) -> bool {
        self.is_inflow
    }
}

/// Parses an amount typed into a form or read from an export.
///
/// Empty text, `NaN`, infinities, non-numeric text and negative values are
/// rejected instead of being coerced.
pub fn parse_amount(raw: &str) -> Result<Decimal, LedgerError> {
    let trimmed = raw.trim();
    let amount = Decimal::from_str(trimmed)
        .map_err(|_| LedgerError::UnparseableAmount(raw.to_string()))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(LedgerError::UnparseableAmount(raw.to_string()));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(TransactionKind::Receipt, true)]
    #[case(TransactionKind::Income, true)]
    #[case(TransactionKind::TransferIn, true)]
    #[case(TransactionKind::Payment, false)]
    #[case(TransactionKind::Expense, false)]
    #[case(TransactionKind::TransferOut, false)]
    fn test_kind_direction(#[case] kind: TransactionKind, #[case] inflow: bool) {
        assert_eq!(kind.is_inflow(), inflow);
    }

    #[test]
    fn test_signed_amount() {
        assert_eq!(Movement::inflow(dec!(500)).signed_amount(), dec!(500));
        assert_eq!(Movement::outflow(dec!(200)).signed_amount(), dec!(-200));
    }

    #[test]
    fn test_book_transaction_uses_kind_direction() {
        let tx = BookTransaction::new(Utc::now(), dec!(75.50), TransactionKind::Expense);
        assert!(!tx.is_inflow());
        assert_eq!(tx.signed_amount(), dec!(-75.50));
    }

    #[test]
    fn test_book_transaction_deserializes_without_optional_fields() {
        let json = r#"{"date":"2024-02-15T10:30:00Z","amount":"1200.00","kind":"transfer_in"}"#;
        let tx: BookTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.kind, TransactionKind::TransferIn);
        assert_eq!(tx.amount, dec!(1200.00));
        assert_eq!(tx.day(), NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
        assert!(tx.description.is_none());
    }

    #[rstest]
    #[case("1500", dec!(1500))]
    #[case(" 12.50 ", dec!(12.50))]
    #[case("0", dec!(0))]
    fn test_parse_amount_accepts(#[case] raw: &str, #[case] expected: Decimal) {
        assert_eq!(parse_amount(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("NaN")]
    #[case("undefined")]
    #[case("Infinity")]
    #[case("-10")]
    #[case("12,50")]
    fn test_parse_amount_rejects(#[case] raw: &str) {
        assert!(matches!(
            parse_amount(raw),
            Err(LedgerError::UnparseableAmount(_))
        ));
    }
}
