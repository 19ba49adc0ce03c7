//! Cash book and bank book statements for a date range.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use tripbooks_shared::types::AccountId;

use super::accumulator::{LedgerSnapshot, accumulate};
use super::error::LedgerError;
use super::movement::{BookTransaction, LedgerMovement};

/// Which book the statement is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookKind {
    /// Cash in hand.
    Cash,
    /// Bank account.
    Bank,
}

/// Statement of one account between two dates, both inclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookStatement {
    /// The account.
    pub account_id: AccountId,
    /// Cash or bank.
    pub book: BookKind,
    /// First day of the period.
    pub from: NaiveDate,
    /// Last day of the period.
    pub to: NaiveDate,
    /// Running balances for transactions inside the period.
    pub snapshot: LedgerSnapshot<BookTransaction>,
}

impl BookStatement {
    /// Builds the statement for `[from, to]`.
    ///
    /// `account_opening` is the balance stored on the account before any
    /// transaction. Transactions dated before `from` are folded into the
    /// period opening balance, those after `to` are ignored. The caller
    /// supplies transactions sorted by date.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidDateRange`] if `from > to`, or
    /// [`LedgerError::InvalidAmount`] if any considered amount is negative.
    pub fn for_period(
        account_id: AccountId,
        book: BookKind,
        account_opening: Decimal,
        transactions: Vec<BookTransaction>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Self, LedgerError> {
        if from > to {
            return Err(LedgerError::InvalidDateRange {
                start: from,
                end: to,
            });
        }

        let (before, rest): (Vec<_>, Vec<_>) = transactions
            .into_iter()
            .enumerate()
            .partition(|(_, tx)| tx.day() < from);
        let (in_period_positions, in_period): (Vec<_>, Vec<_>) =
            rest.into_iter().filter(|(_, tx)| tx.day() <= to).unzip();

        let carried = accumulate(
            account_opening,
            before.iter().map(|(_, tx)| CarriedForward(tx)),
        )
        .map_err(|err| at_input_position(err, |i| before[i].0))?;
        let snapshot = accumulate(carried.closing_balance, in_period)
            .map_err(|err| at_input_position(err, |i| in_period_positions[i]))?;

        debug!(
            %account_id,
            ?book,
            %from,
            %to,
            carried_forward = carried.lines.len(),
            lines = snapshot.lines.len(),
            "built book statement"
        );

        Ok(Self {
            account_id,
            book,
            from,
            to,
            snapshot,
        })
    }

    /// Balance brought forward into the period.
    #[must_use]
    pub fn opening_balance(&self) -> Decimal {
        self.snapshot.opening_balance
    }

    /// Balance carried forward out of the period.
    #[must_use]
    pub fn closing_balance(&self) -> Decimal {
        self.snapshot.closing_balance
    }
}

/// Rewrites a row position reported for a subset into the caller's position.
fn at_input_position(err: LedgerError, position: impl Fn(usize) -> usize) -> LedgerError {
    match err {
        LedgerError::InvalidAmount { index, amount } => LedgerError::InvalidAmount {
            index: position(index),
            amount,
        },
        LedgerError::AmountOverflow { index } => LedgerError::AmountOverflow {
            index: position(index),
        },
        other => other,
    }
}

/// Borrowed view used when folding earlier transactions into the opening balance.
struct CarriedForward<'a>(&'a BookTransaction);

impl LedgerMovement for CarriedForward<'_> {
    fn amount(&self) -> Decimal {
        self.0.amount
    }

    fn is_inflow(&self) -> bool {
        self.0.kind.is_inflow()
    }
}
