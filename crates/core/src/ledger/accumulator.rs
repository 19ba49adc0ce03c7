//! Running balance accumulation for cash and bank books.
//!
//! A single left-to-right scan over caller-sorted transactions:
//! `running_balance[i] = opening_balance + Σ signed_amount[0..=i]`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::LedgerError;
use super::movement::{BookTransaction, LedgerMovement};

/// One transaction together with the balance right after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerLine<T> {
    /// The transaction.
    pub transaction: T,
    /// Balance after applying this transaction.
    pub running_balance: Decimal,
}

/// Running-balance view of an account over an ordered transaction list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot<T> {
    /// Balance before the first line.
    pub opening_balance: Decimal,
    /// Lines in input order.
    pub lines: Vec<LedgerLine<T>>,
    /// Sum of inflow amounts.
    pub total_inflow: Decimal,
    /// Sum of outflow amounts.
    pub total_outflow: Decimal,
    /// Balance after the last line, or the opening balance if there are none.
    pub closing_balance: Decimal,
}

/// Inflow, outflow and closing balance of one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotals {
    /// The day.
    pub date: NaiveDate,
    /// Sum of inflows booked on the day.
    pub inflow: Decimal,
    /// Sum of outflows booked on the day.
    pub outflow: Decimal,
    /// Running balance after the day's last transaction.
    pub closing_balance: Decimal,
}

/// Builds the running-balance snapshot for `transactions`.
///
/// Transactions must already be sorted by the caller; ties keep the order
/// they were supplied in. Negative balances are allowed (overdrafts).
///
/// # Errors
///
/// Returns [`LedgerError::InvalidAmount`] for the first transaction whose
/// amount is negative, or [`LedgerError::AmountOverflow`] for the first one
/// that pushes a total past the decimal range.
pub fn accumulate<T>(
    opening_balance: Decimal,
    transactions: impl IntoIterator<Item = T>,
) -> Result<LedgerSnapshot<T>, LedgerError>
where
    T: LedgerMovement,
{
    let transactions = transactions.into_iter();
    let mut lines = Vec::with_capacity(transactions.size_hint().0);
    let mut balance = opening_balance;
    let mut total_inflow = Decimal::ZERO;
    let mut total_outflow = Decimal::ZERO;

    for (index, transaction) in transactions.enumerate() {
        let amount = transaction.amount();
        if amount.is_sign_negative() && !amount.is_zero() {
            warn!(index, %amount, "rejecting negative transaction amount");
            return Err(LedgerError::InvalidAmount { index, amount });
        }

        let (inflow, outflow, next) = if transaction.is_inflow() {
            (
                total_inflow.checked_add(amount),
                Some(total_outflow),
                balance.checked_add(amount),
            )
        } else {
            (
                Some(total_inflow),
                total_outflow.checked_add(amount),
                balance.checked_sub(amount),
            )
        };
        let (Some(inflow), Some(outflow), Some(next)) = (inflow, outflow, next) else {
            warn!(index, %amount, %balance, "running balance overflow");
            return Err(LedgerError::AmountOverflow { index });
        };
        total_inflow = inflow;
        total_outflow = outflow;
        balance = next;

        lines.push(LedgerLine {
            transaction,
            running_balance: balance,
        });
    }

    debug!(
        lines = lines.len(),
        %opening_balance,
        closing_balance = %balance,
        "built ledger snapshot"
    );

    Ok(LedgerSnapshot {
        opening_balance,
        lines,
        total_inflow,
        total_outflow,
        closing_balance: balance,
    })
}

impl<T> LedgerSnapshot<T> {
    /// Running balances in line order.
    pub fn running_balances(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.lines.iter().map(|line| line.running_balance)
    }

    /// Net movement over the snapshot (`total_inflow - total_outflow`).
    #[must_use]
    pub fn net_movement(&self) -> Decimal {
        self.total_inflow - self.total_outflow
    }

    /// Returns true if the snapshot has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl LedgerSnapshot<BookTransaction> {
    /// Groups consecutive lines by calendar day.
    ///
    /// Input order is kept, so a day appears once as long as the caller
    /// sorted the transactions by date.
    #[must_use]
    pub fn daily_totals(&self) -> Vec<DailyTotals> {
        let mut days: Vec<DailyTotals> = Vec::new();

        for line in &self.lines {
            let tx = &line.transaction;
            let day = tx.day();
            let (inflow, outflow) = if tx.is_inflow() {
                (tx.amount, Decimal::ZERO)
            } else {
                (Decimal::ZERO, tx.amount)
            };

            match days.last_mut() {
                Some(current) if current.date == day => {
                    current.inflow += inflow;
                    current.outflow += outflow;
                    current.closing_balance = line.running_balance;
                }
                _ => days.push(DailyTotals {
                    date: day,
                    inflow,
                    outflow,
                    closing_balance: line.running_balance,
                }),
            }
        }

        days
    }
}
