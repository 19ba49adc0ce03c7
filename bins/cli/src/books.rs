//! `tripbooks ledger`: cash book and bank book statements.

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use tripbooks_core::ledger::{
    BookKind, BookStatement, BookTransaction, DailyTotals, LedgerSnapshot, TransactionKind,
    accumulate, parse_amount,
};
use tripbooks_shared::AppConfig;
use tripbooks_shared::types::{AccountId, Money, TransactionId};

use crate::wire::amount_text;

/// Book request as exported by the accounting module.
#[derive(Debug, Deserialize)]
struct BookRequest {
    #[serde(default)]
    account_id: Option<AccountId>,
    #[serde(default = "default_book")]
    book: BookKind,
    opening_balance: Value,
    #[serde(default)]
    from: Option<NaiveDate>,
    #[serde(default)]
    to: Option<NaiveDate>,
    transactions: Vec<TransactionRow>,
}

fn default_book() -> BookKind {
    BookKind::Cash
}

/// Transaction row with its amount still in wire form.
#[derive(Debug, Deserialize)]
struct TransactionRow {
    #[serde(default)]
    id: Option<TransactionId>,
    date: DateTime<Utc>,
    amount: Value,
    kind: TransactionKind,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    reference: Option<String>,
}

#[derive(Debug, Serialize)]
struct StatementResponse {
    #[serde(flatten)]
    statement: BookStatement,
    closing: Money,
    daily_totals: Vec<DailyTotals>,
}

#[derive(Debug, Serialize)]
struct SnapshotResponse {
    #[serde(flatten)]
    snapshot: LedgerSnapshot<BookTransaction>,
    closing: Money,
    daily_totals: Vec<DailyTotals>,
}

fn parse_opening(value: &Value) -> anyhow::Result<Decimal> {
    let text = amount_text(value);
    // Opening balances may be overdrawn, so only the sign is stripped before validating.
    match text.trim().strip_prefix('-') {
        Some(magnitude) => Ok(-parse_amount(magnitude)?),
        None => Ok(parse_amount(&text)?),
    }
}

fn into_transactions(rows: Vec<TransactionRow>) -> anyhow::Result<Vec<BookTransaction>> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            let amount = parse_amount(&amount_text(&row.amount))
                .with_context(|| format!("transaction {index}"))?;
            Ok(BookTransaction {
                id: row.id.unwrap_or_default(),
                date: row.date,
                amount,
                kind: row.kind,
                description: row.description,
                reference: row.reference,
            })
        })
        .collect()
}

fn build(request: BookRequest, config: &AppConfig) -> anyhow::Result<Value> {
    let currency = config.books.currency;
    let opening = parse_opening(&request.opening_balance).context("opening balance")?;
    let transactions = into_transactions(request.transactions)?;

    match (request.from, request.to) {
        (Some(from), Some(to)) => {
            let statement = BookStatement::for_period(
                request.account_id.unwrap_or_default(),
                request.book,
                opening,
                transactions,
                from,
                to,
            )?;
            info!(
                account_id = %statement.account_id,
                closing_balance = %statement.closing_balance(),
                "book statement ready"
            );
            let daily_totals = statement.snapshot.daily_totals();
            let closing = Money::new(statement.closing_balance(), currency).rounded();
            Ok(serde_json::to_value(StatementResponse {
                statement,
                closing,
                daily_totals,
            })?)
        }
        (None, None) => {
            let snapshot = accumulate(opening, transactions)?;
            let daily_totals = snapshot.daily_totals();
            let closing = Money::new(snapshot.closing_balance, currency).rounded();
            Ok(serde_json::to_value(SnapshotResponse {
                snapshot,
                closing,
                daily_totals,
            })?)
        }
        _ => anyhow::bail!("both `from` and `to` are required for a period statement"),
    }
}

/// Parses a book request and returns the rendered statement.
pub fn run(input: &str, config: &AppConfig) -> anyhow::Result<Value> {
    let request: BookRequest = serde_json::from_str(input).context("invalid book request")?;
    build(request, config)
}
