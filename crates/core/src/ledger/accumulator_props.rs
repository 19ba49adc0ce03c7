//! Property-based tests for running balance accumulation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::accumulator::accumulate;
use super::error::LedgerError;
use super::movement::{LedgerMovement, Movement};

/// Amounts from 0.00 to 1,000,000.00.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Opening balances may be negative (overdrawn accounts).
fn opening_strategy() -> impl Strategy<Value = Decimal> {
    (-10_000_000i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn movement_strategy() -> impl Strategy<Value = Movement> {
    (amount_strategy(), any::<bool>()).prop_map(|(amount, is_inflow)| Movement { amount, is_inflow })
}

fn movements_strategy(max_len: usize) -> impl Strategy<Value = Vec<Movement>> {
    prop::collection::vec(movement_strategy(), 1..=max_len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Closing balance equals opening plus inflows minus outflows, and equals
    /// the last running balance.
    #[test]
    fn prop_closing_matches_totals_and_last_line(
        opening in opening_strategy(),
        movements in movements_strategy(30),
    ) {
        let snapshot = accumulate(opening, movements).unwrap();

        prop_assert_eq!(
            snapshot.closing_balance,
            opening + snapshot.total_inflow - snapshot.total_outflow
        );
        prop_assert_eq!(
            Some(snapshot.closing_balance),
            snapshot.lines.last().map(|line| line.running_balance)
        );
    }

    /// An empty sequence closes at the opening balance.
    #[test]
    fn prop_empty_closes_at_opening(opening in opening_strategy()) {
        let snapshot = accumulate(opening, Vec::<Movement>::new()).unwrap();

        prop_assert!(snapshot.lines.is_empty());
        prop_assert_eq!(snapshot.closing_balance, opening);
    }

    /// Consecutive running balances differ by exactly the signed amount of
    /// the later transaction; the first differs from the opening balance.
    #[test]
    fn prop_steps_equal_signed_amounts(
        opening in opening_strategy(),
        movements in movements_strategy(30),
    ) {
        let snapshot = accumulate(opening, movements.clone()).unwrap();

        let mut previous = opening;
        for (line, movement) in snapshot.lines.iter().zip(&movements) {
            prop_assert_eq!(line.running_balance - previous, movement.signed_amount());
            previous = line.running_balance;
        }
    }

    /// Totals split amounts by direction.
    #[test]
    fn prop_totals_split_by_direction(movements in movements_strategy(30)) {
        let snapshot = accumulate(Decimal::ZERO, movements.clone()).unwrap();

        let inflow: Decimal = movements.iter().filter(|m| m.is_inflow).map(|m| m.amount).sum();
        let outflow: Decimal = movements.iter().filter(|m| !m.is_inflow).map(|m| m.amount).sum();
        prop_assert_eq!(snapshot.total_inflow, inflow);
        prop_assert_eq!(snapshot.total_outflow, outflow);
    }

    /// Lines come out in exactly the order they went in.
    #[test]
    fn prop_input_order_preserved(movements in movements_strategy(30)) {
        let snapshot = accumulate(Decimal::ZERO, movements.clone()).unwrap();
        let out: Vec<Movement> = snapshot.lines.into_iter().map(|line| line.transaction).collect();
        prop_assert_eq!(out, movements);
    }

    /// Any negative amount is rejected at its own position.
    #[test]
    fn prop_negative_amount_rejected(
        mut movements in movements_strategy(20),
        position in any::<prop::sample::Index>(),
        cents in 1i64..1_000_000i64,
    ) {
        let index = position.index(movements.len());
        movements[index].amount = Decimal::new(-cents, 2);

        let result = accumulate(Decimal::ZERO, movements);
        let rejected_here = matches!(result, Err(LedgerError::InvalidAmount { index: i, .. }) if i == index);
        prop_assert!(rejected_here);
    }
}
