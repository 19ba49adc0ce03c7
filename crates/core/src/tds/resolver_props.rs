//! Property-based tests for TDS rate resolution.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use tripbooks_shared::types::round_half_up;

use super::resolver::TdsResolver;
use super::types::{LowerDeductionCertificate, RateSource, TdsContext, TdsMaster, TdsType};

/// Rates from 0.00% to 40.00%.
fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=4_000i64).prop_map(|bp| Decimal::new(bp, 2))
}

fn optional_rate() -> impl Strategy<Value = Option<Decimal>> {
    prop::option::of(rate_strategy())
}

/// Gross amounts from 0.01 to 10,000,000.00.
fn gross_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn tds_type_strategy() -> impl Strategy<Value = TdsType> {
    prop_oneof![Just(TdsType::IncomeTax), Just(TdsType::Gst)]
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..3_650u64).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .and_then(|start| start.checked_add_days(Days::new(offset)))
            .unwrap()
    })
}

fn master_strategy() -> impl Strategy<Value = TdsMaster> {
    (optional_rate(), optional_rate(), optional_rate(), optional_rate()).prop_map(
        |(rate_with_pan, rate_without_pan, rate_individual, rate_company)| TdsMaster {
            section: Some("194C".to_string()),
            rate_with_pan,
            rate_without_pan,
            rate_individual,
            rate_company,
            ..TdsMaster::default()
        },
    )
}

fn certificate_strategy() -> impl Strategy<Value = LowerDeductionCertificate> {
    (rate_strategy(), date_strategy(), 0u64..400u64).prop_map(|(rate, valid_from, days)| {
        LowerDeductionCertificate {
            rate,
            valid_from,
            valid_to: valid_from.checked_add_days(Days::new(days)).unwrap(),
        }
    })
}

fn context_strategy() -> impl Strategy<Value = TdsContext> {
    (
        any::<bool>(),
        prop::option::of(certificate_strategy()),
        prop::option::of(master_strategy()),
        tds_type_strategy(),
        date_strategy(),
    )
        .prop_map(|(pan_available, certificate, master, tds_type, effective_date)| {
            TdsContext {
                pan_available,
                certificate,
                master,
                override_rate: None,
                tds_type,
                effective_date,
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A manual override wins whatever else is populated.
    #[test]
    fn prop_override_always_wins(
        ctx in context_strategy(),
        override_rate in rate_strategy(),
        gross in gross_strategy(),
    ) {
        let ctx = ctx.with_override(override_rate);
        let result = TdsResolver::default().compute(&ctx, gross, Decimal::ZERO);

        prop_assert_eq!(result.applied_rate, Some(override_rate));
        prop_assert_eq!(result.applied_rule, Some(RateSource::Override));
    }

    /// A certificate covering the effective date wins over any master rate.
    #[test]
    fn prop_covering_certificate_beats_master(
        ctx in context_strategy(),
        certificate in certificate_strategy(),
        gross in gross_strategy(),
    ) {
        let mut ctx = ctx.with_certificate(certificate.clone());
        ctx.effective_date = certificate.valid_to;

        let result = TdsResolver::default().compute(&ctx, gross, Decimal::ZERO);

        prop_assert_eq!(result.applied_rate, Some(certificate.rate));
        prop_assert_eq!(result.applied_rule, Some(RateSource::Certificate));
    }

    /// A certificate that expired the day before never applies.
    #[test]
    fn prop_expired_certificate_never_applies(
        ctx in context_strategy(),
        certificate in certificate_strategy(),
        gross in gross_strategy(),
    ) {
        let mut ctx = ctx.with_certificate(certificate.clone());
        ctx.effective_date = certificate.valid_to.checked_add_days(Days::new(1)).unwrap();

        let result = TdsResolver::default().compute(&ctx, gross, Decimal::ZERO);

        prop_assert_ne!(result.applied_rule, Some(RateSource::Certificate));
    }

    /// Whenever a rate applies, the withheld amount is base × rate / 100
    /// rounded half-up; otherwise nothing is withheld.
    #[test]
    fn prop_tds_amount_matches_rate(
        ctx in context_strategy(),
        gross in gross_strategy(),
    ) {
        let result = TdsResolver::default().compute(&ctx, gross, Decimal::ZERO);

        match result.applied_rate {
            Some(rate) => prop_assert_eq!(
                result.tds_amount,
                Some(round_half_up(result.base_amount * rate / Decimal::ONE_HUNDRED, 2))
            ),
            None => prop_assert_eq!(result.tds_amount, None),
        }
    }

    /// The withheld amount never exceeds the base for rates up to 100%.
    #[test]
    fn prop_tds_never_exceeds_base(
        ctx in context_strategy(),
        gross in gross_strategy(),
        gst_cents in 0i64..100_000_000i64,
    ) {
        let gst = Decimal::new(gst_cents, 2);
        let result = TdsResolver::default().compute(&ctx, gross, gst);

        prop_assert!(result.base_amount >= Decimal::ZERO);
        prop_assert!(result.base_amount <= gross);
        if let Some(tds) = result.tds_amount {
            prop_assert!(tds <= result.base_amount);
        }
    }

    /// Without PAN, with no override and no certificate, the without-PAN
    /// master rate applies to the full gross for income-tax TDS.
    #[test]
    fn prop_no_pan_uses_without_pan_rate(
        with_pan in rate_strategy(),
        without_pan in rate_strategy(),
        gross in gross_strategy(),
        effective_date in date_strategy(),
    ) {
        let ctx = TdsContext::new(TdsType::IncomeTax, effective_date, false).with_master(TdsMaster {
            rate_with_pan: Some(with_pan),
            rate_without_pan: Some(without_pan),
            ..TdsMaster::default()
        });

        let result = TdsResolver::default().compute(&ctx, gross, Decimal::ZERO);

        prop_assert_eq!(result.applied_rate, Some(without_pan));
        prop_assert_eq!(result.base_amount, gross);
        prop_assert_eq!(
            result.tds_amount,
            Some(round_half_up(gross * without_pan / Decimal::ONE_HUNDRED, 2))
        );
    }
}
