//! TDS computation for a single payment or receipt.

use rust_decimal::Decimal;
use tracing::{debug, warn};
use tripbooks_shared::config::TdsConfig;
use tripbooks_shared::types::round_half_up;

use super::rules::RuleChain;
use super::types::{ResolvedRate, TdsContext, TdsResult, TdsType};

/// Picks the applicable TDS rate and computes the withheld amount.
#[derive(Debug)]
pub struct TdsResolver {
    rules: RuleChain,
    decimal_places: u32,
}

impl Default for TdsResolver {
    fn default() -> Self {
        Self::new(RuleChain::standard(), 2)
    }
}

impl TdsResolver {
    /// Creates a resolver with a custom rule chain.
    #[must_use]
    pub fn new(rules: RuleChain, decimal_places: u32) -> Self {
        Self {
            rules,
            decimal_places,
        }
    }

    /// Creates a resolver with the standard chain and configured rounding.
    #[must_use]
    pub fn from_config(config: &TdsConfig) -> Self {
        Self::new(RuleChain::standard(), config.decimal_places)
    }

    /// Runs the rule chain only.
    #[must_use]
    pub fn resolve_rate(&self, ctx: &TdsContext) -> Option<ResolvedRate> {
        self.rules.resolve(ctx)
    }

    /// Amount TDS is levied on.
    ///
    /// GST TDS excludes the GST component; income-tax TDS uses the gross.
    /// Non-positive gross amounts, and GST components exceeding the gross,
    /// give a zero base. A negative GST component is treated as zero.
    #[must_use]
    pub fn base_amount(tds_type: TdsType, gross: Decimal, gst_component: Decimal) -> Decimal {
        if gross <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        match tds_type {
            TdsType::IncomeTax => gross,
            TdsType::Gst => (gross - gst_component.max(Decimal::ZERO)).max(Decimal::ZERO),
        }
    }

    /// Computes TDS on `gross` for the given context.
    ///
    /// `gst_component` is only used for GST TDS. A zero or negative gross
    /// attracts no withholding and skips rate resolution. If base × rate
    /// does not fit in a decimal, no rate is applied.
    #[must_use]
    pub fn compute(&self, ctx: &TdsContext, gross: Decimal, gst_component: Decimal) -> TdsResult {
        let section = ctx.master.as_ref().and_then(|master| master.section.clone());
        if let Some(master) = ctx.master.as_ref().filter(|m| !m.is_flagged_for(ctx.tds_type)) {
            warn!(
                section = ?master.section,
                tds_type = ?ctx.tds_type,
                "TDS master is flagged for another category"
            );
        }

        if gross <= Decimal::ZERO {
            debug!(%gross, "non-positive gross, no TDS");
            return TdsResult {
                section,
                base_amount: Decimal::ZERO,
                applied_rate: None,
                applied_rule: None,
                tds_amount: None,
            };
        }

        let base_amount = Self::base_amount(ctx.tds_type, gross, gst_component);

        let resolved = self.resolve_rate(ctx).and_then(|resolved| {
            let withheld = base_amount.checked_mul(resolved.rate);
            if withheld.is_none() {
                warn!(%base_amount, rate = %resolved.rate, "TDS amount overflows, not withholding");
            }
            withheld.map(|withheld| (resolved, withheld / Decimal::ONE_HUNDRED))
        });

        match resolved {
            Some((resolved, withheld)) => {
                let tds_amount = round_half_up(withheld, self.decimal_places);
                debug!(
                    %base_amount,
                    rate = %resolved.rate,
                    source = ?resolved.source,
                    %tds_amount,
                    "TDS computed"
                );
                TdsResult {
                    section,
                    base_amount,
                    applied_rate: Some(resolved.rate),
                    applied_rule: Some(resolved.source),
                    tds_amount: Some(tds_amount),
                }
            }
            None => TdsResult {
                section,
                base_amount,
                applied_rate: None,
                applied_rule: None,
                tds_amount: None,
            },
        }
    }
}
