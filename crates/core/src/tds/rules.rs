//! Priority-ordered TDS rate rules.
//!
//! Each rule inspects the context and either yields a rate or passes. The
//! chain stops at the first rule that yields.

use tracing::debug;

use super::types::{RateSource, ResolvedRate, TdsContext};

/// One step of the rate decision table.
pub trait RateRule: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Returns a rate if this rule applies to `ctx`.
    fn resolve(&self, ctx: &TdsContext) -> Option<ResolvedRate>;
}

/// Uses the rate the user typed on the voucher, verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualOverride;

impl RateRule for ManualOverride {
    fn name(&self) -> &'static str {
        "manual_override"
    }

    fn resolve(&self, ctx: &TdsContext) -> Option<ResolvedRate> {
        ctx.override_rate.map(|rate| ResolvedRate {
            rate,
            source: RateSource::Override,
        })
    }
}

/// Uses the counterparty's certified lower rate while the certificate is valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerDeductionRate;

impl RateRule for LowerDeductionRate {
    fn name(&self) -> &'static str {
        "lower_deduction_certificate"
    }

    fn resolve(&self, ctx: &TdsContext) -> Option<ResolvedRate> {
        ctx.certificate
            .as_ref()
            .filter(|certificate| certificate.covers(ctx.effective_date))
            .map(|certificate| ResolvedRate {
                rate: certificate.rate,
                source: RateSource::Certificate,
            })
    }
}

/// Uses the master's PAN-dependent rate.
///
/// With a PAN on file the with-PAN rate is used when set; otherwise the
/// without-PAN rate is used when set.
#[derive(Debug, Clone, Copy, Default)]
pub struct MasterPanRate;

impl RateRule for MasterPanRate {
    fn name(&self) -> &'static str {
        "master_pan_rate"
    }

    fn resolve(&self, ctx: &TdsContext) -> Option<ResolvedRate> {
        let master = ctx.master.as_ref()?;

        let with_pan = master
            .rate_with_pan
            .filter(|_| ctx.pan_available)
            .map(|rate| ResolvedRate {
                rate,
                source: RateSource::MasterWithPan,
            });

        with_pan.or_else(|| {
            master.rate_without_pan.map(|rate| ResolvedRate {
                rate,
                source: RateSource::MasterWithoutPan,
            })
        })
    }
}

/// Falls back to the master's individual rate, then its company rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct MasterEntityRate;

impl RateRule for MasterEntityRate {
    fn name(&self) -> &'static str {
        "master_entity_rate"
    }

    fn resolve(&self, ctx: &TdsContext) -> Option<ResolvedRate> {
        let master = ctx.master.as_ref()?;

        master
            .rate_individual
            .map(|rate| ResolvedRate {
                rate,
                source: RateSource::MasterIndividual,
            })
            .or_else(|| {
                master.rate_company.map(|rate| ResolvedRate {
                    rate,
                    source: RateSource::MasterCompany,
                })
            })
    }
}

/// Ordered list of rules; the first rule that yields wins.
pub struct RuleChain {
    rules: Vec<Box<dyn RateRule>>,
}

impl RuleChain {
    /// Override, certificate, master PAN rate, master entity rate.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(ManualOverride),
            Box::new(LowerDeductionRate),
            Box::new(MasterPanRate),
            Box::new(MasterEntityRate),
        ])
    }

    /// A chain evaluating `rules` in the given order.
    #[must_use]
    pub fn new(rules: Vec<Box<dyn RateRule>>) -> Self {
        Self { rules }
    }

    /// Rule names in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name())
    }

    /// Evaluates the chain. `None` means no rule applies.
    #[must_use]
    pub fn resolve(&self, ctx: &TdsContext) -> Option<ResolvedRate> {
        let resolved = self.rules.iter().find_map(|rule| {
            rule.resolve(ctx).inspect(|resolved| {
                debug!(rule = rule.name(), rate = %resolved.rate, "TDS rule matched");
            })
        });

        if resolved.is_none() {
            debug!(tds_type = ?ctx.tds_type, "no TDS rule matched");
        }
        resolved
    }
}

impl Default for RuleChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for RuleChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
