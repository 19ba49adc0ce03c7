//! Section-wise TDS totals for a batch of vouchers.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::TdsResult;

/// Totals for one TDS section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTotals {
    /// Section code; `None` for vouchers without a master record.
    pub section: Option<String>,
    /// Vouchers with tax withheld.
    pub withheld_count: usize,
    /// Vouchers where no rate applied.
    pub not_withheld_count: usize,
    /// Sum of base amounts of withheld vouchers.
    pub total_base: Decimal,
    /// Sum of withheld amounts.
    pub total_tds: Decimal,
}

/// Section-wise summary, ordered by section code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TdsSummary {
    /// One entry per section.
    pub sections: Vec<SectionTotals>,
    /// Sum of withheld amounts over all sections.
    pub total_tds: Decimal,
}

impl TdsSummary {
    /// Aggregates computed results.
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a TdsResult>) -> Self {
        let mut by_section: BTreeMap<Option<String>, SectionTotals> = BTreeMap::new();

        for result in results {
            let totals = by_section
                .entry(result.section.clone())
                .or_insert_with(|| SectionTotals {
                    section: result.section.clone(),
                    ..SectionTotals::default()
                });

            match result.tds_amount {
                Some(tds) => {
                    totals.withheld_count += 1;
                    totals.total_base += result.base_amount;
                    totals.total_tds += tds;
                }
                None => totals.not_withheld_count += 1,
            }
        }

        let sections: Vec<SectionTotals> = by_section.into_values().collect();
        let total_tds = sections.iter().map(|s| s.total_tds).sum();

        Self {
            sections,
            total_tds,
        }
    }
}
