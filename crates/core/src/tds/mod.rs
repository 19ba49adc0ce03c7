//! Tax deducted at source.
//!
//! This module implements:
//! - TDS context, master and certificate types
//! - The priority-ordered rate rule chain
//! - Base amount and withheld amount computation
//! - GST component derivation
//! - Section-wise summaries

pub mod error;
pub mod gst;
pub mod resolver;
pub mod rules;
pub mod summary;
pub mod types;

#[cfg(test)]
mod resolver_props;

pub use error::TdsError;
pub use gst::gst_component_inclusive;
pub use resolver::TdsResolver;
pub use rules::{
    LowerDeductionRate, ManualOverride, MasterEntityRate, MasterPanRate, RateRule, RuleChain,
};
pub use summary::{SectionTotals, TdsSummary};
pub use types::{
    LowerDeductionCertificate, RateSource, ResolvedRate, TdsContext, TdsMaster, TdsResult,
    TdsType, parse_effective_date, parse_tds_amount,
};
