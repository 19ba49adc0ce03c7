//! TDS domain types.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::TdsError;

/// What the withholding is levied under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TdsType {
    /// Income-tax TDS, computed on the gross amount.
    IncomeTax,
    /// GST TDS, computed on the amount net of its GST component.
    Gst,
}

/// A counterparty's certificate for deduction at a lower rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowerDeductionCertificate {
    /// Certified rate, in percent.
    pub rate: Decimal,
    /// First day the certificate is valid.
    pub valid_from: NaiveDate,
    /// Last day the certificate is valid.
    pub valid_to: NaiveDate,
}

impl LowerDeductionCertificate {
    /// Returns true if `date` falls inside the validity window, bounds included.
    #[must_use]
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.valid_from && date <= self.valid_to
    }
}

/// A TDS section master record, e.g. 194C or 194J.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TdsMaster {
    /// Section code.
    #[serde(default)]
    pub section: Option<String>,
    /// Rate when the counterparty has a PAN on file.
    #[serde(default)]
    pub rate_with_pan: Option<Decimal>,
    /// Rate when the counterparty has no PAN.
    #[serde(default)]
    pub rate_without_pan: Option<Decimal>,
    /// Rate for individuals.
    #[serde(default)]
    pub rate_individual: Option<Decimal>,
    /// Rate for companies.
    #[serde(default)]
    pub rate_company: Option<Decimal>,
    /// Record is an income-tax TDS section.
    #[serde(default)]
    pub is_income_tax_tds: bool,
    /// Record is a GST TDS section.
    #[serde(default)]
    pub is_gst_tds: bool,
}

impl TdsMaster {
    /// Returns true if the category flags agree with `tds_type`.
    ///
    /// Records flagged for neither category are general purpose. The flags
    /// are informational: a supplied master always takes part in rate
    /// resolution.
    #[must_use]
    pub fn is_flagged_for(&self, tds_type: TdsType) -> bool {
        match (self.is_income_tax_tds, self.is_gst_tds) {
            (false, false) => true,
            _ => match tds_type {
                TdsType::IncomeTax => self.is_income_tax_tds,
                TdsType::Gst => self.is_gst_tds,
            },
        }
    }
}

/// Everything the resolver needs to pick a rate for one payment or receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TdsContext {
    /// Counterparty has a PAN on file.
    pub pan_available: bool,
    /// Counterparty's lower-deduction certificate, if any.
    #[serde(default)]
    pub certificate: Option<LowerDeductionCertificate>,
    /// Section master chosen on the voucher, if any.
    #[serde(default)]
    pub master: Option<TdsMaster>,
    /// Rate typed in by the user, in percent.
    #[serde(default)]
    pub override_rate: Option<Decimal>,
    /// Income-tax or GST withholding.
    pub tds_type: TdsType,
    /// Date the transaction takes effect.
    pub effective_date: NaiveDate,
}

impl TdsContext {
    /// A context with no certificate, master or override.
    #[must_use]
    pub fn new(tds_type: TdsType, effective_date: NaiveDate, pan_available: bool) -> Self {
        Self {
            pan_available,
            certificate: None,
            master: None,
            override_rate: None,
            tds_type,
            effective_date,
        }
    }

    /// Sets the section master.
    #[must_use]
    pub fn with_master(mut self, master: TdsMaster) -> Self {
        self.master = Some(master);
        self
    }

    /// Sets the lower-deduction certificate.
    #[must_use]
    pub fn with_certificate(mut self, certificate: LowerDeductionCertificate) -> Self {
        self.certificate = Some(certificate);
        self
    }

    /// Sets the manual override rate.
    #[must_use]
    pub fn with_override(mut self, rate: Decimal) -> Self {
        self.override_rate = Some(rate);
        self
    }
}

/// Which rule produced the applied rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// Manual override on the voucher.
    Override,
    /// Counterparty lower-deduction certificate.
    Certificate,
    /// Master rate for counterparties with a PAN.
    MasterWithPan,
    /// Master rate for counterparties without a PAN.
    MasterWithoutPan,
    /// Master rate for individuals.
    MasterIndividual,
    /// Master rate for companies.
    MasterCompany,
}

/// A rate together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRate {
    /// Rate in percent.
    pub rate: Decimal,
    /// Producing rule.
    pub source: RateSource,
}

/// Outcome of a TDS computation.
///
/// `applied_rate` and `tds_amount` are `None` when no rule matched, which is
/// different from a matched rate of zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TdsResult {
    /// Section of the master record on the context, if any.
    pub section: Option<String>,
    /// Amount the rate is applied to.
    pub base_amount: Decimal,
    /// Applied rate in percent.
    pub applied_rate: Option<Decimal>,
    /// Rule that produced the rate.
    pub applied_rule: Option<RateSource>,
    /// Withheld amount, rounded half-up.
    pub tds_amount: Option<Decimal>,
}

impl TdsResult {
    /// Returns true if tax is withheld.
    #[must_use]
    pub fn is_withheld(&self) -> bool {
        self.tds_amount.is_some()
    }

    /// Amount actually paid or received after withholding.
    #[must_use]
    pub fn net_amount(&self, gross: Decimal) -> Decimal {
        gross - self.tds_amount.unwrap_or(Decimal::ZERO)
    }
}

/// Parses an effective date sent by a form or API client.
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, whose UTC calendar day is used.
pub fn parse_effective_date(raw: &str) -> Result<NaiveDate, TdsError> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| timestamp.to_utc().date_naive())
        .map_err(|_| TdsError::InvalidDate(raw.to_string()))
}

/// Parses a gross or GST amount sent by a form or API client.
///
/// Zero and negative amounts are valid input (they attract no withholding);
/// empty or non-numeric text such as `NaN` is not.
pub fn parse_tds_amount(raw: &str) -> Result<Decimal, TdsError> {
    Decimal::from_str(raw.trim()).map_err(|_| TdsError::InvalidAmount(raw.to_string()))
}
