//! `tripbooks tds`: TDS computation for a batch of vouchers.

use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use tripbooks_core::tds::{
    LowerDeductionCertificate, TdsContext, TdsMaster, TdsResolver, TdsResult, TdsSummary,
    TdsType, gst_component_inclusive, parse_effective_date, parse_tds_amount,
};
use tripbooks_shared::AppConfig;

use crate::wire::amount_text;

#[derive(Debug, Deserialize)]
struct TdsBatch {
    requests: Vec<TdsRequest>,
}

/// One voucher as submitted by the receipt or purchase form.
#[derive(Debug, Deserialize)]
struct TdsRequest {
    #[serde(default)]
    reference: Option<String>,
    gross: Value,
    #[serde(default)]
    gst_component: Option<Value>,
    /// GST rate used to derive the component when it is not given.
    #[serde(default)]
    gst_rate: Option<Decimal>,
    tds_type: TdsType,
    effective_date: String,
    #[serde(default)]
    pan_available: bool,
    #[serde(default)]
    certificate: Option<LowerDeductionCertificate>,
    #[serde(default)]
    master: Option<TdsMaster>,
    #[serde(default)]
    override_rate: Option<Decimal>,
}

#[derive(Debug, Serialize)]
struct VoucherResult {
    reference: Option<String>,
    gross: Decimal,
    net_amount: Decimal,
    #[serde(flatten)]
    result: TdsResult,
}

#[derive(Debug, Serialize)]
struct TdsResponse {
    results: Vec<VoucherResult>,
    summary: TdsSummary,
}

fn compute(
    resolver: &TdsResolver,
    request: TdsRequest,
    decimal_places: u32,
) -> anyhow::Result<VoucherResult> {
    let effective_date = parse_effective_date(&request.effective_date)?;
    let gross = parse_tds_amount(&amount_text(&request.gross))?;
    let gst_component = match (&request.gst_component, request.gst_rate) {
        (Some(component), _) => parse_tds_amount(&amount_text(component))?,
        (None, Some(rate)) => gst_component_inclusive(gross, rate, decimal_places),
        (None, None) => Decimal::ZERO,
    };

    if request.tds_type == TdsType::Gst && gst_component.is_zero() {
        warn!(reference = ?request.reference, "GST TDS without a GST component");
    }

    let ctx = TdsContext {
        pan_available: request.pan_available,
        certificate: request.certificate,
        master: request.master,
        override_rate: request.override_rate,
        tds_type: request.tds_type,
        effective_date,
    };

    let result = resolver.compute(&ctx, gross, gst_component);
    Ok(VoucherResult {
        reference: request.reference,
        gross,
        net_amount: result.net_amount(gross),
        result,
    })
}

/// Parses a TDS batch and returns per-voucher results plus the section summary.
pub fn run(input: &str, config: &AppConfig) -> anyhow::Result<Value> {
    let batch: TdsBatch = serde_json::from_str(input).context("invalid TDS request")?;
    let resolver = TdsResolver::from_config(&config.tds);

    let results = batch
        .requests
        .into_iter()
        .enumerate()
        .map(|(index, request)| {
            compute(&resolver, request, config.tds.decimal_places)
                .with_context(|| format!("request {index}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let summary = TdsSummary::from_results(results.iter().map(|voucher| &voucher.result));
    info!(
        vouchers = results.len(),
        total_tds = %summary.total_tds,
        "TDS batch computed"
    );

    Ok(serde_json::to_value(TdsResponse { results, summary })?)
}
