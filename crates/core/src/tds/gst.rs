//! GST component of a GST-inclusive amount.

use rust_decimal::Decimal;
use tripbooks_shared::types::round_half_up;

/// GST contained in `gross` when GST at `rate` percent is already included.
///
/// `gross × rate / (100 + rate)`, rounded half-up to `decimal_places`.
/// Returns zero for non-positive amounts or rates.
#[must_use]
pub fn gst_component_inclusive(gross: Decimal, rate: Decimal, decimal_places: u32) -> Decimal {
    if gross <= Decimal::ZERO || rate <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let Some(divisor) = Decimal::ONE_HUNDRED.checked_add(rate) else {
        return round_half_up(gross, decimal_places);
    };
    // Dividing first keeps very large amounts in range at the cost of the last digit.
    let component = gross
        .checked_mul(rate)
        .map_or_else(|| gross / divisor * rate, |product| product / divisor);
    round_half_up(component, decimal_places)
}
