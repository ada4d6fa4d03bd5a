//! Percentage rounding shared by the aggregators.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Returns `part / whole * 100` rounded to the nearest whole percent, halves
/// rounding up. A zero `whole` gives zero.
pub(crate) fn rounded_percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let ratio = Decimal::from(part) * Decimal::from(100) / Decimal::from(whole);
    ratio
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}
