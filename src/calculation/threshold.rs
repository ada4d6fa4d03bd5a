//! Threshold classification.

use rust_decimal::Decimal;

use crate::models::{BandSet, Classification, ThresholdBand};

/// Finds the band a percentage falls in.
///
/// Bands are checked highest-first and the first whose `min_percent` is at or
/// below `percent` wins. A percentage below every band falls in the lowest.
pub fn band_for(percent: impl Into<Decimal>, bands: &BandSet) -> &ThresholdBand {
    let percent = percent.into();
    bands
        .bands()
        .iter()
        .find(|band| band.min_percent <= percent)
        .unwrap_or_else(|| bands.lowest())
}

/// Maps a percentage to a label and display color.
///
/// # Example
///
/// ```
/// use course_engine::calculation::classify;
/// use course_engine::models::BandSet;
///
/// let bands = BandSet::attendance();
/// assert_eq!(classify(95, &bands).label, "Excelente");
/// assert_eq!(classify(80, &bands).label, "Boa");
/// assert_eq!(classify(60, &bands).label, "Regular");
/// assert_eq!(classify(59, &bands).label, "Crítica");
///
/// let compact = BandSet::attendance_compact();
/// assert_eq!(classify(60, &compact).label, "Crítica");
/// ```
pub fn classify(percent: impl Into<Decimal>, bands: &BandSet) -> Classification {
    band_for(percent, bands).classification()
}
