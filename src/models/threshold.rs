//! Threshold band models.
//!
//! A [`BandSet`] is a named, ordered list of [`ThresholdBand`]s used to turn a
//! percentage into a label and a display color. Every screen that shows an
//! attendance or health indicator classifies through one of these sets
//! instead of carrying its own cut points.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Name of the four-band attendance configuration.
pub const ATTENDANCE_BAND_SET: &str = "attendance";

/// Name of the three-band attendance configuration.
pub const ATTENDANCE_COMPACT_BAND_SET: &str = "attendance_compact";

/// One band: percentages at or above `min_percent` get this label and color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdBand {
    /// Lowest percentage (inclusive) that falls in this band.
    pub min_percent: Decimal,
    /// Display label, e.g. "Excelente".
    pub label: String,
    /// Display color, e.g. "green".
    pub color: String,
}

impl ThresholdBand {
    /// Creates a band.
    pub fn new(min_percent: impl Into<Decimal>, label: &str, color: &str) -> Self {
        Self {
            min_percent: min_percent.into(),
            label: label.to_string(),
            color: color.to_string(),
        }
    }

    /// Returns the label and color of this band.
    pub fn classification(&self) -> Classification {
        Classification {
            label: self.label.clone(),
            color: self.color.clone(),
        }
    }
}

/// The result of classifying a percentage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Classification {
    /// Display label.
    pub label: String,
    /// Display color.
    pub color: String,
}

/// A named set of bands, held highest-first.
///
/// # Example
///
/// ```
/// use course_engine::models::{BandSet, ThresholdBand};
///
/// let bands = BandSet::new("health", vec![
///     ThresholdBand::new(0, "Baixa", "red"),
///     ThresholdBand::new(50, "Alta", "green"),
/// ]).unwrap();
/// assert_eq!(bands.bands()[0].label, "Alta");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BandSet {
    name: String,
    bands: Vec<ThresholdBand>,
    #[serde(skip)]
    lowest: ThresholdBand,
}

impl BandSet {
    /// Builds a band set, ordering bands by descending `min_percent`.
    ///
    /// Fails with [`EngineError::InvalidBandSet`] when `bands` is empty or
    /// two bands share the same `min_percent`.
    pub fn new(name: impl Into<String>, bands: Vec<ThresholdBand>) -> EngineResult<Self> {
        let name = name.into();
        let mut bands = bands;
        bands.sort_by(|a, b| b.min_percent.cmp(&a.min_percent));

        let Some(lowest) = bands.last().cloned() else {
            return Err(EngineError::InvalidBandSet {
                name,
                message: "at least one band is required".to_string(),
            });
        };

        if let Some(pair) = bands
            .windows(2)
            .find(|pair| pair[0].min_percent == pair[1].min_percent)
        {
            return Err(EngineError::InvalidBandSet {
                name,
                message: format!("duplicate min_percent {}", pair[0].min_percent),
            });
        }

        Ok(Self {
            name,
            bands,
            lowest,
        })
    }

    /// The four-band attendance configuration:
    /// `>=90` Excelente, `>=75` Boa, `>=60` Regular, otherwise Crítica.
    pub fn attendance() -> Self {
        let lowest = ThresholdBand::new(0, "Crítica", "red");
        Self {
            name: ATTENDANCE_BAND_SET.to_string(),
            bands: vec![
                ThresholdBand::new(90, "Excelente", "green"),
                ThresholdBand::new(75, "Boa", "orange"),
                ThresholdBand::new(60, "Regular", "yellow"),
                lowest.clone(),
            ],
            lowest,
        }
    }

    /// The three-band attendance configuration:
    /// `>=90` Excelente, `>=75` Boa, otherwise Crítica.
    pub fn attendance_compact() -> Self {
        let lowest = ThresholdBand::new(0, "Crítica", "red");
        Self {
            name: ATTENDANCE_COMPACT_BAND_SET.to_string(),
            bands: vec![
                ThresholdBand::new(90, "Excelente", "green"),
                ThresholdBand::new(75, "Boa", "orange"),
                lowest.clone(),
            ],
            lowest,
        }
    }

    /// Returns the name of the set.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the bands, highest `min_percent` first.
    pub fn bands(&self) -> &[ThresholdBand] {
        &self.bands
    }

    /// Returns the band with the lowest `min_percent`.
    pub fn lowest(&self) -> &ThresholdBand {
        &self.lowest
    }
}
