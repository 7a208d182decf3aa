//! Single-reading status classification

use crate::catalog::ReferenceEntry;
use crate::reading::Reading;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a single value sits relative to its ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiomarkerStatus {
    Low,
    Normal,
    High,
    Optimal,
}

impl BiomarkerStatus {
    /// Outside the reference range in either direction
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, BiomarkerStatus::Low | BiomarkerStatus::High)
    }

    pub fn label(&self) -> &'static str {
        match self {
            BiomarkerStatus::Low => "Low",
            BiomarkerStatus::Normal => "Normal",
            BiomarkerStatus::High => "High",
            BiomarkerStatus::Optimal => "Optimal",
        }
    }
}

impl fmt::Display for BiomarkerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a value against optional reference and optimal bounds
///
/// Reference-range checks run first: a value below `ref_low` is `Low`
/// even when it also falls inside the optimal band. `Optimal` requires
/// both optimal bounds; bounds are inclusive.
pub fn get_biomarker_status(
    value: f64,
    ref_low: Option<f64>,
    ref_high: Option<f64>,
    opt_low: Option<f64>,
    opt_high: Option<f64>,
) -> BiomarkerStatus {
    if ref_low.is_some_and(|low| value < low) {
        return BiomarkerStatus::Low;
    }
    if ref_high.is_some_and(|high| value > high) {
        return BiomarkerStatus::High;
    }
    if let (Some(low), Some(high)) = (opt_low, opt_high) {
        if value >= low && value <= high {
            return BiomarkerStatus::Optimal;
        }
    }
    BiomarkerStatus::Normal
}

/// Classify a reading, preferring ranges carried on the reading itself
/// over the catalog entry
pub fn status_for_reading(
    reading: &Reading,
    reference: Option<&ReferenceEntry>,
) -> BiomarkerStatus {
    let reference_range = reading
        .reference_range
        .or_else(|| reference.map(|r| r.reference_range));
    let optimal_range = reading
        .optimal_range
        .or_else(|| reference.map(|r| r.optimal_range));

    get_biomarker_status(
        reading.value,
        reference_range.map(|r| r.low),
        reference_range.map(|r| r.high),
        optimal_range.map(|r| r.low),
        optimal_range.map(|r| r.high),
    )
}
