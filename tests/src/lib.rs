//! Biomarker Trends Property Suite
//!
//! Property-based tests for the analysis core:
//! - Trend engine invariants (null results, window bounds, determinism)
//! - Status classification precedence
//! - Cost rounding consistency
//! - Goal progress bounds

pub mod calculator_properties;
pub mod trend_properties;

use biomarker_trends::Reading;
use chrono::{Days, NaiveDate};

/// Fixed evaluation date shared by the suites
pub fn fixed_now() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
}

/// Build readings from `(days_before_now, value)` pairs
pub fn readings_before(now: NaiveDate, points: &[(u64, f64)]) -> Vec<Reading> {
    points
        .iter()
        .map(|&(days, value)| {
            Reading::new("Vitamin D", value, "ng/mL", now - Days::new(days))
        })
        .collect()
}
