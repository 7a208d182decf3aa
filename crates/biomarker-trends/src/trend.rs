//! Biomarker Trend Engine
//!
//! Turns a biomarker's reading history into a direction (up, down, stable)
//! and a judgement on whether that direction is healthy for the biomarker.
//!
//! # Window selection
//!
//! Lab work is sparse: a handful of readings spread over years. The engine
//! prefers *recent* data over *complete* data:
//!
//! 1. Readings inside the recent window (18 months by default) are used if
//!    there are at least `min_data_points` of them, keeping the last
//!    `preferred_data_points`.
//! 2. Otherwise the last `preferred_data_points` readings of the whole
//!    history are used, with an `old_data_included` warning when that
//!    window reaches past the cutoff.
//!
//! # Direction
//!
//! An ordinary least-squares slope of value against reading index is
//! normalized by the window mean and scaled by the number of steps. A
//! cumulative change under the stable threshold (5%) is `stable`.
//!
//! # Health
//!
//! A stable trend is judged by where the latest value sits. A moving trend
//! is judged by the biomarker's [`TrendPreference`].
//!
//! All functions are pure: `now` is always supplied by the caller.

use crate::catalog::{ReferenceEntry, TrendPreference};
use crate::config::TrendConfig;
use crate::reading::Reading;
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

/// Direction of a biomarker over the analysed window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl TrendDirection {
    pub fn symbol(&self) -> &'static str {
        match self {
            TrendDirection::Up => "↑",
            TrendDirection::Down => "↓",
            TrendDirection::Stable => "→",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Up => write!(f, "up"),
            TrendDirection::Down => write!(f, "down"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

/// Whether the trend is moving the biomarker somewhere healthy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendHealth {
    Good,
    Bad,
    Neutral,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Too few readings for a trend
    InsufficientData,
    /// Last reading is old enough that a retest is due
    Outdated,
    /// The window had to reach back past the recent cutoff
    OldDataIncluded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendWarning {
    #[serde(rename = "type")]
    pub kind: WarningKind,
    pub message: String,
}

impl TrendWarning {
    fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Output of [`TrendEngine::calculate`]
///
/// `direction` and `health` are `None` exactly when there were too few
/// readings. `percent_change` is `None` when fewer than two values were
/// used or the first value was zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub direction: Option<TrendDirection>,
    pub health: Option<TrendHealth>,
    pub percent_change: Option<f64>,
    pub warnings: Vec<TrendWarning>,
    pub data_points_used: usize,
    pub oldest_data_date: Option<NaiveDate>,
    pub newest_data_date: Option<NaiveDate>,
}

impl TrendResult {
    pub fn has_warning(&self, kind: WarningKind) -> bool {
        self.warnings.iter().any(|w| w.kind == kind)
    }

    /// True when a direction could be computed
    pub fn is_available(&self) -> bool {
        self.direction.is_some()
    }
}

/// Trend calculator parameterized by a [`TrendConfig`]
#[derive(Debug, Clone, Default)]
pub struct TrendEngine {
    config: TrendConfig,
}

impl TrendEngine {
    pub fn new(config: TrendConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    /// Analyse one biomarker's history
    ///
    /// # Arguments
    /// * `history` - Readings for a single biomarker, in any order
    /// * `reference` - Catalog entry supplying ranges and preference
    /// * `now` - Evaluation date; the result depends on nothing else
    pub fn calculate(
        &self,
        history: &[Reading],
        reference: &ReferenceEntry,
        now: NaiveDate,
    ) -> TrendResult {
        let mut sorted: Vec<&Reading> = history.iter().collect();
        sorted.sort_by_key(|r| r.date_tested);

        let (first, last) = match (sorted.first(), sorted.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => {
                return TrendResult {
                    direction: None,
                    health: None,
                    percent_change: None,
                    warnings: vec![TrendWarning::new(
                        WarningKind::InsufficientData,
                        "No data available",
                    )],
                    data_points_used: 0,
                    oldest_data_date: None,
                    newest_data_date: None,
                };
            }
        };

        let months_since_last = months_between(last.date_tested, now);
        let outdated = if months_since_last > self.config.outdated_after_months {
            Some(TrendWarning::new(
                WarningKind::Outdated,
                format!(
                    "Last tested {} months ago - consider retesting",
                    months_since_last
                ),
            ))
        } else {
            None
        };

        if sorted.len() < self.config.min_data_points {
            debug!(
                biomarker = %reference.name,
                readings = sorted.len(),
                required = self.config.min_data_points,
                "Not enough readings for a trend"
            );
            let mut warnings = vec![TrendWarning::new(
                WarningKind::InsufficientData,
                format!(
                    "Need at least {} readings to calculate trend",
                    self.config.min_data_points
                ),
            )];
            warnings.extend(outdated);

            return TrendResult {
                direction: None,
                health: None,
                percent_change: None,
                warnings,
                data_points_used: sorted.len(),
                oldest_data_date: Some(first.date_tested),
                newest_data_date: Some(last.date_tested),
            };
        }

        let mut warnings: Vec<TrendWarning> = outdated.into_iter().collect();

        let cutoff = now
            .checked_sub_months(Months::new(self.config.recent_window_months))
            .unwrap_or(NaiveDate::MIN);
        let window = self.select_window(&sorted, cutoff, &mut warnings);

        let values: Vec<f64> = window.iter().map(|r| r.value).collect();
        let direction = classify_direction(&values, self.config.stable_threshold_percent);
        // window holds at least min_data_points (>= 2) readings here
        let latest = values.last().copied().unwrap_or(last.value);
        let health = assess_health(direction, latest, reference);

        trace!(
            biomarker = %reference.name,
            ?values,
            %direction,
            ?health,
            "Trend computed"
        );

        TrendResult {
            direction: Some(direction),
            health: Some(health),
            percent_change: percent_change(&values),
            warnings,
            data_points_used: window.len(),
            oldest_data_date: window.first().map(|r| r.date_tested),
            newest_data_date: window.last().map(|r| r.date_tested),
        }
    }

    /// Pick the readings the trend is computed from
    ///
    /// `sorted` must be in ascending date order and hold at least
    /// `min_data_points` readings.
    fn select_window<'a>(
        &self,
        sorted: &[&'a Reading],
        cutoff: NaiveDate,
        warnings: &mut Vec<TrendWarning>,
    ) -> Vec<&'a Reading> {
        let recent: Vec<&Reading> = sorted
            .iter()
            .copied()
            .filter(|r| r.date_tested >= cutoff)
            .collect();

        let preferred = self.config.preferred_data_points;

        if recent.len() >= self.config.min_data_points {
            let skip = recent.len().saturating_sub(preferred);
            debug!(
                recent = recent.len(),
                used = recent.len() - skip,
                "Using recent readings"
            );
            return recent[skip..].to_vec();
        }

        let skip = sorted.len().saturating_sub(preferred);
        let window = sorted[skip..].to_vec();

        if window.first().is_some_and(|r| r.date_tested < cutoff) {
            debug!(
                recent = recent.len(),
                %cutoff,
                "Falling back to readings older than the recent window"
            );
            warnings.push(TrendWarning::new(
                WarningKind::OldDataIncluded,
                format!(
                    "Includes data older than {} months - trend may not reflect recent changes",
                    self.config.recent_window_months
                ),
            ));
        }

        window
    }
}

/// Analyse a history with the default [`TrendConfig`]
pub fn calculate_trend(
    history: &[Reading],
    reference: &ReferenceEntry,
    now: NaiveDate,
) -> TrendResult {
    TrendEngine::default().calculate(history, reference, now)
}

/// Calendar-month distance between two dates, ignoring the day of month
pub fn months_between(from: NaiveDate, to: NaiveDate) -> u32 {
    let months = (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32);
    months.unsigned_abs()
}

/// Ordinary least-squares slope of `values` against their index
///
/// Returns 0 when the slope is undefined (fewer than two points).
pub fn linear_regression_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let sum_x: f64 = (0..values.len()).map(|i| i as f64).sum();
    let sum_y: f64 = values.iter().sum();
    let sum_xy: f64 = values.iter().enumerate().map(|(i, &y)| i as f64 * y).sum();
    let sum_x2: f64 = (0..values.len()).map(|i| (i as f64).powi(2)).sum();

    let denominator = n * sum_x2 - sum_x.powi(2);
    if denominator.abs() < f64::EPSILON {
        return 0.0;
    }

    (n * sum_xy - sum_x * sum_y) / denominator
}

/// Classify a value series as up, down or stable
///
/// The per-reading slope is expressed as a percentage of the mean and
/// multiplied by the number of steps, so the threshold applies to the
/// cumulative change across the whole window.
pub fn classify_direction(values: &[f64], stable_threshold_percent: f64) -> TrendDirection {
    if values.len() < 2 {
        return TrendDirection::Stable;
    }

    let slope = linear_regression_slope(values);
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let percent_per_reading = if mean != 0.0 {
        (slope / mean) * 100.0
    } else {
        0.0
    };
    let total_percent_change = percent_per_reading * (values.len() - 1) as f64;

    if total_percent_change.abs() < stable_threshold_percent {
        TrendDirection::Stable
    } else if slope > 0.0 {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    }
}

/// Judge a direction against the biomarker's ranges and preference
pub fn assess_health(
    direction: TrendDirection,
    latest: f64,
    reference: &ReferenceEntry,
) -> TrendHealth {
    if direction == TrendDirection::Stable {
        return if reference.optimal_range.contains(latest) {
            TrendHealth::Good
        } else if reference.in_suboptimal_band(latest) {
            TrendHealth::Warning
        } else {
            TrendHealth::Bad
        };
    }

    let good_if = |wanted: TrendDirection| {
        if direction == wanted {
            TrendHealth::Good
        } else {
            TrendHealth::Bad
        }
    };

    match reference.trend_preference {
        TrendPreference::LowerIsBetter => good_if(TrendDirection::Down),
        TrendPreference::HigherIsBetter => good_if(TrendDirection::Up),
        TrendPreference::RangeIsOptimal => {
            if latest < reference.optimal_range.low {
                good_if(TrendDirection::Up)
            } else if latest > reference.optimal_range.high {
                good_if(TrendDirection::Down)
            } else {
                TrendHealth::Neutral
            }
        }
        TrendPreference::Unspecified => TrendHealth::Neutral,
    }
}

/// Percent change from the first to the last value
pub fn percent_change(values: &[f64]) -> Option<f64> {
    match values {
        [first, .., last] if *first != 0.0 => Some((last - first) / first * 100.0),
        _ => None,
    }
}
