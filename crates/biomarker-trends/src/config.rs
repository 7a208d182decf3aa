//! Trend engine configuration
//!
//! Every threshold the trend engine applies lives here so callers can tune
//! them from a JSON file. Missing fields fall back to the defaults below.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Minimum readings before a trend is computed
pub const MIN_DATA_POINTS_FOR_TREND: usize = 3;

/// Maximum readings considered in a trend window
pub const PREFERRED_DATA_POINTS: usize = 4;

/// Readings newer than this many months count as recent
pub const RECENT_DATA_WINDOW_MONTHS: u32 = 18;

/// Cumulative percent change below which a trend is stable
pub const STABLE_THRESHOLD_PERCENT: f64 = 5.0;

/// Months since the last reading after which a retest is suggested
pub const OUTDATED_AFTER_MONTHS: u32 = 24;

/// Tunable parameters for [`crate::TrendEngine`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    pub min_data_points: usize,
    pub preferred_data_points: usize,
    pub recent_window_months: u32,
    pub stable_threshold_percent: f64,
    pub outdated_after_months: u32,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            min_data_points: MIN_DATA_POINTS_FOR_TREND,
            preferred_data_points: PREFERRED_DATA_POINTS,
            recent_window_months: RECENT_DATA_WINDOW_MONTHS,
            stable_threshold_percent: STABLE_THRESHOLD_PERCENT,
            outdated_after_months: OUTDATED_AFTER_MONTHS,
        }
    }
}

impl TrendConfig {
    /// Parse and validate a config from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check the parameters describe a usable engine
    ///
    /// # Constraints
    /// - `min_data_points` must be at least 2 (a slope needs two points)
    /// - `preferred_data_points` must not be below `min_data_points`
    /// - `recent_window_months` must be positive
    /// - `stable_threshold_percent` must be finite and non-negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_data_points < 2 {
            return Err(ConfigError::Invalid {
                field: "min_data_points",
                reason: format!("must be at least 2, got {}", self.min_data_points),
            });
        }

        if self.preferred_data_points < self.min_data_points {
            return Err(ConfigError::Invalid {
                field: "preferred_data_points",
                reason: format!(
                    "must be >= min_data_points ({}), got {}",
                    self.min_data_points, self.preferred_data_points
                ),
            });
        }

        if self.recent_window_months == 0 {
            return Err(ConfigError::Invalid {
                field: "recent_window_months",
                reason: "must be positive".to_string(),
            });
        }

        if !self.stable_threshold_percent.is_finite() || self.stable_threshold_percent < 0.0 {
            return Err(ConfigError::Invalid {
                field: "stable_threshold_percent",
                reason: format!(
                    "must be a non-negative number, got {}",
                    self.stable_threshold_percent
                ),
            });
        }

        Ok(())
    }
}
