//! Error types for the boundary operations
//!
//! The calculators themselves never fail: empty histories, zero
//! denominators and incomplete supplement records all produce sentinel
//! outputs. Errors only arise where data enters the crate: catalog
//! lookups, reading validation, date parsing and configuration loading.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while accepting biomarker data from a caller
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BiomarkerError {
    /// No catalog entry exists for the requested name
    #[error("Unknown biomarker: {0}")]
    UnknownBiomarker(String),

    /// A reading failed validation
    #[error("Invalid reading for {name}: {reason}")]
    InvalidReading { name: String, reason: String },

    /// A date string was not in `YYYY-MM-DD` form
    #[error("Invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },

    /// A reading is dated after the evaluation date
    #[error("Reading for {name} is dated {date_tested}, after {now}")]
    FutureDated {
        name: String,
        date_tested: NaiveDate,
        now: NaiveDate,
    },

    /// A reference entry has inconsistent bounds
    #[error("Invalid reference range for {name}: {reason}")]
    InvalidReference { name: String, reason: String },
}

/// Errors raised while loading or validating a [`crate::TrendConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, BiomarkerError>;
