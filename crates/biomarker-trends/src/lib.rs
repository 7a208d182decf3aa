//! Biomarker Trends - analysis core for personal health tracking
//!
//! Pure calculation functions over a user's lab history:
//!
//! - Reference catalog of biomarkers with reference, optimal and
//!   sub-optimal ranges plus the preferred direction of change
//! - Trend engine: window selection, least-squares slope, direction
//!   classification and health assessment
//! - Single-reading status classification (low / normal / high / optimal)
//! - Supplement cost aggregation and supply scheduling
//! - Goal progress
//!
//! Nothing here performs I/O or reads the clock; the evaluation date is
//! always passed in, which keeps every result reproducible.
//!
//! # Example
//!
//! ```rust
//! use biomarker_trends::{calculate_trend, Reading, ReferenceCatalog, TrendDirection};
//! use chrono::NaiveDate;
//!
//! let catalog = ReferenceCatalog::builtin();
//! let ldl = catalog.require("LDL Cholesterol").unwrap();
//!
//! let date = |m| NaiveDate::from_ymd_opt(2024, m, 1).unwrap();
//! let history = vec![
//!     Reading::new("LDL Cholesterol", 140.0, "mg/dL", date(1)),
//!     Reading::new("LDL Cholesterol", 125.0, "mg/dL", date(3)),
//!     Reading::new("LDL Cholesterol", 110.0, "mg/dL", date(5)),
//! ];
//!
//! let trend = calculate_trend(&history, ldl, date(6));
//! assert_eq!(trend.direction, Some(TrendDirection::Down));
//! ```

pub mod catalog;
pub mod config;
pub mod costs;
pub mod error;
pub mod goals;
pub mod reading;
pub mod status;
pub mod summary;
pub mod trend;

// Re-export commonly used types for convenience
pub use catalog::{BiomarkerCategory, ReferenceCatalog, ReferenceEntry, TrendPreference};
pub use config::TrendConfig;
pub use costs::{
    calculate_supplement_costs, days_of_supply, reorder_date, Frequency, Supplement,
    SupplementCost, SupplementCosts, Timing,
};
pub use error::{BiomarkerError, ConfigError, Result};
pub use goals::{calculate_goal_progress, Goal, GoalDirection};
pub use reading::{parse_date, Range, Reading};
pub use status::{get_biomarker_status, status_for_reading, BiomarkerStatus};
pub use summary::{summarize_biomarkers, BiomarkerSummary};
pub use trend::{
    calculate_trend, TrendDirection, TrendEngine, TrendHealth, TrendResult, TrendWarning,
    WarningKind,
};
