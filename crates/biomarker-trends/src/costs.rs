//! Supplement cost and supply calculations
//!
//! Costs are aggregated over active supplements only. The daily total is
//! rounded to cents first and every longer period is derived from that
//! rounded figure, so `monthly == round(daily * 30)` always holds exactly.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How often a supplement is taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    #[default]
    Daily,
    EveryOtherDay,
    AsNeeded,
    #[serde(other)]
    Other,
}

impl Frequency {
    /// Average fraction of days the supplement is taken
    pub fn multiplier(&self) -> f64 {
        match self {
            Frequency::EveryOtherDay | Frequency::AsNeeded => 0.5,
            Frequency::Daily | Frequency::Other => 1.0,
        }
    }
}

/// When in the day a supplement is taken
///
/// Stored records carry a single `timing` ("morning"), a `timings` list
/// (["morning", "evening"]) or both; [`Supplement::resolved_timing`]
/// folds them into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timing {
    Single(String),
    Multiple(Vec<String>),
}

impl Timing {
    /// Number of intakes per day; an empty list counts as one
    pub fn count(&self) -> usize {
        match self {
            Timing::Single(_) => 1,
            Timing::Multiple(timings) => timings.len().max(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplement {
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Price of one container
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub servings_per_container: Option<f64>,
    /// Servings per intake, 1 when absent
    #[serde(default)]
    pub intake_quantity: Option<f64>,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default)]
    pub timing: Option<String>,
    #[serde(default)]
    pub timings: Option<Vec<String>>,
}

fn default_active() -> bool {
    true
}

impl Supplement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_active: true,
            price: None,
            servings_per_container: None,
            intake_quantity: None,
            frequency: Frequency::Daily,
            timing: None,
            timings: None,
        }
    }

    /// Timing of the supplement; a non-empty `timings` list wins over `timing`
    pub fn resolved_timing(&self) -> Option<Timing> {
        match (&self.timings, &self.timing) {
            (Some(list), _) if !list.is_empty() => Some(Timing::Multiple(list.clone())),
            (_, Some(single)) => Some(Timing::Single(single.clone())),
            (timings, None) => timings.clone().map(Timing::Multiple),
        }
    }

    /// Servings consumed on an average day
    pub fn daily_servings(&self) -> f64 {
        let quantity = self.intake_quantity.filter(|q| *q > 0.0).unwrap_or(1.0);
        let timings = self.resolved_timing().as_ref().map_or(1, Timing::count);
        quantity * timings as f64 * self.frequency.multiplier()
    }

    /// Price per serving, `None` without a price or serving count
    pub fn cost_per_serving(&self) -> Option<f64> {
        let price = self.price.filter(|p| *p > 0.0)?;
        let servings = self.servings_per_container.filter(|s| *s > 0.0)?;
        Some(price / servings)
    }

    /// Unrounded cost per average day
    pub fn daily_cost(&self) -> Option<f64> {
        self.cost_per_serving().map(|c| c * self.daily_servings())
    }
}

/// Cost contribution of one supplement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplementCost {
    pub name: String,
    pub daily_servings: f64,
    pub cost_per_serving: f64,
    pub daily_cost: f64,
}

/// Aggregate supplement spend
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SupplementCosts {
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
    pub yearly: f64,
    /// Supplements that contributed to the totals
    pub breakdown: Vec<SupplementCost>,
}

/// Round to two decimal places
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Total the cost of all active supplements
///
/// Inactive supplements and those missing a price or serving count are
/// left out without failing the aggregate. A zero or negative price or
/// serving count counts as missing, and a zero or negative intake
/// quantity falls back to one serving per intake.
pub fn calculate_supplement_costs(supplements: &[Supplement]) -> SupplementCosts {
    let mut breakdown = Vec::new();

    for supplement in supplements.iter().filter(|s| s.is_active) {
        let Some(cost_per_serving) = supplement.cost_per_serving() else {
            debug!(supplement = %supplement.name, "Skipping supplement without price data");
            continue;
        };
        let daily_servings = supplement.daily_servings();
        breakdown.push(SupplementCost {
            name: supplement.name.clone(),
            daily_servings,
            cost_per_serving,
            daily_cost: cost_per_serving * daily_servings,
        });
    }

    let daily = round_cents(breakdown.iter().map(|c| c.daily_cost).sum());

    SupplementCosts {
        daily,
        weekly: round_cents(daily * 7.0),
        monthly: round_cents(daily * 30.0),
        yearly: round_cents(daily * 365.0),
        breakdown,
    }
}

/// Days one container lasts at the current intake
pub fn days_of_supply(supplement: &Supplement) -> Option<f64> {
    let servings = supplement.servings_per_container.filter(|s| *s > 0.0)?;
    let daily = supplement.daily_servings();
    (daily > 0.0).then(|| servings / daily)
}

/// Date a container opened on `opened_on` runs out
pub fn reorder_date(supplement: &Supplement, opened_on: NaiveDate) -> Option<NaiveDate> {
    let days = days_of_supply(supplement)?.floor();
    opened_on.checked_add_days(Days::new(days as u64))
}
