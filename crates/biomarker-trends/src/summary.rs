//! Per-biomarker dashboard summaries
//!
//! Groups a user's mixed reading history by biomarker and reports the
//! latest value, its status and (for catalogued biomarkers) the trend.

use crate::catalog::{BiomarkerCategory, ReferenceCatalog};
use crate::reading::Reading;
use crate::status::{status_for_reading, BiomarkerStatus};
use crate::trend::{TrendEngine, TrendResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerSummary {
    /// Catalog display name, or the reading's own name when uncatalogued
    pub name: String,
    pub category: Option<BiomarkerCategory>,
    pub unit: String,
    pub reading_count: usize,
    pub latest_value: f64,
    pub latest_date: NaiveDate,
    pub status: BiomarkerStatus,
    /// `None` for biomarkers missing from the catalog
    pub trend: Option<TrendResult>,
}

impl TrendEngine {
    /// Summarize every biomarker present in `readings`, ordered by name
    pub fn summarize(
        &self,
        readings: &[Reading],
        catalog: &ReferenceCatalog,
        now: NaiveDate,
    ) -> Vec<BiomarkerSummary> {
        let mut groups: BTreeMap<String, Vec<Reading>> = BTreeMap::new();
        for reading in readings {
            groups
                .entry(reading.name.trim().to_lowercase())
                .or_default()
                .push(reading.clone());
        }

        let mut summaries: Vec<BiomarkerSummary> = groups
            .into_values()
            .filter_map(|mut history| {
                history.sort_by_key(|r| r.date_tested);
                let latest = history.last()?.clone();
                let reference = catalog.get(&latest.name);

                if reference.is_none() {
                    debug!(biomarker = %latest.name, "No reference entry, skipping trend");
                }

                let name = match reference {
                    Some(r) => r.name.clone(),
                    None => latest.name.trim().to_string(),
                };

                Some(BiomarkerSummary {
                    name,
                    category: reference.map(|r| r.category),
                    unit: latest.unit.clone(),
                    reading_count: history.len(),
                    latest_value: latest.value,
                    latest_date: latest.date_tested,
                    status: status_for_reading(&latest, reference),
                    trend: reference.map(|r| self.calculate(&history, r, now)),
                })
            })
            .collect();

        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        summaries
    }
}

/// Summarize with the default trend configuration
pub fn summarize_biomarkers(
    readings: &[Reading],
    catalog: &ReferenceCatalog,
    now: NaiveDate,
) -> Vec<BiomarkerSummary> {
    TrendEngine::default().summarize(readings, catalog, now)
}
