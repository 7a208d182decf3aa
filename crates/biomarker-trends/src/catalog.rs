//! Biomarker Reference Catalog
//!
//! Static reference data for every biomarker the application knows about:
//! units, the lab reference range, the narrower optimal range, optional
//! sub-optimal "warning" bands between the two, and the direction of
//! change that counts as an improvement.
//!
//! Lookups are case-insensitive so that names coming from lab report
//! extraction ("vitamin d", "VITAMIN D") resolve to the same entry.

use crate::error::{BiomarkerError, Result};
use crate::reading::Range;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which direction of change is desirable for a biomarker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendPreference {
    /// e.g. LDL, hs-CRP, HbA1c
    LowerIsBetter,
    /// e.g. HDL, eGFR
    HigherIsBetter,
    /// Healthy inside the optimal band, drifting either way is a concern
    RangeIsOptimal,
    /// Preference not recognized; trend health is reported as neutral
    #[serde(other)]
    Unspecified,
}

/// Display grouping for biomarkers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiomarkerCategory {
    Vitamins,
    Minerals,
    Lipids,
    Metabolic,
    Thyroid,
    Inflammation,
    Hormones,
    Kidney,
    Liver,
    Blood,
    Electrolytes,
    #[serde(other)]
    Other,
}

/// Reference data for one biomarker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub name: String,
    pub unit: String,
    pub category: BiomarkerCategory,
    pub reference_range: Range,
    pub optimal_range: Range,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suboptimal_low_range: Option<Range>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suboptimal_high_range: Option<Range>,
    pub trend_preference: TrendPreference,
}

impl ReferenceEntry {
    pub fn new(
        name: impl Into<String>,
        unit: impl Into<String>,
        category: BiomarkerCategory,
        reference_range: Range,
        optimal_range: Range,
        trend_preference: TrendPreference,
    ) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            category,
            reference_range,
            optimal_range,
            suboptimal_low_range: None,
            suboptimal_high_range: None,
            trend_preference,
        }
    }

    pub fn with_suboptimal_low(mut self, range: Range) -> Self {
        self.suboptimal_low_range = Some(range);
        self
    }

    pub fn with_suboptimal_high(mut self, range: Range) -> Self {
        self.suboptimal_high_range = Some(range);
        self
    }

    /// True when `value` falls in either defined sub-optimal band
    pub fn in_suboptimal_band(&self, value: f64) -> bool {
        let inside = |band: Option<Range>| band.is_some_and(|r| r.contains(value));
        inside(self.suboptimal_low_range) || inside(self.suboptimal_high_range)
    }

    /// Verify bounds are ordered and the optimal range sits inside the
    /// reference range
    pub fn check_consistency(&self) -> Result<()> {
        let bands = [
            ("reference_range", Some(self.reference_range)),
            ("optimal_range", Some(self.optimal_range)),
            ("suboptimal_low_range", self.suboptimal_low_range),
            ("suboptimal_high_range", self.suboptimal_high_range),
        ];

        for (label, band) in bands {
            if let Some(band) = band {
                if !band.low.is_finite() || !band.high.is_finite() || band.low > band.high {
                    return Err(BiomarkerError::InvalidReference {
                        name: self.name.clone(),
                        reason: format!("{} [{}, {}] is not ordered", label, band.low, band.high),
                    });
                }
            }
        }

        if !self.optimal_range.is_within(&self.reference_range) {
            return Err(BiomarkerError::InvalidReference {
                name: self.name.clone(),
                reason: "optimal_range must lie within reference_range".to_string(),
            });
        }

        Ok(())
    }
}

/// Name-indexed collection of [`ReferenceEntry`] values
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalog {
    entries: BTreeMap<String, ReferenceEntry>,
}

fn catalog_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl ReferenceCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog preloaded with the built-in biomarker reference data
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for entry in builtin_entries() {
            catalog.entries.insert(catalog_key(&entry.name), entry);
        }
        catalog
    }

    /// Add or replace an entry after checking its bounds
    ///
    /// Returns the entry previously stored under the same name.
    pub fn insert(&mut self, entry: ReferenceEntry) -> Result<Option<ReferenceEntry>> {
        entry.check_consistency()?;
        Ok(self.entries.insert(catalog_key(&entry.name), entry))
    }

    /// Case-insensitive lookup
    pub fn get(&self, name: &str) -> Option<&ReferenceEntry> {
        self.entries.get(&catalog_key(name))
    }

    /// Lookup that fails with [`BiomarkerError::UnknownBiomarker`]
    pub fn require(&self, name: &str) -> Result<&ReferenceEntry> {
        self.get(name)
            .ok_or_else(|| BiomarkerError::UnknownBiomarker(name.to_string()))
    }

    /// Display names of all entries, ordered by key
    pub fn names(&self) -> Vec<&str> {
        self.entries.values().map(|e| e.name.as_str()).collect()
    }

    pub fn by_category(&self, category: BiomarkerCategory) -> Vec<&ReferenceEntry> {
        self.entries
            .values()
            .filter(|e| e.category == category)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferenceEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Built-in reference data
// ============================================================================

#[rustfmt::skip]
fn builtin_entries() -> Vec<ReferenceEntry> {
    use BiomarkerCategory::*;
    use TrendPreference::*;

    let r = Range::new;

    vec![
        // Vitamins
        ReferenceEntry::new("Vitamin D", "ng/mL", Vitamins, r(30.0, 100.0), r(50.0, 80.0), RangeIsOptimal)
            .with_suboptimal_low(r(30.0, 50.0))
            .with_suboptimal_high(r(80.0, 100.0)),
        ReferenceEntry::new("Vitamin B12", "pg/mL", Vitamins, r(200.0, 1100.0), r(500.0, 900.0), RangeIsOptimal)
            .with_suboptimal_low(r(200.0, 500.0))
            .with_suboptimal_high(r(900.0, 1100.0)),
        ReferenceEntry::new("Folate", "ng/mL", Vitamins, r(3.0, 20.0), r(10.0, 20.0), HigherIsBetter)
            .with_suboptimal_low(r(3.0, 10.0)),
        // Minerals
        ReferenceEntry::new("Ferritin", "ng/mL", Minerals, r(30.0, 400.0), r(50.0, 150.0), RangeIsOptimal)
            .with_suboptimal_low(r(30.0, 50.0))
            .with_suboptimal_high(r(150.0, 400.0)),
        ReferenceEntry::new("Iron", "ug/dL", Minerals, r(60.0, 170.0), r(85.0, 130.0), RangeIsOptimal)
            .with_suboptimal_low(r(60.0, 85.0))
            .with_suboptimal_high(r(130.0, 170.0)),
        ReferenceEntry::new("Magnesium RBC", "mg/dL", Minerals, r(4.2, 6.8), r(5.5, 6.5), RangeIsOptimal)
            .with_suboptimal_low(r(4.2, 5.5)),
        // Lipids
        ReferenceEntry::new("Total Cholesterol", "mg/dL", Lipids, r(100.0, 200.0), r(125.0, 180.0), LowerIsBetter)
            .with_suboptimal_high(r(180.0, 200.0)),
        ReferenceEntry::new("LDL Cholesterol", "mg/dL", Lipids, r(0.0, 130.0), r(0.0, 100.0), LowerIsBetter)
            .with_suboptimal_high(r(100.0, 130.0)),
        ReferenceEntry::new("HDL Cholesterol", "mg/dL", Lipids, r(40.0, 100.0), r(60.0, 90.0), HigherIsBetter)
            .with_suboptimal_low(r(40.0, 60.0)),
        ReferenceEntry::new("Triglycerides", "mg/dL", Lipids, r(0.0, 150.0), r(0.0, 100.0), LowerIsBetter)
            .with_suboptimal_high(r(100.0, 150.0)),
        ReferenceEntry::new("ApoB", "mg/dL", Lipids, r(0.0, 130.0), r(0.0, 90.0), LowerIsBetter)
            .with_suboptimal_high(r(90.0, 130.0)),
        // Metabolic
        ReferenceEntry::new("Fasting Glucose", "mg/dL", Metabolic, r(65.0, 99.0), r(75.0, 90.0), RangeIsOptimal)
            .with_suboptimal_low(r(65.0, 75.0))
            .with_suboptimal_high(r(90.0, 99.0)),
        ReferenceEntry::new("HbA1c", "%", Metabolic, r(4.0, 5.6), r(4.5, 5.3), LowerIsBetter)
            .with_suboptimal_high(r(5.3, 5.6)),
        ReferenceEntry::new("Fasting Insulin", "uIU/mL", Metabolic, r(2.0, 25.0), r(2.0, 8.0), LowerIsBetter)
            .with_suboptimal_high(r(8.0, 25.0)),
        // Thyroid
        ReferenceEntry::new("TSH", "mIU/L", Thyroid, r(0.45, 4.5), r(1.0, 2.5), RangeIsOptimal)
            .with_suboptimal_low(r(0.45, 1.0))
            .with_suboptimal_high(r(2.5, 4.5)),
        ReferenceEntry::new("Free T4", "ng/dL", Thyroid, r(0.8, 1.8), r(1.0, 1.5), RangeIsOptimal),
        ReferenceEntry::new("Free T3", "pg/mL", Thyroid, r(2.3, 4.2), r(3.0, 4.0), RangeIsOptimal)
            .with_suboptimal_low(r(2.3, 3.0)),
        // Inflammation
        ReferenceEntry::new("hs-CRP", "mg/L", Inflammation, r(0.0, 3.0), r(0.0, 1.0), LowerIsBetter)
            .with_suboptimal_high(r(1.0, 3.0)),
        ReferenceEntry::new("Homocysteine", "umol/L", Inflammation, r(0.0, 15.0), r(0.0, 9.0), LowerIsBetter)
            .with_suboptimal_high(r(9.0, 15.0)),
        // Hormones
        ReferenceEntry::new("Total Testosterone", "ng/dL", Hormones, r(264.0, 916.0), r(500.0, 900.0), HigherIsBetter)
            .with_suboptimal_low(r(264.0, 500.0)),
        ReferenceEntry::new("Cortisol AM", "ug/dL", Hormones, r(6.2, 19.4), r(10.0, 15.0), RangeIsOptimal),
        // Kidney
        ReferenceEntry::new("Creatinine", "mg/dL", Kidney, r(0.7, 1.3), r(0.8, 1.1), RangeIsOptimal),
        ReferenceEntry::new("eGFR", "mL/min/1.73m2", Kidney, r(60.0, 120.0), r(90.0, 120.0), HigherIsBetter)
            .with_suboptimal_low(r(60.0, 90.0)),
        // Liver
        ReferenceEntry::new("ALT", "U/L", Liver, r(0.0, 44.0), r(0.0, 25.0), LowerIsBetter)
            .with_suboptimal_high(r(25.0, 44.0)),
        ReferenceEntry::new("AST", "U/L", Liver, r(0.0, 40.0), r(0.0, 25.0), LowerIsBetter)
            .with_suboptimal_high(r(25.0, 40.0)),
        // Blood
        ReferenceEntry::new("Hemoglobin", "g/dL", Blood, r(13.2, 17.1), r(14.0, 16.0), RangeIsOptimal),
        // Electrolytes
        ReferenceEntry::new("Sodium", "mmol/L", Electrolytes, r(135.0, 146.0), r(138.0, 142.0), RangeIsOptimal),
        ReferenceEntry::new("Potassium", "mmol/L", Electrolytes, r(3.5, 5.3), r(4.0, 4.8), RangeIsOptimal),
    ]
}
