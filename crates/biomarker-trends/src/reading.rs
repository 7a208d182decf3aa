//! Biomarker readings and value ranges

use crate::error::{BiomarkerError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive numeric band `[low, high]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub low: f64,
    pub high: f64,
}

impl Range {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// True when `low <= value <= high`
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    /// True when this band lies entirely inside `outer`
    pub fn is_within(&self, outer: &Range) -> bool {
        self.low >= outer.low && self.high <= outer.high
    }
}

/// One measured value of one biomarker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Catalog key, e.g. "Vitamin D"
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub date_tested: NaiveDate,
    /// Lab-reported reference range, overrides the catalog when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_range: Option<Range>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimal_range: Option<Range>,
}

impl Reading {
    pub fn new(
        name: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
        date_tested: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
            date_tested,
            reference_range: None,
            optimal_range: None,
        }
    }

    pub fn with_reference_range(mut self, range: Range) -> Self {
        self.reference_range = Some(range);
        self
    }

    pub fn with_optimal_range(mut self, range: Range) -> Self {
        self.optimal_range = Some(range);
        self
    }

    /// Check the reading is usable by the trend engine
    ///
    /// The engine itself assumes these hold; callers accepting user input
    /// or extracted lab values should validate at the boundary.
    pub fn validate(&self, now: NaiveDate) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(BiomarkerError::InvalidReading {
                name: self.name.clone(),
                reason: "Biomarker name is required".to_string(),
            });
        }

        if !self.value.is_finite() {
            return Err(BiomarkerError::InvalidReading {
                name: self.name.clone(),
                reason: format!("Value must be a finite number, got {}", self.value),
            });
        }

        if self.date_tested > now {
            return Err(BiomarkerError::FutureDated {
                name: self.name.clone(),
                date_tested: self.date_tested,
                now,
            });
        }

        Ok(())
    }
}

/// Parse an ISO `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| BiomarkerError::InvalidDate {
        input: input.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_range_contains_is_inclusive() {
        let range = Range::new(30.0, 60.0);
        assert!(range.contains(30.0));
        assert!(range.contains(60.0));
        assert!(range.contains(45.0));
        assert!(!range.contains(29.99));
        assert!(!range.contains(60.01));
    }

    #[test]
    fn test_range_is_within() {
        let reference = Range::new(30.0, 100.0);
        assert!(Range::new(40.0, 60.0).is_within(&reference));
        assert!(reference.is_within(&reference));
        assert!(!Range::new(20.0, 60.0).is_within(&reference));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-03-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
        assert!(matches!(
            parse_date("15/03/2024"),
            Err(BiomarkerError::InvalidDate { .. })
        ));
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_validate_reading() {
        let now = date("2024-06-01");
        let reading = Reading::new("Vitamin D", 42.0, "ng/mL", date("2024-05-01"));
        assert!(reading.validate(now).is_ok());

        let nan = Reading::new("Vitamin D", f64::NAN, "ng/mL", date("2024-05-01"));
        assert!(matches!(
            nan.validate(now),
            Err(BiomarkerError::InvalidReading { .. })
        ));

        let unnamed = Reading::new("  ", 42.0, "ng/mL", date("2024-05-01"));
        assert!(unnamed.validate(now).is_err());

        let future = Reading::new("Vitamin D", 42.0, "ng/mL", date("2024-07-01"));
        assert!(matches!(
            future.validate(now),
            Err(BiomarkerError::FutureDated { .. })
        ));
    }

    #[test]
    fn test_reading_deserializes_from_json() {
        let json = r#"{
            "name": "Ferritin",
            "value": 85.5,
            "unit": "ng/mL",
            "date_tested": "2024-01-20",
            "reference_range": {"low": 30, "high": 400}
        }"#;
        let reading: Reading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.name, "Ferritin");
        assert_eq!(reading.date_tested, date("2024-01-20"));
        assert_eq!(reading.reference_range, Some(Range::new(30.0, 400.0)));
        assert_eq!(reading.optimal_range, None);
    }
}
