//! Property-Based Tests for the Trend Engine
//!
//! These tests verify invariants that must hold for any history:
//! - direction and health are null together, exactly below the minimum
//! - the window never exceeds the preferred size
//! - window dates bound the readings actually used
//! - results do not depend on input order
//! - the outdated warning appears whenever the last reading is old

#[cfg(test)]
mod tests {
    use crate::{fixed_now, readings_before};
    use biomarker_trends::trend::{classify_direction, linear_regression_slope, months_between};
    use biomarker_trends::{calculate_trend, ReferenceCatalog, TrendDirection, WarningKind};
    use proptest::prelude::*;

    fn history_strategy() -> impl Strategy<Value = Vec<(u64, f64)>> {
        // Up to ~8 years back, realistic vitamin D values
        proptest::collection::vec((0u64..3000, 5.0..150.0f64), 0..12)
    }

    proptest! {
        /// Nulls appear exactly when the history is below the minimum
        #[test]
        fn nulls_iff_insufficient(points in history_strategy()) {
            let catalog = ReferenceCatalog::builtin();
            let vit_d = catalog.get("Vitamin D").unwrap();
            let history = readings_before(fixed_now(), &points);

            let result = calculate_trend(&history, vit_d, fixed_now());

            let insufficient = history.len() < 3;
            prop_assert_eq!(result.direction.is_none(), insufficient);
            prop_assert_eq!(result.health.is_none(), insufficient);
            prop_assert_eq!(result.has_warning(WarningKind::InsufficientData), insufficient);
            if insufficient {
                prop_assert!(result.percent_change.is_none());
                prop_assert_eq!(result.data_points_used, history.len());
            }
        }

        /// The window holds between 3 and 4 readings once a trend exists
        #[test]
        fn window_size_bounded(
            points in proptest::collection::vec((0u64..3000, 5.0..150.0f64), 3..20)
        ) {
            let catalog = ReferenceCatalog::builtin();
            let vit_d = catalog.get("Vitamin D").unwrap();
            let history = readings_before(fixed_now(), &points);

            let result = calculate_trend(&history, vit_d, fixed_now());

            prop_assert!(result.data_points_used >= 3);
            prop_assert!(result.data_points_used <= 4);
            let oldest = result.oldest_data_date.unwrap();
            let newest = result.newest_data_date.unwrap();
            prop_assert!(oldest <= newest);
        }

        /// Shuffling the input never changes the result
        #[test]
        fn order_independent(points in history_strategy()) {
            let catalog = ReferenceCatalog::builtin();
            let vit_d = catalog.get("Vitamin D").unwrap();

            // Distinct dates so the sort has a single answer
            let mut unique = points.clone();
            unique.sort_by_key(|p| p.0);
            unique.dedup_by_key(|p| p.0);

            let forward = readings_before(fixed_now(), &unique);
            let mut reversed = forward.clone();
            reversed.reverse();

            prop_assert_eq!(
                calculate_trend(&forward, vit_d, fixed_now()),
                calculate_trend(&reversed, vit_d, fixed_now())
            );
        }

        /// Same inputs give the same result
        #[test]
        fn deterministic(points in history_strategy()) {
            let catalog = ReferenceCatalog::builtin();
            let ldl = catalog.get("LDL Cholesterol").unwrap();
            let history = readings_before(fixed_now(), &points);

            let a = calculate_trend(&history, ldl, fixed_now());
            let b = calculate_trend(&history, ldl, fixed_now());
            prop_assert_eq!(a, b);
        }

        /// Outdated warning tracks the calendar-month gap to the last reading
        #[test]
        fn outdated_warning_matches_gap(
            points in proptest::collection::vec((0u64..3000, 5.0..150.0f64), 1..8)
        ) {
            let catalog = ReferenceCatalog::builtin();
            let vit_d = catalog.get("Vitamin D").unwrap();
            let history = readings_before(fixed_now(), &points);
            let last = history.iter().map(|r| r.date_tested).max().unwrap();

            let result = calculate_trend(&history, vit_d, fixed_now());
            let gap = months_between(last, fixed_now());

            prop_assert_eq!(result.has_warning(WarningKind::Outdated), gap > 24);
        }

        /// Scaling every value by a positive factor keeps the direction
        #[test]
        fn direction_scale_invariant(
            values in proptest::collection::vec(1.0..500.0f64, 2..6),
            factor in 0.1..10.0f64
        ) {
            let scaled: Vec<f64> = values.iter().map(|v| v * factor).collect();
            let original = classify_direction(&values, 5.0);
            let rescaled = classify_direction(&scaled, 5.0);
            // Allow for float noise right at the threshold
            let slope = linear_regression_slope(&values);
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            let total = slope / mean * 100.0 * (values.len() - 1) as f64;
            if (total.abs() - 5.0).abs() > 1e-6 {
                prop_assert_eq!(original, rescaled);
            }
        }

        /// Strictly increasing values with a large step are never "down"
        #[test]
        fn increasing_series_not_down(
            start in 10.0..100.0f64,
            step in 1.0..20.0f64,
            n in 2usize..8
        ) {
            let values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            prop_assert_ne!(classify_direction(&values, 5.0), TrendDirection::Down);
        }
    }
}
