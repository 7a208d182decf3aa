//! Property-Based Tests for the Status, Cost and Goal Calculators
//!
//! - Reference-range checks always win over the optimal band
//! - Longer cost periods derive from the rounded daily total
//! - Inactive supplements never change the totals
//! - Goal progress stays within [0, 100]

#[cfg(test)]
mod status_tests {
    use biomarker_trends::{get_biomarker_status, BiomarkerStatus};
    use proptest::prelude::*;

    proptest! {
        /// Below the reference low is Low whatever the optimal band says
        #[test]
        fn below_reference_is_low(
            ref_low in 10.0..100.0f64,
            gap in 0.01..10.0f64,
            opt_width in 0.0..50.0f64
        ) {
            let value = ref_low - gap;
            // Optimal band deliberately covering the value
            let status = get_biomarker_status(
                value,
                Some(ref_low),
                Some(ref_low + 100.0),
                Some(value - 1.0),
                Some(value + opt_width),
            );
            prop_assert_eq!(status, BiomarkerStatus::Low);
        }

        /// Above the reference high is High whatever the optimal band says
        #[test]
        fn above_reference_is_high(ref_high in 10.0..100.0f64, gap in 0.01..10.0f64) {
            let value = ref_high + gap;
            let status = get_biomarker_status(
                value,
                Some(ref_high - 50.0),
                Some(ref_high),
                Some(value - 1.0),
                Some(value + 1.0),
            );
            prop_assert_eq!(status, BiomarkerStatus::High);
        }

        /// Without any bounds every value is Normal
        #[test]
        fn no_bounds_is_normal(value in -1e6..1e6f64) {
            prop_assert_eq!(
                get_biomarker_status(value, None, None, None, None),
                BiomarkerStatus::Normal
            );
        }
    }
}

#[cfg(test)]
mod cost_tests {
    use biomarker_trends::costs::round_cents;
    use biomarker_trends::{calculate_supplement_costs, Frequency, Supplement};
    use proptest::prelude::*;

    fn slot(i: usize) -> String {
        format!("slot-{}", i)
    }

    fn supplement_strategy() -> impl Strategy<Value = Supplement> {
        (
            proptest::option::of(1.0..200.0f64),
            proptest::option::of(1.0..365.0f64),
            proptest::option::of(0.5..4.0f64),
            0usize..5,
            prop_oneof![
                Just(Frequency::Daily),
                Just(Frequency::EveryOtherDay),
                Just(Frequency::AsNeeded),
                Just(Frequency::Other),
            ],
            any::<bool>(),
        )
            .prop_map(|(price, servings, quantity, slots, frequency, is_active)| {
                // Odd counts also carry a single timing, 3 sets both columns
                Supplement {
                    is_active,
                    price,
                    servings_per_container: servings,
                    intake_quantity: quantity,
                    frequency,
                    timing: (slots % 2 == 1).then(|| "morning".to_string()),
                    timings: (slots > 1).then(|| (0..slots).map(slot).collect()),
                    ..Supplement::new("Generated")
                }
            })
    }

    proptest! {
        /// Every period is derived from the rounded daily figure
        #[test]
        fn periods_follow_rounded_daily(
            supplements in proptest::collection::vec(supplement_strategy(), 0..15)
        ) {
            let costs = calculate_supplement_costs(&supplements);
            prop_assert_eq!(costs.weekly, round_cents(costs.daily * 7.0));
            prop_assert_eq!(costs.monthly, round_cents(costs.daily * 30.0));
            prop_assert_eq!(costs.yearly, round_cents(costs.daily * 365.0));
            prop_assert_eq!(costs.daily, round_cents(costs.daily));
        }

        /// Inactive supplements contribute nothing
        #[test]
        fn inactive_ignored(
            supplements in proptest::collection::vec(supplement_strategy(), 0..15)
        ) {
            let mut active = supplements.clone();
            active.retain(|s| s.is_active);
            prop_assert_eq!(
                calculate_supplement_costs(&supplements),
                calculate_supplement_costs(&active)
            );
        }

        /// Totals are never negative
        #[test]
        fn costs_non_negative(
            supplements in proptest::collection::vec(supplement_strategy(), 0..15)
        ) {
            let costs = calculate_supplement_costs(&supplements);
            prop_assert!(costs.daily >= 0.0);
            prop_assert!(costs.yearly >= costs.monthly);
            prop_assert!(costs.monthly >= costs.weekly);
        }
    }
}

#[cfg(test)]
mod goal_tests {
    use biomarker_trends::{calculate_goal_progress, Goal, GoalDirection};
    use proptest::prelude::*;

    fn direction_strategy() -> impl Strategy<Value = GoalDirection> {
        prop_oneof![
            Just(GoalDirection::Increase),
            Just(GoalDirection::Decrease),
            Just(GoalDirection::Maintain),
        ]
    }

    proptest! {
        /// Progress is always a percentage
        #[test]
        fn progress_bounded(
            current in proptest::option::of(0.1..1000.0f64),
            target in proptest::option::of(0.1..1000.0f64),
            direction in direction_strategy()
        ) {
            let progress = calculate_goal_progress(&Goal::new(current, target, direction));
            prop_assert!(
                (0.0..=100.0).contains(&progress),
                "progress {} out of range",
                progress
            );
        }

        /// Meeting or beating an increase target is exactly 100
        #[test]
        fn increase_target_met(target in 0.1..1000.0f64, extra in 0.0..1000.0f64) {
            let goal = Goal::new(Some(target + extra), Some(target), GoalDirection::Increase);
            prop_assert_eq!(calculate_goal_progress(&goal), 100.0);
        }

        /// Maintain goals only ever report 50 or 100
        #[test]
        fn maintain_is_binary(current in 0.1..1000.0f64, target in 0.1..1000.0f64) {
            let goal = Goal::new(Some(current), Some(target), GoalDirection::Maintain);
            let progress = calculate_goal_progress(&goal);
            prop_assert!(progress == 50.0 || progress == 100.0);
        }
    }
}
