//! Goal progress calculation

use serde::{Deserialize, Serialize};

/// Tolerance around the target for `maintain` goals
pub const MAINTAIN_TOLERANCE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalDirection {
    Increase,
    Decrease,
    Maintain,
}

/// A numeric health goal, e.g. "raise Vitamin D to 60"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    #[serde(default)]
    pub current_value: Option<f64>,
    #[serde(default)]
    pub target_value: Option<f64>,
    pub direction: GoalDirection,
}

impl Goal {
    pub fn new(
        current_value: Option<f64>,
        target_value: Option<f64>,
        direction: GoalDirection,
    ) -> Self {
        Self {
            current_value,
            target_value,
            direction,
        }
    }

    pub fn progress(&self) -> f64 {
        calculate_goal_progress(self)
    }

    pub fn is_achieved(&self) -> bool {
        self.progress() >= 100.0
    }
}

/// Progress toward a goal as a percentage in `[0, 100]`
///
/// A value of zero counts as not entered, so a goal whose current or
/// target value is 0 reports no progress. Non-finite values are treated
/// the same way.
///
/// - `decrease`: progress from an implied start of twice the target
/// - `increase`: current as a share of target
/// - `maintain`: 100 within 5% of target, otherwise 50
pub fn calculate_goal_progress(goal: &Goal) -> f64 {
    let (Some(current), Some(target)) = (
        goal.current_value.filter(|v| *v != 0.0 && v.is_finite()),
        goal.target_value.filter(|v| *v != 0.0 && v.is_finite()),
    ) else {
        return 0.0;
    };

    match goal.direction {
        GoalDirection::Decrease => {
            let start = target * 2.0;
            ((start - current) / (start - target) * 100.0).clamp(0.0, 100.0)
        }
        GoalDirection::Increase => (current / target * 100.0).clamp(0.0, 100.0),
        GoalDirection::Maintain => {
            if ((current - target) / target).abs() <= MAINTAIN_TOLERANCE {
                100.0
            } else {
                50.0
            }
        }
    }
}
