//! Weight status evaluation
//!
//! Compares the most recent weight against the cat's goal range. Both sides
//! are normalized to the owner's preferred unit before comparing, so a goal
//! set in kg and a weight logged in lbs still line up.

use crate::models::{WeightGoal, WeightRecord};
use crate::units::{round_to_tenth, WeightUnit};
use serde::Serialize;

/// Where the latest weight sits relative to the goal range
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum WeightStatus {
    /// No goal has been set
    NoGoal,
    /// A goal exists but nothing has been logged
    NoWeight { goal: WeightGoal },
    InRange {
        current: f64,
        unit: WeightUnit,
        goal: WeightGoal,
    },
    Underweight {
        current: f64,
        unit: WeightUnit,
        goal: WeightGoal,
        deviation: f64,
    },
    Overweight {
        current: f64,
        unit: WeightUnit,
        goal: WeightGoal,
        deviation: f64,
    },
}

impl WeightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightStatus::NoGoal => "no-goal",
            WeightStatus::NoWeight { .. } => "no-weight",
            WeightStatus::InRange { .. } => "in-range",
            WeightStatus::Underweight { .. } => "underweight",
            WeightStatus::Overweight { .. } => "overweight",
        }
    }

    /// Distance outside the range, in the preferred unit
    pub fn deviation(&self) -> Option<f64> {
        match self {
            WeightStatus::Underweight { deviation, .. }
            | WeightStatus::Overweight { deviation, .. } => Some(*deviation),
            _ => None,
        }
    }

    /// Whether the owner should be alerted
    pub fn needs_attention(&self) -> bool {
        self.deviation().is_some()
    }
}

/// Evaluate the latest weight against the goal
pub fn evaluate_weight(
    latest: Option<&WeightRecord>,
    goal: Option<&WeightGoal>,
    preferred: WeightUnit,
) -> WeightStatus {
    let Some(goal) = goal else {
        return WeightStatus::NoGoal;
    };
    let Some(latest) = latest else {
        return WeightStatus::NoWeight { goal: goal.clone() };
    };

    let current = latest.weight_in(preferred);
    let (min, max) = goal.range_in(preferred);
    let goal = goal.clone();

    if current < min {
        WeightStatus::Underweight {
            current,
            unit: preferred,
            goal,
            deviation: round_to_tenth(min - current),
        }
    } else if current > max {
        WeightStatus::Overweight {
            current,
            unit: preferred,
            goal,
            deviation: round_to_tenth(current - max),
        }
    } else {
        WeightStatus::InRange {
            current,
            unit: preferred,
            goal,
        }
    }
}
