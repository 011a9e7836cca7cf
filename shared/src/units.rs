//! Weight unit conversion
//!
//! Cat weights are entered and stored in whichever unit the owner used at the
//! time. Values are only normalized when two of them need to be compared or
//! displayed together, and every cross-unit conversion rounds to one decimal
//! place so the numbers match what the owner sees on screen.
//!
//! # Rounding
//!
//! All rounding in the engine goes through [`round_to_tenth`] or
//! `f64::round`, which round half away from zero. Every value rounded by the
//! engine is non-negative, so this is the same as rounding .5 up.

use crate::errors::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pounds per kilogram
pub const LBS_PER_KG: f64 = 2.20462;

// ============================================================================
// Weight Units
// ============================================================================

/// Weight unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    /// Convert a value expressed in this unit into `target`
    pub fn convert(&self, value: f64, target: WeightUnit) -> f64 {
        convert_weight(value, *self, target)
    }

    /// Get the unit abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for WeightUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kgs" | "kilogram" | "kilograms" => Ok(WeightUnit::Kg),
            "lbs" | "lb" | "pound" | "pounds" => Ok(WeightUnit::Lbs),
            _ => Err(CoreError::UnknownUnit(s.to_string())),
        }
    }
}

/// Convert a weight between units
///
/// Same-unit conversion returns the input untouched. Otherwise the fixed
/// factor 1 kg = 2.20462 lbs is applied and the result rounded to one decimal.
/// Round trips are only stable to within 0.1.
pub fn convert_weight(value: f64, from: WeightUnit, to: WeightUnit) -> f64 {
    match (from, to) {
        (WeightUnit::Kg, WeightUnit::Lbs) => round_to_tenth(value * LBS_PER_KG),
        (WeightUnit::Lbs, WeightUnit::Kg) => round_to_tenth(value / LBS_PER_KG),
        _ => value,
    }
}

/// Round to one decimal place
///
/// Results that round to zero are `0.0`, never `-0.0`.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0 + 0.0
}
