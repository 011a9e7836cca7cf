//! Input validation functions
//!
//! Plain validators return `Result<(), String>` with a user-facing message.
//! Input structs use the `validator` derive and are checked through
//! [`validate_input`], which folds failures into [`CoreError::Validation`].

use crate::errors::{CoreError, CoreResult};
use crate::models::{Cat, CatUpdate, WeightGoal, WeightRecord};
use crate::units::WeightUnit;
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Longest accepted cat name, in characters
pub const MAX_NAME_LENGTH: usize = 50;

/// Heaviest accepted weight entry, in the unit it was entered in
pub const MAX_WEIGHT_ENTRY: f64 = 50.0;

/// Validate a cat name (after trimming)
pub fn validate_cat_name(name: &str) -> Result<(), String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Cat name cannot be empty".to_string());
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(format!("Cat name cannot exceed {} characters", MAX_NAME_LENGTH));
    }
    Ok(())
}

/// Validate a weight entry in the unit it was entered in
pub fn validate_weight_entry(weight: f64) -> Result<(), String> {
    if weight.is_nan() || weight.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight <= 0.0 {
        return Err("Weight must be greater than 0".to_string());
    }
    if weight > MAX_WEIGHT_ENTRY {
        return Err(format!("Weight must be at most {}", MAX_WEIGHT_ENTRY));
    }
    Ok(())
}

/// Validate a goal range
pub fn validate_goal_range(min: f64, max: f64) -> Result<(), String> {
    if !min.is_finite() || !max.is_finite() {
        return Err("Goal weights must be valid numbers".to_string());
    }
    if min <= 0.0 || max <= 0.0 {
        return Err("Goal weights must be greater than 0".to_string());
    }
    if min >= max {
        return Err("Minimum weight must be less than maximum weight".to_string());
    }
    Ok(())
}

/// Run derive-based validation, mapping failures into [`CoreError`]
pub fn validate_input<T: Validate>(input: &T) -> CoreResult<()> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))
}

// ============================================================================
// Input Structs
// ============================================================================

/// Request to add a cat
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCat {
    #[validate(length(min = 1, max = 50, message = "Cat name must be 1-50 characters"))]
    pub name: String,

    #[validate(length(max = 2048, message = "Photo reference is too long"))]
    pub photo: Option<String>,
}

impl NewCat {
    pub fn new(name: &str, photo: Option<String>) -> Self {
        Self {
            name: name.trim().to_string(),
            photo: photo.filter(|p| !p.trim().is_empty()),
        }
    }

    /// Validate and build the cat
    pub fn into_cat(self) -> CoreResult<Cat> {
        validate_input(&self)?;
        Ok(Cat::new(self.name, self.photo))
    }
}

/// Check a profile patch before it is applied
pub fn validate_cat_update(update: &CatUpdate) -> CoreResult<()> {
    if let Some(name) = &update.name {
        validate_cat_name(name).map_err(CoreError::Validation)?;
    }
    Ok(())
}

/// Request to log a weight
#[derive(Debug, Clone, Deserialize)]
pub struct LogWeightInput {
    pub weight: f64,
    pub unit: WeightUnit,
    pub date: NaiveDate,
}

impl LogWeightInput {
    pub fn into_record(self, cat_id: Uuid) -> CoreResult<WeightRecord> {
        validate_weight_entry(self.weight).map_err(CoreError::Validation)?;
        Ok(WeightRecord {
            date: self.date,
            cat_id,
            weight: self.weight,
            unit: self.unit,
        })
    }
}

/// Request to set a weight goal
#[derive(Debug, Clone, Deserialize)]
pub struct GoalInput {
    pub min_weight: f64,
    pub max_weight: f64,
    pub unit: WeightUnit,
}

impl GoalInput {
    pub fn into_goal(self, cat_id: Uuid) -> CoreResult<WeightGoal> {
        validate_goal_range(self.min_weight, self.max_weight).map_err(CoreError::Validation)?;
        Ok(WeightGoal {
            cat_id,
            min_weight: self.min_weight,
            max_weight: self.max_weight,
            unit: self.unit,
        })
    }
}
