//! Data models for the Happy Kitty Score application
//!
//! These are the entities the record repository persists. Field names
//! serialize in camelCase so the stored JSON matches what the browser UI
//! reads and writes.

use crate::errors::CoreError;
use crate::scoring::calculate_health;
use crate::units::WeightUnit;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Cats
// ============================================================================

/// A cat profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cat {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Cat {
    /// Create a new cat with a fresh id
    pub fn new(name: impl Into<String>, photo: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            photo,
            created_at: Utc::now(),
        }
    }
}

/// Partial update for a cat profile
///
/// Profile edits are the only partial patch in the system; every other
/// entity is replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatUpdate {
    pub name: Option<String>,
    /// `Some(None)` removes the photo
    pub photo: Option<Option<String>>,
}

impl CatUpdate {
    /// Apply the patch to a cat in place
    pub fn apply(&self, cat: &mut Cat) {
        if let Some(name) = &self.name {
            cat.name = name.clone();
        }
        if let Some(photo) = &self.photo {
            cat.photo = photo.clone();
        }
    }
}

// ============================================================================
// Daily Questionnaire
// ============================================================================

/// The eight observation categories of the daily check, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthCategory {
    Eating,
    Water,
    Pee,
    Poop,
    Activity,
    Mood,
    Vomiting,
    Appetite,
}

impl HealthCategory {
    /// All categories in declaration order
    pub const ALL: [HealthCategory; 8] = [
        HealthCategory::Eating,
        HealthCategory::Water,
        HealthCategory::Pee,
        HealthCategory::Poop,
        HealthCategory::Activity,
        HealthCategory::Mood,
        HealthCategory::Vomiting,
        HealthCategory::Appetite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthCategory::Eating => "eating",
            HealthCategory::Water => "water",
            HealthCategory::Pee => "pee",
            HealthCategory::Poop => "poop",
            HealthCategory::Activity => "activity",
            HealthCategory::Mood => "mood",
            HealthCategory::Vomiting => "vomiting",
            HealthCategory::Appetite => "appetite",
        }
    }
}

impl fmt::Display for HealthCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HealthCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HealthCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

/// One day's answers to the questionnaire
///
/// Codes are kept as plain strings: a code this build does not know scores 0
/// instead of failing to load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HealthAnswers {
    pub eating: String,
    pub water: String,
    pub pee: String,
    pub poop: String,
    pub activity: String,
    pub mood: String,
    pub vomiting: String,
    pub appetite: String,
}

impl HealthAnswers {
    /// The answer code recorded for a category
    pub fn answer(&self, category: HealthCategory) -> &str {
        match category {
            HealthCategory::Eating => &self.eating,
            HealthCategory::Water => &self.water,
            HealthCategory::Pee => &self.pee,
            HealthCategory::Poop => &self.poop,
            HealthCategory::Activity => &self.activity,
            HealthCategory::Mood => &self.mood,
            HealthCategory::Vomiting => &self.vomiting,
            HealthCategory::Appetite => &self.appetite,
        }
    }

    /// Iterate `(category, code)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (HealthCategory, &str)> + '_ {
        HealthCategory::ALL.into_iter().map(move |c| (c, self.answer(c)))
    }
}

// ============================================================================
// Health Records
// ============================================================================

/// Discrete wellness tier derived from the percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Excellent,
    Good,
    Warning,
    Critical,
}

impl HealthStatus {
    /// Classify a percentage. Lower bounds are inclusive, checked highest first.
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage >= 85 {
            HealthStatus::Excellent
        } else if percentage >= 65 {
            HealthStatus::Good
        } else if percentage >= 40 {
            HealthStatus::Warning
        } else {
            HealthStatus::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => "excellent",
            HealthStatus::Good => "good",
            HealthStatus::Warning => "warning",
            HealthStatus::Critical => "critical",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => "Excellent",
            HealthStatus::Good => "Good",
            HealthStatus::Warning => "Warning",
            HealthStatus::Critical => "Critical",
        }
    }

    /// Message shown with the result
    pub fn message(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => "Your cat is healthy and happy!",
            HealthStatus::Good => "Mostly healthy, keep monitoring.",
            HealthStatus::Warning => "Possible health issues. Pay attention.",
            HealthStatus::Critical => "High risk. Please consult a veterinarian.",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finalized daily check for one cat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    pub date: NaiveDate,
    pub cat_id: Uuid,
    pub answers: HealthAnswers,
    pub score: u32,
    pub percentage: u32,
    pub status: HealthStatus,
}

impl HealthRecord {
    /// Build a record, deriving score, percentage and status from the answers
    pub fn new(cat_id: Uuid, date: NaiveDate, answers: HealthAnswers) -> Self {
        let result = calculate_health(&answers);
        Self {
            date,
            cat_id,
            answers,
            score: result.score,
            percentage: result.percentage,
            status: result.status,
        }
    }
}

// ============================================================================
// Weight
// ============================================================================

/// A day's weight entry for one cat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightRecord {
    pub date: NaiveDate,
    pub cat_id: Uuid,
    pub weight: f64,
    pub unit: WeightUnit,
}

impl WeightRecord {
    /// The weight expressed in `unit`
    pub fn weight_in(&self, unit: WeightUnit) -> f64 {
        self.unit.convert(self.weight, unit)
    }
}

/// Healthy weight range for one cat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightGoal {
    pub cat_id: Uuid,
    pub min_weight: f64,
    pub max_weight: f64,
    pub unit: WeightUnit,
}

impl WeightGoal {
    /// `(min, max)` expressed in `unit`
    pub fn range_in(&self, unit: WeightUnit) -> (f64, f64) {
        (
            self.unit.convert(self.min_weight, unit),
            self.unit.convert(self.max_weight, unit),
        )
    }
}
