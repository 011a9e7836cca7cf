//! Daily wellness scoring
//!
//! Every answer code maps to a fixed number of points. The eight per-question
//! points are summed into a score, turned into a percentage of the 80-point
//! ceiling and classified into a [`HealthStatus`] tier.
//!
//! The answer table is data rather than branching so it can be audited and
//! walked pair by pair in tests.

use crate::models::{HealthAnswers, HealthCategory, HealthStatus};
use serde::{Deserialize, Serialize};

/// Denominator for the percentage
///
/// This is a literal rather than `categories * max points`: widening the
/// answer table will not silently rescale stored percentages.
pub const MAX_SCORE: u32 = 80;

/// Points awarded per answer code, per category
pub static ANSWER_POINTS: [(HealthCategory, &[(&str, u32)]); 8] = [
    (
        HealthCategory::Eating,
        &[("0", 0), ("1", 5), ("2-3", 10), ("4+", 8)],
    ),
    (
        HealthCategory::Water,
        &[("very-little", 3), ("normal", 10), ("a-lot", 7)],
    ),
    (
        HealthCategory::Pee,
        &[("0-1", 5), ("2-4", 10), ("5+", 6)],
    ),
    (
        HealthCategory::Poop,
        &[("normal", 10), ("soft", 6), ("diarrhea", 2), ("no-poop", 4)],
    ),
    (
        HealthCategory::Activity,
        &[("very-active", 10), ("normal", 10), ("lazy", 5), ("hiding", 2)],
    ),
    (
        HealthCategory::Mood,
        &[("playful", 10), ("normal", 10), ("aggressive", 4), ("depressed", 2)],
    ),
    (
        HealthCategory::Vomiting,
        &[("no", 10), ("once", 5), ("more-than-once", 1)],
    ),
    (
        HealthCategory::Appetite,
        &[("normal", 10), ("less-than-usual", 5), ("refusing-food", 1)],
    ),
];

/// Legal answer codes and their points for one category
pub fn answer_points(category: HealthCategory) -> &'static [(&'static str, u32)] {
    ANSWER_POINTS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, codes)| *codes)
        .unwrap_or(&[])
}

/// Points for one answer. Unknown codes score 0.
pub fn score_for_answer(category: HealthCategory, code: &str) -> u32 {
    answer_points(category)
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

/// Whether `code` is a known answer for `category`
pub fn is_known_answer(category: HealthCategory, code: &str) -> bool {
    answer_points(category).iter().any(|(known, _)| *known == code)
}

/// Result of scoring one day's answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthScore {
    pub score: u32,
    pub percentage: u32,
    pub status: HealthStatus,
}

/// Percentage of [`MAX_SCORE`], rounded to the nearest integer
pub fn score_percentage(score: u32) -> u32 {
    (score as f64 / MAX_SCORE as f64 * 100.0).round() as u32
}

/// Score a day's answers
pub fn calculate_health(answers: &HealthAnswers) -> HealthScore {
    let score: u32 = answers
        .iter()
        .map(|(category, code)| score_for_answer(category, code))
        .sum();
    let percentage = score_percentage(score);

    HealthScore {
        score,
        percentage,
        status: HealthStatus::from_percentage(percentage),
    }
}
