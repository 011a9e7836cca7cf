//! Health tip selection
//!
//! Given a day's answers, pick up to three advisory tips for the categories
//! that scored worst. Advisories only exist for non-ideal answer codes; the
//! entries themselves are fixed data.

use crate::models::{HealthAnswers, HealthCategory};
use crate::questionnaire::AnswerSheet;
use crate::scoring::score_for_answer;
use serde::Serialize;
use std::fmt;

/// Maximum number of tips returned
pub const MAX_TIPS: usize = 3;

/// Priority of a tip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        })
    }
}

/// An advisory entry for one non-ideal answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthTip {
    pub category: HealthCategory,
    /// Answer code this advisory applies to
    pub answer: &'static str,
    pub title: &'static str,
    pub urgency: Urgency,
    pub tips: &'static [&'static str],
}

const fn tip(
    category: HealthCategory,
    answer: &'static str,
    title: &'static str,
    urgency: Urgency,
    tips: &'static [&'static str],
) -> HealthTip {
    HealthTip { category, answer, title, urgency, tips }
}

/// Every advisory, grouped by category
pub static HEALTH_TIPS: &[HealthTip] = &[
    tip(HealthCategory::Eating, "0", "No Eating Today", Urgency::High, &[
        "Try warming up their food slightly to enhance aroma",
        "Offer a different protein source (chicken, fish, beef)",
        "Check if food is fresh and hasn't spoiled",
        "If this continues for 24+ hours, consult your vet",
    ]),
    tip(HealthCategory::Eating, "1", "Reduced Appetite", Urgency::Medium, &[
        "Monitor for any other symptoms like lethargy",
        "Try adding a small amount of wet food or broth",
        "Ensure the feeding area is quiet and stress-free",
        "Consider if there have been recent changes in routine",
    ]),
    tip(HealthCategory::Eating, "4+", "Excessive Eating", Urgency::Low, &[
        "Consider portion control with measured meals",
        "Rule out conditions like hyperthyroidism or diabetes",
        "Use puzzle feeders to slow down eating",
        "Ensure they're not eating out of boredom",
    ]),
    tip(HealthCategory::Water, "very-little", "Low Water Intake", Urgency::Medium, &[
        "Try a cat water fountain - many cats prefer running water",
        "Place multiple water bowls around the house",
        "Add water or broth to wet food",
        "Ensure water is fresh and bowls are clean",
    ]),
    tip(HealthCategory::Water, "a-lot", "Increased Thirst", Urgency::Medium, &[
        "Excessive thirst can indicate kidney issues or diabetes",
        "Monitor how often your cat visits the water bowl",
        "Check if the environment is unusually warm",
        "Consider a vet visit if this persists for several days",
    ]),
    tip(HealthCategory::Pee, "0-1", "Low Urination", Urgency::High, &[
        "Ensure your cat has access to clean litter boxes",
        "Watch for signs of straining or discomfort",
        "Encourage water intake with fountains or wet food",
        "Urinary blockage is an emergency - contact vet if no urination in 24h",
    ]),
    tip(HealthCategory::Pee, "5+", "Frequent Urination", Urgency::Medium, &[
        "Could indicate urinary tract infection or diabetes",
        "Check if urine appears normal in color",
        "Note any signs of straining or blood",
        "Schedule a vet appointment for urinalysis",
    ]),
    tip(HealthCategory::Poop, "soft", "Soft Stool", Urgency::Low, &[
        "Temporarily switch to a bland diet (boiled chicken)",
        "Add a small amount of pumpkin puree to food",
        "Ensure food hasn't been changed recently",
        "Probiotics may help restore gut balance",
    ]),
    tip(HealthCategory::Poop, "diarrhea", "Diarrhea", Urgency::High, &[
        "Withhold food for 12 hours, then offer bland diet",
        "Keep your cat hydrated - offer water frequently",
        "Watch for blood or mucus in stool",
        "If diarrhea persists 24+ hours, see a vet",
    ]),
    tip(HealthCategory::Poop, "no-poop", "Constipation", Urgency::Medium, &[
        "Increase water intake with wet food or fountains",
        "Add a teaspoon of pumpkin puree to meals",
        "Ensure adequate exercise and play",
        "Hairball remedies may help if fur ingestion is suspected",
    ]),
    tip(HealthCategory::Activity, "lazy", "Low Activity", Urgency::Low, &[
        "Introduce new interactive toys to spark interest",
        "Schedule regular play sessions (15 mins, 2x daily)",
        "Create vertical spaces for climbing",
        "Rule out pain or illness if lethargy is sudden",
    ]),
    tip(HealthCategory::Activity, "hiding", "Hiding Behavior", Urgency::High, &[
        "Check for new stressors in the environment",
        "Provide safe hiding spots where they feel secure",
        "Look for signs of pain or illness",
        "Sudden hiding often indicates something is wrong - monitor closely",
    ]),
    tip(HealthCategory::Mood, "aggressive", "Aggressive Behavior", Urgency::Medium, &[
        "Identify and remove potential stress triggers",
        "Ensure they have their own safe space",
        "Never punish - redirect behavior with toys",
        "Consider Feliway or calming supplements",
    ]),
    tip(HealthCategory::Mood, "depressed", "Depressed Mood", Urgency::High, &[
        "Spend extra quality time with your cat",
        "Introduce new enrichment activities",
        "Check for any recent changes that may have caused stress",
        "Depression can indicate underlying health issues",
    ]),
    tip(HealthCategory::Vomiting, "once", "Occasional Vomiting", Urgency::Low, &[
        "Monitor for additional episodes",
        "Check if they ate too quickly - try a slow feeder",
        "Hairballs are common - consider hairball remedies",
        "Note what was eaten before vomiting",
    ]),
    tip(HealthCategory::Vomiting, "more-than-once", "Frequent Vomiting", Urgency::High, &[
        "Withhold food for a few hours, then offer small amounts",
        "Check for potential toxins or foreign objects ingested",
        "Monitor for blood in vomit",
        "Multiple vomiting episodes require vet attention",
    ]),
    tip(HealthCategory::Appetite, "less-than-usual", "Decreased Appetite", Urgency::Medium, &[
        "Try different food temperatures and textures",
        "Check for dental issues - pain can reduce appetite",
        "Ensure food bowls are clean and in a quiet location",
        "Stress or changes can temporarily reduce appetite",
    ]),
    tip(HealthCategory::Appetite, "refusing-food", "Refusing Food", Urgency::High, &[
        "Cats refusing food for 24+ hours need vet attention",
        "Try highly palatable foods like tuna or baby food (meat only)",
        "Check for mouth sores or dental pain",
        "This is often a sign of illness - don't wait too long",
    ]),
];

/// The advisory for an exact answer, if one exists
pub fn tip_for(category: HealthCategory, answer: &str) -> Option<&'static HealthTip> {
    HEALTH_TIPS
        .iter()
        .find(|t| t.category == category && t.answer == answer)
}

/// Select up to [`MAX_TIPS`] tips, worst-scoring category first
///
/// Categories are stable-sorted by points, so equal scores keep declaration
/// order. A category contributes only if it scored below 10 and its exact
/// answer has an advisory.
pub fn select_tips(answers: &HealthAnswers) -> Vec<&'static HealthTip> {
    let mut scored: Vec<(HealthCategory, &str, u32)> = answers
        .iter()
        .map(|(category, code)| (category, code, score_for_answer(category, code)))
        .collect();
    scored.sort_by_key(|(_, _, points)| *points);

    scored
        .into_iter()
        .filter(|(_, _, points)| *points < 10)
        .filter_map(|(category, code, _)| tip_for(category, code))
        .take(MAX_TIPS)
        .collect()
}

/// What the UI should show in the tips panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "tips", rename_all = "kebab-case")]
pub enum TipReport {
    /// The questionnaire has not been completed yet
    Pending,
    /// Everything answered, nothing to advise
    AllClear,
    Advice(Vec<&'static HealthTip>),
}

impl TipReport {
    pub fn from_answers(answers: &HealthAnswers) -> Self {
        let tips = select_tips(answers);
        if tips.is_empty() {
            TipReport::AllClear
        } else {
            TipReport::Advice(tips)
        }
    }

    pub fn from_sheet(sheet: &AnswerSheet) -> Self {
        match sheet.finalize() {
            Ok(answers) => Self::from_answers(&answers),
            Err(_) => TipReport::Pending,
        }
    }

    pub fn tips(&self) -> &[&'static HealthTip] {
        match self {
            TipReport::Advice(tips) => tips,
            _ => &[],
        }
    }
}
