//! The daily questionnaire
//!
//! One question per [`HealthCategory`]. An [`AnswerSheet`] collects answers as
//! the owner goes through the questions and only becomes [`HealthAnswers`]
//! once every category has been answered.

use crate::errors::{CoreError, CoreResult};
use crate::models::{HealthAnswers, HealthCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One selectable answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    pub code: &'static str,
    pub label: &'static str,
}

/// A question in the daily check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub category: HealthCategory,
    pub prompt: &'static str,
    pub options: &'static [AnswerOption],
}

const fn opt(code: &'static str, label: &'static str) -> AnswerOption {
    AnswerOption { code, label }
}

/// The questions, in the order they are asked
pub static QUESTIONS: [Question; 8] = [
    Question {
        category: HealthCategory::Eating,
        prompt: "How many times did your cat eat today?",
        options: &[
            opt("0", "Didn't eat at all"),
            opt("1", "Once"),
            opt("2-3", "2-3 times (normal)"),
            opt("4+", "4+ times"),
        ],
    },
    Question {
        category: HealthCategory::Water,
        prompt: "How was the water intake today?",
        options: &[
            opt("very-little", "Very little"),
            opt("normal", "Normal amount"),
            opt("a-lot", "More than usual"),
        ],
    },
    Question {
        category: HealthCategory::Pee,
        prompt: "How many times did your cat pee today?",
        options: &[
            opt("0-1", "0-1 times"),
            opt("2-4", "2-4 times (normal)"),
            opt("5+", "5+ times"),
        ],
    },
    Question {
        category: HealthCategory::Poop,
        prompt: "How was the poop condition today?",
        options: &[
            opt("normal", "Normal & healthy"),
            opt("soft", "Soft"),
            opt("diarrhea", "Diarrhea"),
            opt("no-poop", "Didn't poop today"),
        ],
    },
    Question {
        category: HealthCategory::Activity,
        prompt: "What was your cat's activity level?",
        options: &[
            opt("very-active", "Very active & playful"),
            opt("normal", "Normal activity"),
            opt("lazy", "Lazy, sleeping more"),
            opt("hiding", "Hiding or unusual behavior"),
        ],
    },
    Question {
        category: HealthCategory::Mood,
        prompt: "How was your cat's mood today?",
        options: &[
            opt("playful", "Playful & happy"),
            opt("normal", "Normal"),
            opt("aggressive", "Aggressive or irritable"),
            opt("depressed", "Depressed or withdrawn"),
        ],
    },
    Question {
        category: HealthCategory::Vomiting,
        prompt: "Any vomiting today?",
        options: &[
            opt("no", "No vomiting"),
            opt("once", "Once"),
            opt("more-than-once", "More than once"),
        ],
    },
    Question {
        category: HealthCategory::Appetite,
        prompt: "How was the appetite compared to usual?",
        options: &[
            opt("normal", "Normal appetite"),
            opt("less-than-usual", "Less than usual"),
            opt("refusing-food", "Refusing food"),
        ],
    },
];

/// The question for a category
pub fn question(category: HealthCategory) -> &'static Question {
    // QUESTIONS is declared in HealthCategory::ALL order
    &QUESTIONS[HealthCategory::ALL
        .iter()
        .position(|c| *c == category)
        .unwrap_or_default()]
}

/// Answers collected so far
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSheet {
    answers: BTreeMap<HealthCategory, String>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or change) the answer for a category
    pub fn set(&mut self, category: HealthCategory, code: impl Into<String>) -> &mut Self {
        self.answers.insert(category, code.into());
        self
    }

    pub fn get(&self, category: HealthCategory) -> Option<&str> {
        self.answers.get(&category).map(String::as_str)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Categories without an answer, in declaration order
    pub fn missing(&self) -> Vec<HealthCategory> {
        HealthCategory::ALL
            .into_iter()
            .filter(|c| !self.answers.contains_key(c))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.answered_count() == HealthCategory::ALL.len()
    }

    /// Turn a complete sheet into [`HealthAnswers`]
    pub fn finalize(&self) -> CoreResult<HealthAnswers> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(CoreError::IncompleteAnswers(missing));
        }

        let take = |c: HealthCategory| self.get(c).unwrap_or_default().to_string();
        Ok(HealthAnswers {
            eating: take(HealthCategory::Eating),
            water: take(HealthCategory::Water),
            pee: take(HealthCategory::Pee),
            poop: take(HealthCategory::Poop),
            activity: take(HealthCategory::Activity),
            mood: take(HealthCategory::Mood),
            vomiting: take(HealthCategory::Vomiting),
            appetite: take(HealthCategory::Appetite),
        })
    }
}

impl From<&HealthAnswers> for AnswerSheet {
    fn from(answers: &HealthAnswers) -> Self {
        let mut sheet = AnswerSheet::new();
        for (category, code) in answers.iter() {
            sheet.set(category, code);
        }
        sheet
    }
}
