//! Vet report derivations
//!
//! Everything a health report needs except its layout: summary statistics,
//! one-line observations per record and the file name.

use crate::models::{HealthAnswers, HealthCategory, HealthRecord, HealthStatus, WeightRecord};
use crate::units::WeightUnit;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

/// Default number of records of each kind included in a report
pub const DEFAULT_MAX_RECORDS: usize = 30;

static UNSAFE_FILE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]").expect("file name pattern is valid"));

/// Answer codes worth calling out in a report, with their short label
const OBSERVATIONS: &[(HealthCategory, &str, &str)] = &[
    (HealthCategory::Eating, "0", "No eating"),
    (HealthCategory::Eating, "1", "Ate once"),
    (HealthCategory::Water, "very-little", "Low water"),
    (HealthCategory::Water, "a-lot", "Excess water"),
    (HealthCategory::Poop, "diarrhea", "Diarrhea"),
    (HealthCategory::Poop, "no-poop", "No stool"),
    (HealthCategory::Activity, "hiding", "Hiding"),
    (HealthCategory::Activity, "lazy", "Lethargic"),
    (HealthCategory::Mood, "depressed", "Depressed"),
    (HealthCategory::Mood, "aggressive", "Aggressive"),
    (HealthCategory::Vomiting, "more-than-once", "Vomiting"),
    (HealthCategory::Appetite, "refusing-food", "Refusing food"),
];

/// One-line summary of notable answers, or `All normal`
pub fn key_observations(answers: &HealthAnswers) -> String {
    let issues: Vec<&str> = OBSERVATIONS
        .iter()
        .filter(|(category, code, _)| answers.answer(*category) == *code)
        .map(|(_, _, label)| *label)
        .collect();

    if issues.is_empty() {
        "All normal".to_string()
    } else {
        issues.join(", ")
    }
}

/// Report file stem: `<name>_health_report_<date>`
pub fn report_file_name(cat_name: &str, date: NaiveDate) -> String {
    let safe = UNSAFE_FILE_CHARS.replace_all(cat_name, "_");
    format!("{}_health_report_{}", safe, date.format("%Y-%m-%d"))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSummary {
    pub average_percentage: u32,
    pub latest_percentage: u32,
    pub record_count: usize,
    pub status_breakdown: BTreeMap<HealthStatus, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightSummary {
    pub unit: WeightUnit,
    pub current: f64,
    pub min: f64,
    pub max: f64,
    pub record_count: usize,
}

/// Summary statistics over the newest records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub health: Option<HealthSummary>,
    pub weight: Option<WeightSummary>,
}

impl ReportSummary {
    /// Summarize at most `max_records` of each kind, newest first
    pub fn build(
        health_records: &[HealthRecord],
        weight_records: &[WeightRecord],
        unit: WeightUnit,
        max_records: usize,
    ) -> Self {
        Self {
            health: summarize_health(&newest(health_records, |r| r.date, max_records)),
            weight: summarize_weight(&newest(weight_records, |r| r.date, max_records), unit),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.health.is_none() && self.weight.is_none()
    }
}

/// The `limit` newest items, newest first
pub fn newest<T>(items: &[T], date: impl Fn(&T) -> NaiveDate, limit: usize) -> Vec<&T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_key(|item| std::cmp::Reverse(date(item)));
    sorted.truncate(limit);
    sorted
}

fn summarize_health(records: &[&HealthRecord]) -> Option<HealthSummary> {
    let latest = records.first()?;
    let total: u32 = records.iter().map(|r| r.percentage).sum();
    let average = (total as f64 / records.len() as f64).round() as u32;

    let mut breakdown = BTreeMap::new();
    for record in records {
        *breakdown.entry(record.status).or_insert(0) += 1;
    }

    Some(HealthSummary {
        average_percentage: average,
        latest_percentage: latest.percentage,
        record_count: records.len(),
        status_breakdown: breakdown,
    })
}

fn summarize_weight(records: &[&WeightRecord], unit: WeightUnit) -> Option<WeightSummary> {
    let current = records.first()?.weight_in(unit);
    let weights: Vec<f64> = records.iter().map(|r| r.weight_in(unit)).collect();

    Some(WeightSummary {
        unit,
        current,
        min: weights.iter().copied().fold(f64::INFINITY, f64::min),
        max: weights.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        record_count: records.len(),
    })
}
