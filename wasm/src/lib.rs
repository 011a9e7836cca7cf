//! Happy Kitty Score WASM Module
//!
//! Browser bindings for the scoring engine. Structured values cross the
//! boundary as JSON strings; errors become JS exceptions.

use chrono::NaiveDate;
use happy_kitty_shared::report;
use happy_kitty_shared::{
    calculate_health as score_answers, calculate_streak as streak_for, evaluate_weight,
    HealthAnswers, TipReport, WeightGoal, WeightRecord, WeightUnit,
};
use serde::Deserialize;
use uuid::Uuid;
use wasm_bindgen::prelude::*;

/// A weight reading without record bookkeeping
#[derive(Debug, Deserialize)]
struct WeightEntry {
    weight: f64,
    unit: WeightUnit,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoalRange {
    min_weight: f64,
    max_weight: f64,
    unit: WeightUnit,
}

fn parse<'a, T: Deserialize<'a>>(json: &'a str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {}: {}", what, e))
}

fn parse_optional<'a, T: Deserialize<'a>>(json: Option<&'a str>, what: &str) -> Result<Option<T>, String> {
    match json.map(str::trim) {
        None | Some("") | Some("null") => Ok(None),
        Some(json) => parse(json, what).map(Some),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn health_json(answers: &str) -> Result<String, String> {
    let answers: HealthAnswers = parse(answers, "answers")?;
    to_json(&score_answers(&answers))
}

fn convert(value: f64, from: &str, to: &str) -> Result<f64, String> {
    let from: WeightUnit = from.parse().map_err(|e: happy_kitty_shared::CoreError| e.to_string())?;
    let to: WeightUnit = to.parse().map_err(|e: happy_kitty_shared::CoreError| e.to_string())?;
    Ok(from.convert(value, to))
}

fn tips_json(answers: &str) -> Result<String, String> {
    let answers: HealthAnswers = parse(answers, "answers")?;
    to_json(&TipReport::from_answers(&answers))
}

fn weight_status_json(latest: Option<&str>, goal: Option<&str>, preferred: &str) -> Result<String, String> {
    let preferred: WeightUnit = preferred.parse().map_err(|e: happy_kitty_shared::CoreError| e.to_string())?;

    let latest = parse_optional::<WeightEntry>(latest, "weight")?.map(|entry| WeightRecord {
        date: NaiveDate::default(),
        cat_id: Uuid::nil(),
        weight: entry.weight,
        unit: entry.unit,
    });
    let goal = parse_optional::<GoalRange>(goal, "goal")?.map(|range| WeightGoal {
        cat_id: Uuid::nil(),
        min_weight: range.min_weight,
        max_weight: range.max_weight,
        unit: range.unit,
    });

    to_json(&evaluate_weight(latest.as_ref(), goal.as_ref(), preferred))
}

fn streak_json(dates: &str, today: &str) -> Result<String, String> {
    let dates: Vec<NaiveDate> = parse(dates, "dates")?;
    let today: NaiveDate = today
        .parse()
        .map_err(|e| format!("Invalid date '{}': {}", today, e))?;
    to_json(&streak_for(dates, today))
}

fn observations(answers: &str) -> Result<String, String> {
    let answers: HealthAnswers = parse(answers, "answers")?;
    Ok(report::key_observations(&answers))
}

fn js_err(message: String) -> JsValue {
    JsValue::from_str(&message)
}

/// Score a day's answers. Returns `{score, percentage, status}` as JSON.
#[wasm_bindgen(js_name = calculateHealth)]
pub fn calculate_health(answers_json: &str) -> Result<String, JsValue> {
    health_json(answers_json).map_err(js_err)
}

/// Convert a weight between `kg` and `lbs`
#[wasm_bindgen(js_name = convertWeight)]
pub fn convert_weight(value: f64, from: &str, to: &str) -> Result<f64, JsValue> {
    convert(value, from, to).map_err(js_err)
}

/// Up to three tips for the worst answers of a day
#[wasm_bindgen(js_name = healthTips)]
pub fn health_tips(answers_json: &str) -> Result<String, JsValue> {
    tips_json(answers_json).map_err(js_err)
}

/// Latest weight (`{weight, unit}`) against a goal (`{minWeight, maxWeight, unit}`)
#[wasm_bindgen(js_name = weightStatus)]
pub fn weight_status(
    latest_json: Option<String>,
    goal_json: Option<String>,
    preferred_unit: &str,
) -> Result<String, JsValue> {
    weight_status_json(latest_json.as_deref(), goal_json.as_deref(), preferred_unit).map_err(js_err)
}

/// Streak summary from a JSON array of `YYYY-MM-DD` check-in dates
#[wasm_bindgen(js_name = calculateStreak)]
pub fn calculate_streak(dates_json: &str, today: &str) -> Result<String, JsValue> {
    streak_json(dates_json, today).map_err(js_err)
}

#[wasm_bindgen(js_name = keyObservations)]
pub fn key_observations(answers_json: &str) -> Result<String, JsValue> {
    observations(answers_json).map_err(js_err)
}
