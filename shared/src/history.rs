//! History views: score chart series and weight trend

use crate::models::{HealthRecord, HealthStatus, WeightRecord};
use crate::units::{round_to_tenth, WeightUnit};
use chrono::NaiveDate;
use serde::Serialize;

/// Number of recent weight entries averaged in [`WeightTrend::recent_average`]
pub const TREND_WINDOW: usize = 7;

/// One point of the score chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScorePoint {
    pub date: NaiveDate,
    pub percentage: u32,
    pub status: HealthStatus,
}

/// The most recent `limit` records as chart points, oldest first
pub fn score_series(records: &[HealthRecord], limit: usize) -> Vec<ScorePoint> {
    let mut points: Vec<ScorePoint> = records
        .iter()
        .map(|r| ScorePoint {
            date: r.date,
            percentage: r.percentage,
            status: r.status,
        })
        .collect();
    points.sort_by(|a, b| b.date.cmp(&a.date));
    points.truncate(limit);
    points.reverse();
    points
}

/// Weight movement over the logged history
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightTrend {
    pub unit: WeightUnit,
    pub current: f64,
    pub start: f64,
    /// `current - start`, rounded to one decimal
    pub total_change: f64,
    pub recent_average: f64,
}

/// Summarize weight records in `unit`. `None` when nothing has been logged.
pub fn weight_trend(records: &[WeightRecord], unit: WeightUnit) -> Option<WeightTrend> {
    let mut newest_first: Vec<&WeightRecord> = records.iter().collect();
    newest_first.sort_by(|a, b| b.date.cmp(&a.date));

    let current = newest_first.first()?.weight_in(unit);
    let start = newest_first.last()?.weight_in(unit);

    let recent: Vec<f64> = newest_first
        .iter()
        .take(TREND_WINDOW)
        .map(|r| r.weight_in(unit))
        .collect();
    let recent_average = round_to_tenth(recent.iter().sum::<f64>() / recent.len() as f64);

    Some(WeightTrend {
        unit,
        current,
        start,
        total_change: round_to_tenth(current - start),
        recent_average,
    })
}
