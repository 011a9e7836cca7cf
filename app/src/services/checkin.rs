//! Daily check-in service
//!
//! Provides business logic for the daily questionnaire including:
//! - Submitting a day's answers (one record per cat per day)
//! - Streaks, score history and tips
//! - The per-cat overview shown by `happy-kitty today`

use crate::error::{AppError, AppResult};
use crate::repositories::RecordRepository;
use crate::services::weight::WeightService;
use chrono::NaiveDate;
use happy_kitty_shared::history::{score_series, ScorePoint};
use happy_kitty_shared::questionnaire::AnswerSheet;
use happy_kitty_shared::{
    calculate_streak, Cat, HealthRecord, StreakSummary, TipReport, WeightStatus,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// Everything worth knowing about a cat today
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatOverview {
    pub cat: Cat,
    pub today: Option<HealthRecord>,
    pub streak: StreakSummary,
    pub weight_status: WeightStatus,
}

/// Daily check-in service
pub struct CheckInService;

impl CheckInService {
    /// Score and store a completed questionnaire for `date`
    ///
    /// An earlier submission for the same day is replaced.
    pub fn submit(
        repo: &mut dyn RecordRepository,
        cat_id: Uuid,
        date: NaiveDate,
        sheet: &AnswerSheet,
    ) -> AppResult<HealthRecord> {
        ensure_cat(repo, cat_id)?;
        let answers = sheet.finalize()?;
        let record = HealthRecord::new(cat_id, date, answers);

        repo.save_health_record(record.clone())
            .map_err(AppError::Internal)?;

        info!(
            cat_id = %cat_id,
            date = %date,
            percentage = record.percentage,
            status = %record.status,
            "Daily check recorded"
        );
        Ok(record)
    }

    pub fn record_for(
        repo: &dyn RecordRepository,
        cat_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<HealthRecord>> {
        repo.health_record(cat_id, date).map_err(AppError::Internal)
    }

    /// All records, newest first
    pub fn records(repo: &dyn RecordRepository, cat_id: Uuid) -> AppResult<Vec<HealthRecord>> {
        repo.health_records(cat_id).map_err(AppError::Internal)
    }

    /// Chart points for the most recent `days` records, oldest first
    pub fn history(
        repo: &dyn RecordRepository,
        cat_id: Uuid,
        days: usize,
    ) -> AppResult<Vec<ScorePoint>> {
        Ok(score_series(&Self::records(repo, cat_id)?, days))
    }

    pub fn streak(
        repo: &dyn RecordRepository,
        cat_id: Uuid,
        today: NaiveDate,
    ) -> AppResult<StreakSummary> {
        let records = Self::records(repo, cat_id)?;
        Ok(calculate_streak(records.iter().map(|r| r.date), today))
    }

    /// Tips for the given day. Pending until that day has been checked in.
    pub fn tips(
        repo: &dyn RecordRepository,
        cat_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<TipReport> {
        Ok(match Self::record_for(repo, cat_id, date)? {
            Some(record) => TipReport::from_answers(&record.answers),
            None => TipReport::Pending,
        })
    }

    pub fn overview(
        repo: &dyn RecordRepository,
        cat: Cat,
        today: NaiveDate,
    ) -> AppResult<CatOverview> {
        Ok(CatOverview {
            today: Self::record_for(repo, cat.id, today)?,
            streak: Self::streak(repo, cat.id, today)?,
            weight_status: WeightService::status(repo, cat.id)?,
            cat,
        })
    }
}

fn ensure_cat(repo: &dyn RecordRepository, cat_id: Uuid) -> AppResult<()> {
    match repo.get_cat(cat_id).map_err(AppError::Internal)? {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound(format!("Cat {}", cat_id))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryRepository;
    use happy_kitty_shared::questionnaire::QUESTIONS;
    use happy_kitty_shared::{HealthCategory, HealthStatus};

    fn setup() -> (InMemoryRepository, Cat) {
        let mut repo = InMemoryRepository::new();
        let cat = Cat::new("Pumpkin", None);
        repo.save_cat(cat.clone()).unwrap();
        (repo, cat)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
    }

    /// Every question answered with its first option
    fn first_options() -> AnswerSheet {
        let mut sheet = AnswerSheet::new();
        for question in &QUESTIONS {
            sheet.set(question.category, question.options[0].code);
        }
        sheet
    }

    #[test]
    fn test_incomplete_sheet_is_rejected() {
        let (mut repo, cat) = setup();
        let mut sheet = AnswerSheet::new();
        sheet.set(HealthCategory::Eating, "2-3");

        let err = CheckInService::submit(&mut repo, cat.id, day(1), &sheet).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(CheckInService::records(&repo, cat.id).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_cat_is_rejected() {
        let (mut repo, _) = setup();
        let err = CheckInService::submit(&mut repo, Uuid::new_v4(), day(1), &first_options())
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_resubmitting_replaces_the_day() {
        let (mut repo, cat) = setup();
        let first = CheckInService::submit(&mut repo, cat.id, day(1), &first_options()).unwrap();

        let mut better = first_options();
        better.set(HealthCategory::Eating, "2-3");
        let second = CheckInService::submit(&mut repo, cat.id, day(1), &better).unwrap();

        let records = CheckInService::records(&repo, cat.id).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].score, second.score);
        assert!(second.score > first.score);
    }

    #[test]
    fn test_tips_pending_until_checked_in() {
        let (mut repo, cat) = setup();
        assert_eq!(CheckInService::tips(&repo, cat.id, day(2)).unwrap(), TipReport::Pending);

        // first options: eating "0", water "very-little", pee "0-1", ...
        CheckInService::submit(&mut repo, cat.id, day(2), &first_options()).unwrap();
        let report = CheckInService::tips(&repo, cat.id, day(2)).unwrap();
        let titles: Vec<_> = report.tips().iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["No Eating Today", "Low Water Intake", "Low Urination"]);
    }

    #[test]
    fn test_streak_and_history() {
        let (mut repo, cat) = setup();
        for d in [1, 2, 3, 5, 6] {
            CheckInService::submit(&mut repo, cat.id, day(d), &first_options()).unwrap();
        }

        let streak = CheckInService::streak(&repo, cat.id, day(7)).unwrap();
        assert_eq!(streak.current, 2);
        assert_eq!(streak.longest, 3);
        assert!(streak.needs_check_in());

        let history = CheckInService::history(&repo, cat.id, 3).unwrap();
        let dates: Vec<_> = history.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![day(3), day(5), day(6)]);
    }

    #[test]
    fn test_overview() {
        let (mut repo, cat) = setup();
        let record = CheckInService::submit(&mut repo, cat.id, day(4), &first_options()).unwrap();

        let overview = CheckInService::overview(&repo, cat.clone(), day(4)).unwrap();
        assert_eq!(overview.today.as_ref().map(|r| r.date), Some(day(4)));
        assert_eq!(overview.streak.current, 1);
        assert_eq!(overview.weight_status, WeightStatus::NoGoal);
        // 0 + 3 + 5 + 5 * 10 = 58 -> 73%
        assert_eq!(record.percentage, 73);
        assert_eq!(record.status, HealthStatus::Good);
    }
}
