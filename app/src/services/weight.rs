//! Weight tracking service
//!
//! Provides business logic for weight tracking including:
//! - Weight logging (one entry per cat per day)
//! - Trend over the logged history
//! - Status against the cat's goal range
//!
//! Logging a weight also makes its unit the preferred display unit.

use crate::error::{AppError, AppResult};
use crate::repositories::RecordRepository;
use chrono::NaiveDate;
use happy_kitty_shared::history::{weight_trend, WeightTrend};
use happy_kitty_shared::validation::LogWeightInput;
use happy_kitty_shared::{evaluate_weight, WeightRecord, WeightStatus, WeightUnit};
use tracing::info;
use uuid::Uuid;

/// Weight service for business logic
pub struct WeightService;

impl WeightService {
    /// Log a weight entry, replacing any entry for the same day
    pub fn log_weight(
        repo: &mut dyn RecordRepository,
        cat_id: Uuid,
        input: LogWeightInput,
    ) -> AppResult<WeightRecord> {
        if repo.get_cat(cat_id).map_err(AppError::Internal)?.is_none() {
            return Err(AppError::NotFound(format!("Cat {}", cat_id)));
        }

        let record = input.into_record(cat_id)?;
        repo.save_weight_record(record.clone())
            .map_err(AppError::Internal)?;
        repo.set_preferred_unit(record.unit)
            .map_err(AppError::Internal)?;

        info!(
            cat_id = %cat_id,
            date = %record.date,
            weight = record.weight,
            unit = %record.unit,
            "Weight logged"
        );
        Ok(record)
    }

    pub fn delete_weight(
        repo: &mut dyn RecordRepository,
        cat_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<()> {
        if !repo
            .delete_weight_record(cat_id, date)
            .map_err(AppError::Internal)?
        {
            return Err(AppError::NotFound(format!("No weight logged on {}", date)));
        }
        Ok(())
    }

    /// All entries, newest first
    pub fn list(repo: &dyn RecordRepository, cat_id: Uuid) -> AppResult<Vec<WeightRecord>> {
        repo.weight_records(cat_id).map_err(AppError::Internal)
    }

    pub fn preferred_unit(repo: &dyn RecordRepository) -> AppResult<WeightUnit> {
        repo.preferred_unit().map_err(AppError::Internal)
    }

    pub fn set_preferred_unit(repo: &mut dyn RecordRepository, unit: WeightUnit) -> AppResult<()> {
        repo.set_preferred_unit(unit).map_err(AppError::Internal)
    }

    /// Latest weight against the goal, in the preferred unit
    pub fn status(repo: &dyn RecordRepository, cat_id: Uuid) -> AppResult<WeightStatus> {
        let latest = repo.latest_weight(cat_id).map_err(AppError::Internal)?;
        let goal = repo.weight_goal(cat_id).map_err(AppError::Internal)?;
        let unit = Self::preferred_unit(repo)?;

        Ok(evaluate_weight(latest.as_ref(), goal.as_ref(), unit))
    }

    pub fn trend(repo: &dyn RecordRepository, cat_id: Uuid) -> AppResult<Option<WeightTrend>> {
        let records = Self::list(repo, cat_id)?;
        Ok(weight_trend(&records, Self::preferred_unit(repo)?))
    }
}
