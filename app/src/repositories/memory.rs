//! In-memory repository, used for tests and `storage.in_memory`

use super::{RecordRepository, StoreState};
use anyhow::Result;
use chrono::NaiveDate;
use happy_kitty_shared::{Cat, HealthRecord, WeightGoal, WeightRecord, WeightUnit};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    state: StoreState,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: StoreState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }
}

impl RecordRepository for InMemoryRepository {
    fn list_cats(&self) -> Result<Vec<Cat>> {
        Ok(self.state.cats.clone())
    }

    fn get_cat(&self, id: Uuid) -> Result<Option<Cat>> {
        Ok(self.state.cat(id).cloned())
    }

    fn save_cat(&mut self, cat: Cat) -> Result<()> {
        info!(cat_id = %cat.id, name = %cat.name, "Saving cat");
        self.state.upsert_cat(cat);
        Ok(())
    }

    fn delete_cat(&mut self, id: Uuid) -> Result<bool> {
        let removed = self.state.remove_cat(id);
        info!(cat_id = %id, removed, "Deleted cat and its records");
        Ok(removed)
    }

    fn selected_cat(&self) -> Result<Option<Uuid>> {
        Ok(self.state.selected_cat_id)
    }

    fn set_selected_cat(&mut self, id: Option<Uuid>) -> Result<()> {
        self.state.selected_cat_id = id;
        Ok(())
    }

    fn health_records(&self, cat_id: Uuid) -> Result<Vec<HealthRecord>> {
        let records = self.state.health_records_for(cat_id);
        debug!(cat_id = %cat_id, count = records.len(), "Loaded health records");
        Ok(records)
    }

    fn save_health_record(&mut self, record: HealthRecord) -> Result<()> {
        info!(
            cat_id = %record.cat_id,
            date = %record.date,
            score = record.score,
            "Saving health record"
        );
        self.state.upsert_health_record(record);
        Ok(())
    }

    fn weight_records(&self, cat_id: Uuid) -> Result<Vec<WeightRecord>> {
        let records = self.state.weight_records_for(cat_id);
        debug!(cat_id = %cat_id, count = records.len(), "Loaded weight records");
        Ok(records)
    }

    fn save_weight_record(&mut self, record: WeightRecord) -> Result<()> {
        info!(
            cat_id = %record.cat_id,
            date = %record.date,
            weight = record.weight,
            unit = %record.unit,
            "Saving weight record"
        );
        self.state.upsert_weight_record(record);
        Ok(())
    }

    fn delete_weight_record(&mut self, cat_id: Uuid, date: NaiveDate) -> Result<bool> {
        let removed = self.state.remove_weight_record(cat_id, date);
        info!(cat_id = %cat_id, date = %date, removed, "Deleted weight record");
        Ok(removed)
    }

    fn weight_goal(&self, cat_id: Uuid) -> Result<Option<WeightGoal>> {
        Ok(self.state.goal_for(cat_id).cloned())
    }

    fn save_weight_goal(&mut self, goal: WeightGoal) -> Result<()> {
        info!(
            cat_id = %goal.cat_id,
            min = goal.min_weight,
            max = goal.max_weight,
            unit = %goal.unit,
            "Saving weight goal"
        );
        self.state.replace_goal(goal);
        Ok(())
    }

    fn delete_weight_goal(&mut self, cat_id: Uuid) -> Result<bool> {
        let removed = self.state.remove_goal(cat_id);
        info!(cat_id = %cat_id, removed, "Deleted weight goal");
        Ok(removed)
    }

    fn preferred_unit(&self) -> Result<WeightUnit> {
        Ok(self.state.preferred_unit)
    }

    fn set_preferred_unit(&mut self, unit: WeightUnit) -> Result<()> {
        self.state.preferred_unit = unit;
        Ok(())
    }
}
