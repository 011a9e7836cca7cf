//! Record repositories
//!
//! Provides the data access layer. Services only see [`RecordRepository`];
//! which backend is used is decided once, at startup.

pub mod json_file;
pub mod memory;
pub mod store;

use anyhow::Result;
use chrono::NaiveDate;
use happy_kitty_shared::{Cat, HealthRecord, WeightGoal, WeightRecord, WeightUnit};
use uuid::Uuid;

pub use json_file::JsonFileRepository;
pub use memory::InMemoryRepository;
pub use store::StoreState;

/// Persistence for cats, their daily records and settings
///
/// Record lists come back newest first. Saving a health or weight record for
/// a (cat, day) that already has one replaces it.
pub trait RecordRepository {
    fn list_cats(&self) -> Result<Vec<Cat>>;
    fn get_cat(&self, id: Uuid) -> Result<Option<Cat>>;
    /// Insert or replace by id
    fn save_cat(&mut self, cat: Cat) -> Result<()>;
    /// Delete a cat with its records and goal. `false` if it did not exist.
    fn delete_cat(&mut self, id: Uuid) -> Result<bool>;

    fn selected_cat(&self) -> Result<Option<Uuid>>;
    fn set_selected_cat(&mut self, id: Option<Uuid>) -> Result<()>;

    fn health_records(&self, cat_id: Uuid) -> Result<Vec<HealthRecord>>;
    fn save_health_record(&mut self, record: HealthRecord) -> Result<()>;

    fn weight_records(&self, cat_id: Uuid) -> Result<Vec<WeightRecord>>;
    fn save_weight_record(&mut self, record: WeightRecord) -> Result<()>;
    fn delete_weight_record(&mut self, cat_id: Uuid, date: NaiveDate) -> Result<bool>;

    fn weight_goal(&self, cat_id: Uuid) -> Result<Option<WeightGoal>>;
    /// Replaces any existing goal for the cat
    fn save_weight_goal(&mut self, goal: WeightGoal) -> Result<()>;
    fn delete_weight_goal(&mut self, cat_id: Uuid) -> Result<bool>;

    fn preferred_unit(&self) -> Result<WeightUnit>;
    fn set_preferred_unit(&mut self, unit: WeightUnit) -> Result<()>;

    /// The record for one day, if any
    fn health_record(&self, cat_id: Uuid, date: NaiveDate) -> Result<Option<HealthRecord>> {
        Ok(self
            .health_records(cat_id)?
            .into_iter()
            .find(|r| r.date == date))
    }

    /// The newest weight entry, if any
    fn latest_weight(&self, cat_id: Uuid) -> Result<Option<WeightRecord>> {
        Ok(self.weight_records(cat_id)?.into_iter().next())
    }
}
