//! JSON file repository
//!
//! Keeps the whole store in memory and rewrites the file after every
//! mutation. A mutation is applied to a copy of the store; the copy is
//! written to a sibling temp file, renamed over the old one, and only then
//! replaces the in-memory state. A failed write leaves both memory and the
//! previous file unchanged. Mutations that change nothing skip the write.
//!
//! A missing file is an empty store. So is a file that cannot be parsed: it
//! is logged and left alone until the next write replaces it.

use super::{InMemoryRepository, RecordRepository, StoreState};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use happy_kitty_shared::{Cat, HealthRecord, WeightGoal, WeightRecord, WeightUnit};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

pub struct JsonFileRepository {
    path: PathBuf,
    inner: InMemoryRepository,
}

impl JsonFileRepository {
    /// Open (or start) the store at `path`
    ///
    /// `default_unit` is the preferred unit of a brand new store.
    pub fn open(path: impl Into<PathBuf>, default_unit: WeightUnit) -> Result<Self> {
        let path = path.into();
        let state = load_state(&path, default_unit)?;
        info!(
            path = %path.display(),
            cats = state.cats.len(),
            health_records = state.health_records.len(),
            "Opened record store"
        );
        Ok(Self {
            path,
            inner: InMemoryRepository::with_state(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy of the store and keep it once it is on disk
    fn commit<T>(&mut self, change: impl FnOnce(&mut InMemoryRepository) -> Result<T>) -> Result<T> {
        let mut next = self.inner.clone();
        let outcome = change(&mut next)?;
        if next.state() != self.inner.state() {
            self.persist(next.state())?;
            self.inner = next;
        }
        Ok(outcome)
    }

    fn persist(&self, state: &StoreState) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        let json = serde_json::to_string_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        debug!(path = %self.path.display(), "Record store written");
        Ok(())
    }
}

fn load_state(path: &Path, default_unit: WeightUnit) -> Result<StoreState> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "No record store yet, starting empty");
            return Ok(StoreState::with_unit(default_unit));
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    match serde_json::from_str(&content) {
        Ok(state) => Ok(state),
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Record store is corrupt, starting empty"
            );
            Ok(StoreState::with_unit(default_unit))
        }
    }
}

impl RecordRepository for JsonFileRepository {
    fn list_cats(&self) -> Result<Vec<Cat>> {
        self.inner.list_cats()
    }

    fn get_cat(&self, id: Uuid) -> Result<Option<Cat>> {
        self.inner.get_cat(id)
    }

    fn save_cat(&mut self, cat: Cat) -> Result<()> {
        self.commit(|inner| inner.save_cat(cat))
    }

    fn delete_cat(&mut self, id: Uuid) -> Result<bool> {
        self.commit(|inner| inner.delete_cat(id))
    }

    fn selected_cat(&self) -> Result<Option<Uuid>> {
        self.inner.selected_cat()
    }

    fn set_selected_cat(&mut self, id: Option<Uuid>) -> Result<()> {
        self.commit(|inner| inner.set_selected_cat(id))
    }

    fn health_records(&self, cat_id: Uuid) -> Result<Vec<HealthRecord>> {
        self.inner.health_records(cat_id)
    }

    fn save_health_record(&mut self, record: HealthRecord) -> Result<()> {
        self.commit(|inner| inner.save_health_record(record))
    }

    fn weight_records(&self, cat_id: Uuid) -> Result<Vec<WeightRecord>> {
        self.inner.weight_records(cat_id)
    }

    fn save_weight_record(&mut self, record: WeightRecord) -> Result<()> {
        self.commit(|inner| inner.save_weight_record(record))
    }

    fn delete_weight_record(&mut self, cat_id: Uuid, date: NaiveDate) -> Result<bool> {
        self.commit(|inner| inner.delete_weight_record(cat_id, date))
    }

    fn weight_goal(&self, cat_id: Uuid) -> Result<Option<WeightGoal>> {
        self.inner.weight_goal(cat_id)
    }

    fn save_weight_goal(&mut self, goal: WeightGoal) -> Result<()> {
        self.commit(|inner| inner.save_weight_goal(goal))
    }

    fn delete_weight_goal(&mut self, cat_id: Uuid) -> Result<bool> {
        self.commit(|inner| inner.delete_weight_goal(cat_id))
    }

    fn preferred_unit(&self) -> Result<WeightUnit> {
        self.inner.preferred_unit()
    }

    fn set_preferred_unit(&mut self, unit: WeightUnit) -> Result<()> {
        self.commit(|inner| inner.set_preferred_unit(unit))
    }
}
