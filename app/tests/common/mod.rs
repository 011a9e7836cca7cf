//! Common test utilities for integration tests
//!
//! Builds an app around an in-memory store or a JSON file in a temp dir.

#![allow(dead_code)]

use chrono::NaiveDate;
use fake::faker::name::en::FirstName;
use fake::Fake;
use happy_kitty_app::config::AppConfig;
use happy_kitty_app::open_repository;
use happy_kitty_app::repositories::RecordRepository;
use happy_kitty_app::services::{CatService, CheckInService};
use happy_kitty_shared::questionnaire::AnswerSheet;
use happy_kitty_shared::validation::NewCat;
use happy_kitty_shared::{Cat, HealthCategory, HealthRecord, WeightUnit};
use std::path::PathBuf;
use tempfile::TempDir;

/// Test application wrapper
pub struct TestApp {
    pub repo: Box<dyn RecordRepository>,
    pub config: AppConfig,
    dir: Option<TempDir>,
}

impl TestApp {
    /// Everything in memory
    pub fn in_memory() -> Self {
        let mut config = AppConfig::default();
        config.storage.in_memory = true;
        let repo = open_repository(&config).expect("Failed to open in-memory store");
        Self { repo, config, dir: None }
    }

    /// JSON file store in a fresh temp dir
    pub fn on_disk() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut config = AppConfig::default();
        config.storage.data_dir = dir.path().join("data");
        let repo = open_repository(&config).expect("Failed to open file store");
        Self { repo, config, dir: Some(dir) }
    }

    /// Same as `on_disk` with a different default unit
    pub fn on_disk_with_unit(unit: WeightUnit) -> Self {
        let mut app = Self::on_disk();
        app.config.units.default_weight_unit = unit;
        app.reopen();
        app
    }

    /// Drop the repository and open the store again from disk
    pub fn reopen(&mut self) {
        self.repo = open_repository(&self.config).expect("Failed to reopen store");
    }

    pub fn store_path(&self) -> PathBuf {
        self.config.storage.path()
    }

    pub fn repo(&mut self) -> &mut dyn RecordRepository {
        self.repo.as_mut()
    }

    /// Add a cat with a generated name; it becomes the selected cat
    pub fn add_cat(&mut self) -> Cat {
        let name: String = FirstName().fake();
        CatService::add(self.repo(), NewCat::new(&name, None)).expect("Failed to add cat")
    }

    pub fn check_in(&mut self, cat_id: uuid::Uuid, date: NaiveDate, sheet: &AnswerSheet) -> HealthRecord {
        CheckInService::submit(self.repo(), cat_id, date, sheet).expect("Failed to submit check")
    }
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// The best answer for every question
pub fn healthy_sheet() -> AnswerSheet {
    sheet_with(&[])
}

/// Healthy answers with some categories replaced
pub fn sheet_with(overrides: &[(HealthCategory, &str)]) -> AnswerSheet {
    let mut sheet = AnswerSheet::new();
    sheet
        .set(HealthCategory::Eating, "2-3")
        .set(HealthCategory::Water, "normal")
        .set(HealthCategory::Pee, "2-4")
        .set(HealthCategory::Poop, "normal")
        .set(HealthCategory::Activity, "very-active")
        .set(HealthCategory::Mood, "playful")
        .set(HealthCategory::Vomiting, "no")
        .set(HealthCategory::Appetite, "normal");
    for (category, code) in overrides {
        sheet.set(*category, *code);
    }
    sheet
}
