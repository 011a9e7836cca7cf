//! Happy Kitty Score App Library
//!
//! Local persistence, services and configuration around the scoring engine.
//! Exposed as a library for the CLI binary and the integration tests.

pub mod config;
pub mod error;
pub mod repositories;
pub mod services;

use anyhow::Result;
use repositories::{InMemoryRepository, JsonFileRepository, RecordRepository};

/// Open the repository the configuration asks for
pub fn open_repository(config: &config::AppConfig) -> Result<Box<dyn RecordRepository>> {
    if config.storage.in_memory {
        let mut repo = InMemoryRepository::new();
        repo.set_preferred_unit(config.units.default_weight_unit)?;
        return Ok(Box::new(repo));
    }

    Ok(Box::new(JsonFileRepository::open(
        config.storage.path(),
        config.units.default_weight_unit,
    )?))
}
