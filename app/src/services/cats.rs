//! Cat profile service
//!
//! Adding a cat selects it. Deleting one removes everything recorded for it.

use crate::error::{AppError, AppResult};
use crate::repositories::RecordRepository;
use happy_kitty_shared::validation::{validate_cat_update, NewCat};
use happy_kitty_shared::{Cat, CatUpdate};
use tracing::info;
use uuid::Uuid;

/// Cat profile service for business logic
pub struct CatService;

impl CatService {
    /// Add a cat and make it the selected one
    pub fn add(repo: &mut dyn RecordRepository, input: NewCat) -> AppResult<Cat> {
        let cat = input.into_cat()?;
        repo.save_cat(cat.clone()).map_err(AppError::Internal)?;
        repo.set_selected_cat(Some(cat.id))
            .map_err(AppError::Internal)?;

        info!(cat_id = %cat.id, name = %cat.name, "Cat added");
        Ok(cat)
    }

    pub fn list(repo: &dyn RecordRepository) -> AppResult<Vec<Cat>> {
        repo.list_cats().map_err(AppError::Internal)
    }

    pub fn get(repo: &dyn RecordRepository, id: Uuid) -> AppResult<Cat> {
        repo.get_cat(id)
            .map_err(AppError::Internal)?
            .ok_or_else(|| AppError::NotFound(format!("Cat {}", id)))
    }

    /// Patch name and/or photo
    pub fn update(repo: &mut dyn RecordRepository, id: Uuid, update: CatUpdate) -> AppResult<Cat> {
        validate_cat_update(&update)?;
        let mut cat = Self::get(repo, id)?;

        let update = CatUpdate {
            name: update.name.map(|n| n.trim().to_string()),
            photo: update.photo,
        };
        update.apply(&mut cat);
        repo.save_cat(cat.clone()).map_err(AppError::Internal)?;

        info!(cat_id = %cat.id, "Cat profile updated");
        Ok(cat)
    }

    /// Delete a cat with all of its health records, weight records and goal
    pub fn delete(repo: &mut dyn RecordRepository, id: Uuid) -> AppResult<()> {
        if !repo.delete_cat(id).map_err(AppError::Internal)? {
            return Err(AppError::NotFound(format!("Cat {}", id)));
        }
        Ok(())
    }

    pub fn select(repo: &mut dyn RecordRepository, id: Uuid) -> AppResult<Cat> {
        let cat = Self::get(repo, id)?;
        repo.set_selected_cat(Some(cat.id))
            .map_err(AppError::Internal)?;
        Ok(cat)
    }

    /// The cat a command applies to: the explicit one, else the selected one
    pub fn resolve(repo: &dyn RecordRepository, explicit: Option<Uuid>) -> AppResult<Cat> {
        let id = match explicit {
            Some(id) => id,
            None => repo
                .selected_cat()
                .map_err(AppError::Internal)?
                .ok_or_else(|| {
                    AppError::NotFound("No cat selected. Add one or pass --cat".to_string())
                })?,
        };
        Self::get(repo, id)
    }
}
