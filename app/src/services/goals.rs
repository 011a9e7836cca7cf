//! Weight goal service

use crate::error::{AppError, AppResult};
use crate::repositories::RecordRepository;
use happy_kitty_shared::validation::GoalInput;
use happy_kitty_shared::WeightGoal;
use tracing::info;
use uuid::Uuid;

/// Goal service for business logic
pub struct GoalService;

impl GoalService {
    /// Set the healthy range for a cat, replacing any previous goal
    pub fn set_goal(
        repo: &mut dyn RecordRepository,
        cat_id: Uuid,
        input: GoalInput,
    ) -> AppResult<WeightGoal> {
        if repo.get_cat(cat_id).map_err(AppError::Internal)?.is_none() {
            return Err(AppError::NotFound(format!("Cat {}", cat_id)));
        }

        let goal = input.into_goal(cat_id)?;
        repo.save_weight_goal(goal.clone())
            .map_err(AppError::Internal)?;

        info!(
            cat_id = %cat_id,
            min = goal.min_weight,
            max = goal.max_weight,
            unit = %goal.unit,
            "Weight goal set"
        );
        Ok(goal)
    }

    pub fn get_goal(repo: &dyn RecordRepository, cat_id: Uuid) -> AppResult<Option<WeightGoal>> {
        repo.weight_goal(cat_id).map_err(AppError::Internal)
    }

    pub fn clear_goal(repo: &mut dyn RecordRepository, cat_id: Uuid) -> AppResult<()> {
        if !repo.delete_weight_goal(cat_id).map_err(AppError::Internal)? {
            return Err(AppError::NotFound("No weight goal set".to_string()));
        }
        info!(cat_id = %cat_id, "Weight goal cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryRepository;
    use happy_kitty_shared::{Cat, WeightUnit};

    #[test]
    fn test_goal_lifecycle() {
        let mut repo = InMemoryRepository::new();
        let cat = Cat::new("Ziggy", None);
        repo.save_cat(cat.clone()).unwrap();

        let input = GoalInput { min_weight: 8.0, max_weight: 11.0, unit: WeightUnit::Lbs };
        GoalService::set_goal(&mut repo, cat.id, input).unwrap();

        let input = GoalInput { min_weight: 3.5, max_weight: 5.0, unit: WeightUnit::Kg };
        GoalService::set_goal(&mut repo, cat.id, input).unwrap();

        let goal = GoalService::get_goal(&repo, cat.id).unwrap().unwrap();
        assert_eq!(goal.unit, WeightUnit::Kg);
        assert_eq!(goal.max_weight, 5.0);

        GoalService::clear_goal(&mut repo, cat.id).unwrap();
        assert!(GoalService::get_goal(&repo, cat.id).unwrap().is_none());
        assert!(matches!(
            GoalService::clear_goal(&mut repo, cat.id),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_inverted_goal_rejected() {
        let mut repo = InMemoryRepository::new();
        let cat = Cat::new("Ziggy", None);
        repo.save_cat(cat.clone()).unwrap();

        let input = GoalInput { min_weight: 5.0, max_weight: 5.0, unit: WeightUnit::Kg };
        let err = GoalService::set_goal(&mut repo, cat.id, input).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
