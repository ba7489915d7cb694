use std::sync::Arc;

use chrono::Utc;

use crate::{
    errors::{AppError, AppResult, StoreStep},
    models::{domain::Recipe, dto::request::RecipeInput},
    repositories::RecipeRepository,
    services::recipe_validation::validate_recipe_input,
};

pub struct RecipeService {
    repository: Arc<dyn RecipeRepository>,
}

impl RecipeService {
    pub fn new(repository: Arc<dyn RecipeRepository>) -> Self {
        Self { repository }
    }

    /// Archived recipes are reported as not found.
    pub async fn get_recipe(&self, id: &str) -> AppResult<Recipe> {
        load_active_recipe(self.repository.as_ref(), id).await
    }

    pub async fn create_recipe(&self, input: RecipeInput) -> AppResult<Recipe> {
        let draft = validate_recipe_input(&input)?;
        let recipe = Recipe::new(draft);

        let recipe = self
            .repository
            .create(recipe)
            .await
            .map_err(|e| e.at_step(StoreStep::RecipeSave))?;
        log::info!("Created recipe '{}' ({})", recipe.name, recipe.id);
        Ok(recipe)
    }

    pub async fn update_recipe(&self, id: &str, input: RecipeInput) -> AppResult<Recipe> {
        let draft = validate_recipe_input(&input)?;
        let mut recipe = load_active_recipe(self.repository.as_ref(), id).await?;
        recipe.apply_draft(draft);

        self.repository
            .update(recipe)
            .await
            .map_err(|e| e.at_step(StoreStep::RecipeSave))
    }

    /// Soft delete: past trivia sets keep referencing the recipe.
    pub async fn archive_recipe(&self, id: &str) -> AppResult<Recipe> {
        let mut recipe = load_active_recipe(self.repository.as_ref(), id).await?;
        let now = Utc::now();
        recipe.deleted_at = Some(now);
        recipe.modified_at = Some(now);

        let recipe = self
            .repository
            .update(recipe)
            .await
            .map_err(|e| e.at_step(StoreStep::RecipeSave))?;
        log::info!("Archived recipe '{}' ({})", recipe.name, recipe.id);
        Ok(recipe)
    }
}

pub(crate) async fn load_active_recipe(
    repository: &dyn RecipeRepository,
    id: &str,
) -> AppResult<Recipe> {
    let recipe = repository
        .load_recipe(id)
        .await
        .map_err(|e| e.at_step(StoreStep::RecipeLoad))?
        .filter(|recipe| !recipe.is_archived())
        .ok_or_else(|| AppError::NotFound(format!("Recipe with id '{}' not found", id)))?;
    Ok(recipe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::domain::{QuantityRange, QuestionType},
        repositories::recipe_repository::MockRecipeRepository,
        test_utils::fixtures::{players_recipe, recipe_input},
    };

    #[tokio::test]
    async fn create_rejects_invalid_input_without_store_access() {
        let mut repo = MockRecipeRepository::new();
        repo.expect_create().never();

        let mut input = recipe_input();
        input.quantity = QuantityRange { min: 9, max: 3, default: 5 };

        let service = RecipeService::new(Arc::new(repo));
        let err = service.create_recipe(input).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidFields(fields) if fields.has_field("quantity.max")));
    }

    #[tokio::test]
    async fn create_derives_bag_type() {
        let mut repo = MockRecipeRepository::new();
        repo.expect_create().times(1).returning(Ok);

        let mut input = recipe_input();
        input.question_types = vec![QuestionType::TrueFalse];

        let service = RecipeService::new(Arc::new(repo));
        let recipe = service.create_recipe(input).await.expect("create should succeed");
        assert_eq!(recipe.bag_type, crate::models::domain::BagType::CategoryBoundTf);
    }

    #[tokio::test]
    async fn missing_recipe_is_not_found() {
        let mut repo = MockRecipeRepository::new();
        repo.expect_load_recipe().returning(|_| Ok(None));

        let service = RecipeService::new(Arc::new(repo));
        let err = service.get_recipe("nope").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn archive_sets_deleted_at_and_hides_recipe() {
        let recipe = players_recipe();
        let id = recipe.id.clone();

        let mut repo = MockRecipeRepository::new();
        let stored = recipe.clone();
        repo.expect_load_recipe()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_update()
            .withf(|r| r.deleted_at.is_some())
            .times(1)
            .returning(Ok);

        let service = RecipeService::new(Arc::new(repo));
        let archived = service.archive_recipe(&id).await.expect("archive should succeed");
        assert!(archived.is_archived());

        let mut repo = MockRecipeRepository::new();
        repo.expect_load_recipe()
            .returning(move |_| Ok(Some(archived.clone())));
        let service = RecipeService::new(Arc::new(repo));
        assert!(matches!(service.get_recipe(&id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_keeps_usage_stats() {
        let mut recipe = players_recipe();
        recipe.usage_count = 3;
        let id = recipe.id.clone();

        let mut repo = MockRecipeRepository::new();
        repo.expect_load_recipe()
            .returning(move |_| Ok(Some(recipe.clone())));
        repo.expect_update().returning(Ok);

        let mut input = recipe_input();
        input.name = "Renamed".to_string();

        let service = RecipeService::new(Arc::new(repo));
        let updated = service.update_recipe(&id, input).await.expect("update should succeed");
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.usage_count, 3);
        assert_eq!(updated.id, id);
    }
}
