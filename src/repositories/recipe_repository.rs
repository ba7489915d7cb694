use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{Recipe, RecipeUsage},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn load_recipe(&self, id: &str) -> AppResult<Option<Recipe>>;
    async fn create(&self, recipe: Recipe) -> AppResult<Recipe>;
    async fn update(&self, recipe: Recipe) -> AppResult<Recipe>;
    async fn save_recipe_usage(&self, id: &str, usage: RecipeUsage) -> AppResult<()>;
}

pub struct MongoRecipeRepository {
    collection: Collection<Recipe>,
}

impl MongoRecipeRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for recipes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;

        log::info!("Successfully created indexes for recipes collection");
        Ok(())
    }
}

#[async_trait]
impl RecipeRepository for MongoRecipeRepository {
    async fn load_recipe(&self, id: &str) -> AppResult<Option<Recipe>> {
        let recipe = self.collection.find_one(doc! { "id": id }).await?;
        Ok(recipe)
    }

    async fn create(&self, recipe: Recipe) -> AppResult<Recipe> {
        self.collection.insert_one(&recipe).await?;
        Ok(recipe)
    }

    async fn update(&self, recipe: Recipe) -> AppResult<Recipe> {
        let result = self
            .collection
            .replace_one(doc! { "id": &recipe.id }, &recipe)
            .await?;
        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Recipe with id '{}' not found",
                recipe.id
            )));
        }
        Ok(recipe)
    }

    async fn save_recipe_usage(&self, id: &str, usage: RecipeUsage) -> AppResult<()> {
        let last_used_at = to_bson(&usage.last_used_at)?;
        self.collection
            .update_one(
                doc! { "id": id },
                doc! { "$set": {
                    "usage_count": i64::from(usage.usage_count),
                    "last_used_at": last_used_at,
                } },
            )
            .await?;
        Ok(())
    }
}
