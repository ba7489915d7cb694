use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::TriviaSet};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TriviaSetRepository: Send + Sync {
    /// Persists the set and returns its id.
    async fn create_set(&self, set: TriviaSet) -> AppResult<String>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<TriviaSet>>;
}

pub struct MongoTriviaSetRepository {
    collection: Collection<TriviaSet>,
}

impl MongoTriviaSetRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for trivia_sets collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let recipe_index = IndexModel::builder()
            .keys(doc! { "recipe_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("recipe_id".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(recipe_index).await?;

        log::info!("Successfully created indexes for trivia_sets collection");
        Ok(())
    }
}

#[async_trait]
impl TriviaSetRepository for MongoTriviaSetRepository {
    async fn create_set(&self, set: TriviaSet) -> AppResult<String> {
        self.collection.insert_one(&set).await?;
        Ok(set.id)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<TriviaSet>> {
        let set = self.collection.find_one(doc! { "id": id }).await?;
        Ok(set)
    }
}
