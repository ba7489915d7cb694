use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{CandidateFilter, CandidateRecord},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn query(&self, filter: &CandidateFilter) -> AppResult<Vec<CandidateRecord>>;
    async fn get_usage_history(
        &self,
        ids: &[String],
    ) -> AppResult<HashMap<String, Vec<DateTime<Utc>>>>;
    async fn append_usage(&self, ids: &[String], timestamp: DateTime<Utc>) -> AppResult<()>;
    async fn insert_many(&self, records: Vec<CandidateRecord>) -> AppResult<Vec<String>>;
}

pub struct MongoQuestionRepository {
    collection: Collection<CandidateRecord>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for questions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let pool_index = IndexModel::builder()
            .keys(doc! { "category": 1, "question_type": 1 })
            .options(
                IndexOptions::builder()
                    .name("category_question_type".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(pool_index).await?;

        log::info!("Successfully created indexes for questions collection");
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn query(&self, filter: &CandidateFilter) -> AppResult<Vec<CandidateRecord>> {
        let types: Vec<&str> = filter.question_types.iter().map(|t| t.as_str()).collect();
        let cursor = self
            .collection
            .find(doc! {
                "category": &filter.category,
                "question_type": { "$in": types },
            })
            .await?;
        let items: Vec<CandidateRecord> = cursor.try_collect().await?;
        Ok(items)
    }

    async fn get_usage_history(
        &self,
        ids: &[String],
    ) -> AppResult<HashMap<String, Vec<DateTime<Utc>>>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let cursor = self.collection.find(doc! { "id": { "$in": ids } }).await?;
        let items: Vec<CandidateRecord> = cursor.try_collect().await?;
        Ok(items
            .into_iter()
            .map(|record| (record.id, record.last_used_timestamps))
            .collect())
    }

    async fn append_usage(&self, ids: &[String], timestamp: DateTime<Utc>) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let stamp = to_bson(&timestamp)?;
        self.collection
            .update_many(
                doc! { "id": { "$in": ids } },
                doc! { "$push": { "last_used_timestamps": stamp } },
            )
            .await?;
        Ok(())
    }

    async fn insert_many(&self, records: Vec<CandidateRecord>) -> AppResult<Vec<String>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }
        self.collection.insert_many(&records).await?;
        Ok(records.into_iter().map(|r| r.id).collect())
    }
}
