#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use trivia_assembly_server::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{
        CandidateFilter, CandidateRecord, Cooldown, ExecutionMode, QuantityRange, QuestionType,
        Recipe, RecipeDraft, RecipeUsage, TriviaSet,
    },
    repositories::{QuestionRepository, RecipeRepository, TriviaSetRepository},
};

#[derive(Default)]
pub struct InMemoryQuestionRepository {
    pub records: Arc<RwLock<HashMap<String, CandidateRecord>>>,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, records: Vec<CandidateRecord>) {
        let mut stored = self.records.write().await;
        for record in records {
            stored.insert(record.id.clone(), record);
        }
    }

    pub async fn usage_of(&self, id: &str) -> usize {
        let stored = self.records.read().await;
        stored
            .get(id)
            .map(|r| r.last_used_timestamps.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn query(&self, filter: &CandidateFilter) -> AppResult<Vec<CandidateRecord>> {
        let stored = self.records.read().await;
        let mut items: Vec<CandidateRecord> = stored
            .values()
            .filter(|r| {
                r.category == filter.category && filter.question_types.contains(&r.question_type)
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }

    async fn get_usage_history(
        &self,
        ids: &[String],
    ) -> AppResult<HashMap<String, Vec<DateTime<Utc>>>> {
        let stored = self.records.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| {
                stored
                    .get(id)
                    .map(|r| (id.clone(), r.last_used_timestamps.clone()))
            })
            .collect())
    }

    async fn append_usage(&self, ids: &[String], timestamp: DateTime<Utc>) -> AppResult<()> {
        let mut stored = self.records.write().await;
        for id in ids {
            if let Some(record) = stored.get_mut(id) {
                record.last_used_timestamps.push(timestamp);
            }
        }
        Ok(())
    }

    async fn insert_many(&self, records: Vec<CandidateRecord>) -> AppResult<Vec<String>> {
        let mut stored = self.records.write().await;
        let mut ids = Vec::with_capacity(records.len());
        for record in records {
            ids.push(record.id.clone());
            stored.insert(record.id.clone(), record);
        }
        Ok(ids)
    }
}

#[derive(Default)]
pub struct InMemoryRecipeRepository {
    pub recipes: Arc<RwLock<HashMap<String, Recipe>>>,
}

impl InMemoryRecipeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn load_recipe(&self, id: &str) -> AppResult<Option<Recipe>> {
        let recipes = self.recipes.read().await;
        Ok(recipes.get(id).cloned())
    }

    async fn create(&self, recipe: Recipe) -> AppResult<Recipe> {
        let mut recipes = self.recipes.write().await;
        recipes.insert(recipe.id.clone(), recipe.clone());
        Ok(recipe)
    }

    async fn update(&self, recipe: Recipe) -> AppResult<Recipe> {
        let mut recipes = self.recipes.write().await;
        if !recipes.contains_key(&recipe.id) {
            return Err(AppError::NotFound(format!(
                "Recipe with id '{}' not found",
                recipe.id
            )));
        }
        recipes.insert(recipe.id.clone(), recipe.clone());
        Ok(recipe)
    }

    async fn save_recipe_usage(&self, id: &str, usage: RecipeUsage) -> AppResult<()> {
        let mut recipes = self.recipes.write().await;
        if let Some(recipe) = recipes.get_mut(id) {
            recipe.usage_count = usage.usage_count;
            recipe.last_used_at = Some(usage.last_used_at);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryTriviaSetRepository {
    pub sets: Arc<RwLock<HashMap<String, TriviaSet>>>,
}

impl InMemoryTriviaSetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.sets.read().await.len()
    }
}

#[async_trait]
impl TriviaSetRepository for InMemoryTriviaSetRepository {
    async fn create_set(&self, set: TriviaSet) -> AppResult<String> {
        let mut sets = self.sets.write().await;
        let id = set.id.clone();
        sets.insert(id.clone(), set);
        Ok(id)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<TriviaSet>> {
        let sets = self.sets.read().await;
        Ok(sets.get(id).cloned())
    }
}

pub struct TestStore {
    pub questions: Arc<InMemoryQuestionRepository>,
    pub recipes: Arc<InMemoryRecipeRepository>,
    pub sets: Arc<InMemoryTriviaSetRepository>,
}

impl TestStore {
    pub fn new() -> Self {
        Self {
            questions: Arc::new(InMemoryQuestionRepository::new()),
            recipes: Arc::new(InMemoryRecipeRepository::new()),
            sets: Arc::new(InMemoryTriviaSetRepository::new()),
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState::from_parts(
            test_config(),
            self.recipes.clone(),
            self.questions.clone(),
            self.sets.clone(),
        )
    }

    /// Stores `recipe` directly, bypassing validation.
    pub async fn add_recipe(&self, recipe: Recipe) -> String {
        let id = recipe.id.clone();
        self.recipes.recipes.write().await.insert(id.clone(), recipe);
        id
    }
}

pub fn test_config() -> Config {
    Config {
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "trivia-test".to_string(),
        questions_collection: "questions".to_string(),
        recipes_collection: "recipes".to_string(),
        trivia_sets_collection: "trivia_sets".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 8080,
        sampler_seed: Some(42),
        serialize_recipe_executions: true,
    }
}

pub fn candidate(id: &str, category: &str, question_type: QuestionType) -> CandidateRecord {
    CandidateRecord {
        id: id.to_string(),
        category: category.to_string(),
        question_type,
        tags: vec![],
        last_used_timestamps: vec![],
        question_text: format!("Question {}", id),
        correct_answer: "True".to_string(),
        wrong_answers: vec!["False".to_string()],
        theme: None,
        difficulty: None,
        created_at: None,
    }
}

pub fn candidates(prefix: &str, category: &str, question_type: QuestionType, count: usize) -> Vec<CandidateRecord> {
    (0..count)
        .map(|i| candidate(&format!("{}-{:02}", prefix, i), category, question_type))
        .collect()
}

/// Multiple choice from "Players", quantity 5..=15 defaulting to 10, 7 day cooldown.
pub fn players_recipe() -> Recipe {
    Recipe::new(RecipeDraft {
        name: "Players weekly".to_string(),
        category: "Players".to_string(),
        theme: None,
        question_types: vec![QuestionType::MultipleChoice],
        quantity: QuantityRange { min: 5, max: 15, default: 10 },
        cooldown: Cooldown { enabled: true, days: 7 },
        execution_mode: ExecutionMode::Auto,
    })
}
