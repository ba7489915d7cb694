use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoQuestionRepository, MongoRecipeRepository, MongoTriviaSetRepository,
        QuestionRepository, RecipeRepository, TriviaSetRepository,
    },
    services::{
        parse_service::ParseService, recipe_execution_service::RecipeExecutionService,
        recipe_service::RecipeService, sampler::StratifiedSampler,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub recipe_service: Arc<RecipeService>,
    pub execution_service: Arc<RecipeExecutionService>,
    pub parse_service: Arc<ParseService>,
    pub trivia_sets: Arc<dyn TriviaSetRepository>,
    pub db: Option<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let questions = Arc::new(MongoQuestionRepository::new(&db, &config.questions_collection));
        questions.ensure_indexes().await?;

        let recipes = Arc::new(MongoRecipeRepository::new(&db, &config.recipes_collection));
        recipes.ensure_indexes().await?;

        let sets = Arc::new(MongoTriviaSetRepository::new(&db, &config.trivia_sets_collection));
        sets.ensure_indexes().await?;

        let mut state = Self::from_parts(config, recipes, questions, sets);
        state.db = Some(db);
        Ok(state)
    }

    /// Wires the services over any repository implementations.
    pub fn from_parts(
        config: Config,
        recipes: Arc<dyn RecipeRepository>,
        questions: Arc<dyn QuestionRepository>,
        sets: Arc<dyn TriviaSetRepository>,
    ) -> Self {
        let sampler = StratifiedSampler::from_seed(config.sampler_seed);
        if config.sampler_seed.is_some() {
            log::warn!("Sampler is seeded; selections are reproducible");
        }

        let mut execution_service =
            RecipeExecutionService::new(recipes.clone(), questions.clone(), sets.clone(), sampler);
        if config.serialize_recipe_executions {
            execution_service = execution_service.with_serialized_executions();
        }

        Self {
            recipe_service: Arc::new(RecipeService::new(recipes)),
            execution_service: Arc::new(execution_service),
            parse_service: Arc::new(ParseService::new(questions)),
            trivia_sets: sets,
            db: None,
            config: Arc::new(config),
        }
    }
}
