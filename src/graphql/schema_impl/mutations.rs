use async_graphql::{Context, ErrorExtensions, Object, Result, ID};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    graphql::helpers::{execution_outcome, parse_id},
    models::{
        domain::{ExecutionResult, Recipe},
        dto::request::{CollectionRequest, ExecuteRecipeInput, IngestTextRequest, RecipeInput},
    },
    services::parse_service::IngestResult,
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_recipe(&self, ctx: &Context<'_>, input: RecipeInput) -> Result<Recipe> {
        let state = ctx.data::<AppState>()?;
        state.recipe_service.create_recipe(input).await.map_err(|e| e.extend())
    }

    async fn update_recipe(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: RecipeInput,
    ) -> Result<Recipe> {
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&id).map_err(|e| e.extend())?;
        state
            .recipe_service
            .update_recipe(&id, input)
            .await
            .map_err(|e| e.extend())
    }

    async fn archive_recipe(&self, ctx: &Context<'_>, id: ID) -> Result<Recipe> {
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&id).map_err(|e| e.extend())?;
        state.recipe_service.archive_recipe(&id).await.map_err(|e| e.extend())
    }

    async fn execute_recipe(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: Option<ExecuteRecipeInput>,
    ) -> Result<ExecutionResult> {
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&id).map_err(|e| e.extend())?;
        let options = input.unwrap_or_default().into();
        execution_outcome(state.execution_service.execute_recipe(&id, options).await)
    }

    async fn assemble_collection(
        &self,
        ctx: &Context<'_>,
        input: CollectionRequest,
    ) -> Result<ExecutionResult> {
        let state = ctx.data::<AppState>()?;
        execution_outcome(state.execution_service.assemble_collection(input).await)
    }

    async fn ingest_text(&self, ctx: &Context<'_>, input: IngestTextRequest) -> Result<IngestResult> {
        let state = ctx.data::<AppState>()?;
        input
            .validate()
            .map_err(|e| AppError::from(e).extend())?;
        state
            .parse_service
            .ingest(&input.raw_text, &input.category)
            .await
            .map_err(|e| e.extend())
    }
}
