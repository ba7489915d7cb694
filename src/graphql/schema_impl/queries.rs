use async_graphql::{Context, ErrorExtensions, Object, Result, ID};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::{AppError, StoreStep},
    graphql::helpers::parse_id,
    models::{
        domain::{PreviewResult, Recipe, TriviaSet},
        dto::{request::ParseTextRequest, response::ParseResponse},
    },
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn recipe(&self, ctx: &Context<'_>, id: ID) -> Result<Recipe> {
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&id).map_err(|e| e.extend())?;
        state.recipe_service.get_recipe(&id).await.map_err(|e| e.extend())
    }

    async fn preview_recipe(&self, ctx: &Context<'_>, id: ID) -> Result<PreviewResult> {
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&id).map_err(|e| e.extend())?;
        state
            .execution_service
            .preview_recipe(&id)
            .await
            .map_err(|e| e.extend())
    }

    async fn trivia_set(&self, ctx: &Context<'_>, id: ID) -> Result<TriviaSet> {
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&id).map_err(|e| e.extend())?;
        state
            .trivia_sets
            .find_by_id(&id)
            .await
            .map_err(|e| e.at_step(StoreStep::SetLoad).extend())?
            .ok_or_else(|| AppError::NotFound(format!("Trivia set with id '{}' not found", id)).extend())
    }

    /// Dry run of the parser chain; nothing is stored.
    async fn parse_text(&self, ctx: &Context<'_>, input: ParseTextRequest) -> Result<ParseResponse> {
        let state = ctx.data::<AppState>()?;
        input
            .validate()
            .map_err(|e| AppError::from(e).extend())?;
        Ok(state.parse_service.parse(&input.raw_text).into())
    }
}
