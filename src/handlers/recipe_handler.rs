use std::sync::Arc;

use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::{AppError, StoreStep},
    models::dto::request::{CollectionRequest, ExecuteRecipeInput, RecipeInput},
};

#[post("/api/recipes")]
async fn create_recipe(
    state: web::Data<Arc<AppState>>,
    request: web::Json<RecipeInput>,
) -> Result<HttpResponse, AppError> {
    let recipe = state.recipe_service.create_recipe(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(recipe))
}

#[get("/api/recipes/{id}")]
async fn get_recipe(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let recipe = state.recipe_service.get_recipe(&id).await?;
    Ok(HttpResponse::Ok().json(recipe))
}

#[put("/api/recipes/{id}")]
async fn update_recipe(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    request: web::Json<RecipeInput>,
) -> Result<HttpResponse, AppError> {
    let recipe = state
        .recipe_service
        .update_recipe(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(recipe))
}

#[delete("/api/recipes/{id}")]
async fn archive_recipe(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let recipe = state.recipe_service.archive_recipe(&id).await?;
    Ok(HttpResponse::Ok().json(recipe))
}

#[get("/api/recipes/{id}/preview")]
async fn preview_recipe(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let preview = state.execution_service.preview_recipe(&id).await?;
    Ok(HttpResponse::Ok().json(preview))
}

/// An absent body executes with the recipe defaults.
#[post("/api/recipes/{id}/execute")]
async fn execute_recipe(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    request: Option<web::Json<ExecuteRecipeInput>>,
) -> Result<HttpResponse, AppError> {
    let options = request.map(|r| r.into_inner()).unwrap_or_default().into();
    let result = state.execution_service.execute_recipe(&id, options).await?;
    Ok(HttpResponse::Created().json(result))
}

#[post("/api/collections")]
async fn assemble_collection(
    state: web::Data<Arc<AppState>>,
    request: web::Json<CollectionRequest>,
) -> Result<HttpResponse, AppError> {
    let result = state
        .execution_service
        .assemble_collection(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(result))
}

#[get("/api/sets/{id}")]
async fn get_trivia_set(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let set = state
        .trivia_sets
        .find_by_id(&id)
        .await
        .map_err(|e| e.at_step(StoreStep::SetLoad))?
        .ok_or_else(|| AppError::NotFound(format!("Trivia set with id '{}' not found", id)))?;
    Ok(HttpResponse::Ok().json(set))
}
