use std::sync::Arc;

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::{IngestTextRequest, ParseTextRequest},
        response::ParseResponse,
    },
};

#[post("/api/parse")]
async fn parse_text(
    state: web::Data<Arc<AppState>>,
    request: web::Json<ParseTextRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let outcome = state.parse_service.parse(&request.raw_text);
    Ok(HttpResponse::Ok().json(ParseResponse::from(outcome)))
}

#[post("/api/ingest")]
async fn ingest_text(
    state: web::Data<Arc<AppState>>,
    request: web::Json<IngestTextRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let result = state
        .parse_service
        .ingest(&request.raw_text, &request.category)
        .await?;
    Ok(HttpResponse::Created().json(result))
}
