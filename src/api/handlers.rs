//! HTTP request handlers for the chat API

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::api::handler::ChatApiHandler;
use crate::api::models::{
    AnswerResponse, EntityResponse, QuestionRequest, SearchRequest, SearchResponse,
    VersionResponse,
};
use crate::error::AppError;

/// Shared handler state for the chat router
pub type SharedHandler = Arc<dyn ChatApiHandler>;

/// Engine version
#[utoipa::path(
    get,
    path = "/version",
    tag = "Product",
    responses(
        (status = 200, description = "Engine version", body = VersionResponse),
        (status = 503, description = "Engine unavailable", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_version(
    State(handler): State<SharedHandler>,
) -> Result<Json<VersionResponse>, AppError> {
    Ok(Json(handler.get_version().await?))
}

/// Resolved entity by its identifier
#[utoipa::path(
    get,
    path = "/entities/{entity_id}",
    tag = "Entities",
    params(
        ("entity_id" = i64, Path, description = "Entity identifier")
    ),
    responses(
        (status = 200, description = "Resolved entity", body = EntityResponse),
        (status = 502, description = "Engine call failed", body = crate::error::ErrorResponse),
        (status = 503, description = "Engine unavailable", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_entity_by_entity_id(
    State(handler): State<SharedHandler>,
    Path(entity_id): Path<i64>,
) -> Result<Json<EntityResponse>, AppError> {
    info!(entity_id, "Received entity request");
    Ok(Json(handler.get_entity_by_entity_id(entity_id).await?))
}

/// Ask a natural-language question
#[utoipa::path(
    post,
    path = "/questions",
    tag = "Chat",
    request_body = QuestionRequest,
    responses(
        (status = 200, description = "Answer", body = AnswerResponse),
        (status = 501, description = "Not implemented", body = crate::error::ErrorResponse)
    )
)]
pub async fn ask_question(
    State(handler): State<SharedHandler>,
    Json(request): Json<QuestionRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    Ok(Json(handler.ask_question(request).await?))
}

/// Search entities by attributes
#[utoipa::path(
    post,
    path = "/search",
    tag = "Entities",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Search result", body = SearchResponse),
        (status = 501, description = "Not implemented", body = crate::error::ErrorResponse)
    )
)]
pub async fn search_by_attributes(
    State(handler): State<SharedHandler>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    Ok(Json(handler.search_by_attributes(request).await?))
}
