//! Chat API route definitions and OpenAPI document

use axum::{
    routing::{get, post},
    Router,
};
use utoipa::openapi::server::Server;
use utoipa::OpenApi;

use crate::api::handlers::{self, SharedHandler};
use crate::api::models::*;
use crate::error::{AppError, ErrorResponse, Result};

/// Placeholder substituted with the request host when the document is served
pub const REQUEST_HOST_PLACEHOLDER: &str = "{{ request_host }}";

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Senzing Chat API",
        version = "0.1.0",
        description = "Conversational access to entity-resolution results.",
        license(name = "Apache-2.0"),
    ),
    paths(
        handlers::get_version,
        handlers::get_entity_by_entity_id,
        handlers::ask_question,
        handlers::search_by_attributes,
    ),
    components(schemas(
        VersionResponse,
        EntityResponse,
        QuestionRequest,
        AnswerResponse,
        SearchRequest,
        SearchResponse,
        ErrorResponse,
    )),
    tags(
        (name = "Chat", description = "Question answering"),
        (name = "Entities", description = "Resolved entities"),
        (name = "Product", description = "Engine product information"),
    )
)]
pub struct ApiDoc;

/// Chat API router; paths are relative to the mount point
pub fn chat_router(handler: SharedHandler) -> Router {
    Router::new()
        .route("/version", get(handlers::get_version))
        .route("/entities/:entity_id", get(handlers::get_entity_by_entity_id))
        .route("/questions", post(handlers::ask_question))
        .route("/search", post(handlers::search_by_attributes))
        .with_state(handler)
}

/// OpenAPI document as a template whose server URL points at the
/// requesting host
pub fn openapi_template(chat_prefix: &str) -> Result<String> {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(format!(
        "http://{}/{}",
        REQUEST_HOST_PLACEHOLDER, chat_prefix
    ))]);
    doc.to_pretty_json()
        .map_err(|e| AppError::Internal(format!("Failed to serialize OpenAPI document: {}", e)))
}
