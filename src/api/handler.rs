//! Chat API handler contract
//!
//! One method per operation in the OpenAPI document. Every method has a
//! default body that reports the operation as not implemented, so an
//! implementation only overrides the operations it supports.

use async_trait::async_trait;

use crate::api::models::{
    AnswerResponse, EntityResponse, QuestionRequest, SearchRequest, SearchResponse,
    VersionResponse,
};
use crate::error::{AppError, Result};

#[async_trait]
pub trait ChatApiHandler: Send + Sync + 'static {
    /// `GET /version`
    async fn get_version(&self) -> Result<VersionResponse> {
        Err(AppError::NotImplemented("getVersion"))
    }

    /// `GET /entities/{entity_id}`
    async fn get_entity_by_entity_id(&self, _entity_id: i64) -> Result<EntityResponse> {
        Err(AppError::NotImplemented("getEntityByEntityId"))
    }

    /// `POST /questions`
    async fn ask_question(&self, _request: QuestionRequest) -> Result<AnswerResponse> {
        Err(AppError::NotImplemented("askQuestion"))
    }

    /// `POST /search`
    async fn search_by_attributes(&self, _request: SearchRequest) -> Result<SearchResponse> {
        Err(AppError::NotImplemented("searchByAttributes"))
    }
}

/// Handler with no operations implemented
pub struct UnimplementedHandler;

impl ChatApiHandler for UnimplementedHandler {}
