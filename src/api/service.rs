//! Chat API service backed by the shared engine handles

use async_trait::async_trait;
use tracing::info;

use crate::api::handler::ChatApiHandler;
use crate::api::models::{engine_document, EntityResponse, VersionResponse};
use crate::backend::BackendAccess;
use crate::error::Result;

/// Adapter between the chat API operations and the engine. Handles are
/// obtained from the owned `BackendAccess` on every call; only the first
/// call in the process waits for construction.
pub struct ChatApiService {
    backend: BackendAccess,
}

impl ChatApiService {
    pub fn new(backend: BackendAccess) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl ChatApiHandler for ChatApiService {
    async fn get_version(&self) -> Result<VersionResponse> {
        let product = self.backend.product().await?;
        let raw = product.version().await?;
        Ok(VersionResponse {
            version: engine_document(raw),
        })
    }

    async fn get_entity_by_entity_id(&self, entity_id: i64) -> Result<EntityResponse> {
        let engine = self.backend.engine().await?;
        let raw = engine.get_entity_by_entity_id(entity_id).await?;
        info!(entity_id, "Fetched entity");
        Ok(EntityResponse {
            entity_id,
            entity: engine_document(raw),
        })
    }
}
