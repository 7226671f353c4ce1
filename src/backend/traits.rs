//! Engine capability traits shared by the in-process and gRPC backends

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result alias for engine access
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Errors raised while constructing or calling an engine handle. Cloneable so
/// one failed construction can be reported to every caller waiting on it.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("Invalid engine settings: {0}")]
    Configuration(String),

    #[error("Invalid remote endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Failed to connect to remote engine: {0}")]
    Connect(Arc<tonic::transport::Error>),

    #[error("Remote engine call failed: {0}")]
    Rpc(#[from] tonic::Status),

    #[error("Engine unavailable: {0}")]
    Unavailable(String),
}

impl From<tonic::transport::Error> for BackendError {
    fn from(e: tonic::transport::Error) -> Self {
        BackendError::Connect(Arc::new(e))
    }
}

/// Which implementation sits behind a handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdkId {
    InProcess,
    Grpc,
}

impl std::fmt::Display for SdkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SdkId::InProcess => write!(f, "in-process"),
            SdkId::Grpc => write!(f, "grpc"),
        }
    }
}

/// Entity-resolution engine handle
#[async_trait]
pub trait Engine: Send + Sync {
    fn sdk_id(&self) -> SdkId;

    /// Resolved entity as the engine's JSON document
    async fn get_entity_by_entity_id(&self, entity_id: i64) -> BackendResult<String>;
}

/// Product/version handle
#[async_trait]
pub trait Product: Send + Sync {
    fn sdk_id(&self) -> SdkId;

    /// Version document as the engine's JSON
    async fn version(&self) -> BackendResult<String>;
}

/// Constructs engine and product handles for one backend target
#[async_trait]
pub trait SdkFactory: Send + Sync {
    async fn create_engine(&self) -> BackendResult<Arc<dyn Engine>>;

    async fn create_product(&self) -> BackendResult<Arc<dyn Product>>;
}
