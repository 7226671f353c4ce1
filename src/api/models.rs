//! Chat API request and response models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Engine version information
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct VersionResponse {
    /// Version document as reported by the engine
    #[schema(value_type = Object)]
    pub version: serde_json::Value,
}

/// A resolved entity
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct EntityResponse {
    pub entity_id: i64,

    /// Entity document as reported by the engine
    #[schema(value_type = Object)]
    pub entity: serde_json::Value,
}

/// Natural-language question about the resolved entities
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct QuestionRequest {
    pub question: String,

    /// Optional conversation identifier to continue a previous exchange
    #[serde(default)]
    pub conversation_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AnswerResponse {
    pub answer: String,

    #[serde(default)]
    pub conversation_id: Option<String>,
}

/// Search by attributes
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SearchRequest {
    /// Attribute document, e.g. `{"NAME_FULL": "Robert Smith"}`
    #[schema(value_type = Object)]
    pub attributes: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SearchResponse {
    #[schema(value_type = Object)]
    pub result: serde_json::Value,
}

/// Parse an engine JSON document, keeping non-JSON output as a string
pub(crate) fn engine_document(raw: String) -> serde_json::Value {
    serde_json::from_str(&raw).unwrap_or(serde_json::Value::String(raw))
}
