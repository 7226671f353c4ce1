//! Wire messages for the remote engine services

/// Request for `g2engine.G2Engine/GetEntityByEntityID`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetEntityByEntityIdRequest {
    #[prost(int64, tag = "1")]
    pub entity_id: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetEntityByEntityIdResponse {
    #[prost(string, tag = "1")]
    pub result: ::prost::alloc::string::String,
}

/// Request for `g2product.G2Product/Version`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VersionRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VersionResponse {
    #[prost(string, tag = "1")]
    pub result: ::prost::alloc::string::String,
}

pub const GET_ENTITY_BY_ENTITY_ID_PATH: &str = "/g2engine.G2Engine/GetEntityByEntityID";
pub const VERSION_PATH: &str = "/g2product.G2Product/Version";
