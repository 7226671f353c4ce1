//! gRPC-backed engine handles sharing one dialled channel

use async_trait::async_trait;
use std::sync::Arc;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};
use tracing::{debug, info};

use super::access::HandleSlot;
use super::proto::{
    GetEntityByEntityIdRequest, GetEntityByEntityIdResponse, VersionRequest, VersionResponse,
    GET_ENTITY_BY_ENTITY_ID_PATH, VERSION_PATH,
};
use super::target::RemoteEndpoint;
use super::traits::{BackendError, BackendResult, Engine, Product, SdkFactory, SdkId};

/// Issue one unary call on `channel`
async fn unary<Req, Resp>(channel: &Channel, path: &'static str, request: Req) -> BackendResult<Resp>
where
    Req: prost::Message + Send + Sync + 'static,
    Resp: prost::Message + Default + Send + Sync + 'static,
{
    let mut client = tonic::client::Grpc::new(channel.clone());
    client
        .ready()
        .await
        .map_err(|e| BackendError::Unavailable(format!("Service was not ready: {}", e)))?;

    let codec = tonic::codec::ProstCodec::default();
    let response = client
        .unary(tonic::Request::new(request), PathAndQuery::from_static(path), codec)
        .await?;
    Ok(response.into_inner())
}

/// Engine handle backed by a remote service
pub struct GrpcEngine {
    channel: Channel,
}

#[async_trait]
impl Engine for GrpcEngine {
    fn sdk_id(&self) -> SdkId {
        SdkId::Grpc
    }

    async fn get_entity_by_entity_id(&self, entity_id: i64) -> BackendResult<String> {
        debug!(entity_id, "GetEntityByEntityID");
        let response: GetEntityByEntityIdResponse = unary(
            &self.channel,
            GET_ENTITY_BY_ENTITY_ID_PATH,
            GetEntityByEntityIdRequest { entity_id },
        )
        .await?;
        Ok(response.result)
    }
}

/// Product handle backed by a remote service
pub struct GrpcProduct {
    channel: Channel,
}

#[async_trait]
impl Product for GrpcProduct {
    fn sdk_id(&self) -> SdkId {
        SdkId::Grpc
    }

    async fn version(&self) -> BackendResult<String> {
        let response: VersionResponse = unary(&self.channel, VERSION_PATH, VersionRequest {}).await?;
        Ok(response.result)
    }
}

/// Dial `endpoint`, applying its TLS and connect-timeout options
async fn dial(endpoint: RemoteEndpoint) -> BackendResult<Channel> {
    let mut builder = Endpoint::from_shared(endpoint.uri.clone())?;
    if let Some(timeout) = endpoint.options.connect_timeout {
        builder = builder.connect_timeout(timeout);
    }
    if endpoint.options.tls {
        builder = builder.tls_config(ClientTlsConfig::new())?;
    }

    let channel = builder.connect().await?;
    info!(uri = %endpoint.uri, tls = endpoint.options.tls, "Connected to remote engine");
    Ok(channel)
}

/// Factory for gRPC-backed handles. The channel is dialled on first use and
/// reused by every handle this factory creates; concurrent first dials share
/// one connection attempt.
pub struct GrpcFactory {
    endpoint: RemoteEndpoint,
    channel: HandleSlot<Channel>,
}

impl GrpcFactory {
    pub fn new(endpoint: RemoteEndpoint) -> Self {
        Self {
            endpoint,
            channel: HandleSlot::new(),
        }
    }

    async fn channel(&self) -> BackendResult<Channel> {
        let endpoint = self.endpoint.clone();
        self.channel
            .get_or_construct("channel", move || dial(endpoint))
            .await
    }
}

#[async_trait]
impl SdkFactory for GrpcFactory {
    async fn create_engine(&self) -> BackendResult<Arc<dyn Engine>> {
        Ok(Arc::new(GrpcEngine {
            channel: self.channel().await?,
        }))
    }

    async fn create_product(&self) -> BackendResult<Arc<dyn Product>> {
        Ok(Arc::new(GrpcProduct {
            channel: self.channel().await?,
        }))
    }
}
