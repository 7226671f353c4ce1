//! HTTP server: composes the route table and serves it

use axum::Router;
use hyper::server::conn::http1;
use hyper_util::rt::{TokioIo, TokioTimer};
use hyper_util::service::TowerToHyperService;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::api::handlers::SharedHandler;
use crate::api::{chat_router, openapi_template, ChatApiService};
use crate::backend::BackendAccess;
use crate::config::{FeatureFlags, Settings};
use crate::error::Result;
use crate::gateway::routes::{MountKind, RouteTable};
use crate::gateway::swagger::{swagger_router, SwaggerState};
use crate::site::{site_router, static_file};

/// Gateway server. Routes are fixed when `router` is first built; changing
/// a flag requires a new server.
pub struct HttpServer {
    settings: Settings,
    flags: Arc<FeatureFlags>,
    chat_handler: Option<SharedHandler>,
    openapi_specification: Option<String>,
}

impl HttpServer {
    pub fn new(settings: Settings) -> Self {
        let flags = Arc::new(FeatureFlags::from(&settings));
        Self {
            settings,
            flags,
            chat_handler: None,
            openapi_specification: None,
        }
    }

    /// Use `handler` for the chat API instead of the engine-backed service
    pub fn with_chat_handler(mut self, handler: SharedHandler) -> Self {
        self.chat_handler = Some(handler);
        self
    }

    /// Serve `template` as the specification document instead of the
    /// generated one; `{{ request_host }}` is substituted per request
    pub fn with_openapi_specification(mut self, template: impl Into<String>) -> Self {
        self.openapi_specification = Some(template.into());
        self
    }

    pub fn flags(&self) -> &FeatureFlags {
        &self.flags
    }

    pub fn route_table(&self) -> RouteTable {
        RouteTable::plan(&self.flags)
    }

    fn chat_handler(&self) -> Result<SharedHandler> {
        match &self.chat_handler {
            Some(handler) => Ok(handler.clone()),
            None => {
                let backend = BackendAccess::from_config(&self.settings.engine)?;
                Ok(Arc::new(ChatApiService::new(backend)))
            }
        }
    }

    fn openapi_specification(&self) -> Result<String> {
        match &self.openapi_specification {
            Some(template) => Ok(template.clone()),
            None => openapi_template(&self.flags.chat_prefix),
        }
    }

    /// Build the complete router for the enabled sub-services. Settings are
    /// validated first since overlapping prefixes cannot be routed.
    pub fn router(&self) -> Result<Router> {
        self.settings.validate()?;

        let mut app = Router::new();
        for mount in self.route_table().mounts() {
            app = match mount.kind {
                MountKind::ChatApi => app.nest(&mount.path, chat_router(self.chat_handler()?)),
                MountKind::SwaggerUi => {
                    let state =
                        SwaggerState::new(&self.flags.swagger_prefix, self.openapi_specification()?);
                    app.merge(swagger_router(&self.flags.swagger_prefix, state))
                }
                MountKind::Console => app.merge(site_router(self.flags.clone())),
                MountKind::StaticFiles => app.fallback(static_file),
            };
        }
        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Serve until the process exits
    pub async fn serve(&self) -> Result<()> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Serve until `shutdown` resolves. With `avoid_serving` set the router
    /// is built and nothing is bound.
    pub async fn serve_with_shutdown<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        let router = self.router()?;
        for line in self.route_table().banner(&self.flags) {
            info!("{}", line);
        }

        if self.settings.server.avoid_serving {
            info!("avoid_serving is set, not binding a listener");
            return Ok(());
        }

        let listener = TcpListener::bind(self.flags.listen_address()).await?;
        self.run(listener, router, shutdown).await
    }

    /// Serve on an already bound listener
    pub async fn serve_on<F>(&self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        let router = self.router()?;
        self.run(listener, router, shutdown).await
    }

    async fn run<F>(&self, listener: TcpListener, router: Router, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        let header_timeout = Duration::from_secs(self.settings.server.read_header_timeout_secs);
        info!(address = %listener.local_addr()?, "Server listening");

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (stream, peer) = accepted?;
                    let service = TowerToHyperService::new(router.clone());
                    tokio::spawn(async move {
                        let mut builder = http1::Builder::new();
                        builder.timer(TokioTimer::new()).header_read_timeout(header_timeout);
                        if let Err(e) = builder.serve_connection(TokioIo::new(stream), service).await {
                            debug!(peer = %peer, error = %e, "Connection closed with error");
                        }
                    });
                }
                _ = &mut shutdown => {
                    info!("Shutdown signal received, no longer accepting connections");
                    return Ok(());
                }
            }
        }
    }
}
