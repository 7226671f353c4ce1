//! Exactly-once construction and caching of engine handles
//!
//! `BackendAccess` owns one cache slot per handle. The first caller for a
//! slot runs the factory while concurrent callers wait on the same
//! attempt; once a handle is published it is returned to every later caller
//! without locking. A failed attempt hands the same error to every request
//! that was waiting on it and leaves the slot empty, so only a request
//! arriving afterwards retries.

use futures::future::{BoxFuture, FutureExt, Shared};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::OnceCell;
use tracing::{info, warn};

use super::grpc_backend::GrpcFactory;
use super::in_process::{validate_settings, EngineInit, InProcessFactory};
use super::target::BackendTarget;
use super::traits::{BackendResult, Engine, Product, SdkFactory};
use crate::config::EngineConfig;

/// Lifecycle of one cached handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleState {
    Uninitialized,
    Constructing,
    Ready,
}

type Attempt<T> = Shared<BoxFuture<'static, BackendResult<T>>>;

/// One published value plus at most one construction attempt in flight.
/// Every caller that joins an attempt observes its outcome, success or
/// failure; the attempt keeps running if the caller that started it is
/// dropped.
pub(crate) struct HandleSlot<T> {
    cell: OnceCell<T>,
    in_flight: Mutex<Option<Attempt<T>>>,
}

impl<T: Clone + Send + Sync + 'static> HandleSlot<T> {
    pub(crate) fn new() -> Self {
        Self {
            cell: OnceCell::new(),
            in_flight: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Attempt<T>>> {
        self.in_flight.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) async fn get_or_construct<F, Fut>(
        &self,
        name: &'static str,
        construct: F,
    ) -> BackendResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = BackendResult<T>> + Send + 'static,
    {
        if let Some(handle) = self.cell.get() {
            return Ok(handle.clone());
        }

        let attempt = {
            let mut in_flight = self.lock();
            if let Some(handle) = self.cell.get() {
                return Ok(handle.clone());
            }
            match in_flight.as_ref() {
                // A finished failure nobody has cleared yet is stale
                Some(attempt) if !matches!(attempt.peek(), Some(Err(_))) => attempt.clone(),
                _ => {
                    let attempt = construct().boxed().shared();
                    *in_flight = Some(attempt.clone());
                    attempt
                }
            }
        };

        let result = attempt.clone().await;

        let mut in_flight = self.lock();
        if in_flight.as_ref().is_some_and(|current| current.ptr_eq(&attempt)) {
            match &result {
                Ok(handle) => {
                    // Published before the attempt is cleared
                    let _ = self.cell.set(handle.clone());
                    info!(handle = name, "Handle ready");
                }
                Err(e) => warn!(handle = name, error = %e, "Handle construction failed"),
            }
            *in_flight = None;
        }
        result
    }

    pub(crate) fn state(&self) -> HandleState {
        if self.cell.initialized() {
            return HandleState::Ready;
        }
        match self.lock().as_ref() {
            Some(attempt) if attempt.peek().is_none() => HandleState::Constructing,
            Some(attempt) if matches!(attempt.peek(), Some(Ok(_))) => HandleState::Ready,
            _ => HandleState::Uninitialized,
        }
    }
}

/// Backend access factory: one engine handle and one product handle per
/// instance, built by the wrapped `SdkFactory`
pub struct BackendAccess {
    factory: Arc<dyn SdkFactory>,
    engine: HandleSlot<Arc<dyn Engine>>,
    product: HandleSlot<Arc<dyn Product>>,
}

impl BackendAccess {
    /// Wrap an arbitrary factory
    pub fn new(factory: Arc<dyn SdkFactory>) -> Self {
        Self {
            factory,
            engine: HandleSlot::new(),
            product: HandleSlot::new(),
        }
    }

    /// Pick the construction strategy for `target`
    pub fn for_target(target: BackendTarget, engine: &EngineConfig) -> Self {
        let factory: Arc<dyn SdkFactory> = match target {
            BackendTarget::Local => Arc::new(InProcessFactory::new(EngineInit {
                module_name: engine.module_name.clone(),
                settings: engine.settings_string(),
                verbose_logging: engine.log_level,
            })),
            BackendTarget::Remote(endpoint) => Arc::new(GrpcFactory::new(endpoint)),
        };
        Self::new(factory)
    }

    /// Resolve the target from configuration, rejecting malformed endpoints
    /// or settings before anything is served
    pub fn from_config(engine: &EngineConfig) -> BackendResult<Self> {
        let target = BackendTarget::from_grpc_url(&engine.grpc_url)?;
        match &target {
            BackendTarget::Local => {
                validate_settings(&engine.settings_string())?;
                info!(module_name = %engine.module_name, "Using in-process engine");
            }
            BackendTarget::Remote(endpoint) => {
                info!(uri = %endpoint.uri, tls = endpoint.options.tls, "Using remote engine");
            }
        }
        Ok(Self::for_target(target, engine))
    }

    /// The shared engine handle, constructed on first use
    pub async fn engine(&self) -> BackendResult<Arc<dyn Engine>> {
        let factory = self.factory.clone();
        self.engine
            .get_or_construct("engine", move || async move { factory.create_engine().await })
            .await
    }

    /// The shared product handle, constructed on first use
    pub async fn product(&self) -> BackendResult<Arc<dyn Product>> {
        let factory = self.factory.clone();
        self.product
            .get_or_construct("product", move || async move { factory.create_product().await })
            .await
    }

    pub fn engine_state(&self) -> HandleState {
        self.engine.state()
    }

    pub fn product_state(&self) -> HandleState {
        self.product.state()
    }
}
