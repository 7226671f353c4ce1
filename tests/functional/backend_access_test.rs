//! Functional tests for once-only handle construction

use async_trait::async_trait;
use futures::future::join_all;
use serve_chat_gateway::backend::{
    BackendAccess, BackendError, BackendResult, Engine, HandleState, Product, SdkFactory, SdkId,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

struct CountingEngine;

#[async_trait]
impl Engine for CountingEngine {
    fn sdk_id(&self) -> SdkId {
        SdkId::InProcess
    }

    async fn get_entity_by_entity_id(&self, entity_id: i64) -> BackendResult<String> {
        Ok(format!(r#"{{"RESOLVED_ENTITY":{{"ENTITY_ID":{}}}}}"#, entity_id))
    }
}

struct CountingProduct;

#[async_trait]
impl Product for CountingProduct {
    fn sdk_id(&self) -> SdkId {
        SdkId::InProcess
    }

    async fn version(&self) -> BackendResult<String> {
        Ok(r#"{"VERSION":"test"}"#.to_string())
    }
}

/// Slow factory that counts how often each handle is built
#[derive(Default)]
struct CountingFactory {
    engines: AtomicUsize,
    products: AtomicUsize,
}

#[async_trait]
impl SdkFactory for CountingFactory {
    async fn create_engine(&self) -> BackendResult<Arc<dyn Engine>> {
        self.engines.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(Arc::new(CountingEngine))
    }

    async fn create_product(&self) -> BackendResult<Arc<dyn Product>> {
        self.products.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(Arc::new(CountingProduct))
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_use_constructs_once() {
    let factory = Arc::new(CountingFactory::default());
    let access = Arc::new(BackendAccess::new(factory.clone()));

    let tasks = (0..32).map(|_| {
        let access = access.clone();
        tokio::spawn(async move { access.engine().await })
    });
    let handles: Vec<Arc<dyn Engine>> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .collect();

    assert_eq!(factory.engines.load(Ordering::SeqCst), 1);
    assert!(handles.iter().all(|h| Arc::ptr_eq(h, &handles[0])));
    assert_eq!(access.engine_state(), HandleState::Ready);

    // Product slot is untouched by engine construction
    assert_eq!(factory.products.load(Ordering::SeqCst), 0);
    assert_eq!(access.product_state(), HandleState::Uninitialized);
}

#[tokio::test]
async fn test_concurrent_product_callers_share_handle() {
    let factory = Arc::new(CountingFactory::default());
    let access = BackendAccess::new(factory.clone());

    let products = join_all((0..16).map(|_| access.product())).await;
    let first = products[0].as_ref().unwrap().clone();
    for product in &products {
        assert!(Arc::ptr_eq(product.as_ref().unwrap(), &first));
    }
    assert_eq!(factory.products.load(Ordering::SeqCst), 1);
    assert_eq!(first.version().await.unwrap(), r#"{"VERSION":"test"}"#);
}

/// Slow factory whose constructions always fail
#[derive(Default)]
struct FailingFactory {
    attempts: AtomicUsize,
}

#[async_trait]
impl SdkFactory for FailingFactory {
    async fn create_engine(&self) -> BackendResult<Arc<dyn Engine>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(100)).await;
        Err(BackendError::Unavailable("engine offline".to_string()))
    }

    async fn create_product(&self) -> BackendResult<Arc<dyn Product>> {
        Err(BackendError::Unavailable("engine offline".to_string()))
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_callers_share_one_failed_construction() {
    let factory = Arc::new(FailingFactory::default());
    let access = Arc::new(BackendAccess::new(factory.clone()));

    let started = std::time::Instant::now();
    let tasks = (0..10).map(|_| {
        let access = access.clone();
        tokio::spawn(async move { access.engine().await })
    });
    let results = join_all(tasks).await;
    let elapsed = started.elapsed();

    let errors = results
        .into_iter()
        .map(|joined| joined.unwrap())
        .filter(|result| matches!(result, Err(BackendError::Unavailable(_))))
        .count();
    assert_eq!(errors, 10);
    assert_eq!(factory.attempts.load(Ordering::SeqCst), 1);
    assert!(elapsed < Duration::from_millis(900), "waiters were serialised: {:?}", elapsed);
    assert_eq!(access.engine_state(), HandleState::Uninitialized);

    // A request arriving after the failure starts a fresh attempt
    assert!(access.engine().await.is_err());
    assert_eq!(factory.attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_unreachable_remote_engine_is_retryable() {
    let mut engine = serve_chat_gateway::config::Settings::default().engine;
    // Port 1 on loopback refuses connections
    engine.grpc_url = "grpc://127.0.0.1:1".to_string();
    let access = BackendAccess::from_config(&engine).unwrap();

    let err = match access.engine().await {
        Ok(_) => panic!("expected connection failure"),
        Err(e) => e,
    };
    assert!(matches!(err, BackendError::Connect(_)));
    assert_eq!(access.engine_state(), HandleState::Uninitialized);
}
