//! In-process engine handles built directly from the settings string

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use super::traits::{BackendError, BackendResult, Engine, Product, SdkFactory, SdkId};

const NOT_LINKED: &str = "no native engine library is linked into this build; configure a gRPC URL";

/// Check that the settings string is a JSON object before handing it to the engine
pub fn validate_settings(settings: &str) -> BackendResult<serde_json::Value> {
    let value: serde_json::Value = serde_json::from_str(settings)
        .map_err(|e| BackendError::Configuration(format!("settings are not valid JSON: {}", e)))?;
    if !value.is_object() {
        return Err(BackendError::Configuration(
            "settings must be a JSON object".to_string(),
        ));
    }
    Ok(value)
}

/// Parameters every in-process handle is initialised with
#[derive(Debug, Clone)]
pub struct EngineInit {
    pub module_name: String,
    pub settings: String,
    pub verbose_logging: i64,
}

impl EngineInit {
    fn initialize(&self, component: &str) -> BackendResult<()> {
        validate_settings(&self.settings)?;
        info!(
            component,
            module_name = %self.module_name,
            verbose_logging = self.verbose_logging,
            "Initialized in-process engine component"
        );
        Ok(())
    }
}

/// Engine handle living in this process
pub struct InProcessEngine {
    module_name: String,
}

impl InProcessEngine {
    pub fn init(init: &EngineInit) -> BackendResult<Self> {
        init.initialize("engine")?;
        Ok(Self {
            module_name: init.module_name.clone(),
        })
    }
}

#[async_trait]
impl Engine for InProcessEngine {
    fn sdk_id(&self) -> SdkId {
        SdkId::InProcess
    }

    async fn get_entity_by_entity_id(&self, entity_id: i64) -> BackendResult<String> {
        debug!(entity_id, module_name = %self.module_name, "getEntityByEntityID");
        Err(BackendError::Unavailable(NOT_LINKED.to_string()))
    }
}

/// Product handle living in this process
pub struct InProcessProduct {
    module_name: String,
}

impl InProcessProduct {
    pub fn init(init: &EngineInit) -> BackendResult<Self> {
        init.initialize("product")?;
        Ok(Self {
            module_name: init.module_name.clone(),
        })
    }
}

#[async_trait]
impl Product for InProcessProduct {
    fn sdk_id(&self) -> SdkId {
        SdkId::InProcess
    }

    async fn version(&self) -> BackendResult<String> {
        debug!(module_name = %self.module_name, "version");
        Err(BackendError::Unavailable(NOT_LINKED.to_string()))
    }
}

/// Factory for in-process handles
pub struct InProcessFactory {
    init: EngineInit,
}

impl InProcessFactory {
    pub fn new(init: EngineInit) -> Self {
        Self { init }
    }
}

#[async_trait]
impl SdkFactory for InProcessFactory {
    async fn create_engine(&self) -> BackendResult<Arc<dyn Engine>> {
        Ok(Arc::new(InProcessEngine::init(&self.init)?))
    }

    async fn create_product(&self) -> BackendResult<Arc<dyn Product>> {
        Ok(Arc::new(InProcessProduct::init(&self.init)?))
    }
}
