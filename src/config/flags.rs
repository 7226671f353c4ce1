//! Feature toggles read once at startup

use serde::Serialize;

use super::Settings;

/// Immutable view of which optional sub-services are switched on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureFlags {
    pub enable_all: bool,
    pub enable_chat_api: bool,
    pub enable_swagger_ui: bool,
    pub chat_prefix: String,
    pub swagger_prefix: String,
    pub server_address: String,
    pub server_port: u16,
}

impl FeatureFlags {
    /// Whether the chat API is mounted
    pub fn chat_enabled(&self) -> bool {
        self.enable_all || self.enable_chat_api
    }

    /// Whether the Swagger UI is mounted
    pub fn swagger_enabled(&self) -> bool {
        self.enable_all || self.enable_swagger_ui
    }

    /// `address:port` the listener binds to
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.server_address, self.server_port)
    }
}

impl From<&Settings> for FeatureFlags {
    fn from(settings: &Settings) -> Self {
        Self {
            enable_all: settings.services.enable_all,
            enable_chat_api: settings.services.enable_chat_api,
            enable_swagger_ui: settings.services.enable_swagger_ui,
            chat_prefix: settings.services.chat_prefix.clone(),
            swagger_prefix: settings.services.swagger_prefix.clone(),
            server_address: settings.server.address.clone(),
            server_port: settings.server.port,
        }
    }
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}
