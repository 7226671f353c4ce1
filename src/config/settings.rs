//! Application settings and configuration management

use crate::error::{AppError, Result};
use chrono::Utc;
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file stem searched for when no explicit path is given
pub const CONFIG_FILE_NAME: &str = "serve-chat.yaml";

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub services: ServicesConfig,
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}

/// Listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_read_header_timeout")]
    pub read_header_timeout_secs: u64,
    /// Build the route table but never bind a socket
    #[serde(default)]
    pub avoid_serving: bool,
}

fn default_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8262
}

fn default_read_header_timeout() -> u64 {
    60
}

/// Optional sub-service toggles and their route prefixes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServicesConfig {
    #[serde(default)]
    pub enable_all: bool,
    #[serde(default)]
    pub enable_chat_api: bool,
    #[serde(default)]
    pub enable_swagger_ui: bool,
    #[serde(default = "default_chat_prefix")]
    pub chat_prefix: String,
    #[serde(default = "default_swagger_prefix")]
    pub swagger_prefix: String,
}

fn default_chat_prefix() -> String {
    "chat".to_string()
}

fn default_swagger_prefix() -> String {
    "swagger".to_string()
}

/// Entity-resolution engine access
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Settings string handed to the in-process engine; built from
    /// `database_url` when empty
    #[serde(default)]
    pub configuration_json: String,
    #[serde(default)]
    pub database_url: String,
    /// Instance name the engine is initialised with
    #[serde(default = "default_module_name")]
    pub module_name: String,
    #[serde(default)]
    pub log_level: i64,
    /// `grpc://host:port` or `grpcs://host:port`; empty selects the
    /// in-process engine
    #[serde(default)]
    pub grpc_url: String,
}

fn default_module_name() -> String {
    format!("serve-chat-{}", Utc::now().timestamp())
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "INFO".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load settings from an explicit file or, when `None`, from the first
    /// configuration file found on the search path
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("server.address", default_address())?
            .set_default("server.port", default_port() as i64)?
            .set_default("server.read_header_timeout_secs", default_read_header_timeout() as i64)?
            .set_default("server.avoid_serving", false)?
            .set_default("services.enable_all", false)?
            .set_default("services.enable_chat_api", false)?
            .set_default("services.enable_swagger_ui", false)?
            .set_default("services.chat_prefix", default_chat_prefix())?
            .set_default("services.swagger_prefix", default_swagger_prefix())?
            .set_default("engine.configuration_json", "")?
            .set_default("engine.database_url", "")?
            .set_default("engine.module_name", default_module_name())?
            .set_default("engine.log_level", 0)?
            .set_default("engine.grpc_url", "")?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?;

        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path).format(FileFormat::Yaml).required(true));
            }
            None => {
                if let Some(found) = Self::discover() {
                    builder = builder.add_source(File::from(found).format(FileFormat::Yaml));
                }
            }
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    /// Search `$HOME/.serve-chat`, `$HOME` and `/etc/serve-chat` in that order
    pub fn discover() -> Option<PathBuf> {
        Self::search_paths()
            .into_iter()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(home) = std::env::var_os("HOME") {
            let home = PathBuf::from(home);
            paths.push(home.join(".serve-chat"));
            paths.push(home);
        }
        paths.push(PathBuf::from("/etc/serve-chat"));
        paths
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::InvalidConfig("Server port cannot be 0".to_string()));
        }
        if self.server.read_header_timeout_secs == 0 {
            return Err(AppError::InvalidConfig(
                "Read header timeout must be at least one second".to_string(),
            ));
        }

        for (name, prefix) in [
            ("chat", &self.services.chat_prefix),
            ("swagger", &self.services.swagger_prefix),
        ] {
            if prefix.is_empty() || prefix.contains('/') || prefix.as_str() == "site" {
                return Err(AppError::InvalidConfig(format!(
                    "Route prefix for {} must be a single path segment other than 'site', got '{}'",
                    name, prefix
                )));
            }
        }

        if self.services.chat_prefix == self.services.swagger_prefix {
            return Err(AppError::InvalidConfig(
                "Chat and swagger route prefixes must differ".to_string(),
            ));
        }

        Ok(())
    }
}

impl EngineConfig {
    /// Settings string for the in-process engine
    pub fn settings_string(&self) -> String {
        if self.configuration_json.is_empty() {
            build_simple_system_configuration(&self.database_url)
        } else {
            self.configuration_json.clone()
        }
    }
}

/// Minimal engine settings document pointing the engine at `database_url`
pub fn build_simple_system_configuration(database_url: &str) -> String {
    serde_json::json!({
        "PIPELINE": {
            "CONFIGPATH": "/etc/opt/senzing",
            "RESOURCEPATH": "/opt/senzing/g2/resources",
            "SUPPORTPATH": "/opt/senzing/data",
        },
        "SQL": {
            "CONNECTION": database_url,
        },
    })
    .to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                address: default_address(),
                port: default_port(),
                read_header_timeout_secs: default_read_header_timeout(),
                avoid_serving: false,
            },
            services: ServicesConfig {
                enable_all: false,
                enable_chat_api: false,
                enable_swagger_ui: false,
                chat_prefix: default_chat_prefix(),
                swagger_prefix: default_swagger_prefix(),
            },
            engine: EngineConfig {
                configuration_json: String::new(),
                database_url: String::new(),
                module_name: default_module_name(),
                log_level: 0,
                grpc_url: String::new(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
        }
    }
}
