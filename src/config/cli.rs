//! Command-line options, each also readable from a `SENZING_TOOLS_*` variable

use clap::Parser;
use std::path::PathBuf;

use super::Settings;

#[derive(Debug, Clone, Parser)]
#[command(name = "serve-chat", version, about = "HTTP gateway for the Senzing chat API, Swagger UI and console")]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, env = "SENZING_TOOLS_CONFIGURATION")]
    pub config: Option<PathBuf>,

    /// IP interface server listens on
    #[arg(long, env = "SENZING_TOOLS_SERVER_ADDRESS")]
    pub server_address: Option<String>,

    /// Port to serve HTTP
    #[arg(long, env = "SENZING_TOOLS_HTTP_PORT")]
    pub http_port: Option<u16>,

    /// Enable all services
    #[arg(long, env = "SENZING_TOOLS_ENABLE_ALL")]
    pub enable_all: bool,

    /// Enable the Senzing Chat API service
    #[arg(long, env = "SENZING_TOOLS_ENABLE_SENZING_CHAT_API")]
    pub enable_senzing_chat_api: bool,

    /// Enable the Swagger UI service
    #[arg(long, env = "SENZING_TOOLS_ENABLE_SWAGGER_UI")]
    pub enable_swagger_ui: bool,

    /// JSON string sent to the engine's init function
    #[arg(long, env = "SENZING_TOOLS_ENGINE_CONFIGURATION_JSON")]
    pub engine_configuration_json: Option<String>,

    /// URL of database to initialize
    #[arg(long, env = "SENZING_TOOLS_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Identifier given to the engine
    #[arg(long, env = "SENZING_TOOLS_ENGINE_MODULE_NAME")]
    pub engine_module_name: Option<String>,

    /// Log level for the engine
    #[arg(long, env = "SENZING_TOOLS_ENGINE_LOG_LEVEL")]
    pub engine_log_level: Option<i64>,

    /// URL of Senzing gRPC service
    #[arg(long, env = "SENZING_TOOLS_GRPC_URL")]
    pub grpc_url: Option<String>,

    /// Log level
    #[arg(long, env = "SENZING_TOOLS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log output format: json or text
    #[arg(long, env = "SENZING_TOOLS_LOG_FORMAT")]
    pub log_format: Option<String>,

    /// Build routes and exit without accepting connections
    #[arg(long, env = "SENZING_TOOLS_AVOID_SERVING")]
    pub avoid_serving: bool,
}

impl Cli {
    /// Overlay explicitly given options onto `settings`.
    ///
    /// Boolean switches only ever turn a service on; a file that enables a
    /// service cannot be overridden to off from the command line.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(address) = &self.server_address {
            settings.server.address = address.clone();
        }
        if let Some(port) = self.http_port {
            settings.server.port = port;
        }
        settings.server.avoid_serving |= self.avoid_serving;

        settings.services.enable_all |= self.enable_all;
        settings.services.enable_chat_api |= self.enable_senzing_chat_api;
        settings.services.enable_swagger_ui |= self.enable_swagger_ui;

        if let Some(json) = &self.engine_configuration_json {
            settings.engine.configuration_json = json.clone();
        }
        if let Some(url) = &self.database_url {
            settings.engine.database_url = url.clone();
        }
        if let Some(name) = &self.engine_module_name {
            settings.engine.module_name = name.clone();
        }
        if let Some(level) = self.engine_log_level {
            settings.engine.log_level = level;
        }
        if let Some(url) = &self.grpc_url {
            settings.engine.grpc_url = url.clone();
        }

        if let Some(level) = &self.log_level {
            settings.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            settings.logging.format = format.clone();
        }
    }
}
