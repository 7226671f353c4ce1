//! Main entry point for serve-chat

use clap::Parser;
use serve_chat_gateway::{
    config::{Cli, LoggingConfig, Settings},
    HttpServer,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_logging(logging: &LoggingConfig) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.to_lowercase()));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format.eq_ignore_ascii_case("text") {
        registry.with(fmt::layer()).init();
    } else {
        registry.with(fmt::layer().json()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(Settings::discover);
    let mut settings = Settings::load(config_path.as_deref())?;
    cli.apply(&mut settings);
    settings.validate()?;

    init_logging(&settings.logging);

    info!("Starting serve-chat");
    if let Some(path) = &config_path {
        info!(path = %path.display(), "Applied configuration file");
    }
    info!(
        "Loaded configuration: server={}:{}",
        settings.server.address, settings.server.port
    );

    HttpServer::new(settings)
        .serve_with_shutdown(shutdown_signal())
        .await?;

    info!("serve-chat stopped");
    Ok(())
}
