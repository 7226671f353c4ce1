//! Unit tests for configuration module

use clap::Parser;
use serve_chat_gateway::config::{Cli, FeatureFlags, Settings};
use std::io::Write;

#[test]
fn test_default_settings() {
    let settings = Settings::default();

    assert_eq!(settings.server.address, "0.0.0.0");
    assert_eq!(settings.server.port, 8262);
    assert_eq!(settings.server.read_header_timeout_secs, 60);
    assert!(!settings.server.avoid_serving);
    assert!(!settings.services.enable_all);
    assert_eq!(settings.services.chat_prefix, "chat");
    assert_eq!(settings.services.swagger_prefix, "swagger");
    assert!(settings.engine.grpc_url.is_empty());
    assert!(settings.engine.module_name.starts_with("serve-chat-"));
    assert!(settings.validate().is_ok());
}

#[test]
fn test_settings_validation_rejects_bad_values() {
    let mut settings = Settings::default();
    settings.server.port = 0;
    assert!(settings.validate().is_err());

    let mut settings = Settings::default();
    settings.services.chat_prefix = "a/b".to_string();
    assert!(settings.validate().is_err());

    let mut settings = Settings::default();
    settings.services.swagger_prefix = "chat".to_string();
    assert!(settings.validate().is_err());
}

#[test]
fn test_load_yaml_then_cli_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "server:\n  port: 9000\nservices:\n  enable_swagger_ui: true\n"
    )
    .unwrap();

    let mut settings = Settings::load(Some(file.path())).unwrap();
    assert_eq!(settings.server.port, 9000);
    assert!(settings.services.enable_swagger_ui);

    let cli = Cli::try_parse_from(["serve-chat", "--http-port", "9100", "--enable-all"]).unwrap();
    cli.apply(&mut settings);
    assert_eq!(settings.server.port, 9100);

    let flags = FeatureFlags::from(&settings);
    assert!(flags.chat_enabled());
    assert!(flags.swagger_enabled());
    assert_eq!(flags.listen_address(), "0.0.0.0:9100");
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");
    assert!(Settings::load(Some(&path)).is_err());
}
