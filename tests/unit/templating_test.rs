//! Unit tests for status derivation and template rendering

use serve_chat_gateway::config::FeatureFlags;
use serve_chat_gateway::site::{render_asset, service_status, service_url, TemplateContext};
use serve_chat_gateway::AppError;

#[test]
fn test_status_derivation() {
    assert_eq!(service_status(false, false), "inactive");
    assert_eq!(service_status(false, true), "active");
    assert_eq!(service_status(true, false), "active");
    assert_eq!(service_url(false, false, "http://h/chat".into()), "");
    assert_eq!(service_url(true, false, "http://h/chat".into()), "http://h/chat");
}

#[test]
fn test_chat_inactive_when_disabled() {
    let ctx = TemplateContext::for_request(&FeatureFlags::default(), "localhost:8262");
    assert_eq!(ctx.chat_server_status, "inactive");
    assert_eq!(ctx.chat_server_url, "");
}

#[test]
fn test_enable_all_marks_every_service_active() {
    let flags = FeatureFlags {
        enable_all: true,
        ..Default::default()
    };
    let ctx = TemplateContext::for_request(&flags, "localhost:8262");
    assert_eq!(ctx.chat_server_status, "active");
    assert_eq!(ctx.swagger_status, "active");
}

#[test]
fn test_console_index_renders_status() {
    let flags = FeatureFlags {
        enable_swagger_ui: true,
        ..Default::default()
    };
    let ctx = TemplateContext::for_request(&flags, "example.test:8262");
    let page = render_asset("templates/site/index.html", &ctx).unwrap();
    assert!(page.contains("example.test:8262"));
    assert!(page.contains(r#"<span class="status active">active</span>"#));
    assert!(page.contains("inactive"));
}

#[test]
fn test_missing_asset() {
    let ctx = TemplateContext::for_request(&FeatureFlags::default(), "localhost");
    let err = render_asset("templates/site/nope.html", &ctx).unwrap_err();
    assert!(matches!(err, AppError::TemplateNotFound(_)));
    assert_eq!(err.status_code(), 500);
}
