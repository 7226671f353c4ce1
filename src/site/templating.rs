//! Text-template rendering with per-request status context

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::FeatureFlags;
use crate::error::{AppError, Result};
use crate::site::assets::Assets;

pub const HTML_TITLE: &str = "serve-chat";

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_INACTIVE: &str = "inactive";

/// Displayed status of a sub-service
pub fn service_status(enable_all: bool, up: bool) -> &'static str {
    if enable_all || up {
        STATUS_ACTIVE
    } else {
        STATUS_INACTIVE
    }
}

/// Displayed URL of a sub-service; empty while it is not mounted
pub fn service_url(enable_all: bool, up: bool, url: String) -> String {
    if enable_all || up {
        url
    } else {
        String::new()
    }
}

/// Values available to every template, built fresh for each request
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext {
    pub html_title: String,
    pub request_host: String,
    pub chat_server_status: String,
    pub chat_server_url: String,
    pub swagger_status: String,
    pub swagger_url: String,
    pub server_port: u16,
    pub enable_all: bool,
    pub enable_chat_api: bool,
    pub enable_swagger_ui: bool,
}

impl TemplateContext {
    pub fn for_request(flags: &FeatureFlags, request_host: &str) -> Self {
        Self {
            html_title: HTML_TITLE.to_string(),
            request_host: request_host.to_string(),
            chat_server_status: service_status(flags.enable_all, flags.enable_chat_api).to_string(),
            chat_server_url: service_url(
                flags.enable_all,
                flags.enable_chat_api,
                format!("http://{}/{}", request_host, flags.chat_prefix),
            ),
            swagger_status: service_status(flags.enable_all, flags.enable_swagger_ui).to_string(),
            swagger_url: service_url(
                flags.enable_all,
                flags.enable_swagger_ui,
                format!("http://{}/{}", request_host, flags.swagger_prefix),
            ),
            server_port: flags.server_port,
            enable_all: flags.enable_all,
            enable_chat_api: flags.enable_chat_api,
            enable_swagger_ui: flags.enable_swagger_ui,
        }
    }
}

/// Parse `source` as a template named `name` and render it. Names ending in
/// `.html` are HTML-escaped.
pub fn render_source<C: Serialize>(name: &str, source: &str, context: &C) -> Result<String> {
    let mut tera = Tera::default();
    tera.add_raw_template(name, source)?;
    let context = Context::from_serialize(context)?;
    Ok(tera.render(name, &context)?)
}

/// Render the embedded asset at `asset_path`
pub fn render_asset<C: Serialize>(asset_path: &str, context: &C) -> Result<String> {
    let source = Assets::text(asset_path)
        .ok_or_else(|| AppError::TemplateNotFound(asset_path.to_string()))?;
    render_source(asset_path, &source, context)
}

/// Render into an HTTP response. Output is buffered, so a failure at any
/// stage yields a clean 500 and never a partial body.
pub fn render_response<C: Serialize>(asset_path: &str, context: &C) -> Response {
    match render_asset(asset_path, context) {
        Ok(body) => with_content_type(asset_path, body),
        Err(e) => e.into_response(),
    }
}

/// Attach the content type guessed from `name`
pub fn with_content_type(name: &str, body: String) -> Response {
    let mime = mime_guess::from_path(name).first_or_text_plain();
    let mut response = body.into_response();
    if let Ok(value) = HeaderValue::from_str(mime.as_ref()) {
        response.headers_mut().insert(header::CONTENT_TYPE, value);
    }
    response
}
