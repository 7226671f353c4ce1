//! Swagger UI sub-router with a host-templated specification document

use axum::{
    extract::{Host, Path, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa_swagger_ui::Config;

use crate::error::AppError;
use crate::site::templating::{render_source, with_content_type};

pub const SPEC_ROUTE: &str = "swagger_spec";
const SPEC_TEMPLATE_NAME: &str = "swagger_spec.json";

#[derive(Clone)]
pub struct SwaggerState {
    config: Arc<Config<'static>>,
    spec_template: Arc<String>,
}

impl SwaggerState {
    /// `prefix` is the mount prefix without slashes, `spec_template` the
    /// OpenAPI document with a `{{ request_host }}` placeholder
    pub fn new(prefix: &str, spec_template: String) -> Self {
        let spec_url = format!("/{}/{}", prefix, SPEC_ROUTE);
        Self {
            config: Arc::new(Config::new([spec_url])),
            spec_template: Arc::new(spec_template),
        }
    }
}

#[derive(Serialize)]
struct SpecContext {
    request_host: String,
}

/// `host` escaped for use inside a JSON string literal
fn json_string_content(host: &str) -> String {
    let quoted = serde_json::Value::String(host.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}

/// Swagger routes under `/<prefix>`; the asset path is captured after the
/// prefix so the bundle sees paths relative to its mount point
pub fn swagger_router(prefix: &str, state: SwaggerState) -> Router {
    let base = format!("/{}", prefix);
    let index = format!("{}/", base);
    Router::new()
        .route(
            &base,
            get(move || std::future::ready(Redirect::permanent(&index))),
        )
        .route(&format!("{}/", base), get(swagger_index))
        .route(&format!("{}/{}", base, SPEC_ROUTE), get(swagger_spec))
        .route(&format!("{}/*file", base), get(swagger_file))
        .with_state(state)
}

/// OpenAPI document with the request host substituted
async fn swagger_spec(State(state): State<SwaggerState>, Host(host): Host) -> Response {
    let context = SpecContext {
        request_host: json_string_content(&host),
    };
    match render_source(SPEC_TEMPLATE_NAME, &state.spec_template, &context) {
        Ok(body) => with_content_type(SPEC_TEMPLATE_NAME, body),
        Err(e) => e.into_response(),
    }
}

async fn swagger_index(State(state): State<SwaggerState>) -> Response {
    swagger_asset("index.html", &state)
}

async fn swagger_file(State(state): State<SwaggerState>, Path(file): Path<String>) -> Response {
    swagger_asset(&file, &state)
}

fn swagger_asset(path: &str, state: &SwaggerState) -> Response {
    match utoipa_swagger_ui::serve(path, state.config.clone()) {
        Ok(Some(file)) => (
            [(header::CONTENT_TYPE, file.content_type)],
            file.bytes.into_owned(),
        )
            .into_response(),
        Ok(None) => (axum::http::StatusCode::NOT_FOUND, "Not Found").into_response(),
        Err(e) => AppError::Internal(format!("Swagger UI asset {}: {}", path, e)).into_response(),
    }
}
