//! Templated console pages under `/site`

use axum::{
    extract::{Host, State},
    http::Uri,
    response::{Redirect, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tracing::debug;

use crate::config::FeatureFlags;
use crate::site::assets::asset_key;
use crate::site::templating::{render_response, TemplateContext};

pub type SharedFlags = Arc<FeatureFlags>;

/// Render `templates/<request path>` with the per-request context
pub async fn site_page(
    State(flags): State<SharedFlags>,
    Host(host): Host,
    uri: Uri,
) -> Response {
    let asset = asset_key("templates", uri.path());
    debug!(path = %uri.path(), asset = %asset, "Rendering console page");
    let context = TemplateContext::for_request(&flags, &host);
    render_response(&asset, &context)
}

/// Console routes; mounted at the root since page lookup uses the full path
pub fn site_router(flags: SharedFlags) -> Router {
    Router::new()
        .route("/site", get(|| async { Redirect::permanent("/site/") }))
        .route("/site/", get(site_page))
        .route("/site/*page", get(site_page))
        .with_state(flags)
}
