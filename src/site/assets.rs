//! Embedded console templates and static files

use axum::{
    body::Body,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

/// Everything under `static/`: `templates/` for rendered pages, `root/` for
/// files served as-is
#[derive(RustEmbed)]
#[folder = "static/"]
pub struct Assets;

impl Assets {
    /// Asset contents as UTF-8 text
    pub fn text(path: &str) -> Option<String> {
        Self::get(path).map(|file| String::from_utf8_lossy(&file.data).into_owned())
    }
}

/// Map a request path onto an asset key under `base`, defaulting
/// directory paths to `index.html`
pub fn asset_key(base: &str, request_path: &str) -> String {
    let path = request_path.trim_start_matches('/');
    if path.is_empty() || path.ends_with('/') {
        format!("{}/{}index.html", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Fallback handler serving `root/` assets
pub async fn static_file(uri: Uri) -> Response {
    let key = asset_key("root", uri.path());
    match Assets::get(&key) {
        Some(file) => {
            let mime = mime_guess::from_path(&key).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, mime.as_ref().to_string())],
                Body::from(file.data.into_owned()),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}
