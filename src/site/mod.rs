//! Console site: embedded assets and template rendering

pub mod assets;
pub mod handlers;
pub mod templating;

pub use assets::{static_file, Assets};
pub use handlers::site_router;
pub use templating::{render_asset, render_source, service_status, service_url, TemplateContext};
