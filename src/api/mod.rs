//! API module - chat handler contract, service adapter, routes and models

pub mod handler;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod service;

pub use handler::{ChatApiHandler, UnimplementedHandler};
pub use routes::{chat_router, openapi_template, ApiDoc};
pub use service::ChatApiService;
