//! Gateway module - route composition, Swagger UI and the HTTP server

pub mod routes;
pub mod server;
pub mod swagger;

pub use routes::{Mount, MountKind, RouteTable};
pub use server::HttpServer;
