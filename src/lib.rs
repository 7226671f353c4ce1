//! Serve Chat Gateway
//!
//! An HTTP gateway that multiplexes the Senzing chat API, its Swagger UI and
//! an operator console behind one listener, reaching the entity-resolution
//! engine either in-process or over gRPC.

pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod gateway;
pub mod site;

pub use error::{AppError, Result};
pub use gateway::HttpServer;
