//! Backend module - engine capability traits, construction strategies and the
//! shared handle cache

pub mod access;
pub mod grpc_backend;
pub mod in_process;
pub mod proto;
pub mod target;
pub mod traits;

pub use access::{BackendAccess, HandleState};
pub use grpc_backend::GrpcFactory;
pub use in_process::{EngineInit, InProcessFactory};
pub use target::{BackendTarget, DialOptions, RemoteEndpoint};
pub use traits::{BackendError, BackendResult, Engine, Product, SdkFactory, SdkId};
