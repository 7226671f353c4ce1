//! Configuration module

pub mod cli;
pub mod flags;
pub mod settings;

pub use cli::Cli;
pub use flags::FeatureFlags;
pub use settings::*;
