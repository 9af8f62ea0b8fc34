//! Public API for configuration

pub mod loader;
pub mod model;

// Re-export the main entrypoints:
pub use loader::{convert_stubs, load};
pub use model::{Config, ConfigError, EngineConfig, LoggingConfig};
