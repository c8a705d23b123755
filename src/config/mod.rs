//! Client configuration: API address, timeouts and storage location.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{ApiConfig, Config, StorageConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
