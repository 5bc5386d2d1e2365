mod app_config;
mod config;
mod product;

pub use app_config::{AppConfig, CachePolicy};
pub use config::{load_app_config, load_app_config_from_env};
pub use product::Product;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable was set to a value that does not parse.
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
