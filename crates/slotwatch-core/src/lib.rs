mod app_config;
mod config;
mod location;
mod range;

pub use app_config::{AppConfig, DEFAULT_PAGE_URL};
pub use config::{load_app_config, load_app_config_from_env};
pub use location::{Location, UNKNOWN_DATE};
pub use range::filter_in_range;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
