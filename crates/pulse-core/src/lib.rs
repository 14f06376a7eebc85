//! Shared domain types and configuration for the engagement pipeline.

mod app_config;
mod category;
mod config;
mod posts;

use thiserror::Error;

pub use app_config::{AppConfig, OutputLayout};
pub use category::Category;
pub use config::{load_app_config, load_app_config_from_env};
pub use posts::{CategorySummary, CleanedPost, EnrichedPost, RawPost, TopPost};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("inconsistent configuration: {0}")]
    Inconsistent(String),
}
