//! Shared configuration and input parsing for tagrank.

pub mod app_config;
pub mod config;
pub mod error;
pub mod hashtags;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use hashtags::{load_hashtags, parse_hashtags};
