//! Application configuration

mod app_config;

pub use app_config::{AppConfig, CollectionsConfig, LendingConfig, LogFormat, LoggingConfig};
