//! Shared types and configuration for the sitelens workspace.

pub mod app_config;
pub mod config;
pub mod error;
pub mod normalize;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use normalize::cache_key;
pub use types::{BusinessProfile, ContactInfo, SocialMedia};
