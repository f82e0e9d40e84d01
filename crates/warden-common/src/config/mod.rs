//! Configuration structs

mod app_config;
mod policy_manifest;

pub use app_config::{AppConfig, AppSettings, ConfigError, DatabaseConfig, Environment};
pub use policy_manifest::{PolicyManifest, SystemActorConfig};
