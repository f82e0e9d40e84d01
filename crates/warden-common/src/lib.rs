//! # warden-common
//!
//! Shared utilities: configuration, application error type, and telemetry.

pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{AppConfig, AppSettings, ConfigError, DatabaseConfig, Environment, PolicyManifest, SystemActorConfig};
pub use error::{AppError, AppResult};
pub use telemetry::{init_tracing, init_tracing_with_config, TracingConfig};
