//! # warden-core
//!
//! Domain layer for the moderation enforcement core: entities, value objects,
//! repository traits, and domain errors. This crate has zero dependencies on
//! infrastructure (database, chat platform, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    clamp_minutes, Action, ActionType, ActorProfile, CommandLogEntry, GuildRecord, TimedSanction,
    Warning, DEFAULT_TIMEOUT_MINUTES, MAX_SANCTION_MINUTES,
};
pub use error::DomainError;
pub use traits::{
    ActionRepository, CommandLogRepository, GuildRepository, RepoResult, SanctionRepository,
    SettingsRepository, WarningRepository,
};
pub use value_objects::{Capabilities, Snowflake, SnowflakeParseError};
