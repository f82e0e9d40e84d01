//! Repository implementations
//!
//! SQLite implementations of the repository traits defined in warden-core.
//! Every operation runs through the bounded-retry wrapper.

mod action;
mod command_log;
mod guild;
mod sanction;
mod settings;
mod warning;

pub use action::SqliteActionRepository;
pub use command_log::SqliteCommandLogRepository;
pub use guild::SqliteGuildRepository;
pub use sanction::SqliteSanctionRepository;
pub use settings::SqliteSettingsRepository;
pub use warning::SqliteWarningRepository;
