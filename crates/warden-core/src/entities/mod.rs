//! Domain entities

mod action;
mod actor;
mod command_log;
mod guild;
mod sanction;
mod warning;

pub use action::{Action, ActionType};
pub use actor::ActorProfile;
pub use command_log::CommandLogEntry;
pub use guild::GuildRecord;
pub use sanction::{clamp_minutes, TimedSanction, DEFAULT_TIMEOUT_MINUTES, MAX_SANCTION_MINUTES};
pub use warning::Warning;
