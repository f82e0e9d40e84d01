//! Repository traits (ports)

mod repositories;

pub use repositories::{
    ActionRepository, CommandLogRepository, GuildRepository, RepoResult, SanctionRepository,
    SettingsRepository, WarningRepository,
};
