//! Service context - dependency container for the moderation service
//!
//! Holds the repositories, the platform adapter, and the policy manifest.

use std::sync::Arc;

use warden_common::PolicyManifest;
use warden_core::{
    ActionRepository, CommandLogRepository, GuildRepository, SanctionRepository,
    SettingsRepository, WarningRepository,
};

use crate::adapter::PlatformAdapter;

/// Dependency container passed to the moderation service
#[derive(Clone)]
pub struct ServiceContext {
    warning_repo: Arc<dyn WarningRepository>,
    action_repo: Arc<dyn ActionRepository>,
    settings_repo: Arc<dyn SettingsRepository>,
    sanction_repo: Arc<dyn SanctionRepository>,
    guild_repo: Arc<dyn GuildRepository>,
    command_log_repo: Arc<dyn CommandLogRepository>,
    adapter: Arc<dyn PlatformAdapter>,
    manifest: Arc<PolicyManifest>,
}

impl ServiceContext {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        warning_repo: Arc<dyn WarningRepository>,
        action_repo: Arc<dyn ActionRepository>,
        settings_repo: Arc<dyn SettingsRepository>,
        sanction_repo: Arc<dyn SanctionRepository>,
        guild_repo: Arc<dyn GuildRepository>,
        command_log_repo: Arc<dyn CommandLogRepository>,
        adapter: Arc<dyn PlatformAdapter>,
        manifest: Arc<PolicyManifest>,
    ) -> Self {
        Self {
            warning_repo,
            action_repo,
            settings_repo,
            sanction_repo,
            guild_repo,
            command_log_repo,
            adapter,
            manifest,
        }
    }

    pub fn warning_repo(&self) -> &Arc<dyn WarningRepository> {
        &self.warning_repo
    }

    pub fn action_repo(&self) -> &Arc<dyn ActionRepository> {
        &self.action_repo
    }

    pub fn settings_repo(&self) -> &Arc<dyn SettingsRepository> {
        &self.settings_repo
    }

    pub fn sanction_repo(&self) -> &Arc<dyn SanctionRepository> {
        &self.sanction_repo
    }

    pub fn guild_repo(&self) -> &Arc<dyn GuildRepository> {
        &self.guild_repo
    }

    pub fn command_log_repo(&self) -> &Arc<dyn CommandLogRepository> {
        &self.command_log_repo
    }

    pub fn adapter(&self) -> &Arc<dyn PlatformAdapter> {
        &self.adapter
    }

    pub fn manifest(&self) -> &PolicyManifest {
        &self.manifest
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("adapter", &"dyn PlatformAdapter")
            .finish()
    }
}
