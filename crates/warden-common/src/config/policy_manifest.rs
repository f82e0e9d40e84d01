//! Policy manifest - static per-guild channel policies and role tiers
//!
//! Loaded once at startup from a TOML file and immutable for the process
//! lifetime. A channel id should appear in at most one policy list; when it
//! does not, the filter engine's evaluation order decides precedence.

use serde::Deserialize;

use warden_core::Snowflake;

use super::app_config::ConfigError;

/// Identity the core uses when acting on its own behalf (filter deletions,
/// automatic unmutes)
#[derive(Debug, Clone, Deserialize)]
pub struct SystemActorConfig {
    pub id: Snowflake,
    #[serde(default = "default_system_name")]
    pub name: String,
}

fn default_system_name() -> String {
    "warden".to_string()
}

/// Static channel-policy and role-tier configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyManifest {
    #[serde(default)]
    pub media_only_channels: Vec<Snowflake>,
    #[serde(default)]
    pub screenshot_only_channels: Vec<Snowflake>,
    #[serde(default)]
    pub no_media_channels: Vec<Snowflake>,
    #[serde(default)]
    pub no_content_channels: Vec<Snowflake>,
    #[serde(default)]
    pub no_message_channels: Vec<Snowflake>,
    #[serde(default)]
    pub moderator_roles: Vec<Snowflake>,
    #[serde(default)]
    pub admin_roles: Vec<Snowflake>,
    pub system_actor: SystemActorConfig,
}

impl PolicyManifest {
    /// Load the manifest from a TOML file
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let manifest = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?
            .try_deserialize::<Self>()?;
        Ok(manifest)
    }
}
