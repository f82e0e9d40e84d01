//! Guild registry store model

use sqlx::FromRow;

use warden_core::{GuildRecord, Snowflake};

/// Row of the `guilds` table
#[derive(Debug, Clone, FromRow)]
pub struct GuildModel {
    pub guild_id: String,
    pub guild_name: Option<String>,
    pub joined_timestamp: i64,
}

impl From<GuildModel> for GuildRecord {
    fn from(model: GuildModel) -> Self {
        GuildRecord {
            guild_id: Snowflake::parse(&model.guild_id).unwrap_or_default(),
            name: model.guild_name.unwrap_or_default(),
            joined_at: model.joined_timestamp,
        }
    }
}
