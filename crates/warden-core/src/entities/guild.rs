//! Guild registry record

use crate::value_objects::Snowflake;

/// One row of the guild registry, written when the bot joins a guild
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildRecord {
    pub guild_id: Snowflake,
    pub name: String,
    pub joined_at: i64,
}
