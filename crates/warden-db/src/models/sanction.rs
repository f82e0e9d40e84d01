//! Timed sanction store model

use sqlx::FromRow;

use warden_core::{Snowflake, TimedSanction};

/// Row of the `timed_sanctions` table
#[derive(Debug, Clone, FromRow)]
pub struct SanctionModel {
    pub guild_id: String,
    pub target_id: String,
    pub role_id: String,
    pub started_at: i64,
    pub expires_at: i64,
}

impl From<SanctionModel> for TimedSanction {
    fn from(model: SanctionModel) -> Self {
        TimedSanction {
            guild_id: Snowflake::parse(&model.guild_id).unwrap_or_default(),
            target_id: Snowflake::parse(&model.target_id).unwrap_or_default(),
            role_id: Snowflake::parse(&model.role_id).unwrap_or_default(),
            started_at: model.started_at,
            expires_at: model.expires_at,
        }
    }
}
