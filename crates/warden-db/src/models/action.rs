//! Action store model
//!
//! Preserves the legacy `moderation_analytics` encoding: string ids and a
//! `"0"` sentinel for "no target". The sentinel exists only here; the
//! domain entity carries an explicit `Option`.

use sqlx::FromRow;

use warden_core::{Action, ActionType, Snowflake};

/// Row of the `moderation_analytics` table
#[derive(Debug, Clone, FromRow)]
pub struct ActionModel {
    pub action: String,
    pub moderator_id: Option<String>,
    pub moderator_name: Option<String>,
    pub target_id: Option<String>,
    pub target_name: Option<String>,
    pub reason: Option<String>,
    pub timestamp: i64,
    pub duration: i64,
    pub count: i64,
}

/// The stored form of an absent target
pub(crate) const NO_TARGET_SENTINEL: &str = "0";

/// Encode an optional target id for storage
pub(crate) fn encode_target(target: Option<Snowflake>) -> String {
    match target {
        Some(id) => id.to_string(),
        None => NO_TARGET_SENTINEL.to_string(),
    }
}

impl ActionModel {
    /// Decode into the domain entity; rows with an unknown action string
    /// are unreadable and yield `None`
    pub fn into_action(self) -> Option<Action> {
        let action_type = ActionType::parse(&self.action)?;
        let target = self
            .target_id
            .as_deref()
            .filter(|id| *id != NO_TARGET_SENTINEL)
            .and_then(|id| Snowflake::parse(id).ok());

        Some(Action {
            action_type,
            actor_id: self
                .moderator_id
                .as_deref()
                .and_then(|id| Snowflake::parse(id).ok())
                .unwrap_or_default(),
            actor_name: self.moderator_name.unwrap_or_else(|| "Unknown".to_string()),
            target,
            target_name: self.target_name.unwrap_or_else(|| "Unknown".to_string()),
            reason: self.reason.unwrap_or_default(),
            occurred_at: self.timestamp,
            duration_minutes: self.duration,
            count: self.count,
        })
    }
}
