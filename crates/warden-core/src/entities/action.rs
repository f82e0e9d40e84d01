//! Action entity - an immutable record of one enforcement event

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Kind of enforcement action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Warn,
    Mute,
    Unmute,
    Timeout,
    Untimeout,
    Ban,
    Unban,
    Kick,
    Purge,
    MessageDelete,
}

impl ActionType {
    /// Stable string form used at the persistence boundary
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warn => "WARN",
            Self::Mute => "MUTE",
            Self::Unmute => "UNMUTE",
            Self::Timeout => "TIMEOUT",
            Self::Untimeout => "UNTIMEOUT",
            Self::Ban => "BAN",
            Self::Unban => "UNBAN",
            Self::Kick => "KICK",
            Self::Purge => "PURGE",
            Self::MessageDelete => "MESSAGE_DELETE",
        }
    }

    /// Parse the persisted string form
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "WARN" => Self::Warn,
            "MUTE" => Self::Mute,
            "UNMUTE" => Self::Unmute,
            "TIMEOUT" => Self::Timeout,
            "UNTIMEOUT" => Self::Untimeout,
            "BAN" => Self::Ban,
            "UNBAN" => Self::Unban,
            "KICK" => Self::Kick,
            "PURGE" => Self::Purge,
            "MESSAGE_DELETE" => Self::MessageDelete,
            _ => return None,
        })
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable fact describing one enforcement action
///
/// Created once, never mutated, retained forever. `target` is `None` for
/// actions without a subject user (e.g. a purge); the legacy `"0"` sentinel
/// exists only in the stored column encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub action_type: ActionType,
    pub actor_id: Snowflake,
    pub actor_name: String,
    pub target: Option<Snowflake>,
    pub target_name: String,
    pub reason: String,
    pub occurred_at: i64,
    pub duration_minutes: i64,
    pub count: i64,
}

impl Action {
    /// Calendar date of the action (UTC)
    pub fn date(&self) -> NaiveDate {
        chrono::DateTime::from_timestamp_millis(self.occurred_at)
            .unwrap_or_default()
            .date_naive()
    }
}
