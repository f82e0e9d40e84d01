//! Command audit log entry

use crate::value_objects::Snowflake;

/// One invocation of a moderation command, recorded before gating
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLogEntry {
    pub user_id: Snowflake,
    pub user_name: String,
    pub command: String,
    pub issued_at: i64,
}
