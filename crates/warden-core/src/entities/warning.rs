//! Warning record - mutable-by-addition per-user disciplinary record

use crate::value_objects::Snowflake;

/// A single warning issued to a user
///
/// Warnings are only ever appended or bulk-deleted for a user; the warning
/// count for a user is the cardinality of this set, recomputed on read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub user_id: Snowflake,
    pub moderator_id: Snowflake,
    pub reason: String,
    pub issued_at: i64,
}

impl Warning {
    pub fn new(
        user_id: Snowflake,
        moderator_id: Snowflake,
        reason: impl Into<String>,
        issued_at: i64,
    ) -> Self {
        Self {
            user_id,
            moderator_id,
            reason: reason.into(),
            issued_at,
        }
    }
}
