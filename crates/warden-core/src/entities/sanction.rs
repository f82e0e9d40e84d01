//! Timed sanction - an in-flight role-based mute with a durable expiry

use crate::value_objects::Snowflake;

/// Hard cap on any timed sanction: 28 days in minutes
pub const MAX_SANCTION_MINUTES: i64 = 40_320;

/// Timeout duration applied when none is requested
pub const DEFAULT_TIMEOUT_MINUTES: i64 = 60;

/// Clamp a requested sanction duration to the platform maximum
#[inline]
pub fn clamp_minutes(minutes: i64) -> i64 {
    minutes.min(MAX_SANCTION_MINUTES)
}

/// An active timed mute
///
/// The persisted `expires_at` timestamp is the single authoritative record;
/// in-process timers are re-derived from it after a restart. A permanent
/// mute persists no row at all, which is distinct from "expires far in the
/// future".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedSanction {
    pub guild_id: Snowflake,
    pub target_id: Snowflake,
    pub role_id: Snowflake,
    pub started_at: i64,
    pub expires_at: i64,
}

impl TimedSanction {
    /// Milliseconds remaining until expiry; zero if already due
    #[inline]
    pub fn remaining_millis(&self, now: i64) -> i64 {
        (self.expires_at - now).max(0)
    }

    /// Whether the sanction is due at `now`
    #[inline]
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at <= now
    }
}
