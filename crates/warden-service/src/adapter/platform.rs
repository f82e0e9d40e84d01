//! Platform adapter trait - requests the core issues against the chat
//! platform
//!
//! Role grants/revokes, message deletions, and member-state changes are
//! dispatched fire-and-forget by the callers; the core records its actions
//! without waiting on platform completion. `purge_messages` and `fetch_ban`
//! are the exceptions: their results feed the recorded action and the
//! not-found decision, so callers await them.

use async_trait::async_trait;
use thiserror::Error;

use warden_core::{Action, Snowflake};

/// Failure of a platform request
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("platform request failed: {0}")]
    Request(String),

    #[error("{0} not found on platform")]
    NotFound(String),
}

/// Result type for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Gateway to the chat platform
#[async_trait]
pub trait PlatformAdapter: Send + Sync {
    /// Grant a role to a member
    async fn grant_role(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> AdapterResult<()>;

    /// Revoke a role from a member
    async fn revoke_role(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> AdapterResult<()>;

    /// Delete a single message
    async fn delete_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> AdapterResult<()>;

    /// Apply a native timeout to a member
    async fn timeout_member(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        minutes: i64,
        reason: &str,
    ) -> AdapterResult<()>;

    /// Clear a member's native timeout
    async fn clear_timeout(&self, guild_id: Snowflake, user_id: Snowflake) -> AdapterResult<()>;

    /// Ban a user, deleting `delete_days` days of message history (0-7)
    async fn ban_user(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        delete_days: i64,
        reason: &str,
    ) -> AdapterResult<()>;

    /// Lift a ban
    async fn unban_user(&self, guild_id: Snowflake, user_id: Snowflake) -> AdapterResult<()>;

    /// Remove a member from the guild
    async fn kick_member(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        reason: &str,
    ) -> AdapterResult<()>;

    /// Bulk-delete up to `amount` recent messages; returns the number
    /// actually deleted
    async fn purge_messages(&self, channel_id: Snowflake, amount: i64) -> AdapterResult<i64>;

    /// Look up a user on the ban list; returns the banned user's name when
    /// present
    async fn fetch_ban(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> AdapterResult<Option<String>>;

    /// Post a user-facing notice in a channel
    async fn send_notice(&self, channel_id: Snowflake, text: &str) -> AdapterResult<()>;

    /// Render an action into the moderation log channel
    async fn send_log_entry(&self, guild_id: Snowflake, action: &Action) -> AdapterResult<()>;
}
