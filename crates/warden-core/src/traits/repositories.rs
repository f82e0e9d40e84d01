//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the store layer provides the
//! implementation. Every implementation is expected to route operations
//! through the bounded-retry wrapper so transient lock contention is
//! absorbed before errors reach the caller.

use async_trait::async_trait;

use crate::entities::{Action, CommandLogEntry, GuildRecord, TimedSanction, Warning};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Warning Repository
// ============================================================================

#[async_trait]
pub trait WarningRepository: Send + Sync {
    /// Append a warning record
    async fn append(&self, warning: &Warning) -> RepoResult<()>;

    /// All warnings for one user, in insertion order
    async fn for_user(&self, user_id: Snowflake) -> RepoResult<Vec<Warning>>;

    /// Bulk-delete all warnings for one user; returns the number removed
    async fn delete_for_user(&self, user_id: Snowflake) -> RepoResult<u64>;

    /// Every warning in the store
    async fn all(&self) -> RepoResult<Vec<Warning>>;
}

// ============================================================================
// Action Repository
// ============================================================================

#[async_trait]
pub trait ActionRepository: Send + Sync {
    /// Append an enforcement action; the only mutation path
    async fn append(&self, action: &Action) -> RepoResult<()>;

    /// Every recorded action, in insertion order
    async fn all(&self) -> RepoResult<Vec<Action>>;
}

// ============================================================================
// Settings Repository
// ============================================================================

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Read a singleton setting
    async fn get(&self, key: &str) -> RepoResult<Option<String>>;

    /// Upsert a singleton setting
    async fn set(&self, key: &str, value: &str) -> RepoResult<()>;

    /// The role designated for muting; `None` means muting is unconfigured
    async fn mute_role(&self) -> RepoResult<Option<Snowflake>>;

    /// Persist the mute role id
    async fn set_mute_role(&self, role_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Sanction Repository
// ============================================================================

#[async_trait]
pub trait SanctionRepository: Send + Sync {
    /// Persist (or replace) the timed sanction for a target
    async fn upsert(&self, sanction: &TimedSanction) -> RepoResult<()>;

    /// Atomically delete and return the sanction for a target, if present.
    ///
    /// This is the per-target race guard: between a timer fire and an
    /// explicit unmute, only the caller that gets the row back proceeds to
    /// revoke and log.
    async fn remove(
        &self,
        guild_id: Snowflake,
        target_id: Snowflake,
    ) -> RepoResult<Option<TimedSanction>>;

    /// Every persisted sanction (used by startup recovery)
    async fn all(&self) -> RepoResult<Vec<TimedSanction>>;
}

// ============================================================================
// Guild Repository
// ============================================================================

#[async_trait]
pub trait GuildRepository: Send + Sync {
    /// Upsert a guild registry row
    async fn upsert(&self, guild: &GuildRecord) -> RepoResult<()>;

    /// Every registered guild
    async fn all(&self) -> RepoResult<Vec<GuildRecord>>;
}

// ============================================================================
// Command Log Repository
// ============================================================================

#[async_trait]
pub trait CommandLogRepository: Send + Sync {
    /// Append a command audit entry
    async fn append(&self, entry: &CommandLogEntry) -> RepoResult<()>;
}
