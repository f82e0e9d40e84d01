//! SQLite implementation of SanctionRepository
//!
//! `remove` is the per-target race guard: it deletes and returns the row in
//! one statement, so between a timer fire and an explicit unmute only one
//! side ever sees the sanction.

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use tracing::instrument;

use warden_core::{RepoResult, SanctionRepository, Snowflake, TimedSanction};

use crate::models::SanctionModel;
use crate::retry::with_retry;

/// SQLite implementation of SanctionRepository
#[derive(Clone)]
pub struct SqliteSanctionRepository {
    pool: SqlitePool,
}

impl SqliteSanctionRepository {
    /// Create a new SqliteSanctionRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SanctionRepository for SqliteSanctionRepository {
    #[instrument(skip(self, sanction), fields(target_id = %sanction.target_id))]
    async fn upsert(&self, sanction: &TimedSanction) -> RepoResult<()> {
        with_retry("sanctions.upsert", || async move {
            sqlx::query(
                r"
                INSERT INTO timed_sanctions (guildId, targetId, roleId, startedAt, expiresAt)
                VALUES (?, ?, ?, ?, ?)
                ON CONFLICT (guildId, targetId)
                DO UPDATE SET roleId = excluded.roleId,
                              startedAt = excluded.startedAt,
                              expiresAt = excluded.expiresAt
                ",
            )
            .bind(sanction.guild_id.to_string())
            .bind(sanction.target_id.to_string())
            .bind(sanction.role_id.to_string())
            .bind(sanction.started_at)
            .bind(sanction.expires_at)
            .execute(&self.pool)
            .await
            .map(|_| ())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn remove(
        &self,
        guild_id: Snowflake,
        target_id: Snowflake,
    ) -> RepoResult<Option<TimedSanction>> {
        let model = with_retry("sanctions.remove", || async move {
            sqlx::query_as::<_, SanctionModel>(
                r"
                DELETE FROM timed_sanctions
                WHERE guildId = ? AND targetId = ?
                RETURNING guildId AS guild_id, targetId AS target_id, roleId AS role_id,
                          startedAt AS started_at, expiresAt AS expires_at
                ",
            )
            .bind(guild_id.to_string())
            .bind(target_id.to_string())
            .fetch_optional(&self.pool)
            .await
        })
        .await?;

        Ok(model.map(TimedSanction::from))
    }

    #[instrument(skip(self))]
    async fn all(&self) -> RepoResult<Vec<TimedSanction>> {
        let models = with_retry("sanctions.all", || async move {
            sqlx::query_as::<_, SanctionModel>(
                r"
                SELECT guildId AS guild_id, targetId AS target_id, roleId AS role_id,
                       startedAt AS started_at, expiresAt AS expires_at
                FROM timed_sanctions
                ORDER BY expiresAt
                ",
            )
            .fetch_all(&self.pool)
            .await
        })
        .await?;

        Ok(models.into_iter().map(TimedSanction::from).collect())
    }
}
