//! SQLite implementation of WarningRepository

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use tracing::{debug, instrument};

use warden_core::{RepoResult, Snowflake, Warning, WarningRepository};

use crate::models::WarningModel;
use crate::retry::with_retry;

/// SQLite implementation of WarningRepository
#[derive(Clone)]
pub struct SqliteWarningRepository {
    pool: SqlitePool,
}

impl SqliteWarningRepository {
    /// Create a new SqliteWarningRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WarningRepository for SqliteWarningRepository {
    #[instrument(skip(self, warning))]
    async fn append(&self, warning: &Warning) -> RepoResult<()> {
        with_retry("warnings.append", || async move {
            sqlx::query(
                r"
                INSERT INTO warnings (userId, moderatorId, reason, timestamp)
                VALUES (?, ?, ?, ?)
                ",
            )
            .bind(warning.user_id.to_string())
            .bind(warning.moderator_id.to_string())
            .bind(&warning.reason)
            .bind(warning.issued_at)
            .execute(&self.pool)
            .await
            .map(|_| ())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn for_user(&self, user_id: Snowflake) -> RepoResult<Vec<Warning>> {
        let models = with_retry("warnings.for_user", || async move {
            sqlx::query_as::<_, WarningModel>(
                r"
                SELECT userId AS user_id, moderatorId AS moderator_id, reason, timestamp
                FROM warnings
                WHERE userId = ?
                ORDER BY id
                ",
            )
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
        })
        .await?;

        Ok(models.into_iter().map(Warning::from).collect())
    }

    #[instrument(skip(self))]
    async fn delete_for_user(&self, user_id: Snowflake) -> RepoResult<u64> {
        let removed = with_retry("warnings.delete_for_user", || async move {
            sqlx::query("DELETE FROM warnings WHERE userId = ?")
                .bind(user_id.to_string())
                .execute(&self.pool)
                .await
                .map(|r| r.rows_affected())
        })
        .await?;

        debug!(user_id = %user_id, removed, "deleted warnings for user");
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn all(&self) -> RepoResult<Vec<Warning>> {
        let models = with_retry("warnings.all", || async move {
            sqlx::query_as::<_, WarningModel>(
                r"
                SELECT userId AS user_id, moderatorId AS moderator_id, reason, timestamp
                FROM warnings
                ORDER BY id
                ",
            )
            .fetch_all(&self.pool)
            .await
        })
        .await?;

        Ok(models.into_iter().map(Warning::from).collect())
    }
}
