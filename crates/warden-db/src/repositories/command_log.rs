//! SQLite implementation of CommandLogRepository

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use tracing::instrument;

use warden_core::{CommandLogEntry, CommandLogRepository, RepoResult};

use crate::retry::with_retry;

/// SQLite implementation of CommandLogRepository
#[derive(Clone)]
pub struct SqliteCommandLogRepository {
    pool: SqlitePool,
}

impl SqliteCommandLogRepository {
    /// Create a new SqliteCommandLogRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommandLogRepository for SqliteCommandLogRepository {
    #[instrument(skip(self, entry), fields(command = %entry.command))]
    async fn append(&self, entry: &CommandLogEntry) -> RepoResult<()> {
        with_retry("command_logs.append", || async move {
            sqlx::query(
                r"
                INSERT INTO command_logs (userId, userName, commandName, timestamp)
                VALUES (?, ?, ?, ?)
                ",
            )
            .bind(entry.user_id.to_string())
            .bind(&entry.user_name)
            .bind(&entry.command)
            .bind(entry.issued_at)
            .execute(&self.pool)
            .await
            .map(|_| ())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SqliteCommandLogRepository>();
    }
}
