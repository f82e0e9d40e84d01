//! SQLite implementation of SettingsRepository

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use tracing::instrument;

use warden_core::{RepoResult, SettingsRepository, Snowflake};

use crate::models::SettingModel;
use crate::retry::with_retry;

const MUTE_ROLE_KEY: &str = "muteRoleId";

/// SQLite implementation of SettingsRepository
#[derive(Clone)]
pub struct SqliteSettingsRepository {
    pool: SqlitePool,
}

impl SqliteSettingsRepository {
    /// Create a new SqliteSettingsRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for SqliteSettingsRepository {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let model = with_retry("settings.get", || async move {
            sqlx::query_as::<_, SettingModel>(
                "SELECT key, value FROM bot_settings WHERE key = ?",
            )
            .bind(key)
            .fetch_optional(&self.pool)
            .await
        })
        .await?;

        Ok(model.and_then(|m| m.value))
    }

    #[instrument(skip(self, value))]
    async fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        with_retry("settings.set", || async move {
            sqlx::query("INSERT OR REPLACE INTO bot_settings (key, value) VALUES (?, ?)")
                .bind(key)
                .bind(value)
                .execute(&self.pool)
                .await
                .map(|_| ())
        })
        .await
    }

    async fn mute_role(&self) -> RepoResult<Option<Snowflake>> {
        let value = self.get(MUTE_ROLE_KEY).await?;
        Ok(value.and_then(|v| Snowflake::parse(&v).ok()))
    }

    async fn set_mute_role(&self, role_id: Snowflake) -> RepoResult<()> {
        self.set(MUTE_ROLE_KEY, &role_id.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SqliteSettingsRepository>();
    }
}
