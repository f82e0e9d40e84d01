//! SQLite implementation of GuildRepository

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use tracing::instrument;

use warden_core::{GuildRecord, GuildRepository, RepoResult};

use crate::models::GuildModel;
use crate::retry::with_retry;

/// SQLite implementation of GuildRepository
#[derive(Clone)]
pub struct SqliteGuildRepository {
    pool: SqlitePool,
}

impl SqliteGuildRepository {
    /// Create a new SqliteGuildRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GuildRepository for SqliteGuildRepository {
    #[instrument(skip(self, guild), fields(guild_id = %guild.guild_id))]
    async fn upsert(&self, guild: &GuildRecord) -> RepoResult<()> {
        with_retry("guilds.upsert", || async move {
            sqlx::query(
                r"
                INSERT OR REPLACE INTO guilds (guildId, guildName, joinedTimestamp)
                VALUES (?, ?, ?)
                ",
            )
            .bind(guild.guild_id.to_string())
            .bind(&guild.name)
            .bind(guild.joined_at)
            .execute(&self.pool)
            .await
            .map(|_| ())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn all(&self) -> RepoResult<Vec<GuildRecord>> {
        let models = with_retry("guilds.all", || async move {
            sqlx::query_as::<_, GuildModel>(
                r"
                SELECT guildId AS guild_id, guildName AS guild_name,
                       joinedTimestamp AS joined_timestamp
                FROM guilds
                ORDER BY joinedTimestamp
                ",
            )
            .fetch_all(&self.pool)
            .await
        })
        .await?;

        Ok(models.into_iter().map(GuildRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SqliteGuildRepository>();
    }
}
