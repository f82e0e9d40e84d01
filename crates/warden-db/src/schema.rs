//! Idempotent schema initialization
//!
//! Table creation is create-if-absent and must run once at startup before
//! any other store access. Column names keep the legacy camelCase encoding
//! for backward compatibility with an existing store file.

use sqlx::sqlite::SqlitePool;
use tracing::info;

use warden_core::RepoResult;

use crate::retry::with_retry;

// Serializes the one-time initialization check across concurrent callers.
static INIT_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

const TABLES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS warnings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        userId TEXT NOT NULL,
        moderatorId TEXT,
        reason TEXT,
        timestamp INTEGER
    )",
    "CREATE TABLE IF NOT EXISTS moderation_analytics (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        action TEXT NOT NULL,
        moderatorId TEXT,
        moderatorName TEXT,
        targetId TEXT,
        targetName TEXT,
        reason TEXT,
        timestamp INTEGER,
        duration INTEGER,
        count INTEGER
    )",
    "CREATE TABLE IF NOT EXISTS bot_settings (
        key TEXT PRIMARY KEY,
        value TEXT
    )",
    "CREATE TABLE IF NOT EXISTS guilds (
        guildId TEXT PRIMARY KEY,
        guildName TEXT,
        joinedTimestamp INTEGER
    )",
    "CREATE TABLE IF NOT EXISTS command_logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        userId TEXT,
        userName TEXT,
        commandName TEXT,
        timestamp INTEGER
    )",
    "CREATE TABLE IF NOT EXISTS timed_sanctions (
        guildId TEXT NOT NULL,
        targetId TEXT NOT NULL,
        roleId TEXT NOT NULL,
        startedAt INTEGER NOT NULL,
        expiresAt INTEGER NOT NULL,
        PRIMARY KEY (guildId, targetId)
    )",
];

/// Create all tables if absent
///
/// Safe to call more than once; callers racing on first use are serialized.
pub async fn init_schema(pool: &SqlitePool) -> RepoResult<()> {
    let _guard = INIT_LOCK.lock().await;

    for ddl in TABLES {
        with_retry("schema.init", || async move {
            sqlx::query(ddl).execute(pool).await.map(|_| ())
        })
        .await?;
    }

    info!("store schema initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::create_memory_pool;

    #[tokio::test]
    async fn test_init_is_idempotent() {
        let pool = create_memory_pool().await.expect("pool");
        init_schema(&pool).await.expect("first init");
        init_schema(&pool).await.expect("second init");

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .expect("table list");

        assert!(tables.contains(&"warnings".to_string()));
        assert!(tables.contains(&"moderation_analytics".to_string()));
        assert!(tables.contains(&"bot_settings".to_string()));
        assert!(tables.contains(&"guilds".to_string()));
        assert!(tables.contains(&"command_logs".to_string()));
        assert!(tables.contains(&"timed_sanctions".to_string()));
    }
}
