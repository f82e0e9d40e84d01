//! SQLite connection pool management
//!
//! The store is configured for one writer and many readers: WAL journal
//! mode, NORMAL synchronous durability, and a busy timeout so short lock
//! contention resolves inside the driver before the retry wrapper sees it.

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::time::Duration;

use warden_common::config::DatabaseConfig;

/// Store configuration for the connection pool
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file
    pub path: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// How long a connection waits on a lock before reporting busy
    pub busy_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: String::from("warden.db"),
            max_connections: 8,
            busy_timeout: Duration::from_secs(30),
        }
    }
}

impl From<&DatabaseConfig> for StoreConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            path: config.path.clone(),
            max_connections: config.max_connections,
            busy_timeout: Duration::from_secs(config.busy_timeout_secs),
        }
    }
}

fn connect_options(config: &StoreConfig) -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .filename(&config.path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(config.busy_timeout)
        .pragma("cache_size", "10000")
        .pragma("temp_store", "memory")
}

/// Create a new SQLite connection pool
pub async fn create_pool(config: &StoreConfig) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(connect_options(config))
        .await
}

/// Create an in-memory pool for tests
///
/// A single shared connection: each in-memory connection would otherwise
/// see its own private database.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .in_memory(true)
        .journal_mode(SqliteJournalMode::Memory)
        .synchronous(SqliteSynchronous::Normal);

    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.max_connections, 8);
        assert_eq!(config.busy_timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_memory_pool_connects() {
        let pool = create_memory_pool().await.expect("memory pool");
        let one: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("select 1");
        assert_eq!(one, 1);
    }
}
