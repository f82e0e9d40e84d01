//! # warden-db
//!
//! Durable store implementing the repository traits from `warden-core` over
//! SQLite via SQLx.
//!
//! ## Overview
//!
//! - Connection pool tuned for one writer, many readers (WAL journal,
//!   NORMAL synchronous durability, busy timeout)
//! - Idempotent schema initialization, run once before any other access
//! - A bounded-retry wrapper around every operation that absorbs transient
//!   "database is locked" contention (3 attempts, linear backoff)
//! - `FromRow` models preserving the legacy column encoding (string ids,
//!   `"0"` target sentinel)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use warden_db::pool::{create_pool, StoreConfig};
//! use warden_db::{init_schema, SqliteWarningRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&StoreConfig::default()).await?;
//!     init_schema(&pool).await?;
//!     let warnings = SqliteWarningRepository::new(pool);
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod models;
pub mod pool;
pub mod repositories;
pub mod retry;
pub mod schema;

// Re-export commonly used types
pub use pool::{create_memory_pool, create_pool, SqlitePool, StoreConfig};
pub use repositories::{
    SqliteActionRepository, SqliteCommandLogRepository, SqliteGuildRepository,
    SqliteSanctionRepository, SqliteSettingsRepository, SqliteWarningRepository,
};
pub use retry::with_retry;
pub use schema::init_schema;
