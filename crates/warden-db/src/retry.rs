//! Bounded-retry wrapper for store operations
//!
//! Every repository operation runs through [`with_retry`]: up to 3
//! attempts with linear backoff (`attempt * 1s`), retried only when the
//! failure signature indicates the store is transiently locked by a
//! concurrent writer. Any other failure propagates immediately.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use warden_core::{DomainError, RepoResult};

/// Maximum number of attempts per operation
pub const MAX_ATTEMPTS: u64 = 3;

/// Run a store operation with the bounded-retry policy
pub async fn with_retry<T, F, Fut>(op_name: &'static str, op: F) -> RepoResult<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let mut attempt: u64 = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if is_locked(&e) && attempt < MAX_ATTEMPTS => {
                warn!(
                    operation = op_name,
                    attempt,
                    max_attempts = MAX_ATTEMPTS,
                    "store locked, retrying"
                );
                tokio::time::sleep(Duration::from_secs(attempt)).await;
                attempt += 1;
            }
            Err(e) => return Err(map_store_error(op_name, &e)),
        }
    }
}

/// True when the error signature is SQLite lock contention
pub(crate) fn is_locked(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db) => {
            let message = db.message();
            message.contains("database is locked") || message.contains("database table is locked")
        }
        _ => false,
    }
}

/// Map a store error to the domain taxonomy, tagged with operation context
pub(crate) fn map_store_error(op_name: &'static str, e: &sqlx::Error) -> DomainError {
    if is_locked(e) {
        DomainError::StoreBusy(format!("{op_name}: {e}"))
    } else {
        DomainError::Database(format!("{op_name}: {e}"))
    }
}
