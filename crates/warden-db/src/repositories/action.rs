//! SQLite implementation of ActionRepository

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use tracing::{instrument, warn};

use warden_core::{Action, ActionRepository, RepoResult};

use crate::models::{encode_target, ActionModel};
use crate::retry::with_retry;

/// SQLite implementation of ActionRepository
#[derive(Clone)]
pub struct SqliteActionRepository {
    pool: SqlitePool,
}

impl SqliteActionRepository {
    /// Create a new SqliteActionRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActionRepository for SqliteActionRepository {
    #[instrument(skip(self, action), fields(action_type = %action.action_type))]
    async fn append(&self, action: &Action) -> RepoResult<()> {
        with_retry("actions.append", || async move {
            sqlx::query(
                r#"
                INSERT INTO moderation_analytics
                    (action, moderatorId, moderatorName, targetId, targetName, reason, timestamp, duration, "count")
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(action.action_type.as_str())
            .bind(action.actor_id.to_string())
            .bind(&action.actor_name)
            .bind(encode_target(action.target))
            .bind(&action.target_name)
            .bind(&action.reason)
            .bind(action.occurred_at)
            .bind(action.duration_minutes)
            .bind(action.count)
            .execute(&self.pool)
            .await
            .map(|_| ())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn all(&self) -> RepoResult<Vec<Action>> {
        let models = with_retry("actions.all", || async move {
            sqlx::query_as::<_, ActionModel>(
                r#"
                SELECT action, moderatorId AS moderator_id, moderatorName AS moderator_name,
                       targetId AS target_id, targetName AS target_name, reason, timestamp,
                       duration, "count"
                FROM moderation_analytics
                ORDER BY id
                "#,
            )
            .fetch_all(&self.pool)
            .await
        })
        .await?;

        let mut actions = Vec::with_capacity(models.len());
        for model in models {
            match model.into_action() {
                Some(action) => actions.push(action),
                None => warn!("skipping unreadable action row"),
            }
        }
        Ok(actions)
    }
}
