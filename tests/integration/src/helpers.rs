//! Helpers for standing up the full stack over an in-memory store

use std::sync::Arc;
use std::time::Duration;

use warden_common::config::{PolicyManifest, SystemActorConfig};
use warden_core::Snowflake;
use warden_db::{
    create_memory_pool, init_schema, SqliteActionRepository, SqliteCommandLogRepository,
    SqliteGuildRepository, SqlitePool, SqliteSanctionRepository, SqliteSettingsRepository,
    SqliteWarningRepository,
};
use warden_service::{ModerationService, ServiceContext};

use crate::fixtures::{RecordingAdapter, ADMIN_ROLE, MEDIA_CHANNEL, MOD_ROLE};

/// System actor id in the test manifest
pub const SYSTEM_ID: Snowflake = Snowflake::new(999);

/// The fully wired core under test
pub struct TestCore {
    pub service: ModerationService,
    pub adapter: Arc<RecordingAdapter>,
    pub pool: SqlitePool,
}

/// Manifest with one media-only channel and one role per tier
pub fn test_manifest() -> PolicyManifest {
    PolicyManifest {
        media_only_channels: vec![MEDIA_CHANNEL],
        screenshot_only_channels: vec![],
        no_media_channels: vec![],
        no_content_channels: vec![],
        no_message_channels: vec![],
        moderator_roles: vec![MOD_ROLE],
        admin_roles: vec![ADMIN_ROLE],
        system_actor: SystemActorConfig {
            id: SYSTEM_ID,
            name: "warden".to_string(),
        },
    }
}

/// Stand up a core over a fresh in-memory store
pub async fn new_core() -> TestCore {
    let pool = create_memory_pool().await.expect("memory pool");
    init_schema(&pool).await.expect("schema init");
    build_core(pool)
}

/// Wire a core over an existing pool (restart scenarios reuse the pool)
pub fn build_core(pool: SqlitePool) -> TestCore {
    let adapter = RecordingAdapter::new();
    let ctx = ServiceContext::new(
        Arc::new(SqliteWarningRepository::new(pool.clone())),
        Arc::new(SqliteActionRepository::new(pool.clone())),
        Arc::new(SqliteSettingsRepository::new(pool.clone())),
        Arc::new(SqliteSanctionRepository::new(pool.clone())),
        Arc::new(SqliteGuildRepository::new(pool.clone())),
        Arc::new(SqliteCommandLogRepository::new(pool.clone())),
        Arc::clone(&adapter) as Arc<dyn warden_service::PlatformAdapter>,
        Arc::new(test_manifest()),
    );

    TestCore {
        service: ModerationService::new(ctx),
        adapter,
        pool,
    }
}

/// Let fire-and-forget platform tasks run to completion
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}
