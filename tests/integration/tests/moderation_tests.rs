//! End-to-end scenarios over the full stack: commands, filter flow, timed
//! sanctions, and restart recovery against an in-memory SQLite store.
//!
//! Run with: cargo test -p integration-tests --test moderation_tests

use chrono::Utc;

use integration_tests::{
    admin, build_core, member, moderator, new_core, request, request_on, settle, PlatformCall,
    GUILD, MEDIA_CHANNEL, MUTE_ROLE, SYSTEM_ID,
};
use warden_core::{Action, ActionType, SanctionRepository, Snowflake, TimedSanction};
use warden_db::SqliteSanctionRepository;
use warden_service::{Decision, InboundMessage, QueryDimension, ServiceError};

// ============================================================================
// Command Gating
// ============================================================================

#[tokio::test]
async fn test_plain_member_cannot_issue_commands() {
    let core = new_core().await;
    let target = member(100, "bob");
    let req = request_on(member(2, "eve"), &target);

    let result = core.service.execute("warn", req).await;
    assert!(matches!(
        result,
        Err(ServiceError::PermissionDenied { .. })
    ));
}

#[tokio::test]
async fn test_unknown_command_is_not_found() {
    let core = new_core().await;
    let result = core.service.execute("selfdestruct", request(admin(1, "alice"))).await;
    assert!(matches!(result, Err(ServiceError::NotFound { .. })));
}

#[tokio::test]
async fn test_hierarchy_violation_ban_records_nothing() {
    let core = new_core().await;
    let actor = moderator(2, "mallory");
    let target = moderator(3, "colleague");

    let result = core.service.execute("ban", request_on(actor, &target)).await;
    assert!(matches!(
        result,
        Err(ServiceError::HierarchyViolation { .. })
    ));

    settle().await;
    assert!(core
        .service
        .actions()
        .query(QueryDimension::ByType(ActionType::Ban), 0)
        .is_empty());
    assert_eq!(
        core.adapter
            .count(|c| matches!(c, PlatformCall::BanUser { .. })),
        0
    );
}

#[tokio::test]
async fn test_admin_outranks_staff_target() {
    let core = new_core().await;
    let actor = admin(1, "alice");
    let target = moderator(3, "colleague");

    let outcome = core.service.execute("kick", request_on(actor, &target)).await;
    assert!(outcome.is_ok());

    settle().await;
    assert_eq!(
        core.adapter
            .count(|c| matches!(c, PlatformCall::KickMember { .. })),
        1
    );
}

// ============================================================================
// Warnings
// ============================================================================

#[tokio::test]
async fn test_warn_counts_and_clear() {
    let core = new_core().await;
    let actor = moderator(2, "alice");
    let target = member(100, "bob");

    let first = core
        .service
        .execute("warn", request_on(actor.clone(), &target))
        .await
        .unwrap();
    assert!(first.message.contains("1 total"));

    let second = core
        .service
        .execute("warn", request_on(actor.clone(), &target))
        .await
        .unwrap();
    assert!(second.message.contains("2 total"));

    let warns = core
        .service
        .actions()
        .query(QueryDimension::ByType(ActionType::Warn), 0);
    assert_eq!(warns.len(), 2);
    assert_eq!(warns[1].count, 2);

    let cleared = core
        .service
        .execute("clearwarnings", request_on(actor, &target))
        .await
        .unwrap();
    assert!(cleared.message.contains("Cleared 2 warnings"));
}

// ============================================================================
// Mute Lifecycle
// ============================================================================

#[tokio::test]
async fn test_mute_requires_configured_role() {
    let core = new_core().await;
    let result = core
        .service
        .execute("mute", request_on(moderator(2, "alice"), &member(100, "bob")))
        .await;
    assert!(matches!(result, Err(ServiceError::NotFound { .. })));
}

#[tokio::test]
async fn test_set_mute_role_is_admin_gated() {
    let core = new_core().await;

    let mut denied = request(moderator(2, "alice"));
    denied.role_id = Some(MUTE_ROLE);
    assert!(matches!(
        core.service.execute("setmuterole", denied).await,
        Err(ServiceError::PermissionDenied { .. })
    ));

    let mut allowed = request(admin(1, "root"));
    allowed.role_id = Some(MUTE_ROLE);
    assert!(core.service.execute("setmuterole", allowed).await.is_ok());
}

async fn configure_mute_role(core: &integration_tests::TestCore) {
    let mut req = request(admin(1, "root"));
    req.role_id = Some(MUTE_ROLE);
    core.service.execute("setmuterole", req).await.unwrap();
}

#[tokio::test]
async fn test_timed_mute_persists_sanction_and_grants_role() {
    let core = new_core().await;
    configure_mute_role(&core).await;

    let target = member(100, "bob");
    let mut req = request_on(moderator(2, "alice"), &target);
    req.duration_minutes = Some(30);
    core.service.execute("mute", req).await.unwrap();

    settle().await;
    assert_eq!(
        core.adapter.count(|c| matches!(
            c,
            PlatformCall::GrantRole { role_id, .. } if *role_id == MUTE_ROLE
        )),
        1
    );

    let repo = SqliteSanctionRepository::new(core.pool.clone());
    let rows = repo.all().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].target_id, target.id);
}

#[tokio::test]
async fn test_permanent_mute_persists_no_row() {
    let core = new_core().await;
    configure_mute_role(&core).await;

    let target = member(100, "bob");
    core.service
        .execute("mute", request_on(moderator(2, "alice"), &target))
        .await
        .unwrap();

    let repo = SqliteSanctionRepository::new(core.pool.clone());
    assert!(repo.all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_double_expire_fires_once() {
    let core = new_core().await;
    configure_mute_role(&core).await;

    let target = member(100, "bob");
    let mut req = request_on(moderator(2, "alice"), &target);
    req.duration_minutes = Some(30);
    core.service.execute("mute", req).await.unwrap();

    let scheduler = core.service.scheduler();
    scheduler.on_expire(GUILD, target.id).await.unwrap();
    scheduler.on_expire(GUILD, target.id).await.unwrap();
    settle().await;

    let unmutes = core
        .service
        .actions()
        .query(QueryDimension::ByType(ActionType::Unmute), 0);
    assert_eq!(unmutes.len(), 1);
    assert_eq!(unmutes[0].actor_id, SYSTEM_ID);
    assert_eq!(unmutes[0].reason, "Automatic unmute after timeout");
    assert_eq!(
        core.adapter
            .count(|c| matches!(c, PlatformCall::RevokeRole { .. })),
        1
    );
}

#[tokio::test]
async fn test_explicit_unmute_beats_timer() {
    let core = new_core().await;
    configure_mute_role(&core).await;

    let target = member(100, "bob");
    let mut req = request_on(moderator(2, "alice"), &target);
    req.duration_minutes = Some(30);
    core.service.execute("mute", req).await.unwrap();

    core.service
        .execute("unmute", request_on(moderator(2, "alice"), &target))
        .await
        .unwrap();

    // The sanction row is claimed; a later timer fire finds nothing
    core.service
        .scheduler()
        .on_expire(GUILD, target.id)
        .await
        .unwrap();
    settle().await;

    let unmutes = core
        .service
        .actions()
        .query(QueryDimension::ByType(ActionType::Unmute), 0);
    assert_eq!(unmutes.len(), 1);
    assert_eq!(unmutes[0].actor_name, "alice");
}

// ============================================================================
// Restart Recovery
// ============================================================================

#[tokio::test]
async fn test_recovery_expires_stale_sanction_before_returning() {
    let pool = warden_db::create_memory_pool().await.unwrap();
    warden_db::init_schema(&pool).await.unwrap();

    let target = Snowflake::new(100);
    let now = Utc::now().timestamp_millis();
    let repo = SqliteSanctionRepository::new(pool.clone());
    repo.upsert(&TimedSanction {
        guild_id: GUILD,
        target_id: target,
        role_id: MUTE_ROLE,
        started_at: now - 600_000,
        expires_at: now - 300_000,
    })
    .await
    .unwrap();

    let core = build_core(pool);
    core.service.bootstrap().await.unwrap();

    // Expiry is processed inline, before bootstrap returns
    let unmutes = core
        .service
        .actions()
        .query(QueryDimension::ByType(ActionType::Unmute), 0);
    assert_eq!(unmutes.len(), 1);
    assert!(repo.all().await.unwrap().is_empty());

    settle().await;
    assert_eq!(
        core.adapter.count(|c| matches!(
            c,
            PlatformCall::RevokeRole { user_id, .. } if *user_id == target
        )),
        1
    );
}

#[tokio::test]
async fn test_hydrate_restores_action_indices() {
    let pool = warden_db::create_memory_pool().await.unwrap();
    warden_db::init_schema(&pool).await.unwrap();

    let warm = build_core(pool.clone());
    let actor = moderator(2, "alice");
    warm.service
        .execute("warn", request_on(actor.clone(), &member(100, "bob")))
        .await
        .unwrap();

    let cold = build_core(pool);
    cold.service.bootstrap().await.unwrap();
    assert_eq!(
        cold.service
            .actions()
            .query(QueryDimension::ByActor(actor.id), 0)
            .len(),
        1
    );
}

// ============================================================================
// Bans, Unbans, Purge
// ============================================================================

#[tokio::test]
async fn test_ban_validates_delete_days() {
    let core = new_core().await;
    let mut req = request_on(moderator(2, "alice"), &member(100, "bob"));
    req.delete_days = Some(8);

    assert!(matches!(
        core.service.execute("ban", req).await,
        Err(ServiceError::Validation(_))
    ));
}

#[tokio::test]
async fn test_ban_proceeds_for_departed_target() {
    let core = new_core().await;
    let mut req = request_on(moderator(2, "alice"), &member(100, "bob"));
    // The target left the guild; only their id is known
    req.target_member = None;

    core.service.execute("ban", req).await.unwrap();
    settle().await;

    assert_eq!(
        core.adapter.count(|c| matches!(
            c,
            PlatformCall::BanUser { delete_days, .. } if *delete_days == 1
        )),
        1
    );
}

#[tokio::test]
async fn test_unban_requires_existing_ban() {
    let core = new_core().await;
    let mut req = request(moderator(2, "alice"));
    req.target = Some(warden_service::TargetRef {
        id: Snowflake::new(100),
        name: String::new(),
    });

    assert!(matches!(
        core.service.execute("unban", req.clone()).await,
        Err(ServiceError::NotFound { .. })
    ));

    core.adapter.add_ban(Snowflake::new(100), "bob");
    let outcome = core.service.execute("unban", req).await.unwrap();
    assert!(outcome.message.contains("bob"));

    let unbans = core
        .service
        .actions()
        .query(QueryDimension::ByType(ActionType::Unban), 0);
    assert_eq!(unbans.len(), 1);
    assert_eq!(unbans[0].target_name, "bob");
}

#[tokio::test]
async fn test_purge_records_count_and_channel() {
    let core = new_core().await;
    let mut req = request(moderator(2, "alice"));
    req.amount = Some(10);

    let outcome = core.service.execute("purge", req).await.unwrap();
    assert!(outcome.message.contains("10"));

    let purges = core
        .service
        .actions()
        .query(QueryDimension::ByType(ActionType::Purge), 0);
    assert_eq!(purges.len(), 1);
    assert_eq!(purges[0].count, 10);
    assert_eq!(purges[0].target, None);
    assert_eq!(purges[0].reason, "Purged 10 messages in #general");
}

#[tokio::test]
async fn test_purge_validates_amount() {
    let core = new_core().await;
    let mut req = request(moderator(2, "alice"));
    req.amount = Some(500);
    assert!(matches!(
        core.service.execute("purge", req).await,
        Err(ServiceError::Validation(_))
    ));
}

// ============================================================================
// Content Filter Flow
// ============================================================================

fn chat_message(author: warden_core::ActorProfile, text: &str) -> InboundMessage {
    InboundMessage {
        guild_id: GUILD,
        channel_id: MEDIA_CHANNEL,
        message_id: Snowflake::new(9000),
        author,
        text: text.to_string(),
        attachment_count: 0,
        attachments_all_images: false,
    }
}

#[tokio::test]
async fn test_media_only_violation_deletes_and_records() {
    let core = new_core().await;
    let author = member(100, "bob");

    let decision = core
        .service
        .handle_message(&chat_message(author.clone(), "hello everyone"))
        .await
        .unwrap();
    assert!(matches!(decision, Decision::Delete(_)));

    settle().await;
    assert_eq!(
        core.adapter
            .count(|c| matches!(c, PlatformCall::DeleteMessage { .. })),
        1
    );
    assert_eq!(
        core.adapter
            .count(|c| matches!(c, PlatformCall::SendNotice { .. })),
        1
    );

    let deletions = core
        .service
        .actions()
        .query(QueryDimension::ByType(ActionType::MessageDelete), 0);
    assert_eq!(deletions.len(), 1);
    assert_eq!(deletions[0].actor_id, SYSTEM_ID);
    assert_eq!(deletions[0].target, Some(author.id));
    assert_eq!(deletions[0].reason, "Deleted message in Media-Only Channel");
}

#[tokio::test]
async fn test_admin_author_is_exempt_from_filter() {
    let core = new_core().await;
    let decision = core
        .service
        .handle_message(&chat_message(admin(1, "root"), "plain chat"))
        .await
        .unwrap();
    assert_eq!(decision, Decision::Allow);
    settle().await;
    assert!(core.adapter.calls().is_empty());
}

#[tokio::test]
async fn test_bare_link_allowed_in_media_channel() {
    let core = new_core().await;
    let decision = core
        .service
        .handle_message(&chat_message(member(100, "bob"), "https://example.com/pic.png"))
        .await
        .unwrap();
    assert_eq!(decision, Decision::Allow);
}

// ============================================================================
// Analytics
// ============================================================================

#[tokio::test]
async fn test_top_moderators_respects_window() {
    let core = new_core().await;
    let log = core.service.actions();
    let now = Utc::now().timestamp_millis();
    let stale = now - 30 * 86_400_000;

    let record = |actor_id: i64, actor_name: &str, at: i64| Action {
        action_type: ActionType::Warn,
        actor_id: Snowflake::new(actor_id),
        actor_name: actor_name.to_string(),
        target: Some(Snowflake::new(100)),
        target_name: "bob".to_string(),
        reason: "spam".to_string(),
        occurred_at: at,
        duration_minutes: 0,
        count: 0,
    };

    for _ in 0..5 {
        log.record(record(1, "Alice", now)).await.unwrap();
    }
    for _ in 0..2 {
        log.record(record(2, "Bob", now)).await.unwrap();
    }
    for _ in 0..10 {
        log.record(record(1, "Alice", stale)).await.unwrap();
    }

    let top = log.top_moderators(7, 3);
    assert_eq!(top, vec![("Alice".to_string(), 5), ("Bob".to_string(), 2)]);
}

// ============================================================================
// Guild Registry
// ============================================================================

#[tokio::test]
async fn test_register_guild_upserts() {
    let core = new_core().await;
    core.service.register_guild(GUILD, "test guild").await.unwrap();
    core.service.register_guild(GUILD, "renamed guild").await.unwrap();

    use warden_core::GuildRepository;
    let repo = warden_db::SqliteGuildRepository::new(core.pool.clone());
    let guilds = repo.all().await.unwrap();
    assert_eq!(guilds.len(), 1);
    assert_eq!(guilds[0].name, "renamed guild");
}
