//! Moderation service
//!
//! Orchestrates the command surface: every command is audited, gated by the
//! arbiter, executed against the platform adapter, and recorded into the
//! action log. Commands reach this service through the dispatch registry.
//!
//! Platform side effects that do not feed a decision (role grants/revokes,
//! deletions, bans, kicks, timeouts) are fire-and-forget; the core records
//! the action without waiting. A failed record never rolls back an
//! enforcement that already reached the platform.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, instrument, warn};

use warden_core::{
    clamp_minutes, Action, ActionType, ActorProfile, CommandLogEntry, GuildRecord, Snowflake,
    Warning, DEFAULT_TIMEOUT_MINUTES,
};

use super::actionlog::ActionLog;
use super::arbiter::PermissionArbiter;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::filter::{ContentFilter, Decision, MessageView};
use super::scheduler::{SanctionScheduler, SystemActor};
use crate::adapter::AdapterResult;
use crate::registry::CommandRegistry;

const DEFAULT_REASON: &str = "No reason provided";
const DEFAULT_DELETE_DAYS: i64 = 1;

/// Target of a command: the id is always known, the display name comes from
/// the platform event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRef {
    pub id: Snowflake,
    pub name: String,
}

/// One inbound moderation command, already parsed by the platform layer
#[derive(Debug, Clone)]
pub struct CommandRequest {
    pub guild_id: Snowflake,
    pub channel_id: Snowflake,
    pub channel_name: String,
    pub actor: ActorProfile,
    /// The user the command acts on, when it takes one
    pub target: Option<TargetRef>,
    /// The target's member snapshot; absent when the target left the guild
    pub target_member: Option<ActorProfile>,
    pub reason: Option<String>,
    pub duration_minutes: Option<i64>,
    pub delete_days: Option<i64>,
    pub amount: Option<i64>,
    pub role_id: Option<Snowflake>,
}

/// User-facing result of a successful command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub message: String,
}

impl CommandOutcome {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One inbound chat message for filter evaluation
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub guild_id: Snowflake,
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
    pub author: ActorProfile,
    pub text: String,
    pub attachment_count: usize,
    pub attachments_all_images: bool,
}

/// The moderation enforcement core's command surface
pub struct ModerationService {
    ctx: ServiceContext,
    arbiter: PermissionArbiter,
    filter: ContentFilter,
    actions: Arc<ActionLog>,
    scheduler: Arc<SanctionScheduler>,
    registry: CommandRegistry,
    system_actor: SystemActor,
}

impl ModerationService {
    pub fn new(ctx: ServiceContext) -> Self {
        let manifest = ctx.manifest();
        let arbiter = PermissionArbiter::new(manifest);
        let filter = ContentFilter::new(manifest);
        let system_actor = SystemActor {
            id: manifest.system_actor.id,
            name: manifest.system_actor.name.clone(),
        };
        let actions = Arc::new(ActionLog::new(Arc::clone(ctx.action_repo())));
        let scheduler = Arc::new(SanctionScheduler::new(
            Arc::clone(ctx.sanction_repo()),
            Arc::clone(&actions),
            Arc::clone(ctx.adapter()),
            system_actor.clone(),
        ));

        Self {
            ctx,
            arbiter,
            filter,
            actions,
            scheduler,
            registry: CommandRegistry::standard(),
            system_actor,
        }
    }

    /// Hydrate the action indices and recover persisted sanctions. Run once
    /// at startup before serving commands.
    #[instrument(skip(self))]
    pub async fn bootstrap(&self) -> ServiceResult<()> {
        let hydrated = self.actions.hydrate().await?;
        let recovered = self.scheduler.recover_on_startup().await?;
        info!(hydrated, recovered, "moderation core ready");
        Ok(())
    }

    /// Dispatch a command by name through the registry
    pub async fn execute(
        &self,
        command: &str,
        request: CommandRequest,
    ) -> ServiceResult<CommandOutcome> {
        let Some(handler) = self.registry.get(command) else {
            return Err(ServiceError::not_found("Command", command));
        };
        handler(self, request).await
    }

    /// The action log, for reporting surfaces
    pub fn actions(&self) -> &Arc<ActionLog> {
        &self.actions
    }

    /// The sanction scheduler
    pub fn scheduler(&self) -> &Arc<SanctionScheduler> {
        &self.scheduler
    }

    /// Drop cached permission decisions for an actor. The platform layer
    /// must call this on every observed role change.
    pub fn invalidate_permissions(&self, actor_id: Snowflake) {
        self.arbiter.invalidate(actor_id);
    }

    /// Upsert the guild registry row on guild join
    #[instrument(skip(self, name))]
    pub async fn register_guild(&self, guild_id: Snowflake, name: &str) -> ServiceResult<()> {
        let record = GuildRecord {
            guild_id,
            name: name.to_string(),
            joined_at: Utc::now().timestamp_millis(),
        };
        self.ctx.guild_repo().upsert(&record).await?;
        Ok(())
    }

    /// Evaluate one inbound message against the channel's content policy;
    /// on a violation, fire the deletion and notice and record the action.
    #[instrument(skip(self, msg), fields(channel_id = %msg.channel_id))]
    pub async fn handle_message(&self, msg: &InboundMessage) -> ServiceResult<Decision> {
        let author_is_admin = self.arbiter.is_admin(Some(&msg.author));
        let view = MessageView {
            text: &msg.text,
            attachment_count: msg.attachment_count,
            attachments_all_images: msg.attachments_all_images,
        };
        let decision = self.filter.evaluate(msg.channel_id, author_is_admin, &view);

        if let Decision::Delete(violation) = decision {
            let channel_id = msg.channel_id;
            let message_id = msg.message_id;
            let adapter = Arc::clone(self.ctx.adapter());
            dispatch(async move { adapter.delete_message(channel_id, message_id).await });

            let adapter = Arc::clone(self.ctx.adapter());
            let notice = violation.notice();
            dispatch(async move { adapter.send_notice(channel_id, notice).await });

            let action = Action {
                action_type: ActionType::MessageDelete,
                actor_id: self.system_actor.id,
                actor_name: self.system_actor.name.clone(),
                target: Some(msg.author.id),
                target_name: msg.author.name.clone(),
                reason: violation.reason().to_string(),
                occurred_at: Utc::now().timestamp_millis(),
                duration_minutes: 0,
                count: 0,
            };
            self.record(msg.guild_id, action).await;
        }

        Ok(decision)
    }

    // ========================================================================
    // Command handlers (reached through the registry)
    // ========================================================================

    #[instrument(skip(self, req), fields(actor = %req.actor.id))]
    pub(crate) async fn warn(&self, req: CommandRequest) -> ServiceResult<CommandOutcome> {
        self.audit(&req.actor, "warn").await;
        self.require_moderator(&req.actor)?;
        let target = self.require_target(&req)?.clone();
        let member = self.require_member(&req)?;
        self.check_hierarchy(&req.actor, member)?;

        let reason = effective_reason(&req);
        let warning = Warning {
            user_id: target.id,
            moderator_id: req.actor.id,
            reason: reason.clone(),
            issued_at: Utc::now().timestamp_millis(),
        };
        self.ctx.warning_repo().append(&warning).await?;
        // Count is recomputed from the stored set, never cached
        let count = self.ctx.warning_repo().for_user(target.id).await?.len() as i64;

        self.record(
            req.guild_id,
            self.action(ActionType::Warn, &req.actor, Some(&target), &reason, 0, count),
        )
        .await;

        Ok(CommandOutcome::new(format!(
            "Warning issued to {} ({count} total)",
            target.name
        )))
    }

    #[instrument(skip(self, req), fields(actor = %req.actor.id))]
    pub(crate) async fn clear_warnings(&self, req: CommandRequest) -> ServiceResult<CommandOutcome> {
        self.audit(&req.actor, "clearwarnings").await;
        self.require_moderator(&req.actor)?;
        let target = self.require_target(&req)?;

        let removed = self.ctx.warning_repo().delete_for_user(target.id).await?;
        Ok(CommandOutcome::new(format!(
            "Cleared {removed} warnings for {}",
            target.name
        )))
    }

    #[instrument(skip(self, req), fields(actor = %req.actor.id))]
    pub(crate) async fn set_mute_role(&self, req: CommandRequest) -> ServiceResult<CommandOutcome> {
        self.audit(&req.actor, "setmuterole").await;
        self.require_admin(&req.actor)?;
        let role_id = req
            .role_id
            .ok_or_else(|| ServiceError::validation("a role is required"))?;

        self.ctx.settings_repo().set_mute_role(role_id).await?;
        Ok(CommandOutcome::new(format!("Mute role set to {role_id}")))
    }

    #[instrument(skip(self, req), fields(actor = %req.actor.id))]
    pub(crate) async fn mute(&self, req: CommandRequest) -> ServiceResult<CommandOutcome> {
        self.audit(&req.actor, "mute").await;
        self.require_moderator(&req.actor)?;
        let target = self.require_target(&req)?.clone();
        let member = self.require_member(&req)?;
        self.check_hierarchy(&req.actor, member)?;

        let mute_role = self.require_mute_role().await?;
        let reason = effective_reason(&req);

        let adapter = Arc::clone(self.ctx.adapter());
        let (guild_id, target_id) = (req.guild_id, target.id);
        dispatch(async move { adapter.grant_role(guild_id, target_id, mute_role).await });

        self.scheduler
            .apply_timed_mute(req.guild_id, target.id, mute_role, req.duration_minutes)
            .await?;

        let recorded_minutes = req.duration_minutes.map_or(0, clamp_minutes);
        self.record(
            req.guild_id,
            self.action(
                ActionType::Mute,
                &req.actor,
                Some(&target),
                &reason,
                recorded_minutes,
                0,
            ),
        )
        .await;

        let duration_text = req
            .duration_minutes
            .map_or_else(|| "permanently".to_string(), |m| {
                format!("for {} minutes", clamp_minutes(m))
            });
        Ok(CommandOutcome::new(format!(
            "{} has been muted {duration_text}",
            target.name
        )))
    }

    #[instrument(skip(self, req), fields(actor = %req.actor.id))]
    pub(crate) async fn unmute(&self, req: CommandRequest) -> ServiceResult<CommandOutcome> {
        self.audit(&req.actor, "unmute").await;
        self.require_moderator(&req.actor)?;
        let target = self.require_target(&req)?.clone();
        let member = self.require_member(&req)?;
        self.check_hierarchy(&req.actor, member)?;

        let mute_role = self.require_mute_role().await?;
        let reason = effective_reason(&req);

        // Cancels the timer and claims the row; timer-side expiry that lost
        // the race becomes a no-op
        let removed = self.scheduler.cancel(req.guild_id, target.id).await?;
        if removed.is_none() {
            debug!(target = %target.id, "no timed sanction on explicit unmute");
        }

        let adapter = Arc::clone(self.ctx.adapter());
        let (guild_id, target_id) = (req.guild_id, target.id);
        dispatch(async move { adapter.revoke_role(guild_id, target_id, mute_role).await });

        self.record(
            req.guild_id,
            self.action(ActionType::Unmute, &req.actor, Some(&target), &reason, 0, 0),
        )
        .await;

        Ok(CommandOutcome::new(format!(
            "{} has been unmuted",
            target.name
        )))
    }

    #[instrument(skip(self, req), fields(actor = %req.actor.id))]
    pub(crate) async fn timeout(&self, req: CommandRequest) -> ServiceResult<CommandOutcome> {
        self.audit(&req.actor, "timeout").await;
        self.require_moderator(&req.actor)?;
        let target = self.require_target(&req)?.clone();
        let member = self.require_member(&req)?;
        self.check_hierarchy(&req.actor, member)?;

        let minutes = clamp_minutes(req.duration_minutes.unwrap_or(DEFAULT_TIMEOUT_MINUTES));
        let reason = effective_reason(&req);

        let adapter = Arc::clone(self.ctx.adapter());
        let (guild_id, target_id) = (req.guild_id, target.id);
        let platform_reason = reason.clone();
        dispatch(async move {
            adapter
                .timeout_member(guild_id, target_id, minutes, &platform_reason)
                .await
        });

        self.record(
            req.guild_id,
            self.action(
                ActionType::Timeout,
                &req.actor,
                Some(&target),
                &reason,
                minutes,
                0,
            ),
        )
        .await;

        Ok(CommandOutcome::new(format!(
            "{} has been timed out for {minutes} minutes",
            target.name
        )))
    }

    #[instrument(skip(self, req), fields(actor = %req.actor.id))]
    pub(crate) async fn untimeout(&self, req: CommandRequest) -> ServiceResult<CommandOutcome> {
        self.audit(&req.actor, "untimeout").await;
        self.require_moderator(&req.actor)?;
        let target = self.require_target(&req)?.clone();
        let member = self.require_member(&req)?;
        self.check_hierarchy(&req.actor, member)?;

        let reason = effective_reason(&req);

        let adapter = Arc::clone(self.ctx.adapter());
        let (guild_id, target_id) = (req.guild_id, target.id);
        dispatch(async move { adapter.clear_timeout(guild_id, target_id).await });

        self.record(
            req.guild_id,
            self.action(
                ActionType::Untimeout,
                &req.actor,
                Some(&target),
                &reason,
                0,
                0,
            ),
        )
        .await;

        Ok(CommandOutcome::new(format!(
            "Timeout removed from {}",
            target.name
        )))
    }

    #[instrument(skip(self, req), fields(actor = %req.actor.id))]
    pub(crate) async fn ban(&self, req: CommandRequest) -> ServiceResult<CommandOutcome> {
        self.audit(&req.actor, "ban").await;
        self.require_moderator(&req.actor)?;
        let target = self.require_target(&req)?.clone();
        // A target who already left can still be banned; the hierarchy rule
        // applies only while they are a member
        if let Some(member) = &req.target_member {
            self.check_hierarchy(&req.actor, member)?;
        }

        let delete_days = req.delete_days.unwrap_or(DEFAULT_DELETE_DAYS);
        if !(0..=7).contains(&delete_days) {
            return Err(ServiceError::validation(
                "delete_days must be between 0 and 7",
            ));
        }
        let reason = effective_reason(&req);

        let adapter = Arc::clone(self.ctx.adapter());
        let (guild_id, target_id) = (req.guild_id, target.id);
        let platform_reason = reason.clone();
        dispatch(async move {
            adapter
                .ban_user(guild_id, target_id, delete_days, &platform_reason)
                .await
        });

        self.record(
            req.guild_id,
            self.action(
                ActionType::Ban,
                &req.actor,
                Some(&target),
                &reason,
                delete_days,
                0,
            ),
        )
        .await;

        Ok(CommandOutcome::new(format!(
            "{} has been banned ({delete_days} days of messages deleted)",
            target.name
        )))
    }

    #[instrument(skip(self, req), fields(actor = %req.actor.id))]
    pub(crate) async fn unban(&self, req: CommandRequest) -> ServiceResult<CommandOutcome> {
        self.audit(&req.actor, "unban").await;
        self.require_moderator(&req.actor)?;
        let target = self.require_target(&req)?.clone();

        // The ban-list lookup feeds the not-found decision, so it is awaited
        let banned_name = self
            .ctx
            .adapter()
            .fetch_ban(req.guild_id, target.id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Ban", target.id.to_string()))?;

        let reason = effective_reason(&req);

        let adapter = Arc::clone(self.ctx.adapter());
        let (guild_id, target_id) = (req.guild_id, target.id);
        dispatch(async move { adapter.unban_user(guild_id, target_id).await });

        let resolved = TargetRef {
            id: target.id,
            name: banned_name.clone(),
        };
        self.record(
            req.guild_id,
            self.action(ActionType::Unban, &req.actor, Some(&resolved), &reason, 0, 0),
        )
        .await;

        Ok(CommandOutcome::new(format!(
            "{banned_name} has been unbanned"
        )))
    }

    #[instrument(skip(self, req), fields(actor = %req.actor.id))]
    pub(crate) async fn kick(&self, req: CommandRequest) -> ServiceResult<CommandOutcome> {
        self.audit(&req.actor, "kick").await;
        self.require_moderator(&req.actor)?;
        let target = self.require_target(&req)?.clone();
        let member = self.require_member(&req)?;
        self.check_hierarchy(&req.actor, member)?;

        let reason = effective_reason(&req);

        let adapter = Arc::clone(self.ctx.adapter());
        let (guild_id, target_id) = (req.guild_id, target.id);
        let platform_reason = reason.clone();
        dispatch(async move {
            adapter
                .kick_member(guild_id, target_id, &platform_reason)
                .await
        });

        self.record(
            req.guild_id,
            self.action(ActionType::Kick, &req.actor, Some(&target), &reason, 0, 0),
        )
        .await;

        Ok(CommandOutcome::new(format!(
            "{} has been kicked",
            target.name
        )))
    }

    #[instrument(skip(self, req), fields(actor = %req.actor.id))]
    pub(crate) async fn purge(&self, req: CommandRequest) -> ServiceResult<CommandOutcome> {
        self.audit(&req.actor, "purge").await;
        self.require_moderator(&req.actor)?;

        let amount = req.amount.unwrap_or(0);
        if !(1..=100).contains(&amount) {
            return Err(ServiceError::validation(
                "Please provide a number between 1 and 100",
            ));
        }

        // The deleted count feeds the recorded action, so the call is awaited
        let deleted = self
            .ctx
            .adapter()
            .purge_messages(req.channel_id, amount)
            .await?;

        let reason = format!("Purged {deleted} messages in #{}", req.channel_name);
        self.record(
            req.guild_id,
            self.action(ActionType::Purge, &req.actor, None, &reason, 0, deleted),
        )
        .await;

        Ok(CommandOutcome::new(format!(
            "Successfully deleted {deleted} messages"
        )))
    }

    // ========================================================================
    // Gates and helpers
    // ========================================================================

    fn require_moderator(&self, actor: &ActorProfile) -> ServiceResult<()> {
        if self.arbiter.is_moderator(Some(actor)) {
            Ok(())
        } else {
            Err(ServiceError::PermissionDenied {
                required: "moderator",
            })
        }
    }

    fn require_admin(&self, actor: &ActorProfile) -> ServiceResult<()> {
        if self.arbiter.is_admin(Some(actor)) {
            Ok(())
        } else {
            Err(ServiceError::PermissionDenied { required: "admin" })
        }
    }

    fn check_hierarchy(&self, actor: &ActorProfile, target: &ActorProfile) -> ServiceResult<()> {
        if self.arbiter.can_moderate(Some(actor), Some(target)) {
            Ok(())
        } else {
            Err(ServiceError::hierarchy(
                actor.name.clone(),
                target.name.clone(),
            ))
        }
    }

    fn require_target<'r>(&self, req: &'r CommandRequest) -> ServiceResult<&'r TargetRef> {
        req.target
            .as_ref()
            .ok_or_else(|| ServiceError::validation("a target user is required"))
    }

    fn require_member<'r>(&self, req: &'r CommandRequest) -> ServiceResult<&'r ActorProfile> {
        req.target_member.as_ref().ok_or_else(|| {
            let id = req
                .target
                .as_ref()
                .map_or_else(String::new, |t| t.id.to_string());
            ServiceError::not_found("Member", id)
        })
    }

    async fn require_mute_role(&self) -> ServiceResult<Snowflake> {
        self.ctx
            .settings_repo()
            .mute_role()
            .await?
            .ok_or_else(|| ServiceError::not_found("Mute role", "use setmuterole first"))
    }

    fn action(
        &self,
        action_type: ActionType,
        actor: &ActorProfile,
        target: Option<&TargetRef>,
        reason: &str,
        duration_minutes: i64,
        count: i64,
    ) -> Action {
        Action {
            action_type,
            actor_id: actor.id,
            actor_name: actor.name.clone(),
            target: target.map(|t| t.id),
            target_name: target.map_or_else(String::new, |t| t.name.clone()),
            reason: reason.to_string(),
            occurred_at: Utc::now().timestamp_millis(),
            duration_minutes,
            count,
        }
    }

    /// Append to the command audit log; a store failure here never blocks
    /// the command itself
    async fn audit(&self, actor: &ActorProfile, command: &str) {
        let entry = CommandLogEntry {
            user_id: actor.id,
            user_name: actor.name.clone(),
            command: command.to_string(),
            issued_at: Utc::now().timestamp_millis(),
        };
        if let Err(e) = self.ctx.command_log_repo().append(&entry).await {
            warn!(error = %e, command, "command audit append failed");
        }
    }

    /// Record the action and render it into the moderation log channel. The
    /// enforcement already happened; failures are reported loudly but do
    /// not propagate.
    async fn record(&self, guild_id: Snowflake, action: Action) {
        let adapter = Arc::clone(self.ctx.adapter());
        let rendered = action.clone();
        dispatch(async move { adapter.send_log_entry(guild_id, &rendered).await });

        if let Err(e) = self.actions.record(action).await {
            warn!(error = %e, "enforcement applied but the action record failed");
        }
    }
}

fn effective_reason(req: &CommandRequest) -> String {
    req.reason
        .clone()
        .unwrap_or_else(|| DEFAULT_REASON.to_string())
}

/// Fire-and-forget platform request
fn dispatch<F>(fut: F)
where
    F: Future<Output = AdapterResult<()>> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = fut.await {
            error!(error = %e, "platform request failed");
        }
    });
}
