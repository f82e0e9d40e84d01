//! Sanction scheduler
//!
//! Owns the timing contract for role-based mutes. The persisted
//! `TimedSanction` row is authoritative; the in-process sleep task armed
//! alongside it is an optimization, never the source of truth. On restart,
//! `recover_on_startup` reads the rows back, expires the overdue ones
//! inline, and re-arms the rest.
//!
//! Expiry and explicit unmute race through the repository's atomic
//! compare-and-delete: only the caller that gets the row back revokes and
//! records.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use tokio::task::AbortHandle;
use tracing::{error, info, instrument, warn};

use warden_core::{
    clamp_minutes, Action, ActionType, SanctionRepository, Snowflake, TimedSanction,
};

use super::actionlog::ActionLog;
use super::error::ServiceResult;
use crate::adapter::PlatformAdapter;

const AUTO_UNMUTE_REASON: &str = "Automatic unmute after timeout";
const MILLIS_PER_MINUTE: i64 = 60_000;

/// Identity used for actions the scheduler takes on its own
#[derive(Debug, Clone)]
pub struct SystemActor {
    pub id: Snowflake,
    pub name: String,
}

/// Timed-mute scheduling with durable expiry
pub struct SanctionScheduler {
    sanctions: Arc<dyn SanctionRepository>,
    actions: Arc<ActionLog>,
    adapter: Arc<dyn PlatformAdapter>,
    system_actor: SystemActor,
    timers: DashMap<(Snowflake, Snowflake), AbortHandle>,
}

impl SanctionScheduler {
    pub fn new(
        sanctions: Arc<dyn SanctionRepository>,
        actions: Arc<ActionLog>,
        adapter: Arc<dyn PlatformAdapter>,
        system_actor: SystemActor,
    ) -> Self {
        Self {
            sanctions,
            actions,
            adapter,
            system_actor,
            timers: DashMap::new(),
        }
    }

    /// Persist a timed mute and arm its expiry timer. `None` duration means
    /// permanent: no row, no timer. Durations clamp to 28 days.
    ///
    /// Returns without waiting on any platform call; the role grant itself
    /// belongs to the command layer.
    #[instrument(skip(self))]
    pub async fn apply_timed_mute(
        self: &Arc<Self>,
        guild_id: Snowflake,
        target_id: Snowflake,
        role_id: Snowflake,
        duration_minutes: Option<i64>,
    ) -> ServiceResult<()> {
        let Some(minutes) = duration_minutes else {
            // Permanent mute: nothing to schedule
            return Ok(());
        };

        let minutes = clamp_minutes(minutes);
        let now = Utc::now().timestamp_millis();
        let sanction = TimedSanction {
            guild_id,
            target_id,
            role_id,
            started_at: now,
            expires_at: now + minutes * MILLIS_PER_MINUTE,
        };

        self.sanctions.upsert(&sanction).await?;
        self.arm_timer(guild_id, target_id, Duration::from_millis(
            u64::try_from(minutes * MILLIS_PER_MINUTE).unwrap_or(0),
        ));

        info!(%guild_id, %target_id, minutes, "timed mute scheduled");
        Ok(())
    }

    /// Fire the expiry for one target. Idempotent: when the row is already
    /// gone (explicit unmute won the race, or a duplicate fire), this is a
    /// no-op.
    #[instrument(skip(self))]
    pub async fn on_expire(&self, guild_id: Snowflake, target_id: Snowflake) -> ServiceResult<()> {
        // Drop the registry entry without aborting: the caller may be the
        // timer task itself. A stale timer that fires later finds no row
        // and no-ops.
        self.timers.remove(&(guild_id, target_id));

        let Some(sanction) = self.sanctions.remove(guild_id, target_id).await? else {
            return Ok(());
        };

        let adapter = Arc::clone(&self.adapter);
        tokio::spawn(async move {
            if let Err(e) = adapter
                .revoke_role(sanction.guild_id, sanction.target_id, sanction.role_id)
                .await
            {
                error!(error = %e, target = %sanction.target_id, "mute role revoke failed");
            }
        });

        let action = Action {
            action_type: ActionType::Unmute,
            actor_id: self.system_actor.id,
            actor_name: self.system_actor.name.clone(),
            target: Some(target_id),
            target_name: target_id.to_string(),
            reason: AUTO_UNMUTE_REASON.to_string(),
            occurred_at: Utc::now().timestamp_millis(),
            duration_minutes: 0,
            count: 0,
        };
        let adapter = Arc::clone(&self.adapter);
        let rendered = action.clone();
        tokio::spawn(async move {
            if let Err(e) = adapter.send_log_entry(guild_id, &rendered).await {
                warn!(error = %e, "log channel render failed");
            }
        });

        if let Err(e) = self.actions.record(action).await {
            warn!(error = %e, %target_id, "auto-unmute applied but not recorded");
        }

        info!(%guild_id, %target_id, "timed mute expired");
        Ok(())
    }

    /// Cancel the pending timer and remove the sanction row. Returns the
    /// removed sanction when one existed; the caller performs the revoke
    /// and records the explicit unmute.
    #[instrument(skip(self))]
    pub async fn cancel(
        &self,
        guild_id: Snowflake,
        target_id: Snowflake,
    ) -> ServiceResult<Option<TimedSanction>> {
        if let Some((_, handle)) = self.timers.remove(&(guild_id, target_id)) {
            handle.abort();
        }
        Ok(self.sanctions.remove(guild_id, target_id).await?)
    }

    /// Re-arm timers from the persisted rows. Overdue sanctions are expired
    /// inline before this returns; the rest get a timer for their remaining
    /// interval. Returns the number of rows processed.
    #[instrument(skip(self))]
    pub async fn recover_on_startup(self: &Arc<Self>) -> ServiceResult<usize> {
        let rows = self.sanctions.all().await?;
        let count = rows.len();
        let now = Utc::now().timestamp_millis();

        for sanction in rows {
            if sanction.is_expired(now) {
                self.on_expire(sanction.guild_id, sanction.target_id).await?;
            } else {
                let remaining = u64::try_from(sanction.remaining_millis(now)).unwrap_or(0);
                self.arm_timer(
                    sanction.guild_id,
                    sanction.target_id,
                    Duration::from_millis(remaining),
                );
            }
        }

        info!(count, "sanction recovery complete");
        Ok(count)
    }

    fn arm_timer(self: &Arc<Self>, guild_id: Snowflake, target_id: Snowflake, delay: Duration) {
        let scheduler = Arc::clone(self);
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = scheduler.on_expire(guild_id, target_id).await {
                error!(error = %e, %guild_id, %target_id, "timed expiry failed");
            }
        });

        // Re-muting a target replaces their pending timer
        if let Some(stale) = self.timers.insert((guild_id, target_id), task.abort_handle()) {
            stale.abort();
        }
    }
}
