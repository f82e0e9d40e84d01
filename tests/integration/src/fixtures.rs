//! Test fixtures: a recording platform adapter and actor/request builders

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use warden_core::{Action, ActorProfile, Snowflake};
use warden_service::{AdapterResult, CommandRequest, PlatformAdapter, TargetRef};

/// Guild id used by every scenario
pub const GUILD: Snowflake = Snowflake::new(1);
/// A channel with no content policy
pub const PLAIN_CHANNEL: Snowflake = Snowflake::new(77);
/// The media-only channel in the test manifest
pub const MEDIA_CHANNEL: Snowflake = Snowflake::new(501);
/// Moderator tier role in the test manifest
pub const MOD_ROLE: Snowflake = Snowflake::new(10);
/// Admin tier role in the test manifest
pub const ADMIN_ROLE: Snowflake = Snowflake::new(20);
/// The configured mute role
pub const MUTE_ROLE: Snowflake = Snowflake::new(50);

/// One request the core issued against the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    GrantRole {
        guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    },
    RevokeRole {
        guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    },
    DeleteMessage {
        channel_id: Snowflake,
        message_id: Snowflake,
    },
    TimeoutMember {
        guild_id: Snowflake,
        user_id: Snowflake,
        minutes: i64,
    },
    ClearTimeout {
        guild_id: Snowflake,
        user_id: Snowflake,
    },
    BanUser {
        guild_id: Snowflake,
        user_id: Snowflake,
        delete_days: i64,
    },
    UnbanUser {
        guild_id: Snowflake,
        user_id: Snowflake,
    },
    KickMember {
        guild_id: Snowflake,
        user_id: Snowflake,
    },
    PurgeMessages {
        channel_id: Snowflake,
        amount: i64,
    },
    SendNotice {
        channel_id: Snowflake,
        text: String,
    },
    SendLogEntry {
        guild_id: Snowflake,
    },
}

/// Platform adapter that records every request instead of performing it
#[derive(Default)]
pub struct RecordingAdapter {
    calls: Mutex<Vec<PlatformCall>>,
    bans: Mutex<HashMap<Snowflake, String>>,
}

impl RecordingAdapter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Snapshot of every recorded request, in order
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls.lock().clone()
    }

    /// Number of recorded requests matching the predicate
    pub fn count(&self, pred: impl Fn(&PlatformCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|c| pred(c)).count()
    }

    /// Seed the ban list for `fetch_ban` lookups
    pub fn add_ban(&self, user_id: Snowflake, name: &str) {
        self.bans.lock().insert(user_id, name.to_string());
    }

    fn record(&self, call: PlatformCall) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl PlatformAdapter for RecordingAdapter {
    async fn grant_role(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> AdapterResult<()> {
        self.record(PlatformCall::GrantRole {
            guild_id,
            user_id,
            role_id,
        });
        Ok(())
    }

    async fn revoke_role(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> AdapterResult<()> {
        self.record(PlatformCall::RevokeRole {
            guild_id,
            user_id,
            role_id,
        });
        Ok(())
    }

    async fn delete_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> AdapterResult<()> {
        self.record(PlatformCall::DeleteMessage {
            channel_id,
            message_id,
        });
        Ok(())
    }

    async fn timeout_member(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        minutes: i64,
        _reason: &str,
    ) -> AdapterResult<()> {
        self.record(PlatformCall::TimeoutMember {
            guild_id,
            user_id,
            minutes,
        });
        Ok(())
    }

    async fn clear_timeout(&self, guild_id: Snowflake, user_id: Snowflake) -> AdapterResult<()> {
        self.record(PlatformCall::ClearTimeout { guild_id, user_id });
        Ok(())
    }

    async fn ban_user(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        delete_days: i64,
        _reason: &str,
    ) -> AdapterResult<()> {
        self.record(PlatformCall::BanUser {
            guild_id,
            user_id,
            delete_days,
        });
        Ok(())
    }

    async fn unban_user(&self, guild_id: Snowflake, user_id: Snowflake) -> AdapterResult<()> {
        self.record(PlatformCall::UnbanUser { guild_id, user_id });
        Ok(())
    }

    async fn kick_member(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        _reason: &str,
    ) -> AdapterResult<()> {
        self.record(PlatformCall::KickMember { guild_id, user_id });
        Ok(())
    }

    async fn purge_messages(&self, channel_id: Snowflake, amount: i64) -> AdapterResult<i64> {
        self.record(PlatformCall::PurgeMessages { channel_id, amount });
        Ok(amount)
    }

    async fn fetch_ban(
        &self,
        _guild_id: Snowflake,
        user_id: Snowflake,
    ) -> AdapterResult<Option<String>> {
        Ok(self.bans.lock().get(&user_id).cloned())
    }

    async fn send_notice(&self, channel_id: Snowflake, text: &str) -> AdapterResult<()> {
        self.record(PlatformCall::SendNotice {
            channel_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_log_entry(&self, guild_id: Snowflake, _action: &Action) -> AdapterResult<()> {
        self.record(PlatformCall::SendLogEntry { guild_id });
        Ok(())
    }
}

/// A plain member with no elevated roles
pub fn member(id: i64, name: &str) -> ActorProfile {
    ActorProfile::new(Snowflake::new(id), name)
}

/// A member holding the moderator tier role
pub fn moderator(id: i64, name: &str) -> ActorProfile {
    member(id, name).with_roles(vec![MOD_ROLE])
}

/// A member holding the admin tier role
pub fn admin(id: i64, name: &str) -> ActorProfile {
    member(id, name).with_roles(vec![ADMIN_ROLE])
}

/// A bare command request for the test guild
pub fn request(actor: ActorProfile) -> CommandRequest {
    CommandRequest {
        guild_id: GUILD,
        channel_id: PLAIN_CHANNEL,
        channel_name: "general".to_string(),
        actor,
        target: None,
        target_member: None,
        reason: None,
        duration_minutes: None,
        delete_days: None,
        amount: None,
        role_id: None,
    }
}

/// A command request acting on a target who is still a member
pub fn request_on(actor: ActorProfile, target: &ActorProfile) -> CommandRequest {
    let mut req = request(actor);
    req.target = Some(TargetRef {
        id: target.id,
        name: target.name.clone(),
    });
    req.target_member = Some(target.clone());
    req
}
