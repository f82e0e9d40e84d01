//! Permission arbiter
//!
//! Decides moderator/admin capability and who may act on whom. Results are
//! cached per actor and capability kind; the cache has no TTL, so the
//! caller observing a role change must call `invalidate` (the arbiter has
//! no visibility into role mutation).

use dashmap::DashMap;
use tracing::debug;

use warden_common::PolicyManifest;
use warden_core::{ActorProfile, Snowflake};

/// Capability tier a cached decision refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    Moderator,
    Admin,
}

/// Permission and hierarchy decisions over actor snapshots
pub struct PermissionArbiter {
    moderator_roles: Vec<Snowflake>,
    admin_roles: Vec<Snowflake>,
    cache: DashMap<(Snowflake, CapabilityKind), bool>,
}

impl PermissionArbiter {
    /// Create an arbiter over the manifest's role tiers
    pub fn new(manifest: &PolicyManifest) -> Self {
        Self {
            moderator_roles: manifest.moderator_roles.clone(),
            admin_roles: manifest.admin_roles.clone(),
            cache: DashMap::new(),
        }
    }

    /// True if the actor holds moderator capability (admins qualify).
    /// Absent actors are never moderators.
    pub fn is_moderator(&self, actor: Option<&ActorProfile>) -> bool {
        let Some(actor) = actor else { return false };

        if let Some(cached) = self.cache.get(&(actor.id, CapabilityKind::Moderator)) {
            return *cached;
        }

        let result = actor.capabilities.grants_moderator()
            || self.is_admin(Some(actor))
            || actor
                .role_ids
                .iter()
                .any(|r| self.moderator_roles.contains(r) || self.admin_roles.contains(r));

        self.cache
            .insert((actor.id, CapabilityKind::Moderator), result);
        result
    }

    /// True if the actor holds admin capability. Absent actors are never
    /// admins.
    pub fn is_admin(&self, actor: Option<&ActorProfile>) -> bool {
        let Some(actor) = actor else { return false };

        if let Some(cached) = self.cache.get(&(actor.id, CapabilityKind::Admin)) {
            return *cached;
        }

        let result = actor.capabilities.grants_admin()
            || actor.role_ids.iter().any(|r| self.admin_roles.contains(r));

        self.cache.insert((actor.id, CapabilityKind::Admin), result);
        result
    }

    /// Strict hierarchy rule: Admin > Moderator > Member.
    ///
    /// Admins outrank everyone. Staff targets (moderator or admin) may only
    /// be acted on by admins. Everyone else may be acted on by any
    /// moderator. Absent inputs degrade to false.
    pub fn can_moderate(
        &self,
        actor: Option<&ActorProfile>,
        target: Option<&ActorProfile>,
    ) -> bool {
        let (Some(actor), Some(target)) = (actor, target) else {
            return false;
        };

        if self.is_admin(Some(actor)) {
            return true;
        }

        if self.is_moderator(Some(target)) || self.is_admin(Some(target)) {
            debug!(actor = %actor.id, target = %target.id, "hierarchy denies action on staff");
            return false;
        }

        self.is_moderator(Some(actor))
    }

    /// Drop both cached decisions for an actor. Callers must invoke this
    /// whenever the actor's roles change.
    pub fn invalidate(&self, actor_id: Snowflake) {
        self.cache.remove(&(actor_id, CapabilityKind::Moderator));
        self.cache.remove(&(actor_id, CapabilityKind::Admin));
    }
}
