//! Actor profile - a platform-delivered snapshot of a guild member

use crate::value_objects::{Capabilities, Snowflake};

/// Snapshot of a member as delivered by the platform adapter
///
/// The core does not observe role mutation; callers that see a role change
/// must pass a fresh snapshot and invalidate the permission cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorProfile {
    pub id: Snowflake,
    pub name: String,
    pub capabilities: Capabilities,
    pub role_ids: Vec<Snowflake>,
}

impl ActorProfile {
    pub fn new(id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            capabilities: Capabilities::empty(),
            role_ids: Vec::new(),
        }
    }

    /// Check if the member holds a specific role
    #[inline]
    pub fn has_role(&self, role_id: Snowflake) -> bool {
        self.role_ids.contains(&role_id)
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_roles(mut self, role_ids: Vec<Snowflake>) -> Self {
        self.role_ids = role_ids;
        self
    }
}
