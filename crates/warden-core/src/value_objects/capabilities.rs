//! Native capability flags reported by the chat platform for an actor
//!
//! These are the platform-level permissions the arbiter consults before
//! falling back to configured moderator/admin role lists. Stored as a
//! 64-bit bitfield.

use bitflags::bitflags;

bitflags! {
    /// Native platform capabilities relevant to moderation
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u64 {
        /// Delete other users' messages
        const MANAGE_MESSAGES  = 1 << 0;
        /// Apply native timeouts to members
        const MODERATE_MEMBERS = 1 << 1;
        /// Full administrative control
        const ADMINISTRATOR    = 1 << 2;
        /// Edit guild settings
        const MANAGE_GUILD     = 1 << 3;
        /// Ban members from the guild
        const BAN_MEMBERS      = 1 << 4;

        /// Capabilities that imply moderator standing on their own
        const MODERATOR_NATIVE = Self::MANAGE_MESSAGES.bits() | Self::MODERATE_MEMBERS.bits();

        /// Capabilities that imply admin standing on their own
        const ADMIN_NATIVE = Self::ADMINISTRATOR.bits()
            | Self::MANAGE_GUILD.bits()
            | Self::BAN_MEMBERS.bits();
    }
}

impl Capabilities {
    /// True if any native capability grants moderator standing
    #[inline]
    pub fn grants_moderator(&self) -> bool {
        self.intersects(Self::MODERATOR_NATIVE)
    }

    /// True if any native capability grants admin standing
    #[inline]
    pub fn grants_admin(&self) -> bool {
        self.intersects(Self::ADMIN_NATIVE)
    }
}
