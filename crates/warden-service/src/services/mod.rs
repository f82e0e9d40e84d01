//! Application services
//!
//! Permission arbiter, content filter, sanction scheduler, action log, and
//! the moderation command service on top of them.

pub mod actionlog;
pub mod arbiter;
pub mod context;
pub mod error;
pub mod filter;
pub mod moderation;
pub mod scheduler;

pub use actionlog::{ActionLog, QueryDimension};
pub use arbiter::{CapabilityKind, PermissionArbiter};
pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
pub use filter::{ContentFilter, Decision, MessageView, Violation};
pub use moderation::{CommandOutcome, CommandRequest, InboundMessage, ModerationService, TargetRef};
pub use scheduler::{SanctionScheduler, SystemActor};
