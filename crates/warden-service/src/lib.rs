//! # warden-service
//!
//! Application layer of the moderation enforcement core.
//!
//! - `adapter` - the platform adapter port, the only gateway to the chat
//!   platform
//! - `services` - permission arbiter, content filter, sanction scheduler,
//!   action log, and the moderation command service with its dispatch
//!   registry

pub mod adapter;
pub mod registry;
pub mod services;

pub use adapter::{AdapterError, AdapterResult, PlatformAdapter};
pub use registry::CommandRegistry;
pub use services::{
    ActionLog, CapabilityKind, CommandOutcome, CommandRequest, ContentFilter, Decision,
    InboundMessage, MessageView, ModerationService, PermissionArbiter, QueryDimension,
    SanctionScheduler, ServiceContext, ServiceError, ServiceResult, SystemActor, TargetRef,
    Violation,
};
