//! Command dispatch registry
//!
//! Maps command names to handler functions. Adding a command means adding
//! one row to the table, not growing a conditional chain.

use std::collections::HashMap;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::services::{CommandOutcome, CommandRequest, ModerationService, ServiceResult};

/// A command handler: borrows the service for the duration of one dispatch
pub type CommandHandler =
    for<'a> fn(&'a ModerationService, CommandRequest) -> BoxFuture<'a, ServiceResult<CommandOutcome>>;

fn warn(svc: &ModerationService, req: CommandRequest) -> BoxFuture<'_, ServiceResult<CommandOutcome>> {
    svc.warn(req).boxed()
}

fn clear_warnings(
    svc: &ModerationService,
    req: CommandRequest,
) -> BoxFuture<'_, ServiceResult<CommandOutcome>> {
    svc.clear_warnings(req).boxed()
}

fn set_mute_role(
    svc: &ModerationService,
    req: CommandRequest,
) -> BoxFuture<'_, ServiceResult<CommandOutcome>> {
    svc.set_mute_role(req).boxed()
}

fn mute(svc: &ModerationService, req: CommandRequest) -> BoxFuture<'_, ServiceResult<CommandOutcome>> {
    svc.mute(req).boxed()
}

fn unmute(
    svc: &ModerationService,
    req: CommandRequest,
) -> BoxFuture<'_, ServiceResult<CommandOutcome>> {
    svc.unmute(req).boxed()
}

fn timeout(
    svc: &ModerationService,
    req: CommandRequest,
) -> BoxFuture<'_, ServiceResult<CommandOutcome>> {
    svc.timeout(req).boxed()
}

fn untimeout(
    svc: &ModerationService,
    req: CommandRequest,
) -> BoxFuture<'_, ServiceResult<CommandOutcome>> {
    svc.untimeout(req).boxed()
}

fn ban(svc: &ModerationService, req: CommandRequest) -> BoxFuture<'_, ServiceResult<CommandOutcome>> {
    svc.ban(req).boxed()
}

fn unban(
    svc: &ModerationService,
    req: CommandRequest,
) -> BoxFuture<'_, ServiceResult<CommandOutcome>> {
    svc.unban(req).boxed()
}

fn kick(svc: &ModerationService, req: CommandRequest) -> BoxFuture<'_, ServiceResult<CommandOutcome>> {
    svc.kick(req).boxed()
}

fn purge(
    svc: &ModerationService,
    req: CommandRequest,
) -> BoxFuture<'_, ServiceResult<CommandOutcome>> {
    svc.purge(req).boxed()
}

/// Name-to-handler dispatch table
pub struct CommandRegistry {
    handlers: HashMap<&'static str, CommandHandler>,
}

impl CommandRegistry {
    /// The full moderation command set
    pub fn standard() -> Self {
        let mut handlers: HashMap<&'static str, CommandHandler> = HashMap::new();
        handlers.insert("warn", warn as CommandHandler);
        handlers.insert("clearwarnings", clear_warnings as CommandHandler);
        handlers.insert("setmuterole", set_mute_role as CommandHandler);
        handlers.insert("mute", mute as CommandHandler);
        handlers.insert("unmute", unmute as CommandHandler);
        handlers.insert("timeout", timeout as CommandHandler);
        handlers.insert("untimeout", untimeout as CommandHandler);
        handlers.insert("ban", ban as CommandHandler);
        handlers.insert("unban", unban as CommandHandler);
        handlers.insert("kick", kick as CommandHandler);
        handlers.insert("purge", purge as CommandHandler);
        Self { handlers }
    }

    /// Look up the handler for a command name
    pub fn get(&self, name: &str) -> Option<CommandHandler> {
        self.handlers.get(name).copied()
    }

    /// Registered command names
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }
}
