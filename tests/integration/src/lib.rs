//! Integration test utilities for the moderation enforcement core
//!
//! Provides a recording platform adapter and helpers for standing up the
//! full stack over an in-memory SQLite store.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
