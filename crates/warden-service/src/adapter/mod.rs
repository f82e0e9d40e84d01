//! Platform adapter port
//!
//! The core never talks to the chat platform directly; everything goes
//! through this trait.

pub mod platform;

pub use platform::{AdapterError, AdapterResult, PlatformAdapter};
