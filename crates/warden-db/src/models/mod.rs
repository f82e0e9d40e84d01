//! Store models - SQLx-compatible structs mirroring the table schema

mod action;
mod guild;
mod sanction;
mod setting;
mod warning;

pub use action::ActionModel;
pub(crate) use action::encode_target;
pub use guild::GuildModel;
pub use sanction::SanctionModel;
pub use setting::SettingModel;
pub use warning::WarningModel;
