//! Settings store model

use sqlx::FromRow;

/// Row of the `bot_settings` key/value table
#[derive(Debug, Clone, FromRow)]
pub struct SettingModel {
    pub key: String,
    pub value: Option<String>,
}
