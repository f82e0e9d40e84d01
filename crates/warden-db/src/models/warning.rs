//! Warning store model

use sqlx::FromRow;

use warden_core::{Snowflake, Warning};

/// Row of the `warnings` table
#[derive(Debug, Clone, FromRow)]
pub struct WarningModel {
    pub user_id: String,
    pub moderator_id: Option<String>,
    pub reason: Option<String>,
    pub timestamp: i64,
}

impl From<WarningModel> for Warning {
    fn from(model: WarningModel) -> Self {
        Warning {
            user_id: Snowflake::parse(&model.user_id).unwrap_or_default(),
            moderator_id: model
                .moderator_id
                .as_deref()
                .and_then(|id| Snowflake::parse(id).ok())
                .unwrap_or_default(),
            reason: model.reason.unwrap_or_default(),
            issued_at: model.timestamp,
        }
    }
}
