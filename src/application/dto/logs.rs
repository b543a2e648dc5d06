use crate::domain::log_message::LogMessage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LogMessageDto {
    pub id: i64,
    pub channel: Option<String>,
    pub action: Option<String>,
    #[schema(value_type = Object)]
    pub message: serde_json::Value,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<LogMessage> for LogMessageDto {
    fn from(log: LogMessage) -> Self {
        Self {
            id: log.id.into(),
            channel: log.channel,
            action: log.action,
            message: log.message,
            created_at: log.created_at,
        }
    }
}
