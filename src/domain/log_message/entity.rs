use crate::domain::record::{NewRecord, Record, RecordId};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

pub const LOG_MESSAGE_APP: &str = "frame";
pub const LOG_MESSAGE_MODEL: &str = "LogMessage";

/// Audit entry written by the event pipeline. Stored as a `frame.LogMessage`
/// record so it is configurable like any other entity.
#[derive(Debug, Clone, PartialEq)]
pub struct LogMessage {
    pub id: RecordId,
    pub channel: Option<String>,
    pub action: Option<String>,
    pub message: Value,
    pub created_at: DateTime<Utc>,
}

impl From<Record> for LogMessage {
    fn from(record: Record) -> Self {
        let text = |key: &str| {
            record
                .data
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Self {
            id: record.id,
            channel: text("channel"),
            action: text("action"),
            message: record.data.get("message").cloned().unwrap_or(Value::Null),
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewLogMessage {
    pub channel: String,
    pub action: String,
    pub message: Value,
    pub created_at: DateTime<Utc>,
}

impl From<NewLogMessage> for NewRecord {
    fn from(log: NewLogMessage) -> Self {
        let mut data = Map::new();
        data.insert("channel".into(), Value::String(log.channel));
        data.insert("action".into(), Value::String(log.action));
        data.insert("message".into(), log.message);
        NewRecord::new(LOG_MESSAGE_APP, LOG_MESSAGE_MODEL, data, log.created_at)
    }
}
