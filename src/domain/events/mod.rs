use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Channel name that receives every event regardless of its own channel.
pub const WILDCARD_CHANNEL: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventAction {
    Created,
    Updated,
    Deleted,
}

impl EventAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventAction::Created => "created",
            EventAction::Updated => "updated",
            EventAction::Deleted => "deleted",
        }
    }
}

impl fmt::Display for EventAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle notification for one entity record. The channel is the model name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityEvent {
    pub id: Uuid,
    pub channel: String,
    pub action: EventAction,
    pub data: Map<String, Value>,
    pub occurred_at: DateTime<Utc>,
}

impl EntityEvent {
    pub fn new(
        channel: impl Into<String>,
        action: EventAction,
        data: Map<String, Value>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            channel: channel.into(),
            action,
            data,
            occurred_at,
        }
    }

    /// `{channel, action, data}` envelope as persisted in log messages.
    pub fn envelope(&self) -> Value {
        serde_json::json!({
            "channel": self.channel,
            "action": self.action.as_str(),
            "data": Value::Object(self.data.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_carries_channel_action_and_data() {
        let data = json!({"id": 1}).as_object().cloned().unwrap_or_default();
        let event = EntityEvent::new("Part", EventAction::Created, data, Utc::now());
        assert_eq!(
            event.envelope(),
            json!({"channel": "Part", "action": "created", "data": {"id": 1}})
        );
    }
}
