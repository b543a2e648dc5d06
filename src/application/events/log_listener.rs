use crate::application::ApplicationResult;
use crate::application::ports::events::EventListener;
use crate::domain::events::EntityEvent;
use crate::domain::log_message::{LogMessageRepository, NewLogMessage};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Appends a log message for every entity event. Writes go straight to the
/// repository so logging never emits events of its own.
pub struct LogMessageListener {
    repo: Arc<dyn LogMessageRepository>,
}

impl LogMessageListener {
    pub fn new(repo: Arc<dyn LogMessageRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl EventListener for LogMessageListener {
    fn name(&self) -> &str {
        "log_message"
    }

    async fn handle(&self, event: &EntityEvent) -> ApplicationResult<()> {
        self.repo
            .append(NewLogMessage {
                channel: event.channel.clone(),
                action: event.action.as_str().to_string(),
                message: Value::Object(event.data.clone()),
                created_at: event.occurred_at,
            })
            .await?;
        Ok(())
    }
}
