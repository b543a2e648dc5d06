use crate::application::{
    ApplicationResult, error::ApplicationError, ports::events::EventPublisher,
};
use crate::domain::events::EntityEvent;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// In-process queue feeding an [`EventWorker`](super::EventWorker).
#[derive(Clone)]
pub struct ChannelEventPublisher {
    sender: mpsc::Sender<EntityEvent>,
}

impl ChannelEventPublisher {
    pub fn new(sender: mpsc::Sender<EntityEvent>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl EventPublisher for ChannelEventPublisher {
    async fn publish(&self, event: EntityEvent) -> ApplicationResult<()> {
        self.sender.try_send(event).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => {
                ApplicationError::infrastructure("event queue is full")
            }
            mpsc::error::TrySendError::Closed(_) => {
                ApplicationError::infrastructure("event queue is closed")
            }
        })
    }
}

/// Publisher for tools that write records without a running worker.
#[derive(Default, Clone)]
pub struct NoopEventPublisher;

#[async_trait]
impl EventPublisher for NoopEventPublisher {
    async fn publish(&self, _event: EntityEvent) -> ApplicationResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::EventAction;
    use chrono::Utc;
    use serde_json::Map;

    fn event() -> EntityEvent {
        EntityEvent::new("Part", EventAction::Created, Map::new(), Utc::now())
    }

    #[tokio::test]
    async fn full_and_closed_queues_report_errors() {
        let (tx, rx) = mpsc::channel(1);
        let publisher = ChannelEventPublisher::new(tx);
        assert!(publisher.publish(event()).await.is_ok());
        assert!(publisher.publish(event()).await.is_err());

        drop(rx);
        assert!(publisher.publish(event()).await.is_err());
    }
}
