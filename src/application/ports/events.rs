use crate::application::ApplicationResult;
use crate::domain::events::EntityEvent;
use async_trait::async_trait;

/// Outbound side of the event bus. Callers treat failures as non-fatal.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: EntityEvent) -> ApplicationResult<()>;
}

#[async_trait]
pub trait EventListener: Send + Sync {
    fn name(&self) -> &str;

    async fn handle(&self, event: &EntityEvent) -> ApplicationResult<()>;
}
