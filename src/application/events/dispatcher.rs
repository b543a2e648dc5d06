use super::registry::ListenerRegistry;
use crate::domain::events::EntityEvent;
use std::sync::Arc;
use tracing::{debug, warn};

/// Delivers one event to every subscribed listener. A failing listener is
/// logged and does not prevent delivery to the others.
#[derive(Clone)]
pub struct EventDispatcher {
    registry: Arc<ListenerRegistry>,
}

impl EventDispatcher {
    pub fn new(registry: Arc<ListenerRegistry>) -> Self {
        Self { registry }
    }

    /// Returns how many listeners handled the event successfully.
    pub async fn dispatch(&self, event: &EntityEvent) -> usize {
        let mut handled = 0;
        for listener in self.registry.listeners_for(&event.channel) {
            match listener.handle(event).await {
                Ok(()) => handled += 1,
                Err(err) => warn!(
                    listener = listener.name(),
                    channel = %event.channel,
                    action = %event.action,
                    event_id = %event.id,
                    error = %err,
                    "event listener failed"
                ),
            }
        }
        debug!(channel = %event.channel, action = %event.action, handled, "event dispatched");
        handled
    }
}
