use super::ChannelEventPublisher;
use crate::application::events::EventDispatcher;
use crate::domain::events::EntityEvent;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info};

/// Background task draining the event queue into the dispatcher. Events are
/// handled one at a time in publish order.
pub struct EventWorker {
    receiver: mpsc::Receiver<EntityEvent>,
    dispatcher: EventDispatcher,
}

impl EventWorker {
    /// Create the worker together with the publisher that feeds it.
    pub fn new(dispatcher: EventDispatcher, capacity: usize) -> (Self, ChannelEventPublisher) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (
            Self {
                receiver,
                dispatcher,
            },
            ChannelEventPublisher::new(sender),
        )
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Runs until every publisher has been dropped.
    pub async fn run(mut self) {
        info!("event worker started");
        while let Some(event) = self.receiver.recv().await {
            debug!(event_id = %event.id, channel = %event.channel, "event received");
            self.dispatcher.dispatch(&event).await;
        }
        info!("event worker stopped");
    }
}
