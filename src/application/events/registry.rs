use crate::application::ports::events::EventListener;
use crate::domain::events::WILDCARD_CHANNEL;
use std::collections::HashMap;
use std::sync::Arc;

/// Channel subscriptions, fixed once the process has started.
#[derive(Default, Clone)]
pub struct ListenerRegistry {
    channels: HashMap<String, Vec<Arc<dyn EventListener>>>,
}

impl ListenerRegistry {
    pub fn builder() -> ListenerRegistryBuilder {
        ListenerRegistryBuilder::default()
    }

    /// Listeners of `channel` followed by the wildcard listeners.
    pub fn listeners_for(&self, channel: &str) -> Vec<Arc<dyn EventListener>> {
        let direct = self.channels.get(channel).into_iter().flatten();
        let wildcard = if channel == WILDCARD_CHANNEL {
            None
        } else {
            self.channels.get(WILDCARD_CHANNEL)
        };
        direct.chain(wildcard.into_iter().flatten()).cloned().collect()
    }
}

#[derive(Default)]
pub struct ListenerRegistryBuilder {
    channels: HashMap<String, Vec<Arc<dyn EventListener>>>,
}

impl ListenerRegistryBuilder {
    pub fn subscribe(mut self, channel: impl Into<String>, listener: Arc<dyn EventListener>) -> Self {
        self.channels.entry(channel.into()).or_default().push(listener);
        self
    }

    pub fn subscribe_all(self, listener: Arc<dyn EventListener>) -> Self {
        self.subscribe(WILDCARD_CHANNEL, listener)
    }

    pub fn build(self) -> ListenerRegistry {
        ListenerRegistry {
            channels: self.channels,
        }
    }
}
