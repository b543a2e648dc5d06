mod channel;
mod worker;

pub use channel::{ChannelEventPublisher, NoopEventPublisher};
pub use worker::EventWorker;
