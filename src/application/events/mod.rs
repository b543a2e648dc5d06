mod dispatcher;
mod log_listener;
mod registry;

pub use dispatcher::EventDispatcher;
pub use log_listener::LogMessageListener;
pub use registry::{ListenerRegistry, ListenerRegistryBuilder};
