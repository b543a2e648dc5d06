// src/apps/frame.rs
use crate::domain::entity::{EntityDefinition, FieldDescriptor};
use crate::domain::log_message::{LOG_MESSAGE_APP, LOG_MESSAGE_MODEL};

pub const APP_LABEL: &str = LOG_MESSAGE_APP;

/// Written only by the event listener.
pub fn log_message() -> EntityDefinition {
    EntityDefinition::new(LOG_MESSAGE_APP, LOG_MESSAGE_MODEL)
        .with_verbose_name("log message", "log messages")
        .with_field(FieldDescriptor::text("channel"))
        .with_field(FieldDescriptor::text("action"))
        .with_field(FieldDescriptor::json("message"))
        .into_read_only()
}
