pub mod configuration;
pub mod entity;
pub mod errors;
pub mod events;
pub mod log_message;
pub mod record;
pub mod user;
