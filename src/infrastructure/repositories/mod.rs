// src/infrastructure/repositories/mod.rs
mod error;
mod sqlite_configuration;
mod sqlite_log_message;
mod sqlite_record;
mod sqlite_user;

pub use error::map_sqlx;
pub use sqlite_configuration::SqliteConfigurationRepository;
pub use sqlite_log_message::SqliteLogMessageRepository;
pub use sqlite_record::SqliteRecordRepository;
pub use sqlite_user::SqliteUserRepository;
