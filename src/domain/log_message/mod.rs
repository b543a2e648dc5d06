pub mod cursor;
pub mod entity;
pub mod repository;

pub use cursor::LogMessageCursor;
pub use entity::{LogMessage, NewLogMessage, LOG_MESSAGE_APP, LOG_MESSAGE_MODEL};
pub use repository::LogMessageRepository;
