use crate::domain::errors::DomainResult;
use crate::domain::log_message::cursor::LogMessageCursor;
use crate::domain::log_message::entity::{LogMessage, NewLogMessage};
use async_trait::async_trait;

#[async_trait]
pub trait LogMessageRepository: Send + Sync {
    async fn append(&self, message: NewLogMessage) -> DomainResult<LogMessage>;

    /// Newest first, strictly after `cursor` when given. Returns the encoded
    /// cursor of the next page when more entries exist.
    async fn list(
        &self,
        limit: u32,
        cursor: Option<LogMessageCursor>,
    ) -> DomainResult<(Vec<LogMessage>, Option<String>)>;
}
