use crate::domain::errors::DomainResult;
use crate::domain::log_message::{
    LOG_MESSAGE_APP, LOG_MESSAGE_MODEL, LogMessage, LogMessageCursor, LogMessageRepository,
    NewLogMessage,
};
use crate::domain::record::{RecordQuery, RecordRepository, RecordSort, format_timestamp};
use async_trait::async_trait;

use super::SqliteRecordRepository;

/// Log messages are `frame.LogMessage` records; this adapter adds the
/// newest-first keyset listing on top of the record store.
#[derive(Clone)]
pub struct SqliteLogMessageRepository {
    records: SqliteRecordRepository,
}

impl SqliteLogMessageRepository {
    pub fn new(records: SqliteRecordRepository) -> Self {
        Self { records }
    }
}

#[async_trait]
impl LogMessageRepository for SqliteLogMessageRepository {
    async fn append(&self, message: NewLogMessage) -> DomainResult<LogMessage> {
        let record = self.records.insert(message.into()).await?;
        Ok(record.into())
    }

    async fn list(
        &self,
        limit: u32,
        cursor: Option<LogMessageCursor>,
    ) -> DomainResult<(Vec<LogMessage>, Option<String>)> {
        let mut query = RecordQuery::new(LOG_MESSAGE_APP, LOG_MESSAGE_MODEL)
            .with_sort(RecordSort::parse("-created_at"))
            .paginate(limit.saturating_add(1), 0);
        if let Some(cursor) = cursor {
            query = query.before(format_timestamp(cursor.created_at), cursor.id);
        }

        let (records, _) = self.records.list(&query).await?;
        let mut items: Vec<LogMessage> = records.into_iter().map(LogMessage::from).collect();

        let page = usize::try_from(limit).unwrap_or(usize::MAX);
        let next = if items.len() > page {
            items.truncate(page);
            items
                .last()
                .map(|last| LogMessageCursor::new(last.created_at, last.id).encode())
        } else {
            None
        };
        Ok((items, next))
    }
}
