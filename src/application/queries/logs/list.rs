use super::LogQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, CursorPage, LogMessageDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::log_message::{LOG_MESSAGE_APP, LOG_MESSAGE_MODEL, LogMessageCursor},
};

pub struct ListLogMessagesQuery {
    pub limit: u32,
    pub cursor: Option<String>,
}

impl LogQueryService {
    /// Newest first. Readers need read access to the log message model;
    /// before it is configured only superusers pass.
    pub async fn list_log_messages(
        &self,
        actor: &AuthenticatedUser,
        query: ListLogMessagesQuery,
    ) -> ApplicationResult<CursorPage<LogMessageDto>> {
        match self
            .scaffold
            .find_context(LOG_MESSAGE_APP, LOG_MESSAGE_MODEL)
            .await?
        {
            Some(ctx) => ctx.ensure_readable(&actor.principal)?,
            None if actor.is_superuser() => {}
            None => return Err(ApplicationError::forbidden("log messages are not configured")),
        }

        let limit = normalize_limit(query.limit);
        let cursor = query
            .cursor
            .as_deref()
            .map(LogMessageCursor::decode)
            .transpose()?;

        let (items, next_cursor) = self.repo.list(limit, cursor).await?;
        let dtos = items.into_iter().map(LogMessageDto::from).collect();
        Ok(CursorPage::new(dtos, next_cursor))
    }
}

fn normalize_limit(limit: u32) -> u32 {
    const DEFAULT_LIMIT: u32 = 20;
    const MAX_LIMIT: u32 = 100;

    if limit == 0 {
        DEFAULT_LIMIT
    } else {
        limit.min(MAX_LIMIT)
    }
}
