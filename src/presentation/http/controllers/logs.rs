use crate::application::{
    dto::{CursorPage, LogMessageDto},
    queries::logs::ListLogMessagesQuery,
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Query};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

fn default_limit() -> u32 {
    20
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListLogsParams {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LogMessageListResponse {
    pub items: Vec<LogMessageDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl From<CursorPage<LogMessageDto>> for LogMessageListResponse {
    fn from(page: CursorPage<LogMessageDto>) -> Self {
        Self {
            items: page.items,
            next_cursor: page.next_cursor,
            has_more: page.has_more,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/logs",
    params(ListLogsParams),
    responses(
        (status = 200, description = "Entity events, newest first.", body = LogMessageListResponse),
        (status = 400, description = "Malformed cursor.", body = ErrorResponse),
        (status = 403, description = "Missing read permission on log messages.", body = ErrorResponse)
    ),
    tag = "Logs"
)]
pub async fn list_logs(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Query(params): Query<ListLogsParams>,
) -> HttpResult<Json<LogMessageListResponse>> {
    let query = ListLogMessagesQuery {
        limit: params.limit,
        cursor: params.cursor,
    };

    state
        .services
        .log_queries
        .list_log_messages(&user, query)
        .await
        .into_http()
        .map(|page| Json(page.into()))
}
