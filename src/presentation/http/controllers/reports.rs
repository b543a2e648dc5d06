use crate::application::{dto::{Orientation, ReportKind}, queries::reports::BuildReportQuery};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::Path,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReportRequest {
    pub kind: ReportKind,
    /// Record to print; required for detail reports.
    pub id: Option<i64>,
    pub orientation: Option<Orientation>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Date or timestamp field the range applies to; `created_at` by default.
    pub date_field: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/apps/{app}/models/{model}/report",
    params(
        ("app" = String, Path, description = "App label"),
        ("model" = String, Path, description = "Model name")
    ),
    request_body = ReportRequest,
    responses(
        (status = 200, description = "Rendered report as an attachment.", content_type = "text/plain"),
        (status = 403, description = "Reports disabled or missing read permission.", body = ErrorResponse)
    ),
    tag = "Reports"
)]
pub async fn render_report(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path((app, model)): Path<(String, String)>,
    Json(payload): Json<ReportRequest>,
) -> HttpResult<Response> {
    let query = BuildReportQuery {
        app,
        model,
        kind: payload.kind,
        id: payload.id,
        orientation: payload.orientation,
        date_from: payload.date_from,
        date_to: payload.date_to,
        date_field: payload.date_field,
    };

    let report = state
        .services
        .report_queries
        .render_report(&user, query)
        .await
        .into_http()?;

    let disposition = format!("attachment; filename=\"{}\"", report.filename);
    Ok((
        [
            (header::CONTENT_TYPE, report.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.body,
    )
        .into_response())
}
