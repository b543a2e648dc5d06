use crate::application::{
    commands::records::{
        CreateRecordCommand, DeleteRecordCommand, FieldUpdateResult, UpdateFieldCommand,
        UpdateRecordCommand,
    },
    dto::{RecordDetailDto, RecordDto, RecordListDto},
    forms::InlineSubmission,
    queries::records::{GetRecordQuery, ListRecordsQuery},
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListRecordsParams {
    /// Search term; matched against `filter` when given, otherwise across
    /// every listed text column.
    pub search: Option<String>,
    pub filter: Option<String>,
    #[serde(default)]
    pub exact_match: bool,
    /// Field name, `-` prefix for descending.
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Submitted record values plus inline child rows.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RecordPayload {
    #[serde(default)]
    #[schema(value_type = Object)]
    pub values: Map<String, Value>,
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub inlines: Vec<InlineSubmission>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateFieldRequest {
    #[schema(value_type = Object)]
    pub value: Value,
}

#[utoipa::path(
    get,
    path = "/api/v1/apps/{app}/models/{model}/records",
    params(
        ("app" = String, Path, description = "App label"),
        ("model" = String, Path, description = "Model name"),
        ListRecordsParams
    ),
    responses(
        (status = 200, description = "One page of live records.", body = RecordListDto),
        (status = 403, description = "Missing read permission.", body = ErrorResponse)
    ),
    tag = "Records"
)]
pub async fn list_records(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path((app, model)): Path<(String, String)>,
    Query(params): Query<ListRecordsParams>,
) -> HttpResult<Json<RecordListDto>> {
    let query = ListRecordsQuery {
        app,
        model,
        search: params.search,
        filter: params.filter,
        exact_match: params.exact_match,
        sort: params.sort,
        page: params.page.unwrap_or(1),
        page_size: params.page_size,
    };

    state
        .services
        .record_queries
        .list_records(&user, query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/apps/{app}/models/{model}/records",
    params(
        ("app" = String, Path, description = "App label"),
        ("model" = String, Path, description = "Model name")
    ),
    request_body = RecordPayload,
    responses(
        (status = 201, description = "Record created.", body = RecordDto),
        (status = 403, description = "Missing write permission.", body = ErrorResponse),
        (status = 422, description = "Submission rejected by the form.", body = ErrorResponse)
    ),
    tag = "Records"
)]
pub async fn create_record(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path((app, model)): Path<(String, String)>,
    Json(payload): Json<RecordPayload>,
) -> HttpResult<(StatusCode, Json<RecordDto>)> {
    let command = CreateRecordCommand {
        app,
        model,
        values: payload.values,
        inlines: payload.inlines,
    };

    let record = state
        .services
        .record_commands
        .create_record(&user, command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    get,
    path = "/api/v1/apps/{app}/models/{model}/records/{id}",
    params(
        ("app" = String, Path, description = "App label"),
        ("model" = String, Path, description = "Model name"),
        ("id" = i64, Path, description = "Record id")
    ),
    responses(
        (status = 200, description = "Record with its child rows.", body = RecordDetailDto),
        (status = 404, description = "No live record with that id.", body = ErrorResponse)
    ),
    tag = "Records"
)]
pub async fn get_record(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path((app, model, id)): Path<(String, String, i64)>,
) -> HttpResult<Json<RecordDetailDto>> {
    state
        .services
        .record_queries
        .get_record(&user, GetRecordQuery { app, model, id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/apps/{app}/models/{model}/records/{id}",
    params(
        ("app" = String, Path, description = "App label"),
        ("model" = String, Path, description = "Model name"),
        ("id" = i64, Path, description = "Record id")
    ),
    request_body = RecordPayload,
    responses(
        (status = 200, description = "Record updated.", body = RecordDto),
        (status = 404, description = "No live record with that id.", body = ErrorResponse),
        (status = 422, description = "Submission rejected by the form.", body = ErrorResponse)
    ),
    tag = "Records"
)]
pub async fn update_record(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path((app, model, id)): Path<(String, String, i64)>,
    Json(payload): Json<RecordPayload>,
) -> HttpResult<Json<RecordDto>> {
    let command = UpdateRecordCommand {
        app,
        model,
        id,
        values: payload.values,
        inlines: payload.inlines,
    };

    state
        .services
        .record_commands
        .update_record(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/apps/{app}/models/{model}/records/{id}",
    params(
        ("app" = String, Path, description = "App label"),
        ("model" = String, Path, description = "Model name"),
        ("id" = i64, Path, description = "Record id")
    ),
    responses(
        (status = 204, description = "Record soft-deleted."),
        (status = 404, description = "No live record with that id.", body = ErrorResponse)
    ),
    tag = "Records"
)]
pub async fn delete_record(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path((app, model, id)): Path<(String, String, i64)>,
) -> HttpResult<StatusCode> {
    state
        .services
        .record_commands
        .delete_record(&user, DeleteRecordCommand { app, model, id })
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/apps/{app}/models/{model}/records/{id}/fields/{field}",
    params(
        ("app" = String, Path, description = "App label"),
        ("model" = String, Path, description = "Model name"),
        ("id" = i64, Path, description = "Record id"),
        ("field" = String, Path, description = "Field to change")
    ),
    request_body = UpdateFieldRequest,
    responses(
        (status = 200, description = "Stored value after the change.", body = FieldUpdateResult),
        (status = 403, description = "Field is not writable for the caller.", body = ErrorResponse)
    ),
    tag = "Records"
)]
pub async fn update_field(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path((app, model, id, field)): Path<(String, String, i64, String)>,
    Json(payload): Json<UpdateFieldRequest>,
) -> HttpResult<Json<FieldUpdateResult>> {
    let command = UpdateFieldCommand {
        app,
        model,
        id,
        field,
        value: payload.value,
    };

    state
        .services
        .record_commands
        .update_field(&user, command)
        .await
        .into_http()
        .map(Json)
}
