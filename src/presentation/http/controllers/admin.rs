use crate::application::{
    commands::configuration::{UpdateFieldConfigurationCommand, UpdateModelConfigurationCommand},
    dto::{FieldConfigurationDto, ModelConfigurationDto, SyncReport},
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path};

#[utoipa::path(
    post,
    path = "/api/v1/admin/sync-config",
    responses(
        (status = 200, description = "Configuration rows added.", body = SyncReport),
        (status = 403, description = "Superuser only.", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn sync_config(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<SyncReport>> {
    state
        .services
        .config_commands
        .sync_as(&user)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    patch,
    path = "/api/v1/admin/fields/{id}",
    params(("id" = i64, Path, description = "Field configuration id")),
    request_body = UpdateFieldConfigurationCommand,
    responses(
        (status = 200, description = "Updated field configuration.", body = FieldConfigurationDto),
        (status = 403, description = "Superuser only.", body = ErrorResponse),
        (status = 404, description = "Unknown field configuration.", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn update_field_configuration(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateFieldConfigurationCommand>,
) -> HttpResult<Json<FieldConfigurationDto>> {
    state
        .services
        .config_commands
        .update_field_configuration(&user, id, payload)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    patch,
    path = "/api/v1/admin/models/{id}",
    params(("id" = i64, Path, description = "Model configuration id")),
    request_body = UpdateModelConfigurationCommand,
    responses(
        (status = 200, description = "Updated model configuration.", body = ModelConfigurationDto),
        (status = 403, description = "Superuser only.", body = ErrorResponse),
        (status = 404, description = "Unknown model configuration.", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn update_model_configuration(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateModelConfigurationCommand>,
) -> HttpResult<Json<ModelConfigurationDto>> {
    state
        .services
        .config_commands
        .update_model_configuration(&user, id, payload)
        .await
        .into_http()
        .map(Json)
}
