use crate::application::dto::{
    ActionsDto, FieldView, FormSchemaDto, FormsetSchemaDto, NavigationApp, NavigationIndex,
};
use crate::domain::configuration::{ActionView, ViewType};
use crate::presentation::http::error::{ErrorResponse, HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct FieldsParams {
    /// `list`, `detail`, `form` or `report`.
    #[serde(default)]
    pub view: Option<String>,
    /// Append computed properties (ignored for forms).
    #[serde(default)]
    pub computed: Option<bool>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ActionsParams {
    /// `list` or `detail`.
    #[serde(default)]
    pub view: Option<String>,
}

pub(crate) fn parse_view(raw: Option<&str>) -> HttpResult<ViewType> {
    match raw {
        None => Ok(ViewType::default()),
        Some(raw) => raw.parse().map_err(|e: crate::domain::errors::DomainError| {
            HttpError::bad_request(e.to_string())
        }),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/navigation",
    responses(
        (status = 200, description = "App label to navigable models, in app registration order.",
         body = std::collections::BTreeMap<String, NavigationApp>),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse)
    ),
    tag = "Scaffold"
)]
pub async fn navigation(
    Extension(state): Extension<HttpState>,
    Authenticated(_user): Authenticated,
) -> HttpResult<Json<NavigationIndex>> {
    state
        .services
        .scaffold
        .build_navigation()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/apps/{app}/models/{model}/fields",
    params(
        ("app" = String, Path, description = "App label"),
        ("model" = String, Path, description = "Model name"),
        FieldsParams
    ),
    responses(
        (status = 200, description = "Visible fields in display order.", body = [FieldView]),
        (status = 400, description = "Unknown view type.", body = ErrorResponse)
    ),
    tag = "Scaffold"
)]
pub async fn fields(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path((app, model)): Path<(String, String)>,
    Query(params): Query<FieldsParams>,
) -> HttpResult<Json<Vec<FieldView>>> {
    let view = parse_view(params.view.as_deref())?;
    state
        .services
        .scaffold
        .describe_fields(
            &app,
            &model,
            &user.principal,
            view,
            params.computed.unwrap_or(false),
        )
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/apps/{app}/models/{model}/actions",
    params(
        ("app" = String, Path, description = "App label"),
        ("model" = String, Path, description = "Model name"),
        ActionsParams
    ),
    responses(
        (status = 200, description = "Action links for the view.", body = ActionsDto),
        (status = 400, description = "View has no action bar.", body = ErrorResponse)
    ),
    tag = "Scaffold"
)]
pub async fn actions(
    Extension(state): Extension<HttpState>,
    Authenticated(_user): Authenticated,
    Path((app, model)): Path<(String, String)>,
    Query(params): Query<ActionsParams>,
) -> HttpResult<Json<ActionsDto>> {
    let view = match params.view.as_deref() {
        None => ActionView::default(),
        Some(raw) => raw.parse::<ActionView>().map_err(|e| HttpError::bad_request(e.to_string()))?,
    };
    state
        .services
        .scaffold
        .resolve_actions(&app, &model, view)
        .await
        .into_http()
        .map(|actions| Json(actions.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/apps/{app}/models/{model}/form",
    params(
        ("app" = String, Path, description = "App label"),
        ("model" = String, Path, description = "Model name")
    ),
    responses(
        (status = 200, description = "Fields the caller may write.", body = FormSchemaDto),
        (status = 404, description = "Model not configured.", body = ErrorResponse)
    ),
    tag = "Scaffold"
)]
pub async fn form(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path((app, model)): Path<(String, String)>,
) -> HttpResult<Json<FormSchemaDto>> {
    let form = state
        .services
        .scaffold
        .build_form(&app, &model, &user.principal)
        .await
        .into_http()?;
    Ok(Json(FormSchemaDto::from(&form)))
}

#[utoipa::path(
    get,
    path = "/api/v1/apps/{app}/models/{model}/formsets",
    params(
        ("app" = String, Path, description = "App label"),
        ("model" = String, Path, description = "Parent model name")
    ),
    responses(
        (status = 200, description = "Inline formsets for configured children.", body = [FormsetSchemaDto]),
        (status = 404, description = "Model not registered.", body = ErrorResponse)
    ),
    tag = "Scaffold"
)]
pub async fn formsets(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path((app, model)): Path<(String, String)>,
) -> HttpResult<Json<Vec<FormsetSchemaDto>>> {
    let formsets = state
        .services
        .scaffold
        .build_inline_formsets(&app, &model, &user.principal)
        .await
        .into_http()?;
    Ok(Json(formsets.iter().map(FormsetSchemaDto::from).collect()))
}
