// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{admin, auth, logs, records, reports, scaffold},
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method},
    routing::{get, patch, post},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

const MODEL_ROOT: &str = "/api/v1/apps/{app}/models/{model}";

fn model_path(suffix: &str) -> String {
    format!("{MODEL_ROOT}{suffix}")
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

pub fn build_router(state: HttpState, allowed_origins: &[String]) -> Router {
    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/me", get(auth::profile))
        .route("/api/v1/navigation", get(scaffold::navigation))
        .route(&model_path("/fields"), get(scaffold::fields))
        .route(&model_path("/actions"), get(scaffold::actions))
        .route(&model_path("/form"), get(scaffold::form))
        .route(&model_path("/formsets"), get(scaffold::formsets))
        .route(
            &model_path("/records"),
            get(records::list_records).post(records::create_record),
        )
        .route(
            &model_path("/records/{id}"),
            get(records::get_record)
                .put(records::update_record)
                .delete(records::delete_record),
        )
        .route(
            &model_path("/records/{id}/fields/{field}"),
            post(records::update_field),
        )
        .route(&model_path("/report"), post(reports::render_report))
        .route("/api/v1/logs", get(logs::list_logs))
        .route("/api/v1/admin/sync-config", post(admin::sync_config))
        .route(
            "/api/v1/admin/fields/{id}",
            patch(admin::update_field_configuration),
        )
        .route(
            "/api/v1/admin/models/{id}",
            patch(admin::update_model_configuration),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    security(()),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
