// src/presentation/http/openapi.rs
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::auth::login,
        crate::presentation::http::controllers::auth::profile,
        crate::presentation::http::controllers::scaffold::navigation,
        crate::presentation::http::controllers::scaffold::fields,
        crate::presentation::http::controllers::scaffold::actions,
        crate::presentation::http::controllers::scaffold::form,
        crate::presentation::http::controllers::scaffold::formsets,
        crate::presentation::http::controllers::records::list_records,
        crate::presentation::http::controllers::records::create_record,
        crate::presentation::http::controllers::records::get_record,
        crate::presentation::http::controllers::records::update_record,
        crate::presentation::http::controllers::records::delete_record,
        crate::presentation::http::controllers::records::update_field,
        crate::presentation::http::controllers::reports::render_report,
        crate::presentation::http::controllers::logs::list_logs,
        crate::presentation::http::controllers::admin::sync_config,
        crate::presentation::http::controllers::admin::update_field_configuration,
        crate::presentation::http::controllers::admin::update_model_configuration,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::auth::LoginRequest,
            crate::presentation::http::controllers::auth::LoginResponse,
            crate::presentation::http::controllers::scaffold::FieldsParams,
            crate::presentation::http::controllers::scaffold::ActionsParams,
            crate::presentation::http::controllers::records::ListRecordsParams,
            crate::presentation::http::controllers::records::RecordPayload,
            crate::presentation::http::controllers::records::UpdateFieldRequest,
            crate::presentation::http::controllers::reports::ReportRequest,
            crate::presentation::http::controllers::logs::ListLogsParams,
            crate::presentation::http::controllers::logs::LogMessageListResponse,
            crate::application::commands::configuration::UpdateFieldConfigurationCommand,
            crate::application::commands::configuration::UpdateModelConfigurationCommand,
            crate::application::commands::records::FieldUpdateResult,
            crate::application::dto::ProfileDto,
            crate::application::dto::UserDto,
            crate::application::dto::AuthTokenDto,
            crate::application::dto::FieldView,
            crate::application::dto::ActionsDto,
            crate::application::dto::ActionLinkDto,
            crate::application::dto::DetailActionLinkDto,
            crate::application::dto::NavigationApp,
            crate::application::dto::NavigationModel,
            crate::application::dto::FormFieldDto,
            crate::application::dto::FormSchemaDto,
            crate::application::dto::FormsetSchemaDto,
            crate::application::dto::RecordDto,
            crate::application::dto::RecordListDto,
            crate::application::dto::RecordDetailDto,
            crate::application::dto::ChildRecordsDto,
            crate::application::dto::ReportKind,
            crate::application::dto::Orientation,
            crate::application::dto::LogMessageDto,
            crate::application::dto::SyncReport,
            crate::application::dto::GrantsDto,
            crate::application::dto::FieldConfigurationDto,
            crate::application::dto::ModelConfigurationDto
        )
    ),
    tags(
        (name = "Auth", description = "Login and caller profile"),
        (name = "Scaffold", description = "Resolved fields, actions, navigation and forms"),
        (name = "Records", description = "Entity records behind the generated forms"),
        (name = "Reports", description = "Printable list and detail reports"),
        (name = "Logs", description = "Entity change log"),
        (name = "Admin", description = "Configuration maintenance, superuser only"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&BearerSecurity),
    security(("bearerAuth" = [])),
    info(
        title = "Frame Admin API",
        description = "Configuration-driven admin scaffolding",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));
    }
}

pub fn docs_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_record_routes_and_bearer_scheme() {
        let doc = ApiDoc::openapi();
        assert!(
            doc.paths
                .paths
                .contains_key("/api/v1/apps/{app}/models/{model}/records/{id}")
        );
        assert!(doc.paths.paths.contains_key("/api/v1/logs"));
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearerAuth"));
    }

    #[test]
    fn navigation_response_is_a_map_of_apps() {
        let doc = serde_json::to_value(ApiDoc::openapi()).expect("serialize");
        let schema = &doc["paths"]["/api/v1/navigation"]["get"]["responses"]["200"]["content"]
            ["application/json"]["schema"];
        assert_eq!(schema["type"], "object");
        assert_eq!(
            schema["additionalProperties"]["$ref"],
            "#/components/schemas/NavigationApp"
        );
    }
}
