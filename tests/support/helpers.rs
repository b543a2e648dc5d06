// tests/support/helpers.rs
use super::mocks::{FixedClock, PlainPasswordHasher, StaticTokenManager};
use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode, header},
    response::Response,
};
use frame_admin::{
    application::{
        commands::{configuration::UpdateModelConfigurationCommand, users::CreateUserCommand},
        dto::{AuthenticatedUser, GrantsDto},
        ports::events::EventPublisher,
        queries::reports::ReportLayout,
        services::{ApplicationServices, ServiceDependencies},
    },
    apps,
    domain::{configuration::ConfigurationReadRepository, log_message::LogMessageRepository},
    infrastructure::{
        database,
        reports::TextReportRenderer,
        repositories::{
            SqliteConfigurationRepository, SqliteLogMessageRepository, SqliteRecordRepository,
            SqliteUserRepository,
        },
        util::DefaultSlugGenerator,
    },
    presentation::http::{routes::build_router, state::HttpState},
};
use serde_json::Value;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::util::ServiceExt as _;

pub const ADMIN_PASSWORD: &str = "admin-password-1";
pub const CLERK_PASSWORD: &str = "clerk-password-1";

/// Fully wired service over a fresh in-memory database, with configuration
/// synced, a superuser `admin` and a regular user `clerk` in group `clerks`.
pub struct TestApp {
    pub router: Router,
    pub services: Arc<ApplicationServices>,
    pub pool: SqlitePool,
    pub config_repo: Arc<SqliteConfigurationRepository>,
    pub log_repo: Arc<dyn LogMessageRepository>,
    pub admin_token: String,
    pub clerk_token: String,
    pub clerks_group: i64,
}

pub async fn memory_pool() -> SqlitePool {
    let pool = database::init_pool("sqlite::memory:")
        .await
        .expect("in-memory pool");
    database::run_migrations(&pool).await.expect("migrations");
    pool
}

pub async fn spawn_app(publisher: Arc<dyn EventPublisher>) -> TestApp {
    let pool = memory_pool().await;
    spawn_app_with_pool(pool, publisher).await
}

pub async fn spawn_app_with_pool(pool: SqlitePool, publisher: Arc<dyn EventPublisher>) -> TestApp {
    let config_repo = Arc::new(SqliteConfigurationRepository::new(pool.clone()));
    let record_repo = SqliteRecordRepository::new(pool.clone());
    let log_repo: Arc<dyn LogMessageRepository> =
        Arc::new(SqliteLogMessageRepository::new(record_repo.clone()));

    let services = Arc::new(ApplicationServices::new(ServiceDependencies {
        registry: Arc::new(apps::registry().expect("bundled registry")),
        user_repo: Arc::new(SqliteUserRepository::new(pool.clone())),
        config_read_repo: config_repo.clone(),
        config_write_repo: config_repo.clone(),
        record_repo: Arc::new(record_repo),
        log_repo: Arc::clone(&log_repo),
        password_hasher: Arc::new(PlainPasswordHasher),
        token_manager: Arc::new(StaticTokenManager),
        publisher,
        renderer: Arc::new(TextReportRenderer::default()),
        clock: Arc::new(FixedClock),
        slugger: Arc::new(DefaultSlugGenerator),
        page_size: 10,
        report_layout: ReportLayout {
            rows_portrait: 60,
            rows_landscape: 2,
        },
    }));

    services.config_commands.sync().await.expect("initial sync");

    let admin = services
        .user_commands
        .create_user(CreateUserCommand {
            username: "admin".into(),
            password: ADMIN_PASSWORD.into(),
            is_superuser: true,
            groups: Vec::new(),
        })
        .await
        .expect("create admin");
    let clerk = services
        .user_commands
        .create_user(CreateUserCommand {
            username: "clerk".into(),
            password: CLERK_PASSWORD.into(),
            is_superuser: false,
            groups: vec!["clerks".into()],
        })
        .await
        .expect("create clerk");

    let router = build_router(
        HttpState {
            services: Arc::clone(&services),
        },
        &[],
    );

    TestApp {
        router,
        services,
        pool,
        config_repo,
        log_repo,
        admin_token: format!("user:{}:admin", admin.id),
        clerk_token: format!("user:{}:clerk", clerk.id),
        clerks_group: clerk.groups[0],
    }
}

impl TestApp {
    pub async fn admin(&self) -> AuthenticatedUser {
        self.services
            .authenticate(&self.admin_token)
            .await
            .expect("admin authenticates")
    }

    pub async fn clerk(&self) -> AuthenticatedUser {
        self.services
            .authenticate(&self.clerk_token)
            .await
            .expect("clerk authenticates")
    }

    pub async fn model_id(&self, app: &str, model: &str) -> i64 {
        self.config_repo
            .find_model(app, model)
            .await
            .expect("model lookup")
            .expect("model configured")
            .id
            .0
    }

    pub async fn field_id(&self, app: &str, model: &str, field: &str) -> i64 {
        self.config_repo
            .find_model(app, model)
            .await
            .expect("model lookup")
            .expect("model configured")
            .field(field)
            .expect("field configured")
            .id
            .0
    }

    /// Give the `clerks` group read and write access to a model.
    pub async fn grant_clerks(&self, app: &str, model: &str) {
        let grants = GrantsDto {
            users: Vec::new(),
            groups: vec![self.clerks_group],
        };
        let admin = self.admin().await;
        self.services
            .config_commands
            .update_model_configuration(
                &admin,
                self.model_id(app, model).await,
                UpdateModelConfigurationCommand {
                    read_permission: Some(grants.clone()),
                    write_permission: Some(grants),
                    ..Default::default()
                },
            )
            .await
            .expect("grant clerks");
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router responds")
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .expect("request");
        read_json(self.send(request).await).await
    }

    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        token: &str,
        payload: Value,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request");
        read_json(self.send(request).await).await
    }
}

pub async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    if bytes.is_empty() {
        return (status, Value::Null);
    }
    let value = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
        panic!(
            "expected JSON body, got {}: {}",
            status,
            String::from_utf8_lossy(&bytes)
        )
    });
    (status, value)
}

pub fn records_uri(app: &str, model: &str) -> String {
    format!("/api/v1/apps/{app}/models/{model}/records")
}
