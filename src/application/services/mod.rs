// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        commands::{
            configuration::ConfigurationCommandService, records::RecordCommandService,
            users::UserCommandService,
        },
        dto::AuthenticatedUser,
        error::ApplicationError,
        ports::{
            events::EventPublisher,
            reports::ReportRenderer,
            security::{PasswordHasher, TokenManager},
            time::Clock,
            util::SlugGenerator,
        },
        queries::{
            logs::LogQueryService,
            records::RecordQueryService,
            reports::{ReportLayout, ReportQueryService},
            scaffold::ScaffoldQueryService,
            users::UserQueryService,
        },
    },
    domain::{
        configuration::{ConfigurationReadRepository, ConfigurationWriteRepository},
        entity::EntityRegistry,
        log_message::LogMessageRepository,
        record::RecordRepository,
        user::UserRepository,
    },
};

/// Adapters the application layer is assembled from.
pub struct ServiceDependencies {
    pub registry: Arc<EntityRegistry>,
    pub user_repo: Arc<dyn UserRepository>,
    pub config_read_repo: Arc<dyn ConfigurationReadRepository>,
    pub config_write_repo: Arc<dyn ConfigurationWriteRepository>,
    pub record_repo: Arc<dyn RecordRepository>,
    pub log_repo: Arc<dyn LogMessageRepository>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub token_manager: Arc<dyn TokenManager>,
    pub publisher: Arc<dyn EventPublisher>,
    pub renderer: Arc<dyn ReportRenderer>,
    pub clock: Arc<dyn Clock>,
    pub slugger: Arc<dyn SlugGenerator>,
    pub page_size: u32,
    pub report_layout: ReportLayout,
}

pub struct ApplicationServices {
    pub user_commands: Arc<UserCommandService>,
    pub user_queries: Arc<UserQueryService>,
    pub config_commands: Arc<ConfigurationCommandService>,
    pub scaffold: Arc<ScaffoldQueryService>,
    pub record_commands: Arc<RecordCommandService>,
    pub record_queries: Arc<RecordQueryService>,
    pub report_queries: Arc<ReportQueryService>,
    pub log_queries: Arc<LogQueryService>,
    user_repo: Arc<dyn UserRepository>,
    token_manager: Arc<dyn TokenManager>,
}

impl ApplicationServices {
    pub fn new(deps: ServiceDependencies) -> Self {
        let scaffold = Arc::new(ScaffoldQueryService::new(
            Arc::clone(&deps.registry),
            Arc::clone(&deps.config_read_repo),
        ));

        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&deps.user_repo),
            Arc::clone(&deps.password_hasher),
            Arc::clone(&deps.token_manager),
            Arc::clone(&deps.clock),
        ));
        let user_queries = Arc::new(UserQueryService::new(
            Arc::clone(&deps.user_repo),
            Arc::clone(&deps.clock),
        ));

        let config_commands = Arc::new(ConfigurationCommandService::new(
            Arc::clone(&deps.registry),
            Arc::clone(&deps.config_read_repo),
            Arc::clone(&deps.config_write_repo),
            Arc::clone(&deps.slugger),
        ));

        let record_commands = Arc::new(RecordCommandService::new(
            Arc::clone(&scaffold),
            Arc::clone(&deps.record_repo),
            Arc::clone(&deps.publisher),
            Arc::clone(&deps.clock),
        ));
        let record_queries = Arc::new(RecordQueryService::new(
            Arc::clone(&scaffold),
            Arc::clone(&deps.record_repo),
            deps.page_size,
        ));
        let report_queries = Arc::new(ReportQueryService::new(
            Arc::clone(&scaffold),
            Arc::clone(&deps.record_repo),
            Arc::clone(&deps.renderer),
            Arc::clone(&deps.clock),
            deps.report_layout,
        ));
        let log_queries = Arc::new(LogQueryService::new(
            Arc::clone(&scaffold),
            Arc::clone(&deps.log_repo),
        ));

        Self {
            user_commands,
            user_queries,
            config_commands,
            scaffold,
            record_commands,
            record_queries,
            report_queries,
            log_queries,
            user_repo: deps.user_repo,
            token_manager: deps.token_manager,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }

    /// Verify a bearer token and rebuild the caller from the user store, so
    /// group changes and deactivation apply to tokens already issued.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let claims = self.token_manager.authenticate(token).await?;
        let user = self
            .user_repo
            .find_by_id(claims.user_id)
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("unknown user"))?;
        if !user.is_active {
            return Err(ApplicationError::unauthorized("user is inactive"));
        }
        Ok(AuthenticatedUser {
            principal: user.principal(),
            username: user.username.to_string(),
            issued_at: claims.issued_at,
            expires_at: claims.expires_at,
        })
    }
}
