use std::sync::Arc;

use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::{
        configuration::{ConfigurationReadRepository, ModelConfiguration},
        entity::{ConfigurableEntity, EntityRegistry},
    },
};

/// Resolves configuration-driven views: fields, actions, navigation and forms.
pub struct ScaffoldQueryService {
    pub(super) registry: Arc<EntityRegistry>,
    pub(super) config_repo: Arc<dyn ConfigurationReadRepository>,
}

/// A registered entity together with its persisted configuration.
#[derive(Clone)]
pub struct ModelContext {
    pub entity: Arc<dyn ConfigurableEntity>,
    pub config: ModelConfiguration,
}

impl ScaffoldQueryService {
    pub fn new(
        registry: Arc<EntityRegistry>,
        config_repo: Arc<dyn ConfigurationReadRepository>,
    ) -> Self {
        Self {
            registry,
            config_repo,
        }
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// `None` when the model is unknown or has no configuration yet.
    pub async fn find_context(&self, app: &str, model: &str) -> ApplicationResult<Option<ModelContext>> {
        let Some(entity) = self.registry.get(app, model) else {
            return Ok(None);
        };
        let config = self.config_repo.find_model(app, model).await?;
        Ok(config.map(|config| ModelContext { entity, config }))
    }

    /// Like [`Self::find_context`] but a missing model is an error.
    pub async fn require_context(&self, app: &str, model: &str) -> ApplicationResult<ModelContext> {
        if self.registry.get(app, model).is_none() {
            return Err(ApplicationError::not_found(format!("model {app}.{model}")));
        }
        self.find_context(app, model)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("configuration for {app}.{model}")))
    }
}
