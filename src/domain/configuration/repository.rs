use crate::domain::configuration::action::{ModelAction, ModelActionId, NewModelAction};
use crate::domain::configuration::app::{AppConfiguration, NewAppConfiguration};
use crate::domain::configuration::field::{
    FieldConfigId, FieldConfiguration, FieldConfigurationUpdate, NewFieldConfiguration,
};
use crate::domain::configuration::model::{
    ModelConfigId, ModelConfiguration, ModelConfigurationUpdate, NewModelConfiguration,
};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait ConfigurationReadRepository: Send + Sync {
    async fn find_app_by_name(&self, name: &str) -> DomainResult<Option<AppConfiguration>>;

    /// Loads the full aggregate: grants, fields in position order and linked actions.
    async fn find_model(&self, app: &str, model: &str) -> DomainResult<Option<ModelConfiguration>>;

    async fn find_model_by_id(&self, id: ModelConfigId) -> DomainResult<Option<ModelConfiguration>>;

    async fn find_field_by_id(&self, id: FieldConfigId) -> DomainResult<Option<FieldConfiguration>>;

    async fn find_action_by_list_name(&self, list_name: &str) -> DomainResult<Option<ModelAction>>;

    /// `(app name, model name, navigation flag)` for every model configuration.
    async fn navigation_flags(&self) -> DomainResult<Vec<(String, String, bool)>>;
}

#[async_trait]
pub trait ConfigurationWriteRepository: Send + Sync {
    async fn insert_app(&self, app: NewAppConfiguration) -> DomainResult<AppConfiguration>;

    async fn insert_model(&self, model: NewModelConfiguration) -> DomainResult<ModelConfigId>;

    async fn insert_field(&self, field: NewFieldConfiguration) -> DomainResult<FieldConfigId>;

    async fn insert_action(&self, action: NewModelAction) -> DomainResult<ModelAction>;

    async fn link_action(&self, model: ModelConfigId, action: ModelActionId) -> DomainResult<()>;

    async fn update_field(&self, update: FieldConfigurationUpdate) -> DomainResult<FieldConfiguration>;

    async fn update_model(&self, update: ModelConfigurationUpdate) -> DomainResult<ModelConfiguration>;
}
