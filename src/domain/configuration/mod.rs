pub mod action;
pub mod app;
pub mod field;
pub mod grants;
pub mod model;
pub mod permissions;
pub mod repository;
pub mod view_type;
pub mod visibility;

pub use action::{
    ActionLink, ActionType, DetailActionLink, ListActions, ModelAction, ModelActionId,
    NewModelAction, ResolvedActions,
};
pub use app::{AppConfigId, AppConfiguration, NewAppConfiguration};
pub use field::{FieldConfigId, FieldConfiguration, FieldConfigurationUpdate, NewFieldConfiguration};
pub use grants::{Access, PermissionGrants};
pub use model::{
    ModelConfigId, ModelConfiguration, ModelConfigurationUpdate, NewModelConfiguration,
};
pub use repository::{ConfigurationReadRepository, ConfigurationWriteRepository};
pub use view_type::{ActionView, ViewType};
