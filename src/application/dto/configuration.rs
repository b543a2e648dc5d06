use crate::domain::configuration::{FieldConfiguration, ModelConfiguration, PermissionGrants};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What a configuration sync added. Existing rows are never touched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SyncReport {
    pub apps_added: Vec<String>,
    pub models_added: Vec<String>,
    pub fields_added: Vec<String>,
    pub actions_added: Vec<String>,
}

impl SyncReport {
    pub fn is_empty(&self) -> bool {
        self.apps_added.is_empty()
            && self.models_added.is_empty()
            && self.fields_added.is_empty()
            && self.actions_added.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GrantsDto {
    pub users: Vec<i64>,
    pub groups: Vec<i64>,
}

impl From<&PermissionGrants> for GrantsDto {
    fn from(grants: &PermissionGrants) -> Self {
        Self {
            users: grants.users.iter().map(|u| i64::from(*u)).collect(),
            groups: grants.groups.iter().map(|g| i64::from(*g)).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldConfigurationDto {
    pub id: i64,
    pub model_id: i64,
    pub field_name: String,
    pub display_name: String,
    pub enable_in_list: bool,
    pub enable_in_detail: bool,
    pub enable_in_form: bool,
    pub enable_in_report: bool,
    pub inherit_permissions: bool,
    pub read_permission: GrantsDto,
    pub write_permission: GrantsDto,
}

impl From<FieldConfiguration> for FieldConfigurationDto {
    fn from(field: FieldConfiguration) -> Self {
        Self {
            id: field.id.into(),
            model_id: field.model_id.into(),
            read_permission: GrantsDto::from(&field.read_permission),
            write_permission: GrantsDto::from(&field.write_permission),
            field_name: field.field_name,
            display_name: field.display_name,
            enable_in_list: field.enable_in_list,
            enable_in_detail: field.enable_in_detail,
            enable_in_form: field.enable_in_form,
            enable_in_report: field.enable_in_report,
            inherit_permissions: field.inherit_permissions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ModelConfigurationDto {
    pub id: i64,
    pub app: String,
    pub model_name: String,
    pub enable_search: bool,
    pub list_title: String,
    pub default_sort_by: String,
    pub navigation: bool,
    pub list_url: String,
    pub enable_list_report: bool,
    pub enable_detail_report: bool,
    pub read_permission: GrantsDto,
    pub write_permission: GrantsDto,
    pub fields: Vec<FieldConfigurationDto>,
    pub actions: Vec<String>,
}

impl From<ModelConfiguration> for ModelConfigurationDto {
    fn from(model: ModelConfiguration) -> Self {
        Self {
            id: model.id.into(),
            read_permission: GrantsDto::from(&model.read_permission),
            write_permission: GrantsDto::from(&model.write_permission),
            app: model.app_name,
            model_name: model.model_name,
            enable_search: model.enable_search,
            list_title: model.list_title,
            default_sort_by: model.default_sort_by,
            navigation: model.navigation,
            list_url: model.list_url,
            enable_list_report: model.enable_list_report,
            enable_detail_report: model.enable_detail_report,
            fields: model.fields.into_iter().map(Into::into).collect(),
            actions: model.actions.into_iter().map(|a| a.list_name).collect(),
        }
    }
}
