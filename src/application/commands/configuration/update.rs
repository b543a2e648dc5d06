use super::ConfigurationCommandService;
use crate::{
    application::{
        dto::{AuthenticatedUser, FieldConfigurationDto, GrantsDto, ModelConfigurationDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        configuration::{
            FieldConfigId, FieldConfigurationUpdate, ModelConfigId, ModelConfiguration,
            ModelConfigurationUpdate, PermissionGrants, ViewType,
        },
        entity::ConfigurableEntity,
        user::{GroupId, UserId},
    },
};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateFieldConfigurationCommand {
    pub display_name: Option<String>,
    pub enable_in_list: Option<bool>,
    pub enable_in_detail: Option<bool>,
    pub enable_in_form: Option<bool>,
    pub enable_in_report: Option<bool>,
    pub inherit_permissions: Option<bool>,
    pub read_permission: Option<GrantsDto>,
    pub write_permission: Option<GrantsDto>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateModelConfigurationCommand {
    pub navigation: Option<bool>,
    pub enable_search: Option<bool>,
    pub list_title: Option<String>,
    /// Field name, prefixed with `-` for descending order.
    pub default_sort_by: Option<String>,
    pub enable_list_report: Option<bool>,
    pub enable_detail_report: Option<bool>,
    pub read_permission: Option<GrantsDto>,
    pub write_permission: Option<GrantsDto>,
}

fn grants(dto: GrantsDto) -> ApplicationResult<PermissionGrants> {
    let users = dto
        .users
        .into_iter()
        .map(UserId::new)
        .collect::<Result<Vec<_>, _>>()?;
    let groups = dto
        .groups
        .into_iter()
        .map(GroupId::new)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PermissionGrants::new(users, groups))
}

impl ConfigurationCommandService {
    pub async fn update_field_configuration(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        command: UpdateFieldConfigurationCommand,
    ) -> ApplicationResult<FieldConfigurationDto> {
        Self::ensure_superuser(actor)?;
        let id = FieldConfigId(id);
        if self.read_repo.find_field_by_id(id).await?.is_none() {
            return Err(ApplicationError::not_found(format!("field configuration {}", id.0)));
        }

        let mut update = FieldConfigurationUpdate::new(id);
        if let Some(name) = command.display_name {
            update = update.with_display_name(name);
        }
        for (view, flag) in [
            (ViewType::List, command.enable_in_list),
            (ViewType::Detail, command.enable_in_detail),
            (ViewType::Form, command.enable_in_form),
            (ViewType::Report, command.enable_in_report),
        ] {
            if let Some(enabled) = flag {
                update = update.with_flag(view, enabled);
            }
        }
        if let Some(inherit) = command.inherit_permissions {
            update = update.with_inherit_permissions(inherit);
        }
        if let Some(dto) = command.read_permission {
            update = update.with_read_permission(grants(dto)?);
        }
        if let Some(dto) = command.write_permission {
            update = update.with_write_permission(grants(dto)?);
        }

        let field = self.write_repo.update_field(update).await?;
        info!(field_id = field.id.0, field = %field.field_name, "field configuration updated");
        Ok(field.into())
    }

    pub async fn update_model_configuration(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        command: UpdateModelConfigurationCommand,
    ) -> ApplicationResult<ModelConfigurationDto> {
        Self::ensure_superuser(actor)?;
        let id = ModelConfigId(id);
        let current = self
            .read_repo
            .find_model_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("model configuration {}", id.0)))?;

        let mut update = ModelConfigurationUpdate::new(id);
        if let Some(navigation) = command.navigation {
            update = update.with_navigation(navigation);
        }
        if let Some(enable) = command.enable_search {
            update = update.with_enable_search(enable);
        }
        if let Some(title) = command.list_title {
            let title = title.trim();
            if title.is_empty() {
                return Err(ApplicationError::validation("list title cannot be empty"));
            }
            update = update.with_list_title(title);
        }
        if let Some(sort) = command.default_sort_by {
            self.ensure_sortable(&current, &sort)?;
            update = update.with_default_sort_by(sort);
        }
        if let Some(enabled) = command.enable_list_report {
            update = update.with_list_report(enabled);
        }
        if let Some(enabled) = command.enable_detail_report {
            update = update.with_detail_report(enabled);
        }
        if let Some(dto) = command.read_permission {
            update = update.with_read_permission(grants(dto)?);
        }
        if let Some(dto) = command.write_permission {
            update = update.with_write_permission(grants(dto)?);
        }

        let model = self.write_repo.update_model(update).await?;
        info!(model_id = model.id.0, model = %model.model_name, "model configuration updated");
        Ok(model.into())
    }

    /// Default ordering must name a declared field of the model.
    fn ensure_sortable(&self, model: &ModelConfiguration, sort: &str) -> ApplicationResult<()> {
        let field = sort.strip_prefix('-').unwrap_or(sort);
        let declared = self
            .registry
            .get(&model.app_name, &model.model_name)
            .is_some_and(|entity| entity.fields().iter().any(|f| f.name == field));
        if declared {
            Ok(())
        } else {
            Err(ApplicationError::validation(format!(
                "cannot sort {} by unknown field '{field}'",
                model.model_name
            )))
        }
    }
}
