use crate::domain::configuration::grants::PermissionGrants;
use crate::domain::configuration::model::ModelConfigId;
use crate::domain::configuration::view_type::ViewType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldConfigId(pub i64);

impl From<FieldConfigId> for i64 {
    fn from(value: FieldConfigId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConfiguration {
    pub id: FieldConfigId,
    pub model_id: ModelConfigId,
    pub field_name: String,
    pub display_name: String,
    pub enable_in_list: bool,
    pub enable_in_detail: bool,
    pub enable_in_form: bool,
    pub enable_in_report: bool,
    pub inherit_permissions: bool,
    pub read_permission: PermissionGrants,
    pub write_permission: PermissionGrants,
    pub position: i64,
}

impl FieldConfiguration {
    pub fn enabled_for(&self, view: ViewType) -> bool {
        match view {
            ViewType::List => self.enable_in_list,
            ViewType::Detail => self.enable_in_detail,
            ViewType::Form => self.enable_in_form,
            ViewType::Report => self.enable_in_report,
        }
    }

    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.field_name
        } else {
            &self.display_name
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewFieldConfiguration {
    pub model_id: ModelConfigId,
    pub field_name: String,
    pub display_name: String,
    pub enable_in_list: bool,
    pub enable_in_detail: bool,
    pub enable_in_form: bool,
    pub enable_in_report: bool,
    pub inherit_permissions: bool,
    pub position: i64,
}

/// Field names that are maintained by the record store and never edited through forms.
pub const SYSTEM_MANAGED_FIELDS: [&str; 3] = ["created_at", "updated_at", "is_deleted"];

impl NewFieldConfiguration {
    pub fn with_defaults(
        model_id: ModelConfigId,
        field_name: impl Into<String>,
        display_name: impl Into<String>,
        position: i64,
    ) -> Self {
        let field_name = field_name.into();
        let enable_in_form = !SYSTEM_MANAGED_FIELDS.contains(&field_name.as_str());
        Self {
            model_id,
            field_name,
            display_name: display_name.into(),
            enable_in_list: true,
            enable_in_detail: true,
            enable_in_form,
            enable_in_report: true,
            inherit_permissions: true,
            position,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldConfigurationUpdate {
    pub id: FieldConfigId,
    pub display_name: Option<String>,
    pub enable_in_list: Option<bool>,
    pub enable_in_detail: Option<bool>,
    pub enable_in_form: Option<bool>,
    pub enable_in_report: Option<bool>,
    pub inherit_permissions: Option<bool>,
    pub read_permission: Option<PermissionGrants>,
    pub write_permission: Option<PermissionGrants>,
}

impl FieldConfigurationUpdate {
    pub fn new(id: FieldConfigId) -> Self {
        Self {
            id,
            display_name: None,
            enable_in_list: None,
            enable_in_detail: None,
            enable_in_form: None,
            enable_in_report: None,
            inherit_permissions: None,
            read_permission: None,
            write_permission: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_flag(mut self, view: ViewType, enabled: bool) -> Self {
        match view {
            ViewType::List => self.enable_in_list = Some(enabled),
            ViewType::Detail => self.enable_in_detail = Some(enabled),
            ViewType::Form => self.enable_in_form = Some(enabled),
            ViewType::Report => self.enable_in_report = Some(enabled),
        }
        self
    }

    pub fn with_inherit_permissions(mut self, inherit: bool) -> Self {
        self.inherit_permissions = Some(inherit);
        self
    }

    pub fn with_read_permission(mut self, grants: PermissionGrants) -> Self {
        self.read_permission = Some(grants);
        self
    }

    pub fn with_write_permission(mut self, grants: PermissionGrants) -> Self {
        self.write_permission = Some(grants);
        self
    }

    /// Apply the update to an in-memory configuration.
    pub fn apply_to(&self, field: &mut FieldConfiguration) {
        if let Some(name) = &self.display_name {
            field.display_name = name.clone();
        }
        if let Some(v) = self.enable_in_list {
            field.enable_in_list = v;
        }
        if let Some(v) = self.enable_in_detail {
            field.enable_in_detail = v;
        }
        if let Some(v) = self.enable_in_form {
            field.enable_in_form = v;
        }
        if let Some(v) = self.enable_in_report {
            field.enable_in_report = v;
        }
        if let Some(v) = self.inherit_permissions {
            field.inherit_permissions = v;
        }
        if let Some(grants) = &self.read_permission {
            field.read_permission = grants.clone();
        }
        if let Some(grants) = &self.write_permission {
            field.write_permission = grants.clone();
        }
    }
}
