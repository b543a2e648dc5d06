use crate::domain::configuration::action::ModelAction;
use crate::domain::configuration::app::AppConfigId;
use crate::domain::configuration::field::FieldConfiguration;
use crate::domain::configuration::grants::PermissionGrants;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelConfigId(pub i64);

impl From<ModelConfigId> for i64 {
    fn from(value: ModelConfigId) -> Self {
        value.0
    }
}

/// Aggregate for one configured model: its own flags plus the ordered field
/// configurations and linked actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfiguration {
    pub id: ModelConfigId,
    pub app_id: AppConfigId,
    pub app_name: String,
    pub model_name: String,
    pub enable_search: bool,
    pub list_title: String,
    pub default_sort_by: String,
    pub navigation: bool,
    pub list_url: String,
    pub enable_list_report: bool,
    pub enable_detail_report: bool,
    pub read_permission: PermissionGrants,
    pub write_permission: PermissionGrants,
    pub fields: Vec<FieldConfiguration>,
    pub actions: Vec<ModelAction>,
}

impl ModelConfiguration {
    pub fn field(&self, name: &str) -> Option<&FieldConfiguration> {
        self.fields.iter().find(|f| f.field_name == name)
    }
}

#[derive(Debug, Clone)]
pub struct NewModelConfiguration {
    pub app_id: AppConfigId,
    pub model_name: String,
    pub enable_search: bool,
    pub list_title: String,
    pub default_sort_by: String,
    pub navigation: bool,
    pub list_url: String,
    pub enable_list_report: bool,
    pub enable_detail_report: bool,
}

impl NewModelConfiguration {
    pub fn with_defaults(
        app_id: AppConfigId,
        model_name: impl Into<String>,
        list_url: impl Into<String>,
    ) -> Self {
        let model_name = model_name.into();
        Self {
            app_id,
            list_title: format!("{model_name} List"),
            model_name,
            enable_search: true,
            default_sort_by: "id".into(),
            navigation: true,
            list_url: list_url.into(),
            enable_list_report: true,
            enable_detail_report: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ModelConfigurationUpdate {
    pub id: ModelConfigId,
    pub enable_search: Option<bool>,
    pub list_title: Option<String>,
    pub default_sort_by: Option<String>,
    pub navigation: Option<bool>,
    pub enable_list_report: Option<bool>,
    pub enable_detail_report: Option<bool>,
    pub read_permission: Option<PermissionGrants>,
    pub write_permission: Option<PermissionGrants>,
}

impl ModelConfigurationUpdate {
    pub fn new(id: ModelConfigId) -> Self {
        Self {
            id,
            enable_search: None,
            list_title: None,
            default_sort_by: None,
            navigation: None,
            enable_list_report: None,
            enable_detail_report: None,
            read_permission: None,
            write_permission: None,
        }
    }

    pub fn with_list_title(mut self, title: impl Into<String>) -> Self {
        self.list_title = Some(title.into());
        self
    }

    /// `field` or `-field` for descending order.
    pub fn with_default_sort_by(mut self, sort: impl Into<String>) -> Self {
        self.default_sort_by = Some(sort.into());
        self
    }

    pub fn with_list_report(mut self, enabled: bool) -> Self {
        self.enable_list_report = Some(enabled);
        self
    }

    pub fn with_detail_report(mut self, enabled: bool) -> Self {
        self.enable_detail_report = Some(enabled);
        self
    }

    pub fn with_navigation(mut self, navigation: bool) -> Self {
        self.navigation = Some(navigation);
        self
    }

    pub fn with_enable_search(mut self, enable: bool) -> Self {
        self.enable_search = Some(enable);
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

    pub fn apply_to(&self, model: &mut ModelConfiguration) {
        if let Some(v) = self.enable_search {
            model.enable_search = v;
        }
        if let Some(v) = &self.list_title {
            model.list_title = v.clone();
        }
        if let Some(v) = &self.default_sort_by {
            model.default_sort_by = v.clone();
        }
        if let Some(v) = self.navigation {
            model.navigation = v;
        }
        if let Some(v) = self.enable_list_report {
            model.enable_list_report = v;
        }
        if let Some(v) = self.enable_detail_report {
            model.enable_detail_report = v;
        }
        if let Some(grants) = &self.read_permission {
            model.read_permission = grants.clone();
        }
        if let Some(grants) = &self.write_permission {
            model.write_permission = grants.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::configuration::permissions::fixtures;

    #[test]
    fn updates_only_touch_the_fields_they_set() {
        let mut model = fixtures::model("Part");
        let update = ModelConfigurationUpdate::new(model.id)
            .with_list_title("Stock on hand")
            .with_default_sort_by("-name")
            .with_detail_report(false);
        assert_eq!(update.id, ModelConfigId(1));

        update.apply_to(&mut model);
        assert_eq!(model.list_title, "Stock on hand");
        assert_eq!(model.default_sort_by, "-name");
        assert!(!model.enable_detail_report);
        assert!(model.enable_list_report);
        assert!(model.navigation);
    }
}
