use crate::domain::configuration::grants::Access;
use crate::domain::configuration::model::ModelConfiguration;
use crate::domain::configuration::permissions::can_access_field;
use crate::domain::configuration::view_type::ViewType;
use crate::domain::entity::ConfigurableEntity;
use crate::domain::user::Principal;

/// Property names that are never surfaced as computed columns.
pub const RESERVED_PROPERTIES: [&str; 2] = ["pk", "get_config"];

/// Soft-delete marker, stripped from every resolution.
pub const SOFT_DELETE_FIELD: &str = "is_deleted";

/// Resolve the field names `principal` may see for `view`.
///
/// Configured fields come first in stored position order; a field is kept when
/// it exists on the entity, is not auto-created or a one-to-one/many-to-many
/// relation, is enabled for the view and passes the field permission check
/// (write access for forms, read access otherwise). For non-form views with
/// `include_computed`, the entity's computed properties follow in declaration
/// order. The soft-delete marker is never returned.
pub fn resolve_enabled_fields(
    entity: &dyn ConfigurableEntity,
    config: &ModelConfiguration,
    principal: &Principal,
    view: ViewType,
    include_computed: bool,
) -> Vec<String> {
    let descriptors = entity.fields();
    let access = if view.is_write() {
        Access::Write
    } else {
        Access::Read
    };

    let mut configured: Vec<_> = config.fields.iter().collect();
    configured.sort_by_key(|f| f.position);

    let mut enabled: Vec<String> = configured
        .into_iter()
        .filter(|field| {
            descriptors
                .iter()
                .find(|d| d.name == field.field_name)
                .is_some_and(|d| d.is_configurable())
        })
        .filter(|field| field.enabled_for(view))
        .filter(|field| can_access_field(principal, field, config, access))
        .map(|field| field.field_name.clone())
        .collect();

    if !view.is_write() && include_computed {
        enabled.extend(
            entity
                .computed_properties()
                .into_iter()
                .filter(|p| !RESERVED_PROPERTIES.contains(&p.as_str())),
        );
    }

    enabled.retain(|name| name != SOFT_DELETE_FIELD);
    enabled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::configuration::permissions::fixtures::{field, model};
    use crate::domain::configuration::PermissionGrants;
    use crate::domain::entity::{EntityDefinition, FieldDescriptor};
    use crate::domain::user::{GroupId, UserId};
    use serde_json::json;

    fn widget() -> EntityDefinition {
        EntityDefinition::new("inventory", "Widget")
            .with_field(FieldDescriptor::text("name"))
            .with_field(FieldDescriptor::decimal("price"))
            .with_field(FieldDescriptor::text("secret"))
    }

    fn widget_config() -> ModelConfiguration {
        let mut m = model("Widget");
        let mut name = field(1, "name");
        name.inherit_permissions = false;
        name.read_permission = PermissionGrants::new([], [GroupId(1)]);
        let mut price = field(2, "price");
        price.enable_in_list = false;
        let mut secret = field(3, "secret");
        secret.inherit_permissions = false;
        m.fields = vec![name, price, secret];
        m
    }

    #[test]
    fn widget_list_scenario() {
        let principal = Principal::new(UserId(2), false, [GroupId(1)]);
        let fields = resolve_enabled_fields(
            &widget(),
            &widget_config(),
            &principal,
            ViewType::List,
            true,
        );
        assert_eq!(fields, ["name"]);
    }

    #[test]
    fn computed_properties_follow_configured_fields() {
        let entity = widget().with_computed("total_value", |_| Some(json!(0)));
        let admin = Principal::new(UserId(1), true, []);
        let fields = resolve_enabled_fields(&entity, &widget_config(), &admin, ViewType::List, true);
        assert_eq!(fields, ["name", "secret", "total_value"]);
        let without =
            resolve_enabled_fields(&entity, &widget_config(), &admin, ViewType::List, false);
        assert_eq!(without, ["name", "secret"]);
    }

    #[test]
    fn soft_delete_marker_is_never_returned() {
        let admin = Principal::new(UserId(1), true, []);
        let mut config = widget_config();
        let mut marker = field(9, "is_deleted");
        marker.enable_in_form = true;
        config.fields.push(marker);
        for view in [ViewType::List, ViewType::Detail, ViewType::Form, ViewType::Report] {
            let fields = resolve_enabled_fields(&widget(), &config, &admin, view, true);
            assert!(!fields.iter().any(|f| f == "is_deleted"), "{view}: {fields:?}");
        }
    }

    #[test]
    fn forms_never_include_computed_properties() {
        let admin = Principal::new(UserId(1), true, []);
        let entity = widget().with_computed("total_value", |_| Some(json!(0)));
        let fields = resolve_enabled_fields(&entity, &widget_config(), &admin, ViewType::Form, true);
        assert_eq!(fields, ["name", "price", "secret"]);
    }

    #[test]
    fn unknown_and_auto_created_fields_are_skipped() {
        let admin = Principal::new(UserId(1), true, []);
        let mut config = widget_config();
        config.fields.push(field(10, "id"));
        config.fields.push(field(11, "vanished"));
        let fields =
            resolve_enabled_fields(&widget(), &config, &admin, ViewType::Detail, false);
        assert_eq!(fields, ["name", "price", "secret"]);
    }

    #[test]
    fn reserved_properties_are_filtered() {
        let entity = widget()
            .with_computed("total_value", |_| Some(json!(0)))
            .with_computed("pk", |_| None)
            .with_computed("get_config", |_| None);
        let admin = Principal::new(UserId(1), true, []);
        let fields = resolve_enabled_fields(&entity, &widget_config(), &admin, ViewType::List, true);
        assert_eq!(fields.last().map(String::as_str), Some("total_value"));
    }

    #[test]
    fn resolution_is_idempotent() {
        let principal = Principal::new(UserId(2), false, [GroupId(1)]);
        let config = widget_config();
        let first = resolve_enabled_fields(&widget(), &config, &principal, ViewType::Detail, true);
        let second = resolve_enabled_fields(&widget(), &config, &principal, ViewType::Detail, true);
        assert_eq!(first, second);
    }
}
