use super::coerce::{coerce, is_blank};
use super::errors::FormErrors;
use crate::domain::configuration::ModelConfiguration;
use crate::domain::entity::{ConfigurableEntity, FieldKind};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub choices: Vec<String>,
    pub related_model: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindMode {
    /// Required fields must be present.
    Create,
    /// Only submitted fields are validated.
    Update,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicForm {
    pub app: String,
    pub model: String,
    pub fields: Vec<FormField>,
}

impl DynamicForm {
    /// Build a form over `names`, which must already be the resolved form fields.
    pub fn from_resolved(
        entity: &dyn ConfigurableEntity,
        config: &ModelConfiguration,
        names: &[String],
    ) -> Self {
        let descriptors = entity.fields();
        let fields = names
            .iter()
            .filter_map(|name| descriptors.iter().find(|d| &d.name == name))
            .map(|d| FormField {
                name: d.name.clone(),
                label: config
                    .field(&d.name)
                    .map(|f| f.label().to_string())
                    .unwrap_or_else(|| d.verbose_name.clone()),
                kind: d.kind,
                required: d.required,
                choices: d.choices.clone(),
                related_model: d.related_model.clone(),
            })
            .collect();
        Self {
            app: entity.app_label().to_string(),
            model: entity.model_name().to_string(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    pub fn without_field(mut self, name: &str) -> Self {
        self.fields.retain(|f| f.name != name);
        self
    }

    /// Validate `payload` against the form. Keys the form does not carry are
    /// errors, so a caller can never set a field it may not write.
    pub fn bind(&self, payload: &Map<String, Value>, mode: BindMode) -> Result<Map<String, Value>, FormErrors> {
        let mut errors = FormErrors::default();
        let mut cleaned = Map::new();

        for key in payload.keys() {
            if self.field(key).is_none() {
                errors.add(key.clone(), "This field cannot be set.");
            }
        }

        for field in &self.fields {
            match payload.get(&field.name) {
                Some(value) if is_blank(value) => {
                    if field.required {
                        errors.add(field.name.clone(), "This field is required.");
                    } else if field.kind == FieldKind::Boolean {
                        cleaned.insert(field.name.clone(), Value::Bool(false));
                    } else {
                        cleaned.insert(field.name.clone(), Value::Null);
                    }
                }
                Some(value) => match coerce(field.kind, &field.choices, value) {
                    Ok(v) => {
                        cleaned.insert(field.name.clone(), v);
                    }
                    Err(message) => errors.add(field.name.clone(), message),
                },
                None => {
                    if mode == BindMode::Create && field.required {
                        errors.add(field.name.clone(), "This field is required.");
                    }
                }
            }
        }

        errors.into_result(cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::configuration::permissions::fixtures::model;
    use crate::domain::entity::{EntityDefinition, FieldDescriptor};
    use serde_json::json;

    fn part_form() -> DynamicForm {
        let entity = EntityDefinition::new("inventory", "Part")
            .with_field(FieldDescriptor::text("name").required())
            .with_field(FieldDescriptor::integer("stock_quantity"))
            .with_field(FieldDescriptor::boolean("active"))
            .with_field(FieldDescriptor::decimal("price"));
        let names = vec!["name".to_string(), "stock_quantity".into(), "active".into()];
        DynamicForm::from_resolved(&entity, &model("Part"), &names)
    }

    fn payload(value: serde_json::Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn forbidden_field_in_payload_is_rejected() {
        let form = part_form();
        let errors = form
            .bind(&payload(json!({"name": "bolt", "price": 3})), BindMode::Create)
            .unwrap_err();
        assert!(errors.contains("price"));
        assert!(!errors.contains("name"));
    }

    #[test]
    fn create_requires_required_fields_update_does_not() {
        let form = part_form();
        let input = payload(json!({"stock_quantity": "4"}));
        assert!(form.bind(&input, BindMode::Create).unwrap_err().contains("name"));
        let cleaned = form.bind(&input, BindMode::Update).unwrap();
        assert_eq!(cleaned, payload(json!({"stock_quantity": 4})));
    }

    #[test]
    fn blank_checkbox_means_false() {
        let form = part_form();
        let cleaned = form
            .bind(&payload(json!({"name": "nut", "active": ""})), BindMode::Create)
            .unwrap();
        assert_eq!(cleaned["active"], json!(false));
    }

    #[test]
    fn labels_fall_back_to_verbose_names() {
        let form = part_form();
        assert_eq!(form.field("stock_quantity").map(|f| f.label.as_str()), Some("stock quantity"));
        assert_eq!(form.field_names(), ["name", "stock_quantity", "active"]);
    }
}
