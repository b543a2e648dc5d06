use crate::domain::entity::descriptor::{FieldDescriptor, humanize};
use serde_json::{Map, Value};
use std::{fmt, sync::Arc};

/// Capability a registered model exposes so configuration can be resolved against it.
pub trait ConfigurableEntity: Send + Sync {
    fn app_label(&self) -> &str;

    fn model_name(&self) -> &str;

    fn verbose_name(&self) -> String {
        humanize(self.model_name())
    }

    fn verbose_name_plural(&self) -> String {
        format!("{}s", self.verbose_name())
    }

    /// Fields declared by the entity itself, without the base fields.
    fn declared_fields(&self) -> Vec<FieldDescriptor>;

    /// Base fields first, then declared fields in declaration order.
    fn fields(&self) -> Vec<FieldDescriptor> {
        let mut fields = FieldDescriptor::base_fields();
        fields.extend(self.declared_fields());
        fields
    }

    fn field(&self, name: &str) -> Option<FieldDescriptor> {
        self.fields().into_iter().find(|f| f.name == name)
    }

    fn computed_properties(&self) -> Vec<String> {
        Vec::new()
    }

    fn compute(&self, _property: &str, _values: &Map<String, Value>) -> Option<Value> {
        None
    }

    /// Model names of entities editable inline under this one.
    fn children(&self) -> Vec<String> {
        Vec::new()
    }

    /// Read-only entities are written by the service itself, never through forms.
    fn read_only(&self) -> bool {
        false
    }
}

pub type ComputeFn = Arc<dyn Fn(&Map<String, Value>) -> Option<Value> + Send + Sync>;

/// Table-driven entity description used to register models without a dedicated type.
#[derive(Clone)]
pub struct EntityDefinition {
    app_label: String,
    model_name: String,
    verbose_name: Option<String>,
    verbose_name_plural: Option<String>,
    fields: Vec<FieldDescriptor>,
    computed: Vec<(String, ComputeFn)>,
    children: Vec<String>,
    read_only: bool,
}

impl fmt::Debug for EntityDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityDefinition")
            .field("app_label", &self.app_label)
            .field("model_name", &self.model_name)
            .field("fields", &self.fields)
            .field(
                "computed",
                &self.computed.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .field("children", &self.children)
            .field("read_only", &self.read_only)
            .finish()
    }
}

impl EntityDefinition {
    pub fn new(app_label: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            app_label: app_label.into(),
            model_name: model_name.into(),
            verbose_name: None,
            verbose_name_plural: None,
            fields: Vec::new(),
            computed: Vec::new(),
            children: Vec::new(),
            read_only: false,
        }
    }

    pub fn with_verbose_name(mut self, singular: impl Into<String>, plural: impl Into<String>) -> Self {
        self.verbose_name = Some(singular.into());
        self.verbose_name_plural = Some(plural.into());
        self
    }

    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_computed<F>(mut self, name: impl Into<String>, compute: F) -> Self
    where
        F: Fn(&Map<String, Value>) -> Option<Value> + Send + Sync + 'static,
    {
        self.computed.push((name.into(), Arc::new(compute)));
        self
    }

    pub fn with_child(mut self, model_name: impl Into<String>) -> Self {
        self.children.push(model_name.into());
        self
    }

    pub fn into_read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
}

impl ConfigurableEntity for EntityDefinition {
    fn app_label(&self) -> &str {
        &self.app_label
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn verbose_name(&self) -> String {
        self.verbose_name
            .clone()
            .unwrap_or_else(|| humanize(&self.model_name))
    }

    fn verbose_name_plural(&self) -> String {
        self.verbose_name_plural
            .clone()
            .unwrap_or_else(|| format!("{}s", self.verbose_name()))
    }

    fn declared_fields(&self) -> Vec<FieldDescriptor> {
        self.fields.clone()
    }

    fn computed_properties(&self) -> Vec<String> {
        self.computed.iter().map(|(name, _)| name.clone()).collect()
    }

    fn compute(&self, property: &str, values: &Map<String, Value>) -> Option<Value> {
        self.computed
            .iter()
            .find(|(name, _)| name == property)
            .and_then(|(_, f)| f(values))
    }

    fn children(&self) -> Vec<String> {
        self.children.clone()
    }

    fn read_only(&self) -> bool {
        self.read_only
    }
}
