use crate::application::forms::{DynamicForm, InlineFormset};
use crate::domain::configuration::ResolvedActions;
use crate::domain::entity::FieldKind;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

/// One resolved column: a configured field or a computed property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldView {
    pub name: String,
    pub label: String,
    #[schema(value_type = Option<String>)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FieldKind>,
    pub computed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActionLinkDto {
    pub name: String,
    pub pattern: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DetailActionLinkDto {
    pub name: String,
    pub pattern: String,
    pub include_pk: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ActionsDto {
    List {
        dropdown: Vec<ActionLinkDto>,
        button: Vec<ActionLinkDto>,
    },
    Detail(Vec<DetailActionLinkDto>),
}

impl From<ResolvedActions> for ActionsDto {
    fn from(actions: ResolvedActions) -> Self {
        match actions {
            ResolvedActions::List(buckets) => {
                let convert = |links: Vec<crate::domain::configuration::ActionLink>| {
                    links
                        .into_iter()
                        .map(|l| ActionLinkDto {
                            name: l.name,
                            pattern: l.pattern,
                        })
                        .collect()
                };
                ActionsDto::List {
                    dropdown: convert(buckets.dropdown),
                    button: convert(buckets.button),
                }
            }
            ResolvedActions::Detail(links) => ActionsDto::Detail(
                links
                    .into_iter()
                    .map(|l| DetailActionLinkDto {
                        name: l.name,
                        pattern: l.pattern,
                        include_pk: l.include_pk,
                    })
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NavigationModel {
    pub name: String,
    pub plural: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NavigationApp {
    pub name: String,
    pub models: Vec<NavigationModel>,
}

/// App label -> navigable models, in app registration order.
/// Serialized as a JSON object keyed by label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationIndex {
    apps: Vec<(String, NavigationApp)>,
}

impl NavigationIndex {
    pub fn push(&mut self, label: impl Into<String>, app: NavigationApp) {
        self.apps.push((label.into(), app));
    }

    pub fn get(&self, label: &str) -> Option<&NavigationApp> {
        self.apps.iter().find(|(l, _)| l == label).map(|(_, app)| app)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.apps.iter().map(|(l, _)| l.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }
}

impl Serialize for NavigationIndex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.apps.len()))?;
        for (label, app) in &self.apps {
            map.serialize_entry(label, app)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FormFieldDto {
    pub name: String,
    pub label: String,
    pub kind: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FormSchemaDto {
    pub app: String,
    pub model: String,
    pub fields: Vec<FormFieldDto>,
}

impl From<&DynamicForm> for FormSchemaDto {
    fn from(form: &DynamicForm) -> Self {
        Self {
            app: form.app.clone(),
            model: form.model.clone(),
            fields: form
                .fields
                .iter()
                .map(|f| FormFieldDto {
                    name: f.name.clone(),
                    label: f.label.clone(),
                    kind: f.kind.to_string(),
                    required: f.required,
                    choices: f.choices.clone(),
                    related_model: f.related_model.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FormsetSchemaDto {
    pub parent: String,
    pub child: String,
    pub fk_name: String,
    pub extra: usize,
    pub can_delete: bool,
    pub form: FormSchemaDto,
}

impl From<&InlineFormset> for FormsetSchemaDto {
    fn from(formset: &InlineFormset) -> Self {
        Self {
            parent: formset.parent_model.clone(),
            child: formset.child_model.clone(),
            fk_name: formset.fk_name.clone(),
            extra: formset.extra,
            can_delete: formset.can_delete,
            form: FormSchemaDto::from(&formset.form),
        }
    }
}
