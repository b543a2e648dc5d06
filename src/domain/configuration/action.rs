use crate::domain::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelActionId(pub i64);

impl From<ModelActionId> for i64 {
    fn from(value: ModelActionId) -> Self {
        value.0
    }
}

/// How an action is presented on a list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Dropdown,
    Button,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Dropdown => "dropdown",
            ActionType::Button => "button",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dropdown" => Ok(ActionType::Dropdown),
            "button" => Ok(ActionType::Button),
            other => Err(DomainError::Validation(format!("unknown action type '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAction {
    pub id: ModelActionId,
    pub list_name: String,
    pub detail_name: String,
    pub pattern: String,
    pub action_type: ActionType,
    pub enable_in_list: bool,
    pub enable_in_detail: bool,
    pub include_pk: bool,
}

#[derive(Debug, Clone)]
pub struct NewModelAction {
    pub list_name: String,
    pub detail_name: String,
    pub pattern: String,
    pub action_type: ActionType,
    pub enable_in_list: bool,
    pub enable_in_detail: bool,
    pub include_pk: bool,
}

impl NewModelAction {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>, action_type: ActionType) -> Self {
        let name = name.into();
        let pattern = pattern.into();
        Self {
            detail_name: name.clone(),
            list_name: name,
            include_pk: pattern != "create",
            pattern,
            action_type,
            enable_in_list: true,
            enable_in_detail: true,
        }
    }

    /// Create/Details/Edit/Delete, seeded for every synced model.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("Create", "create", ActionType::Button),
            Self::new("Details", "detail", ActionType::Dropdown),
            Self::new("Edit", "update", ActionType::Dropdown),
            Self::new("Delete", "delete", ActionType::Dropdown),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionLink {
    pub name: String,
    pub pattern: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailActionLink {
    pub name: String,
    pub pattern: String,
    pub include_pk: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListActions {
    pub dropdown: Vec<ActionLink>,
    pub button: Vec<ActionLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResolvedActions {
    List(ListActions),
    Detail(Vec<DetailActionLink>),
}

impl ResolvedActions {
    /// Partition list-enabled actions by presentation style, keeping link order.
    pub fn for_list<'a>(actions: impl IntoIterator<Item = &'a ModelAction>) -> Self {
        let mut buckets = ListActions::default();
        for action in actions.into_iter().filter(|a| a.enable_in_list) {
            let link = ActionLink {
                name: action.list_name.clone(),
                pattern: action.pattern.clone(),
            };
            match action.action_type {
                ActionType::Dropdown => buckets.dropdown.push(link),
                ActionType::Button => buckets.button.push(link),
            }
        }
        ResolvedActions::List(buckets)
    }

    pub fn for_detail<'a>(actions: impl IntoIterator<Item = &'a ModelAction>) -> Self {
        ResolvedActions::Detail(
            actions
                .into_iter()
                .filter(|a| a.enable_in_detail)
                .map(|a| DetailActionLink {
                    name: a.detail_name.clone(),
                    pattern: a.pattern.clone(),
                    include_pk: a.include_pk,
                })
                .collect(),
        )
    }
}
