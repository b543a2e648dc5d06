use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppConfigId(pub i64);

impl From<AppConfigId> for i64 {
    fn from(value: AppConfigId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfiguration {
    pub id: AppConfigId,
    pub name: String,
    pub description: String,
    pub navigation: bool,
}

#[derive(Debug, Clone)]
pub struct NewAppConfiguration {
    pub name: String,
    pub description: String,
    pub navigation: bool,
}

impl NewAppConfiguration {
    pub fn with_defaults(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            navigation: true,
        }
    }
}
