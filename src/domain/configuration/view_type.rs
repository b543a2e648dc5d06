use crate::domain::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Selects which enable flag on a field configuration applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    #[default]
    List,
    Detail,
    Form,
    Report,
}

impl ViewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewType::List => "list",
            ViewType::Detail => "detail",
            ViewType::Form => "form",
            ViewType::Report => "report",
        }
    }

    /// Form views check write access, every other view checks read access.
    pub fn is_write(&self) -> bool {
        matches!(self, ViewType::Form)
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list" => Ok(ViewType::List),
            "detail" => Ok(ViewType::Detail),
            "form" => Ok(ViewType::Form),
            "report" => Ok(ViewType::Report),
            other => Err(DomainError::Validation(format!("unknown view type '{other}'"))),
        }
    }
}

/// Views that carry an action bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionView {
    #[default]
    List,
    Detail,
}

impl FromStr for ActionView {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list" => Ok(ActionView::List),
            "detail" => Ok(ActionView::Detail),
            other => Err(DomainError::Validation(format!(
                "actions are only available for list and detail views, got '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_view_types() {
        assert_eq!("form".parse::<ViewType>().unwrap(), ViewType::Form);
        assert_eq!("report".parse::<ViewType>().unwrap(), ViewType::Report);
        assert!("grid".parse::<ViewType>().is_err());
    }

    #[test]
    fn only_form_is_a_write_view() {
        assert!(ViewType::Form.is_write());
        assert!(!ViewType::Detail.is_write());
        assert!(!ViewType::Report.is_write());
    }

    #[test]
    fn action_view_rejects_form() {
        assert!("form".parse::<ActionView>().is_err());
        assert_eq!("detail".parse::<ActionView>().unwrap(), ActionView::Detail);
    }
}
