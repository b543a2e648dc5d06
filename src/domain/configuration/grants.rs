use crate::domain::user::{GroupId, Principal, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Read,
    Write,
}

impl Access {
    pub fn as_str(&self) -> &'static str {
        match self {
            Access::Read => "read",
            Access::Write => "write",
        }
    }
}

/// Users and groups explicitly granted one kind of access.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrants {
    pub users: BTreeSet<UserId>,
    pub groups: BTreeSet<GroupId>,
}

impl PermissionGrants {
    pub fn new(
        users: impl IntoIterator<Item = UserId>,
        groups: impl IntoIterator<Item = GroupId>,
    ) -> Self {
        Self {
            users: users.into_iter().collect(),
            groups: groups.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.groups.is_empty()
    }

    /// Explicit grant only; superuser handling lives in the evaluator.
    pub fn admits(&self, principal: &Principal) -> bool {
        self.users.contains(&principal.id) || self.groups.iter().any(|g| principal.in_group(*g))
    }
}
