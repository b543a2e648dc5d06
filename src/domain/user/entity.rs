// src/domain/user/entity.rs
use crate::domain::user::value_objects::{GroupId, PasswordHash, Principal, UserId, Username};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: PasswordHash,
    pub is_superuser: bool,
    pub is_active: bool,
    pub groups: HashSet<GroupId>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn principal(&self) -> Principal {
        Principal::new(self.id, self.is_superuser, self.groups.iter().copied())
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: PasswordHash,
    pub is_superuser: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(
        username: Username,
        password_hash: PasswordHash,
        is_superuser: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            username,
            password_hash,
            is_superuser,
            is_active: true,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
}
