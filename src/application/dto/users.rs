use crate::domain::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{auth::AuthenticatedUser, serde_time};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub is_superuser: bool,
    pub is_active: bool,
    pub groups: Vec<i64>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        let mut groups: Vec<i64> = user.groups.iter().map(|g| i64::from(*g)).collect();
        groups.sort_unstable();
        Self {
            id: user.id.into(),
            username: user.username.to_string(),
            is_superuser: user.is_superuser,
            is_active: user.is_active,
            groups,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileDto {
    pub user: UserDto,
    #[serde(with = "serde_time")]
    pub expires_at: DateTime<Utc>,
    pub expires_in: i64,
}

impl ProfileDto {
    pub fn from_parts(user: User, auth: &AuthenticatedUser, now: DateTime<Utc>) -> Self {
        let expires_in = auth.expires_at.signed_duration_since(now).num_seconds().max(0);
        Self {
            user: user.into(),
            expires_at: auth.expires_at,
            expires_in,
        }
    }
}
