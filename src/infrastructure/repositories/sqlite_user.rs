use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::{
    Group, GroupId, NewUser, PasswordHash, User, UserId, UserRepository, Username,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

const USER_COLUMNS: &str = "id, username, password_hash, is_superuser, is_active, created_at";

#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn load_groups(&self, user_id: i64) -> DomainResult<Vec<GroupId>> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT group_id FROM user_groups WHERE user_id = ? ORDER BY group_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        ids.into_iter().map(GroupId::new).collect()
    }

    async fn hydrate(&self, row: Option<UserRow>) -> DomainResult<Option<User>> {
        let Some(row) = row else {
            return Ok(None);
        };
        let groups = self.load_groups(row.id).await?;
        let mut user = User::try_from(row)?;
        user.groups = groups.into_iter().collect();
        Ok(Some(user))
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    is_superuser: bool,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::new(row.id)?,
            username: Username::new(row.username)?,
            password_hash: PasswordHash::new(row.password_hash)?,
            is_superuser: row.is_superuser,
            is_active: row.is_active,
            groups: Default::default(),
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct GroupRow {
    id: i64,
    name: String,
}

impl TryFrom<GroupRow> for Group {
    type Error = DomainError;

    fn try_from(row: GroupRow) -> Result<Self, Self::Error> {
        Ok(Group {
            id: GroupId::new(row.id)?,
            name: row.name,
        })
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn count(&self) -> DomainResult<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        u64::try_from(count)
            .map_err(|_| DomainError::Persistence(format!("invalid user count {count}")))
    }

    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let NewUser {
            username,
            password_hash,
            is_superuser,
            is_active,
            created_at,
        } = new_user;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (username, password_hash, is_superuser, is_active, created_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(username.as_str())
        .bind(password_hash.as_str())
        .bind(is_superuser)
        .bind(is_active)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        User::try_from(row)
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        self.hydrate(row).await
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        self.hydrate(row).await
    }

    async fn find_or_create_group(&self, name: &str) -> DomainResult<Group> {
        sqlx::query("INSERT INTO groups (name) VALUES (?) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let row = sqlx::query_as::<_, GroupRow>("SELECT id, name FROM groups WHERE name = ?")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Group::try_from(row)
    }

    async fn add_to_group(&self, user_id: UserId, group_id: GroupId) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO user_groups (user_id, group_id) VALUES (?, ?)
             ON CONFLICT (user_id, group_id) DO NOTHING",
        )
        .bind(i64::from(user_id))
        .bind(i64::from(group_id))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(())
    }
}
