use super::{UserCommandService, password::validate_password};
use crate::{
    application::{
        dto::UserDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{NewUser, PasswordHash, Username},
};
use tracing::info;

/// Operator-level account creation (command line and bootstrap).
pub struct CreateUserCommand {
    pub username: String,
    pub password: String,
    pub is_superuser: bool,
    pub groups: Vec<String>,
}

impl UserCommandService {
    pub async fn create_user(&self, command: CreateUserCommand) -> ApplicationResult<UserDto> {
        let username = Username::new(command.username)?;
        validate_password(username.as_str(), &command.password)?;

        if self.user_repo.find_by_username(&username).await?.is_some() {
            return Err(ApplicationError::conflict("username already exists"));
        }

        let hashed = self.password_hasher.hash(&command.password).await?;
        let new_user = NewUser::new(
            username,
            PasswordHash::new(hashed)?,
            command.is_superuser,
            self.clock.now(),
        );
        let mut user = self.user_repo.insert(new_user).await?;

        for name in command.groups.iter().map(|g| g.trim()).filter(|g| !g.is_empty()) {
            let group = self.user_repo.find_or_create_group(name).await?;
            self.user_repo.add_to_group(user.id, group.id).await?;
            user.groups.insert(group.id);
        }

        info!(user_id = user.id.0, superuser = user.is_superuser, "user created");
        Ok(user.into())
    }
}
