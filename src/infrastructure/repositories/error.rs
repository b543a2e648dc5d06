use crate::domain::errors::DomainError;
use sqlx::error::ErrorKind;

/// SQLite reports constraint failures as `<KIND> constraint failed: table.column`.
const USERS_USERNAME: &str = "users.username";
const GROUPS_NAME: &str = "groups.name";
const APP_NAME: &str = "app_configurations.name";
const MODEL_APP_NAME: &str = "model_configurations.app_id, model_configurations.model_name";
const FIELD_MODEL_NAME: &str = "field_configurations.model_id, field_configurations.field_name";
const ACTION_LIST_NAME: &str = "model_actions.list_name";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let message = db_err.message();
            match db_err.kind() {
                ErrorKind::UniqueViolation => {
                    let what = if message.ends_with(USERS_USERNAME) {
                        "username already exists"
                    } else if message.ends_with(GROUPS_NAME) {
                        "group already exists"
                    } else if message.ends_with(APP_NAME) {
                        "app configuration already exists"
                    } else if message.ends_with(MODEL_APP_NAME) {
                        "model configuration already exists"
                    } else if message.ends_with(FIELD_MODEL_NAME) {
                        "field configuration already exists"
                    } else if message.ends_with(ACTION_LIST_NAME) {
                        "action already exists"
                    } else {
                        "unique constraint violated"
                    };
                    DomainError::Conflict(what.into())
                }
                ErrorKind::ForeignKeyViolation => {
                    DomainError::NotFound("referenced record not found".into())
                }
                ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                    DomainError::Validation(message.to_string())
                }
                _ => DomainError::Persistence(message.to_string()),
            }
        }
        sqlx::Error::RowNotFound => DomainError::NotFound("row not found".into()),
        _ => DomainError::Persistence(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_are_persistence_failures() {
        assert!(matches!(
            map_sqlx(sqlx::Error::PoolTimedOut),
            DomainError::Persistence(_)
        ));
        assert!(matches!(
            map_sqlx(sqlx::Error::RowNotFound),
            DomainError::NotFound(_)
        ));
    }
}
