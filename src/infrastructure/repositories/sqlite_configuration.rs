use super::map_sqlx;
use crate::domain::configuration::{
    Access, ActionType, AppConfigId, AppConfiguration, ConfigurationReadRepository,
    ConfigurationWriteRepository, FieldConfigId, FieldConfiguration, FieldConfigurationUpdate,
    ModelAction, ModelActionId, ModelConfigId, ModelConfiguration, ModelConfigurationUpdate,
    NewAppConfiguration, NewFieldConfiguration, NewModelAction, NewModelConfiguration,
    PermissionGrants,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::{GroupId, UserId};
use async_trait::async_trait;
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};
use std::collections::HashMap;

const MODEL_COLUMNS: &str = "m.id, m.app_id, a.name AS app_name, m.model_name, m.enable_search, \
     m.list_title, m.default_sort_by, m.navigation, m.list_url, m.enable_list_report, \
     m.enable_detail_report";

const FIELD_COLUMNS: &str = "id, model_id, field_name, display_name, enable_in_list, \
     enable_in_detail, enable_in_form, enable_in_report, inherit_permissions, position";

const ACTION_COLUMNS: &str =
    "id, list_name, detail_name, pattern, action_type, enable_in_list, enable_in_detail, include_pk";

/// Grants are stored one row per principal in `model_permissions` and
/// `field_permissions`.
#[derive(Clone, Copy)]
enum GrantTable {
    Model,
    Field,
}

impl GrantTable {
    fn table(self) -> &'static str {
        match self {
            GrantTable::Model => "model_permissions",
            GrantTable::Field => "field_permissions",
        }
    }

    fn owner(self) -> &'static str {
        match self {
            GrantTable::Model => "model_id",
            GrantTable::Field => "field_id",
        }
    }
}

#[derive(Clone)]
pub struct SqliteConfigurationRepository {
    pool: SqlitePool,
}

impl SqliteConfigurationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn load_grants(
        &self,
        table: GrantTable,
        owner: i64,
    ) -> DomainResult<HashMap<Access, PermissionGrants>> {
        let rows = sqlx::query_as::<_, GrantRow>(&format!(
            "SELECT access, principal_kind, principal_id FROM {} WHERE {} = ?",
            table.table(),
            table.owner()
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let mut grants: HashMap<Access, PermissionGrants> = HashMap::new();
        for row in rows {
            let access = match row.access.as_str() {
                "read" => Access::Read,
                "write" => Access::Write,
                other => {
                    return Err(DomainError::Persistence(format!("unknown access '{other}'")));
                }
            };
            let entry = grants.entry(access).or_default();
            match row.principal_kind.as_str() {
                "user" => {
                    entry.users.insert(UserId::new(row.principal_id)?);
                }
                "group" => {
                    entry.groups.insert(GroupId::new(row.principal_id)?);
                }
                other => {
                    return Err(DomainError::Persistence(format!(
                        "unknown principal kind '{other}'"
                    )));
                }
            }
        }
        Ok(grants)
    }

    async fn hydrate_field(&self, row: FieldRow) -> DomainResult<FieldConfiguration> {
        let mut grants = self.load_grants(GrantTable::Field, row.id).await?;
        Ok(FieldConfiguration {
            id: FieldConfigId(row.id),
            model_id: ModelConfigId(row.model_id),
            field_name: row.field_name,
            display_name: row.display_name,
            enable_in_list: row.enable_in_list,
            enable_in_detail: row.enable_in_detail,
            enable_in_form: row.enable_in_form,
            enable_in_report: row.enable_in_report,
            inherit_permissions: row.inherit_permissions,
            read_permission: grants.remove(&Access::Read).unwrap_or_default(),
            write_permission: grants.remove(&Access::Write).unwrap_or_default(),
            position: row.position,
        })
    }

    async fn hydrate_model(&self, row: ModelRow) -> DomainResult<ModelConfiguration> {
        let mut grants = self.load_grants(GrantTable::Model, row.id).await?;

        let field_rows = sqlx::query_as::<_, FieldRow>(&format!(
            "SELECT {FIELD_COLUMNS} FROM field_configurations
             WHERE model_id = ? ORDER BY position, id"
        ))
        .bind(row.id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        let mut fields = Vec::with_capacity(field_rows.len());
        for field in field_rows {
            fields.push(self.hydrate_field(field).await?);
        }

        let action_rows = sqlx::query_as::<_, ActionRow>(
            "SELECT a.id, a.list_name, a.detail_name, a.pattern, a.action_type,
                    a.enable_in_list, a.enable_in_detail, a.include_pk
             FROM model_actions a
             JOIN model_configuration_actions l ON l.action_id = a.id
             WHERE l.model_id = ?
             ORDER BY l.position, a.id",
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        let actions = action_rows
            .into_iter()
            .map(ModelAction::try_from)
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(ModelConfiguration {
            id: ModelConfigId(row.id),
            app_id: AppConfigId(row.app_id),
            app_name: row.app_name,
            model_name: row.model_name,
            enable_search: row.enable_search,
            list_title: row.list_title,
            default_sort_by: row.default_sort_by,
            navigation: row.navigation,
            list_url: row.list_url,
            enable_list_report: row.enable_list_report,
            enable_detail_report: row.enable_detail_report,
            read_permission: grants.remove(&Access::Read).unwrap_or_default(),
            write_permission: grants.remove(&Access::Write).unwrap_or_default(),
            fields,
            actions,
        })
    }
}

async fn replace_grants(
    tx: &mut Transaction<'_, Sqlite>,
    table: GrantTable,
    owner: i64,
    access: Access,
    grants: &PermissionGrants,
) -> DomainResult<()> {
    sqlx::query(&format!(
        "DELETE FROM {} WHERE {} = ? AND access = ?",
        table.table(),
        table.owner()
    ))
    .bind(owner)
    .bind(access.as_str())
    .execute(&mut **tx)
    .await
    .map_err(map_sqlx)?;

    let insert = format!(
        "INSERT INTO {} ({}, access, principal_kind, principal_id) VALUES (?, ?, ?, ?)",
        table.table(),
        table.owner()
    );
    let principals = grants
        .users
        .iter()
        .map(|u| ("user", i64::from(*u)))
        .chain(grants.groups.iter().map(|g| ("group", i64::from(*g))));
    for (kind, id) in principals {
        sqlx::query(&insert)
            .bind(owner)
            .bind(access.as_str())
            .bind(kind)
            .bind(id)
            .execute(&mut **tx)
            .await
            .map_err(map_sqlx)?;
    }
    Ok(())
}

#[derive(Debug, FromRow)]
struct GrantRow {
    access: String,
    principal_kind: String,
    principal_id: i64,
}

#[derive(Debug, FromRow)]
struct AppRow {
    id: i64,
    name: String,
    description: String,
    navigation: bool,
}

impl From<AppRow> for AppConfiguration {
    fn from(row: AppRow) -> Self {
        AppConfiguration {
            id: AppConfigId(row.id),
            name: row.name,
            description: row.description,
            navigation: row.navigation,
        }
    }
}

#[derive(Debug, FromRow)]
struct ModelRow {
    id: i64,
    app_id: i64,
    app_name: String,
    model_name: String,
    enable_search: bool,
    list_title: String,
    default_sort_by: String,
    navigation: bool,
    list_url: String,
    enable_list_report: bool,
    enable_detail_report: bool,
}

#[derive(Debug, FromRow)]
struct FieldRow {
    id: i64,
    model_id: i64,
    field_name: String,
    display_name: String,
    enable_in_list: bool,
    enable_in_detail: bool,
    enable_in_form: bool,
    enable_in_report: bool,
    inherit_permissions: bool,
    position: i64,
}

#[derive(Debug, FromRow)]
struct ActionRow {
    id: i64,
    list_name: String,
    detail_name: String,
    pattern: String,
    action_type: String,
    enable_in_list: bool,
    enable_in_detail: bool,
    include_pk: bool,
}

impl TryFrom<ActionRow> for ModelAction {
    type Error = DomainError;

    fn try_from(row: ActionRow) -> Result<Self, Self::Error> {
        Ok(ModelAction {
            id: ModelActionId(row.id),
            action_type: row.action_type.parse::<ActionType>()?,
            list_name: row.list_name,
            detail_name: row.detail_name,
            pattern: row.pattern,
            enable_in_list: row.enable_in_list,
            enable_in_detail: row.enable_in_detail,
            include_pk: row.include_pk,
        })
    }
}

#[async_trait]
impl ConfigurationReadRepository for SqliteConfigurationRepository {
    async fn find_app_by_name(&self, name: &str) -> DomainResult<Option<AppConfiguration>> {
        let row = sqlx::query_as::<_, AppRow>(
            "SELECT id, name, description, navigation FROM app_configurations WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(row.map(AppConfiguration::from))
    }

    async fn find_model(&self, app: &str, model: &str) -> DomainResult<Option<ModelConfiguration>> {
        let row = sqlx::query_as::<_, ModelRow>(&format!(
            "SELECT {MODEL_COLUMNS} FROM model_configurations m
             JOIN app_configurations a ON a.id = m.app_id
             WHERE a.name = ? AND m.model_name = ?"
        ))
        .bind(app)
        .bind(model)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        match row {
            Some(row) => self.hydrate_model(row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn find_model_by_id(&self, id: ModelConfigId) -> DomainResult<Option<ModelConfiguration>> {
        let row = sqlx::query_as::<_, ModelRow>(&format!(
            "SELECT {MODEL_COLUMNS} FROM model_configurations m
             JOIN app_configurations a ON a.id = m.app_id
             WHERE m.id = ?"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        match row {
            Some(row) => self.hydrate_model(row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn find_field_by_id(&self, id: FieldConfigId) -> DomainResult<Option<FieldConfiguration>> {
        let row = sqlx::query_as::<_, FieldRow>(&format!(
            "SELECT {FIELD_COLUMNS} FROM field_configurations WHERE id = ?"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        match row {
            Some(row) => self.hydrate_field(row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn find_action_by_list_name(&self, list_name: &str) -> DomainResult<Option<ModelAction>> {
        let row = sqlx::query_as::<_, ActionRow>(&format!(
            "SELECT {ACTION_COLUMNS} FROM model_actions WHERE list_name = ?"
        ))
        .bind(list_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        row.map(ModelAction::try_from).transpose()
    }

    async fn navigation_flags(&self) -> DomainResult<Vec<(String, String, bool)>> {
        sqlx::query_as::<_, (String, String, bool)>(
            "SELECT a.name, m.model_name, m.navigation
             FROM model_configurations m
             JOIN app_configurations a ON a.id = m.app_id
             ORDER BY a.name, m.model_name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)
    }
}

#[async_trait]
impl ConfigurationWriteRepository for SqliteConfigurationRepository {
    async fn insert_app(&self, app: NewAppConfiguration) -> DomainResult<AppConfiguration> {
        let row = sqlx::query_as::<_, AppRow>(
            "INSERT INTO app_configurations (name, description, navigation)
             VALUES (?, ?, ?)
             RETURNING id, name, description, navigation",
        )
        .bind(&app.name)
        .bind(&app.description)
        .bind(app.navigation)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(row.into())
    }

    async fn insert_model(&self, model: NewModelConfiguration) -> DomainResult<ModelConfigId> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO model_configurations
                (app_id, model_name, enable_search, list_title, default_sort_by, navigation,
                 list_url, enable_list_report, enable_detail_report)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING id",
        )
        .bind(i64::from(model.app_id))
        .bind(&model.model_name)
        .bind(model.enable_search)
        .bind(&model.list_title)
        .bind(&model.default_sort_by)
        .bind(model.navigation)
        .bind(&model.list_url)
        .bind(model.enable_list_report)
        .bind(model.enable_detail_report)
        .fetch_one(&self.pool)
        .await
        .map(ModelConfigId)
        .map_err(map_sqlx)
    }

    async fn insert_field(&self, field: NewFieldConfiguration) -> DomainResult<FieldConfigId> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO field_configurations
                (model_id, field_name, display_name, enable_in_list, enable_in_detail,
                 enable_in_form, enable_in_report, inherit_permissions, position)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING id",
        )
        .bind(i64::from(field.model_id))
        .bind(&field.field_name)
        .bind(&field.display_name)
        .bind(field.enable_in_list)
        .bind(field.enable_in_detail)
        .bind(field.enable_in_form)
        .bind(field.enable_in_report)
        .bind(field.inherit_permissions)
        .bind(field.position)
        .fetch_one(&self.pool)
        .await
        .map(FieldConfigId)
        .map_err(map_sqlx)
    }

    async fn insert_action(&self, action: NewModelAction) -> DomainResult<ModelAction> {
        let row = sqlx::query_as::<_, ActionRow>(&format!(
            "INSERT INTO model_actions
                (list_name, detail_name, pattern, action_type, enable_in_list,
                 enable_in_detail, include_pk)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING {ACTION_COLUMNS}"
        ))
        .bind(&action.list_name)
        .bind(&action.detail_name)
        .bind(&action.pattern)
        .bind(action.action_type.as_str())
        .bind(action.enable_in_list)
        .bind(action.enable_in_detail)
        .bind(action.include_pk)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;
        ModelAction::try_from(row)
    }

    async fn link_action(&self, model: ModelConfigId, action: ModelActionId) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO model_configuration_actions (model_id, action_id, position)
             VALUES (?, ?, (SELECT COUNT(1) FROM model_configuration_actions WHERE model_id = ?))
             ON CONFLICT (model_id, action_id) DO NOTHING",
        )
        .bind(model.0)
        .bind(action.0)
        .bind(model.0)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(())
    }

    async fn update_field(&self, update: FieldConfigurationUpdate) -> DomainResult<FieldConfiguration> {
        let id = update.id;
        let mut field = self
            .find_field_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("field configuration {}", id.0)))?;
        update.apply_to(&mut field);

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        sqlx::query(
            "UPDATE field_configurations
             SET display_name = ?, enable_in_list = ?, enable_in_detail = ?, enable_in_form = ?,
                 enable_in_report = ?, inherit_permissions = ?
             WHERE id = ?",
        )
        .bind(&field.display_name)
        .bind(field.enable_in_list)
        .bind(field.enable_in_detail)
        .bind(field.enable_in_form)
        .bind(field.enable_in_report)
        .bind(field.inherit_permissions)
        .bind(id.0)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;
        if update.read_permission.is_some() {
            replace_grants(&mut tx, GrantTable::Field, id.0, Access::Read, &field.read_permission)
                .await?;
        }
        if update.write_permission.is_some() {
            replace_grants(&mut tx, GrantTable::Field, id.0, Access::Write, &field.write_permission)
                .await?;
        }
        tx.commit().await.map_err(map_sqlx)?;

        Ok(field)
    }

    async fn update_model(&self, update: ModelConfigurationUpdate) -> DomainResult<ModelConfiguration> {
        let id = update.id;
        let mut model = self
            .find_model_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("model configuration {}", id.0)))?;
        update.apply_to(&mut model);

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        sqlx::query(
            "UPDATE model_configurations
             SET enable_search = ?, list_title = ?, default_sort_by = ?, navigation = ?,
                 enable_list_report = ?, enable_detail_report = ?
             WHERE id = ?",
        )
        .bind(model.enable_search)
        .bind(&model.list_title)
        .bind(&model.default_sort_by)
        .bind(model.navigation)
        .bind(model.enable_list_report)
        .bind(model.enable_detail_report)
        .bind(id.0)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;
        if update.read_permission.is_some() {
            replace_grants(&mut tx, GrantTable::Model, id.0, Access::Read, &model.read_permission)
                .await?;
        }
        if update.write_permission.is_some() {
            replace_grants(&mut tx, GrantTable::Model, id.0, Access::Write, &model.write_permission)
                .await?;
        }
        tx.commit().await.map_err(map_sqlx)?;

        Ok(model)
    }
}
