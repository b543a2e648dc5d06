use super::RecordCommandService;
use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
        forms::{BindMode, DynamicForm},
    },
    domain::{
        events::EventAction,
        record::{RecordId, RecordUpdate},
    },
};
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Inline edit of a single field from a list or detail page.
#[derive(Debug, Clone)]
pub struct UpdateFieldCommand {
    pub app: String,
    pub model: String,
    pub id: i64,
    pub field: String,
    pub value: Value,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FieldUpdateResult {
    pub id: i64,
    pub field: String,
    #[schema(value_type = Object)]
    pub value: Value,
}

impl RecordCommandService {
    pub async fn update_field(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateFieldCommand,
    ) -> ApplicationResult<FieldUpdateResult> {
        let ctx = self.scaffold.require_context(&command.app, &command.model).await?;
        ctx.ensure_writable(&actor.principal)?;

        let form = ctx.form(&actor.principal);
        let Some(field) = form.field(&command.field).cloned() else {
            return Err(ApplicationError::forbidden(format!(
                "field '{}' is not editable",
                command.field
            )));
        };
        let single = DynamicForm {
            app: form.app.clone(),
            model: form.model.clone(),
            fields: vec![field],
        };

        let id = RecordId::new(command.id)?;
        let current = self
            .record_repo
            .find_by_id(&command.app, &command.model, id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("{} {id}", ctx.label())))?;

        let mut payload = Map::new();
        payload.insert(command.field.clone(), command.value);
        let values = single.bind(&payload, BindMode::Update)?;
        self.check_references(&single, &values).await?;

        let record = self
            .record_repo
            .update(RecordUpdate::merged(&current, values, self.clock.now()))
            .await?;
        self.publish(EventAction::Updated, &record).await;

        Ok(FieldUpdateResult {
            id: record.id.into(),
            value: record.value(&command.field).unwrap_or(Value::Null),
            field: command.field,
        })
    }
}
