use super::RecordCommandService;
use crate::{
    application::{
        dto::{AuthenticatedUser, RecordDto},
        error::{ApplicationError, ApplicationResult},
        forms::{BindMode, InlineSubmission},
    },
    domain::{
        configuration::ViewType,
        record::{ParentWrite, RecordBatch, RecordId, RecordUpdate},
    },
};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default)]
pub struct UpdateRecordCommand {
    pub app: String,
    pub model: String,
    pub id: i64,
    pub values: Map<String, Value>,
    pub inlines: Vec<InlineSubmission>,
}

impl RecordCommandService {
    pub async fn update_record(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateRecordCommand,
    ) -> ApplicationResult<RecordDto> {
        let ctx = self.scaffold.require_context(&command.app, &command.model).await?;
        ctx.ensure_writable(&actor.principal)?;

        let id = RecordId::new(command.id)?;
        let current = self
            .record_repo
            .find_by_id(&command.app, &command.model, id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("{} {id}", ctx.label())))?;

        let form = ctx.form(&actor.principal);
        let values = form.bind(&command.values, BindMode::Update)?;
        self.check_references(&form, &values).await?;
        let children = self
            .prepare_inlines(&ctx, Some(current.id), actor, &command.inlines)
            .await?;

        let batch = RecordBatch::new(ParentWrite::Update(RecordUpdate::merged(
            &current,
            values,
            self.clock.now(),
        )))
        .with_children(children);
        let saved = self.record_repo.save_batch(batch).await?;
        let record = saved.parent.clone();
        self.publish_saved(&saved).await;

        let fields = ctx.resolve(&actor.principal, ViewType::Detail, true);
        Ok(ctx.project(&record, &fields))
    }
}
