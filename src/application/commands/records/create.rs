use super::RecordCommandService;
use crate::{
    application::{
        dto::{AuthenticatedUser, RecordDto},
        error::ApplicationResult,
        forms::{BindMode, InlineSubmission},
    },
    domain::{
        configuration::ViewType,
        record::{NewRecord, ParentWrite, RecordBatch},
    },
};
use serde_json::{Map, Value};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct CreateRecordCommand {
    pub app: String,
    pub model: String,
    pub values: Map<String, Value>,
    pub inlines: Vec<InlineSubmission>,
}

impl RecordCommandService {
    pub async fn create_record(
        &self,
        actor: &AuthenticatedUser,
        command: CreateRecordCommand,
    ) -> ApplicationResult<RecordDto> {
        let ctx = self.scaffold.require_context(&command.app, &command.model).await?;
        ctx.ensure_writable(&actor.principal)?;

        let form = ctx.form(&actor.principal);
        let values = form.bind(&command.values, BindMode::Create)?;
        self.check_references(&form, &values).await?;
        let children = self
            .prepare_inlines(&ctx, None, actor, &command.inlines)
            .await?;

        let batch = RecordBatch::new(ParentWrite::Insert(NewRecord::new(
            &command.app,
            &command.model,
            values,
            self.clock.now(),
        )))
        .with_children(children);
        let saved = self.record_repo.save_batch(batch).await?;
        let record = saved.parent.clone();
        info!(channel = %record.model, record_id = record.id.0, "record created");
        self.publish_saved(&saved).await;

        let fields = ctx.resolve(&actor.principal, ViewType::Detail, true);
        Ok(ctx.project(&record, &fields))
    }
}
