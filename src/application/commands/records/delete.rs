use super::RecordCommandService;
use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{events::EventAction, record::RecordId},
};
use tracing::info;

#[derive(Debug, Clone)]
pub struct DeleteRecordCommand {
    pub app: String,
    pub model: String,
    pub id: i64,
}

impl RecordCommandService {
    /// Soft delete: the row is kept, flagged, and hidden from every read.
    pub async fn delete_record(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteRecordCommand,
    ) -> ApplicationResult<()> {
        let ctx = self.scaffold.require_context(&command.app, &command.model).await?;
        ctx.ensure_writable(&actor.principal)?;

        let id = RecordId::new(command.id)?;
        if self
            .record_repo
            .find_by_id(&command.app, &command.model, id)
            .await?
            .is_none()
        {
            return Err(ApplicationError::not_found(format!("{} {id}", ctx.label())));
        }

        let record = self.record_repo.soft_delete(id, self.clock.now()).await?;
        info!(channel = %record.model, record_id = record.id.0, "record deleted");
        self.publish(EventAction::Deleted, &record).await;
        Ok(())
    }
}
