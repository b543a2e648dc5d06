use super::RecordCommandService;
use crate::domain::{
    events::{EntityEvent, EventAction},
    record::{Record, SavedBatch},
};
use tracing::warn;

impl RecordCommandService {
    /// Best effort: a failed publish is logged and the write still stands.
    pub(super) async fn publish(&self, action: EventAction, record: &Record) {
        let event = EntityEvent::new(
            record.model.clone(),
            action,
            record.serialize(),
            self.clock.now(),
        );
        let event_id = event.id;
        if let Err(err) = self.publisher.publish(event).await {
            warn!(
                channel = %record.model,
                action = %action,
                record_id = record.id.0,
                %event_id,
                error = %err,
                "failed to publish entity event"
            );
        }
    }

    /// Announce a committed batch, parent first.
    pub(super) async fn publish_saved(&self, saved: &SavedBatch) {
        for (action, record) in &saved.changes {
            self.publish(*action, record).await;
        }
    }
}
