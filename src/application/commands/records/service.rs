use std::sync::Arc;

use crate::{
    application::{
        ports::{events::EventPublisher, time::Clock},
        queries::scaffold::ScaffoldQueryService,
    },
    domain::record::RecordRepository,
};

/// Writes entity records through dynamic forms and announces every change
/// on the event bus.
pub struct RecordCommandService {
    pub(super) scaffold: Arc<ScaffoldQueryService>,
    pub(super) record_repo: Arc<dyn RecordRepository>,
    pub(super) publisher: Arc<dyn EventPublisher>,
    pub(super) clock: Arc<dyn Clock>,
}

impl RecordCommandService {
    pub fn new(
        scaffold: Arc<ScaffoldQueryService>,
        record_repo: Arc<dyn RecordRepository>,
        publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            scaffold,
            record_repo,
            publisher,
            clock,
        }
    }
}
