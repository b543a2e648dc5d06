use std::sync::Arc;

use crate::{application::queries::scaffold::ScaffoldQueryService, domain::record::RecordRepository};

pub const MAX_PAGE_SIZE: u32 = 100;

pub struct RecordQueryService {
    pub(super) scaffold: Arc<ScaffoldQueryService>,
    pub(super) record_repo: Arc<dyn RecordRepository>,
    pub(super) page_size: u32,
}

impl RecordQueryService {
    pub fn new(
        scaffold: Arc<ScaffoldQueryService>,
        record_repo: Arc<dyn RecordRepository>,
        page_size: u32,
    ) -> Self {
        Self {
            scaffold,
            record_repo,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }
}
