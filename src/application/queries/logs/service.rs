use std::sync::Arc;

use crate::{
    application::queries::scaffold::ScaffoldQueryService,
    domain::log_message::LogMessageRepository,
};

pub struct LogQueryService {
    pub(super) scaffold: Arc<ScaffoldQueryService>,
    pub(super) repo: Arc<dyn LogMessageRepository>,
}

impl LogQueryService {
    pub fn new(scaffold: Arc<ScaffoldQueryService>, repo: Arc<dyn LogMessageRepository>) -> Self {
        Self { scaffold, repo }
    }
}
