use std::sync::Arc;

use crate::{
    application::{
        dto::Orientation,
        ports::{reports::ReportRenderer, time::Clock},
        queries::scaffold::ScaffoldQueryService,
    },
    domain::record::RecordRepository,
};

/// Rows per printed page for each orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLayout {
    pub rows_portrait: usize,
    pub rows_landscape: usize,
}

impl ReportLayout {
    pub fn rows_per_page(&self, orientation: Orientation) -> usize {
        match orientation {
            Orientation::Portrait => self.rows_portrait,
            Orientation::Landscape => self.rows_landscape,
        }
        .max(1)
    }
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            rows_portrait: 60,
            rows_landscape: 40,
        }
    }
}

pub struct ReportQueryService {
    pub(super) scaffold: Arc<ScaffoldQueryService>,
    pub(super) record_repo: Arc<dyn RecordRepository>,
    pub(super) renderer: Arc<dyn ReportRenderer>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) layout: ReportLayout,
}

impl ReportQueryService {
    pub fn new(
        scaffold: Arc<ScaffoldQueryService>,
        record_repo: Arc<dyn RecordRepository>,
        renderer: Arc<dyn ReportRenderer>,
        clock: Arc<dyn Clock>,
        layout: ReportLayout,
    ) -> Self {
        Self {
            scaffold,
            record_repo,
            renderer,
            clock,
            layout,
        }
    }
}
