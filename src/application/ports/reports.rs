use crate::application::ApplicationResult;
use crate::application::dto::ReportDocument;

pub trait ReportRenderer: Send + Sync {
    fn content_type(&self) -> &'static str;

    fn file_extension(&self) -> &'static str;

    fn render(&self, report: &ReportDocument) -> ApplicationResult<Vec<u8>>;
}
