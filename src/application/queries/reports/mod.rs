mod build;
mod service;

pub use build::BuildReportQuery;
pub use service::{ReportLayout, ReportQueryService};
