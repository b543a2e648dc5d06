mod get;
mod list;
mod service;

pub use get::GetRecordQuery;
pub use list::ListRecordsQuery;
pub use service::RecordQueryService;
