pub mod batch;
pub mod entity;
pub mod query;
pub mod repository;

pub use batch::{ChildWrite, ParentWrite, RecordBatch, SavedBatch, link_to_parent};
pub use entity::{NewRecord, Record, RecordId, RecordUpdate, format_timestamp};
pub use query::{RecordFilter, RecordQuery, RecordSearch, RecordSort};
pub use repository::RecordRepository;
