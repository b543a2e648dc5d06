mod list;
mod service;

pub use list::ListLogMessagesQuery;
pub use service::LogQueryService;
