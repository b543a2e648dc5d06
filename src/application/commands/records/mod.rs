mod create;
mod delete;
mod inline;
mod publish;
mod references;
mod service;
mod update;
mod update_field;

pub use create::CreateRecordCommand;
pub use delete::DeleteRecordCommand;
pub use service::RecordCommandService;
pub use update::UpdateRecordCommand;
pub use update_field::{FieldUpdateResult, UpdateFieldCommand};
