pub mod auth;
pub mod configuration;
pub mod logs;
pub mod pagination;
pub mod records;
pub mod reports;
pub mod scaffold;
pub mod serde_time;
pub mod users;

pub use auth::{AuthTokenDto, AuthenticatedUser, TokenClaims, TokenSubject};
pub use configuration::{FieldConfigurationDto, GrantsDto, ModelConfigurationDto, SyncReport};
pub use logs::LogMessageDto;
pub use pagination::{CursorPage, Page};
pub use records::{ChildRecordsDto, RecordDetailDto, RecordDto, RecordListDto};
pub use reports::{Orientation, RenderedReport, ReportColumn, ReportDocument, ReportKind, ReportPage};
pub use scaffold::{
    ActionLinkDto, ActionsDto, DetailActionLinkDto, FieldView, FormFieldDto, FormSchemaDto,
    FormsetSchemaDto, NavigationApp, NavigationIndex, NavigationModel,
};
pub use users::{ProfileDto, UserDto};
