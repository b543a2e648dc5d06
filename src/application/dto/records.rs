use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::{pagination::Page, scaffold::FieldView};

/// A record projected onto the fields its reader may see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecordDto {
    pub id: i64,
    #[schema(value_type = Object)]
    pub values: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecordListDto {
    pub title: String,
    pub fields: Vec<FieldView>,
    /// Listed fields the caller may edit inline.
    pub editable_fields: Vec<String>,
    pub search_enabled: bool,
    pub page: Page<RecordDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChildRecordsDto {
    pub model: String,
    pub fk_name: String,
    pub fields: Vec<FieldView>,
    pub rows: Vec<RecordDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecordDetailDto {
    pub record: RecordDto,
    pub fields: Vec<FieldView>,
    pub children: Vec<ChildRecordsDto>,
}
