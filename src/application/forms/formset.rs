use super::coerce::is_blank;
use super::errors::FormErrors;
use super::form::{BindMode, DynamicForm};
use crate::domain::record::RecordId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Child rows edited inline under a parent record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineFormset {
    pub parent_model: String,
    pub child_model: String,
    /// Child field pointing at the parent; set by the service, never submitted.
    pub fk_name: String,
    pub form: DynamicForm,
    pub extra: usize,
    pub can_delete: bool,
}

/// One submitted row. `id` is absent for new rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormsetRow {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub delete: bool,
    #[serde(flatten)]
    pub values: Map<String, Value>,
}

/// Submitted rows for one child model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InlineSubmission {
    pub model: String,
    #[serde(default)]
    pub rows: Vec<FormsetRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormsetOperation {
    Add(Map<String, Value>),
    Change {
        id: RecordId,
        values: Map<String, Value>,
    },
    Delete(RecordId),
}

impl InlineFormset {
    pub fn new(
        parent_model: impl Into<String>,
        child_model: impl Into<String>,
        fk_name: impl Into<String>,
        form: DynamicForm,
    ) -> Self {
        let fk_name = fk_name.into();
        Self {
            parent_model: parent_model.into(),
            child_model: child_model.into(),
            form: form.without_field(&fk_name),
            fk_name,
            extra: 1,
            can_delete: true,
        }
    }

    /// Turn submitted rows into operations. Untouched extra rows are skipped,
    /// as is a delete mark on a row that was never saved.
    pub fn bind(&self, rows: &[FormsetRow]) -> Result<Vec<FormsetOperation>, FormErrors> {
        let mut errors = FormErrors::default();
        let mut operations = Vec::with_capacity(rows.len());

        for (index, row) in rows.iter().enumerate() {
            let prefix = format!("{}[{index}]", self.child_model);
            let id = match row.id.map(RecordId::new).transpose() {
                Ok(id) => id,
                Err(err) => {
                    errors.add(format!("{prefix}.id"), err.to_string());
                    continue;
                }
            };

            match (id, row.delete) {
                (None, true) => continue,
                (Some(id), true) => {
                    if self.can_delete {
                        operations.push(FormsetOperation::Delete(id));
                    } else {
                        errors.add(format!("{prefix}.delete"), "Rows cannot be deleted.");
                    }
                }
                (None, false) => {
                    if row.values.values().all(is_blank) {
                        continue;
                    }
                    match self.form.bind(&row.values, BindMode::Create) {
                        Ok(values) => operations.push(FormsetOperation::Add(values)),
                        Err(e) => errors.extend_prefixed(&prefix, e),
                    }
                }
                (Some(id), false) => match self.form.bind(&row.values, BindMode::Update) {
                    Ok(values) => operations.push(FormsetOperation::Change { id, values }),
                    Err(e) => errors.extend_prefixed(&prefix, e),
                },
            }
        }

        errors.into_result(operations)
    }
}
