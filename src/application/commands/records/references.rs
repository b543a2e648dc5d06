use super::RecordCommandService;
use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        forms::{DynamicForm, FormErrors},
    },
    domain::record::RecordId,
};
use serde_json::{Map, Value};

impl RecordCommandService {
    /// Every foreign key in `values` must point at a live record of the
    /// related model in the same app.
    pub(super) async fn check_references(
        &self,
        form: &DynamicForm,
        values: &Map<String, Value>,
    ) -> ApplicationResult<()> {
        let mut errors = FormErrors::default();
        for field in &form.fields {
            let Some(related) = field.related_model.as_deref() else {
                continue;
            };
            let Some(id) = values.get(&field.name).and_then(Value::as_i64) else {
                continue;
            };
            let exists = match RecordId::new(id) {
                Ok(id) => self
                    .record_repo
                    .find_by_id(&form.app, related, id)
                    .await?
                    .is_some(),
                Err(_) => false,
            };
            if !exists {
                errors.add(field.name.clone(), "Select a valid choice.");
            }
        }
        errors.into_result(()).map_err(ApplicationError::from)
    }
}
