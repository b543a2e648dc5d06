use super::RecordCommandService;
use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
        forms::{FormErrors, FormsetOperation, InlineSubmission},
        queries::scaffold::ModelContext,
    },
    domain::record::{ChildWrite, NewRecord, Record, RecordId, RecordUpdate},
};
use serde_json::Value;

impl RecordCommandService {
    /// Validate every submitted child row and resolve the rows it touches.
    /// `parent_id` is `None` while the parent is being created, so any row
    /// naming an existing child is rejected. Nothing is written here.
    pub(super) async fn prepare_inlines(
        &self,
        parent: &ModelContext,
        parent_id: Option<RecordId>,
        actor: &AuthenticatedUser,
        submissions: &[InlineSubmission],
    ) -> ApplicationResult<Vec<ChildWrite>> {
        let app = parent.entity.app_label().to_string();
        let parent_model = parent.entity.model_name().to_string();
        let mut writes = Vec::new();
        let mut errors = FormErrors::default();

        for submission in submissions {
            let formset = self
                .scaffold
                .build_inline_formset(&app, &parent_model, &submission.model, &actor.principal)
                .await?;
            let operations = match formset.bind(&submission.rows) {
                Ok(ops) => ops,
                Err(e) => {
                    errors.extend_prefixed("inlines", e);
                    continue;
                }
            };
            if operations.is_empty() {
                continue;
            }
            let child = self.scaffold.require_context(&app, &submission.model).await?;
            child.ensure_writable(&actor.principal)?;

            let child_model = formset.child_model.as_str();
            let fk_name = formset.fk_name.as_str();
            for operation in operations {
                let write = match operation {
                    FormsetOperation::Add(values) => {
                        self.check_references(&formset.form, &values).await?;
                        ChildWrite::Insert {
                            record: NewRecord::new(&app, child_model, values, self.clock.now()),
                            parent_field: fk_name.to_string(),
                        }
                    }
                    FormsetOperation::Change { id, values } => {
                        self.check_references(&formset.form, &values).await?;
                        let current = self
                            .owned_child(&app, child_model, fk_name, parent_id, id)
                            .await?;
                        ChildWrite::Update(RecordUpdate::merged(&current, values, self.clock.now()))
                    }
                    FormsetOperation::Delete(id) => {
                        self.owned_child(&app, child_model, fk_name, parent_id, id)
                            .await?;
                        ChildWrite::Delete {
                            id,
                            at: self.clock.now(),
                        }
                    }
                };
                writes.push(write);
            }
        }

        errors.into_result(writes).map_err(ApplicationError::from)
    }

    /// A child row may only be changed through the parent it belongs to.
    async fn owned_child(
        &self,
        app: &str,
        model: &str,
        fk_name: &str,
        parent_id: Option<RecordId>,
        id: RecordId,
    ) -> ApplicationResult<Record> {
        let not_found = || ApplicationError::not_found(format!("{app}.{model} {id}"));
        let Some(parent_id) = parent_id else {
            return Err(not_found());
        };
        self.record_repo
            .find_by_id(app, model, id)
            .await?
            .filter(|r| r.data.get(fk_name).and_then(Value::as_i64) == Some(parent_id.0))
            .ok_or_else(not_found)
    }
}
