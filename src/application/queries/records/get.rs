use super::RecordQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, ChildRecordsDto, RecordDetailDto},
        error::{ApplicationError, ApplicationResult},
        queries::scaffold::ModelContext,
    },
    domain::{
        configuration::ViewType,
        record::{RecordId, RecordQuery},
    },
};

#[derive(Debug, Clone)]
pub struct GetRecordQuery {
    pub app: String,
    pub model: String,
    pub id: i64,
}

impl RecordQueryService {
    pub async fn get_record(
        &self,
        actor: &AuthenticatedUser,
        query: GetRecordQuery,
    ) -> ApplicationResult<RecordDetailDto> {
        let ctx = self.scaffold.require_context(&query.app, &query.model).await?;
        ctx.ensure_readable(&actor.principal)?;

        let id = RecordId::new(query.id)?;
        let record = self
            .record_repo
            .find_by_id(&query.app, &query.model, id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("{} {id}", ctx.label())))?;

        let fields = ctx.describe(&actor.principal, ViewType::Detail, true);
        let names: Vec<String> = fields.iter().map(|f| f.name.clone()).collect();

        let mut children = Vec::new();
        for child in self.scaffold.child_models(&query.app, &query.model)? {
            let Some(child_ctx) = self
                .scaffold
                .find_context(&query.app, child.model_name())
                .await?
            else {
                continue;
            };
            if child_ctx.ensure_readable(&actor.principal).is_err() {
                continue;
            }
            children.push(self.child_rows(&child_ctx, &ctx, id, actor).await?);
        }

        Ok(RecordDetailDto {
            record: ctx.project(&record, &names),
            fields,
            children,
        })
    }

    async fn child_rows(
        &self,
        child: &ModelContext,
        parent: &ModelContext,
        parent_id: RecordId,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<ChildRecordsDto> {
        let fk_name = child.fk_to(parent.entity.model_name())?;
        let selection = RecordQuery::new(child.entity.app_label(), child.entity.model_name())
            .with_filter(&fk_name, parent_id.to_string(), true);
        let (rows, _) = self.record_repo.list(&selection).await?;

        let fields: Vec<_> = child
            .describe(&actor.principal, ViewType::List, true)
            .into_iter()
            .filter(|f| f.name != fk_name)
            .collect();
        let names: Vec<String> = fields.iter().map(|f| f.name.clone()).collect();

        Ok(ChildRecordsDto {
            model: child.entity.model_name().to_string(),
            rows: rows.iter().map(|r| child.project(r, &names)).collect(),
            fk_name,
            fields,
        })
    }
}
