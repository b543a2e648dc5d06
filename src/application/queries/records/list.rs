use super::{RecordQueryService, service::MAX_PAGE_SIZE};
use crate::{
    application::{
        dto::{AuthenticatedUser, FieldView, Page, RecordListDto},
        error::{ApplicationError, ApplicationResult},
        queries::scaffold::ModelContext,
    },
    domain::{
        configuration::ViewType,
        record::{RecordQuery, RecordSort},
    },
};

#[derive(Debug, Clone, Default)]
pub struct ListRecordsQuery {
    pub app: String,
    pub model: String,
    pub search: Option<String>,
    /// Restrict the search term to one listed field.
    pub filter: Option<String>,
    pub exact_match: bool,
    pub sort: Option<String>,
    pub page: u32,
    pub page_size: Option<u32>,
}

/// Columns every record has, sortable regardless of configuration.
const BASE_SORT_FIELDS: [&str; 3] = ["id", "created_at", "updated_at"];

impl RecordQueryService {
    pub async fn list_records(
        &self,
        actor: &AuthenticatedUser,
        query: ListRecordsQuery,
    ) -> ApplicationResult<RecordListDto> {
        let ctx = self.scaffold.require_context(&query.app, &query.model).await?;
        ctx.ensure_readable(&actor.principal)?;

        let fields = ctx.describe(&actor.principal, ViewType::List, true);
        let page = query.page.max(1);
        let page_size = query.page_size.unwrap_or(self.page_size).clamp(1, MAX_PAGE_SIZE);

        let mut selection = RecordQuery::new(&query.app, &query.model)
            .with_sort(self.sort_for(&ctx, &fields, query.sort.as_deref()))
            .paginate(page_size, u64::from(page - 1) * u64::from(page_size));

        let term = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        let filter = query
            .filter
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty());

        match (term, filter) {
            (Some(term), Some(filter)) => {
                if !fields.iter().any(|f| f.name == filter && !f.computed) {
                    return Err(ApplicationError::validation(format!(
                        "cannot filter on '{filter}'"
                    )));
                }
                selection = selection.with_filter(filter, term, query.exact_match);
            }
            (Some(term), None) if ctx.config.enable_search => {
                selection = selection.with_search(term, searchable_fields(&ctx, &fields));
            }
            _ => {}
        }

        let (records, total) = self.record_repo.list(&selection).await?;
        let names: Vec<String> = fields.iter().map(|f| f.name.clone()).collect();
        let items = records.iter().map(|r| ctx.project(r, &names)).collect();

        let writable = ctx.resolve(&actor.principal, ViewType::Form, false);
        let editable_fields = if ctx.entity.read_only() {
            Vec::new()
        } else {
            names.iter().filter(|n| writable.contains(n)).cloned().collect()
        };

        Ok(RecordListDto {
            title: ctx.config.list_title.clone(),
            fields,
            editable_fields,
            search_enabled: ctx.config.enable_search,
            page: Page::new(items, page, page_size, total),
        })
    }

    /// Requested sort, else the configured default, else `id`. Only base
    /// columns and stored fields the caller can see are accepted.
    fn sort_for(&self, ctx: &ModelContext, fields: &[FieldView], requested: Option<&str>) -> RecordSort {
        let allowed = |sort: &RecordSort| {
            BASE_SORT_FIELDS.contains(&sort.field.as_str())
                || fields.iter().any(|f| f.name == sort.field && !f.computed)
        };
        [requested, Some(ctx.config.default_sort_by.as_str())]
            .into_iter()
            .flatten()
            .map(|raw| {
                let mut sort = RecordSort::parse(raw.trim());
                if sort.field == "pk" {
                    sort.field = "id".into();
                }
                sort
            })
            .find(allowed)
            .unwrap_or_else(|| RecordSort::parse("id"))
    }
}

/// Listed, stored, non-relation fields.
fn searchable_fields(ctx: &ModelContext, fields: &[FieldView]) -> Vec<String> {
    let descriptors = ctx.entity.fields();
    fields
        .iter()
        .filter(|f| !f.computed)
        .filter(|f| {
            descriptors
                .iter()
                .any(|d| d.name == f.name && !d.is_relation())
        })
        .map(|f| f.name.clone())
        .collect()
}
