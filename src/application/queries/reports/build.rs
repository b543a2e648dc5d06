use super::ReportQueryService;
use crate::{
    application::{
        dto::{
            AuthenticatedUser, FieldView, Orientation, RenderedReport, ReportColumn,
            ReportDocument, ReportKind, ReportPage,
        },
        error::{ApplicationError, ApplicationResult},
        queries::scaffold::ModelContext,
    },
    domain::{
        configuration::ViewType,
        entity::FieldKind,
        record::{Record, RecordId, RecordQuery},
    },
};
use chrono::NaiveDate;
use serde_json::Value;

pub const DEFAULT_DATE_FIELD: &str = "created_at";

#[derive(Debug, Clone)]
pub struct BuildReportQuery {
    pub app: String,
    pub model: String,
    pub kind: ReportKind,
    /// Required for detail reports.
    pub id: Option<i64>,
    pub orientation: Option<Orientation>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub date_field: Option<String>,
}

impl ReportQueryService {
    pub async fn build_report(
        &self,
        actor: &AuthenticatedUser,
        query: BuildReportQuery,
    ) -> ApplicationResult<ReportDocument> {
        let ctx = self.scaffold.require_context(&query.app, &query.model).await?;
        ctx.ensure_readable(&actor.principal)?;

        let enabled = match query.kind {
            ReportKind::List => ctx.config.enable_list_report,
            ReportKind::Detail => ctx.config.enable_detail_report,
        };
        if !enabled {
            return Err(ApplicationError::forbidden(format!(
                "{:?} reports are disabled for {}",
                query.kind,
                ctx.label()
            )));
        }

        let orientation = query
            .orientation
            .unwrap_or_else(|| query.kind.default_orientation());
        let fields = ctx.describe(&actor.principal, ViewType::Report, true);

        let (title, columns, rows) = match query.kind {
            ReportKind::List => self.list_rows(&ctx, &fields, &query).await?,
            ReportKind::Detail => self.detail_rows(&ctx, &fields, &query).await?,
        };

        let per_page = self.layout.rows_per_page(orientation);
        let mut pages: Vec<ReportPage> = rows
            .chunks(per_page)
            .enumerate()
            .map(|(i, chunk)| ReportPage {
                number: i + 1,
                rows: chunk.to_vec(),
            })
            .collect();
        if pages.is_empty() {
            pages.push(ReportPage {
                number: 1,
                rows: Vec::new(),
            });
        }

        Ok(ReportDocument {
            title,
            kind: query.kind,
            orientation,
            columns,
            pages,
            date_from: query.date_from,
            date_to: query.date_to,
            generated_at: self.clock.now(),
        })
    }

    pub async fn render_report(
        &self,
        actor: &AuthenticatedUser,
        query: BuildReportQuery,
    ) -> ApplicationResult<RenderedReport> {
        let model = query.model.to_lowercase();
        let kind = query.kind;
        let document = self.build_report(actor, query).await?;
        let body = self.renderer.render(&document)?;
        Ok(RenderedReport {
            filename: format!(
                "{model}-{}-{}.{}",
                match kind {
                    ReportKind::List => "list",
                    ReportKind::Detail => "detail",
                },
                document.generated_at.format("%Y%m%d"),
                self.renderer.file_extension()
            ),
            content_type: self.renderer.content_type(),
            body,
        })
    }

    async fn list_rows(
        &self,
        ctx: &ModelContext,
        fields: &[FieldView],
        query: &BuildReportQuery,
    ) -> ApplicationResult<(String, Vec<ReportColumn>, Vec<Vec<String>>)> {
        let range = DateRange::new(query.date_from, query.date_to)?;
        let date_field = query.date_field.as_deref().unwrap_or(DEFAULT_DATE_FIELD);
        if !range.is_open() {
            ensure_date_field(ctx, date_field)?;
        }

        let selection = RecordQuery::new(&query.app, &query.model);
        let (records, _) = self.record_repo.list(&selection).await?;
        let names: Vec<String> = fields.iter().map(|f| f.name.clone()).collect();

        let rows = records
            .iter()
            .filter(|r| range.is_open() || range.contains(record_date(r, date_field)))
            .map(|r| {
                let projected = ctx.project(r, &names);
                names
                    .iter()
                    .map(|n| cell(projected.values.get(n).unwrap_or(&Value::Null)))
                    .collect()
            })
            .collect();

        let columns = fields
            .iter()
            .map(|f| ReportColumn {
                name: f.name.clone(),
                label: f.label.clone(),
            })
            .collect();
        Ok((ctx.config.list_title.clone(), columns, rows))
    }

    async fn detail_rows(
        &self,
        ctx: &ModelContext,
        fields: &[FieldView],
        query: &BuildReportQuery,
    ) -> ApplicationResult<(String, Vec<ReportColumn>, Vec<Vec<String>>)> {
        let id = query
            .id
            .ok_or_else(|| ApplicationError::validation("detail reports need a record id"))
            .and_then(|id| RecordId::new(id).map_err(ApplicationError::from))?;
        let record = self
            .record_repo
            .find_by_id(&query.app, &query.model, id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("{} {id}", ctx.label())))?;

        let names: Vec<String> = fields.iter().map(|f| f.name.clone()).collect();
        let projected = ctx.project(&record, &names);
        let rows = fields
            .iter()
            .map(|f| {
                vec![
                    f.label.clone(),
                    cell(projected.values.get(&f.name).unwrap_or(&Value::Null)),
                ]
            })
            .collect();
        let columns = vec![
            ReportColumn {
                name: "field".into(),
                label: "Field".into(),
            },
            ReportColumn {
                name: "value".into(),
                label: "Value".into(),
            },
        ];
        Ok((format!("{} {id}", ctx.entity.verbose_name()), columns, rows))
    }
}

/// Inclusive on both ends; an open end matches everything on that side.
#[derive(Debug, Clone, Copy)]
struct DateRange {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl DateRange {
    fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> ApplicationResult<Self> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(ApplicationError::validation("date_from is after date_to"));
            }
        }
        Ok(Self { from, to })
    }

    fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    fn contains(&self, date: Option<NaiveDate>) -> bool {
        let Some(date) = date else {
            return false;
        };
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

fn ensure_date_field(ctx: &ModelContext, name: &str) -> ApplicationResult<()> {
    let is_date = ctx
        .entity
        .field(name)
        .is_some_and(|f| matches!(f.kind, FieldKind::Date | FieldKind::DateTime));
    if is_date {
        Ok(())
    } else {
        Err(ApplicationError::validation(format!(
            "'{name}' is not a date field"
        )))
    }
}

fn record_date(record: &Record, field: &str) -> Option<NaiveDate> {
    let value = record.value(field)?;
    let text = value.as_str()?;
    NaiveDate::parse_from_str(text.get(..10)?, "%Y-%m-%d").ok()
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "Yes".into(),
        Value::Bool(false) => "No".into(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
