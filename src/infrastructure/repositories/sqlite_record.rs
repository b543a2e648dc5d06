use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::record::{
    ChildWrite, NewRecord, ParentWrite, Record, RecordBatch, RecordFilter, RecordId, RecordQuery,
    RecordRepository, RecordSearch, RecordUpdate, SavedBatch, format_timestamp, link_to_parent,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

const RECORD_COLUMNS: &str = "id, app, model, data, created_at, updated_at, is_deleted";

/// Entity records share one table; declared fields live in the `data` JSON column.
#[derive(Clone)]
pub struct SqliteRecordRepository {
    pool: SqlitePool,
}

impl SqliteRecordRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

async fn fetch_row(conn: &mut SqliteConnection, id: RecordId) -> DomainResult<Record> {
    let row = sqlx::query_as::<_, RecordRow>(&format!(
        "SELECT {RECORD_COLUMNS} FROM records WHERE id = ?"
    ))
    .bind(id.0)
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_sqlx)?
    .ok_or_else(|| DomainError::NotFound(format!("record {id}")))?;
    Record::try_from(row)
}

async fn insert_row(conn: &mut SqliteConnection, record: &NewRecord) -> DomainResult<Record> {
    let at = format_timestamp(record.created_at);
    let row = sqlx::query_as::<_, RecordRow>(&format!(
        "INSERT INTO records (app, model, data, created_at, updated_at, is_deleted)
         VALUES (?, ?, ?, ?, ?, 0)
         RETURNING {RECORD_COLUMNS}"
    ))
    .bind(&record.app)
    .bind(&record.model)
    .bind(encode_data(&record.data)?)
    .bind(&at)
    .bind(&at)
    .fetch_one(&mut *conn)
    .await
    .map_err(map_sqlx)?;
    Record::try_from(row)
}

async fn update_row(conn: &mut SqliteConnection, update: &RecordUpdate) -> DomainResult<Record> {
    let result = sqlx::query(
        "UPDATE records SET data = ?, updated_at = ? WHERE id = ? AND is_deleted = 0",
    )
    .bind(encode_data(&update.data)?)
    .bind(format_timestamp(update.updated_at))
    .bind(update.id.0)
    .execute(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    if result.rows_affected() == 0 {
        return Err(DomainError::NotFound(format!("record {}", update.id)));
    }
    fetch_row(conn, update.id).await
}

async fn soft_delete_row(
    conn: &mut SqliteConnection,
    id: RecordId,
    at: DateTime<Utc>,
) -> DomainResult<Record> {
    let result = sqlx::query(
        "UPDATE records SET is_deleted = 1, updated_at = ? WHERE id = ? AND is_deleted = 0",
    )
    .bind(format_timestamp(at))
    .bind(id.0)
    .execute(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    if result.rows_affected() == 0 {
        return Err(DomainError::NotFound(format!("record {id}")));
    }
    fetch_row(conn, id).await
}

#[derive(Debug, FromRow)]
struct RecordRow {
    id: i64,
    app: String,
    model: String,
    data: String,
    created_at: String,
    updated_at: String,
    is_deleted: bool,
}

fn parse_timestamp(raw: &str) -> DomainResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| DomainError::Persistence(format!("invalid stored timestamp '{raw}': {e}")))
}

impl TryFrom<RecordRow> for Record {
    type Error = DomainError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let data: Map<String, Value> = serde_json::from_str(&row.data)
            .map_err(|e| DomainError::Persistence(format!("invalid record data: {e}")))?;
        Ok(Record {
            id: RecordId::new(row.id)?,
            app: row.app,
            model: row.model,
            data,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
            is_deleted: row.is_deleted,
        })
    }
}

fn encode_data(data: &Map<String, Value>) -> DomainResult<String> {
    serde_json::to_string(data)
        .map_err(|e| DomainError::Persistence(format!("cannot encode record data: {e}")))
}

/// SQL expression yielding the value of `field` for a row.
fn push_field(builder: &mut QueryBuilder<'_, Sqlite>, field: &str) {
    match field {
        "id" | "pk" => {
            builder.push("id");
        }
        "created_at" | "updated_at" | "is_deleted" => {
            builder.push(field);
        }
        other => {
            builder.push("json_extract(data, ");
            builder.push_bind(format!("$.\"{other}\""));
            builder.push(")");
        }
    }
}

fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn push_contains(builder: &mut QueryBuilder<'_, Sqlite>, field: &str, term: &str) {
    builder.push("lower(CAST(");
    push_field(builder, field);
    builder.push(" AS TEXT)) LIKE ");
    builder.push_bind(like_pattern(term));
    builder.push(" ESCAPE '\\'");
}

fn push_search(builder: &mut QueryBuilder<'_, Sqlite>, search: &RecordSearch) {
    if search.fields.is_empty() {
        builder.push(" AND 0");
        return;
    }
    builder.push(" AND (");
    for (index, field) in search.fields.iter().enumerate() {
        if index > 0 {
            builder.push(" OR ");
        }
        push_contains(builder, field, &search.term);
    }
    builder.push(")");
}

fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &RecordFilter) {
    builder.push(" AND ");
    if filter.exact {
        builder.push("CAST(");
        push_field(builder, &filter.field);
        builder.push(" AS TEXT) = ");
        builder.push_bind(filter.value.clone());
    } else {
        push_contains(builder, &filter.field, &filter.value);
    }
}

fn push_conditions(builder: &mut QueryBuilder<'_, Sqlite>, query: &RecordQuery) {
    builder.push(" WHERE is_deleted = 0 AND app = ");
    builder.push_bind(query.app.clone());
    builder.push(" AND model = ");
    builder.push_bind(query.model.clone());

    if let Some(search) = &query.search {
        push_search(builder, search);
    }
    if let Some(filter) = &query.filter {
        push_filter(builder, filter);
    }
    if let Some((created_at, id)) = &query.before {
        builder.push(" AND (created_at < ");
        builder.push_bind(created_at.clone());
        builder.push(" OR (created_at = ");
        builder.push_bind(created_at.clone());
        builder.push(" AND id < ");
        builder.push_bind(id.0);
        builder.push("))");
    }
}

#[async_trait]
impl RecordRepository for SqliteRecordRepository {
    async fn insert(&self, record: NewRecord) -> DomainResult<Record> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        insert_row(&mut conn, &record).await
    }

    async fn update(&self, update: RecordUpdate) -> DomainResult<Record> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        update_row(&mut conn, &update).await
    }

    async fn soft_delete(&self, id: RecordId, at: DateTime<Utc>) -> DomainResult<Record> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        soft_delete_row(&mut conn, id, at).await
    }

    async fn save_batch(&self, batch: RecordBatch) -> DomainResult<SavedBatch> {
        let parent_action = batch.parent_action();
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let parent = match &batch.parent {
            ParentWrite::Insert(record) => insert_row(&mut tx, record).await?,
            ParentWrite::Update(update) => update_row(&mut tx, update).await?,
        };
        let mut changes = Vec::with_capacity(batch.children.len() + 1);
        changes.push((parent_action, parent.clone()));

        for child in batch.children {
            let action = child.action();
            let stored = match child {
                ChildWrite::Insert {
                    mut record,
                    parent_field,
                } => {
                    link_to_parent(&mut record, &parent_field, parent.id);
                    insert_row(&mut tx, &record).await?
                }
                ChildWrite::Update(update) => update_row(&mut tx, &update).await?,
                ChildWrite::Delete { id, at } => soft_delete_row(&mut tx, id, at).await?,
            };
            changes.push((action, stored));
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(SavedBatch { parent, changes })
    }

    async fn find_by_id(&self, app: &str, model: &str, id: RecordId) -> DomainResult<Option<Record>> {
        let row = sqlx::query_as::<_, RecordRow>(&format!(
            "SELECT {RECORD_COLUMNS} FROM records
             WHERE id = ? AND app = ? AND model = ? AND is_deleted = 0"
        ))
        .bind(id.0)
        .bind(app)
        .bind(model)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        row.map(Record::try_from).transpose()
    }

    async fn list(&self, query: &RecordQuery) -> DomainResult<(Vec<Record>, u64)> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(1) FROM records");
        push_conditions(&mut count, query);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut select = QueryBuilder::<Sqlite>::new(format!("SELECT {RECORD_COLUMNS} FROM records"));
        push_conditions(&mut select, query);
        let direction = if query.sort.descending { "DESC" } else { "ASC" };
        select.push(" ORDER BY ");
        push_field(&mut select, &query.sort.field);
        select.push(format!(" {direction}, id {direction}"));
        if let Some(limit) = query.limit {
            select.push(" LIMIT ");
            select.push_bind(i64::from(limit));
            select.push(" OFFSET ");
            let offset = i64::try_from(query.offset)
                .map_err(|_| DomainError::Validation("page offset is too large".into()))?;
            select.push_bind(offset);
        }

        let rows = select
            .build_query_as::<RecordRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        let records = rows
            .into_iter()
            .map(Record::try_from)
            .collect::<DomainResult<Vec<_>>>()?;

        let total = u64::try_from(total)
            .map_err(|_| DomainError::Persistence(format!("invalid record count {total}")))?;
        Ok((records, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_patterns_escape_wildcards() {
        assert_eq!(like_pattern("Bolt"), "%bolt%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }
}
