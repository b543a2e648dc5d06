use crate::domain::errors::DomainResult;
use crate::domain::record::batch::{RecordBatch, SavedBatch};
use crate::domain::record::entity::{NewRecord, Record, RecordId, RecordUpdate};
use crate::domain::record::query::RecordQuery;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait RecordRepository: Send + Sync {
    async fn insert(&self, record: NewRecord) -> DomainResult<Record>;

    async fn update(&self, update: RecordUpdate) -> DomainResult<Record>;

    /// Marks the record deleted; it stays stored but disappears from reads.
    async fn soft_delete(&self, id: RecordId, at: DateTime<Utc>) -> DomainResult<Record>;

    /// Writes a parent and its inline children in one transaction. Nothing is
    /// stored when any write fails.
    async fn save_batch(&self, batch: RecordBatch) -> DomainResult<SavedBatch>;

    /// Live records only.
    async fn find_by_id(&self, app: &str, model: &str, id: RecordId) -> DomainResult<Option<Record>>;

    /// Matching page plus the total number of matches.
    async fn list(&self, query: &RecordQuery) -> DomainResult<(Vec<Record>, u64)>;
}
