use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl RecordId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("record id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<RecordId> for i64 {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One stored instance of a registered entity. Declared field values live in
/// `data`; the base fields are columns of their own.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: RecordId,
    pub app: String,
    pub model: String,
    pub data: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

impl Record {
    pub fn value(&self, field: &str) -> Option<Value> {
        match field {
            "id" | "pk" => Some(Value::from(self.id.0)),
            "created_at" => Some(Value::String(format_timestamp(self.created_at))),
            "updated_at" => Some(Value::String(format_timestamp(self.updated_at))),
            "is_deleted" => Some(Value::Bool(self.is_deleted)),
            other => self.data.get(other).cloned(),
        }
    }

    /// Flat JSON view of the record: base fields followed by declared values.
    pub fn serialize(&self) -> Map<String, Value> {
        let mut out = Map::with_capacity(self.data.len() + 4);
        out.insert("id".into(), Value::from(self.id.0));
        for (key, value) in &self.data {
            out.insert(key.clone(), value.clone());
        }
        out.insert(
            "created_at".into(),
            Value::String(format_timestamp(self.created_at)),
        );
        out.insert(
            "updated_at".into(),
            Value::String(format_timestamp(self.updated_at)),
        );
        out.insert("is_deleted".into(), Value::Bool(self.is_deleted));
        out
    }
}

/// Fixed-width RFC 3339 so stored timestamps sort lexicographically.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[derive(Debug, Clone)]
pub struct NewRecord {
    pub app: String,
    pub model: String,
    pub data: Map<String, Value>,
    pub created_at: DateTime<Utc>,
}

impl NewRecord {
    pub fn new(
        app: impl Into<String>,
        model: impl Into<String>,
        data: Map<String, Value>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            app: app.into(),
            model: model.into(),
            data,
            created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordUpdate {
    pub id: RecordId,
    pub data: Map<String, Value>,
    pub updated_at: DateTime<Utc>,
}

impl RecordUpdate {
    /// Merge `changes` over the current values of `record`.
    pub fn merged(record: &Record, changes: Map<String, Value>, updated_at: DateTime<Utc>) -> Self {
        let mut data = record.data.clone();
        for (key, value) in changes {
            data.insert(key, value);
        }
        Self {
            id: record.id,
            data,
            updated_at,
        }
    }
}
