use crate::domain::record::entity::RecordId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSearch {
    pub term: String,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter {
    pub field: String,
    pub value: String,
    /// Exact match instead of case-insensitive containment.
    pub exact: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSort {
    pub field: String,
    pub descending: bool,
}

impl RecordSort {
    /// `-name` sorts descending on `name`.
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix('-') {
            Some(field) => Self {
                field: field.to_string(),
                descending: true,
            },
            None => Self {
                field: raw.to_string(),
                descending: false,
            },
        }
    }
}

/// Selection over the live (not soft-deleted) records of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordQuery {
    pub app: String,
    pub model: String,
    pub search: Option<RecordSearch>,
    pub filter: Option<RecordFilter>,
    pub sort: RecordSort,
    pub limit: Option<u32>,
    pub offset: u64,
    /// Keyset bound for descending `(created_at, id)` scans.
    pub before: Option<(String, RecordId)>,
}

impl RecordQuery {
    pub fn new(app: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            model: model.into(),
            search: None,
            filter: None,
            sort: RecordSort::parse("id"),
            limit: None,
            offset: 0,
            before: None,
        }
    }

    pub fn with_search(mut self, term: impl Into<String>, fields: Vec<String>) -> Self {
        self.search = Some(RecordSearch {
            term: term.into(),
            fields,
        });
        self
    }

    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>, exact: bool) -> Self {
        self.filter = Some(RecordFilter {
            field: field.into(),
            value: value.into(),
            exact,
        });
        self
    }

    pub fn with_sort(mut self, sort: RecordSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn paginate(mut self, limit: u32, offset: u64) -> Self {
        self.limit = Some(limit);
        self.offset = offset;
        self
    }

    pub fn before(mut self, created_at: String, id: RecordId) -> Self {
        self.before = Some((created_at, id));
        self
    }
}
