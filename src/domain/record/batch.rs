use crate::domain::events::EventAction;
use crate::domain::record::entity::{NewRecord, Record, RecordId, RecordUpdate};
use chrono::{DateTime, Utc};
use serde_json::Value;

#[derive(Debug, Clone)]
pub enum ParentWrite {
    Insert(NewRecord),
    Update(RecordUpdate),
}

/// A child row written together with its parent.
#[derive(Debug, Clone)]
pub enum ChildWrite {
    /// `parent_field` receives the parent's id once the parent is stored.
    Insert {
        record: NewRecord,
        parent_field: String,
    },
    Update(RecordUpdate),
    Delete {
        id: RecordId,
        at: DateTime<Utc>,
    },
}

impl ChildWrite {
    pub fn action(&self) -> EventAction {
        match self {
            Self::Insert { .. } => EventAction::Created,
            Self::Update(_) => EventAction::Updated,
            Self::Delete { .. } => EventAction::Deleted,
        }
    }
}

/// A parent write plus its inline children, applied all-or-nothing.
#[derive(Debug, Clone)]
pub struct RecordBatch {
    pub parent: ParentWrite,
    pub children: Vec<ChildWrite>,
}

impl RecordBatch {
    pub fn new(parent: ParentWrite) -> Self {
        Self {
            parent,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = ChildWrite>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn parent_action(&self) -> EventAction {
        match self.parent {
            ParentWrite::Insert(_) => EventAction::Created,
            ParentWrite::Update(_) => EventAction::Updated,
        }
    }
}

/// Stored rows of a committed batch, parent first, each with the change it underwent.
#[derive(Debug, Clone)]
pub struct SavedBatch {
    pub parent: Record,
    pub changes: Vec<(EventAction, Record)>,
}

/// Point a child insert at the stored parent.
pub fn link_to_parent(record: &mut NewRecord, parent_field: &str, parent: RecordId) {
    record
        .data
        .insert(parent_field.to_string(), Value::from(parent.0));
}
