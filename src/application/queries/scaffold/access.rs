use super::ModelContext;
use crate::{
    application::{dto::RecordDto, error::{ApplicationError, ApplicationResult}},
    domain::{
        configuration::permissions::{can_read_model, can_write_model},
        record::Record,
        user::Principal,
    },
};
use serde_json::{Map, Value};

impl ModelContext {
    pub fn label(&self) -> String {
        format!("{}.{}", self.entity.app_label(), self.entity.model_name())
    }

    pub fn ensure_readable(&self, principal: &Principal) -> ApplicationResult<()> {
        if can_read_model(principal, &self.config) {
            Ok(())
        } else {
            Err(ApplicationError::forbidden(format!(
                "missing read permission on {}",
                self.label()
            )))
        }
    }

    pub fn ensure_writable(&self, principal: &Principal) -> ApplicationResult<()> {
        if self.entity.read_only() {
            return Err(ApplicationError::forbidden(format!("{} is read-only", self.label())));
        }
        if can_write_model(principal, &self.config) {
            Ok(())
        } else {
            Err(ApplicationError::forbidden(format!(
                "missing write permission on {}",
                self.label()
            )))
        }
    }

    /// Project `record` onto `fields`, evaluating computed properties.
    pub fn project(&self, record: &Record, fields: &[String]) -> RecordDto {
        let serialized = record.serialize();
        let mut values = Map::with_capacity(fields.len());
        for name in fields {
            let value = record
                .value(name)
                .or_else(|| self.entity.compute(name, &serialized))
                .unwrap_or(Value::Null);
            values.insert(name.clone(), value);
        }
        RecordDto {
            id: record.id.into(),
            values,
        }
    }
}
