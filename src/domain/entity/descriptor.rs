use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    Boolean,
    Date,
    DateTime,
    ForeignKey,
    Choice,
    Json,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Decimal => "decimal",
            FieldKind::Boolean => "boolean",
            FieldKind::Date => "date",
            FieldKind::DateTime => "date_time",
            FieldKind::ForeignKey => "foreign_key",
            FieldKind::Choice => "choice",
            FieldKind::Json => "json",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Introspected shape of one entity field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub verbose_name: String,
    pub auto_created: bool,
    pub one_to_one: bool,
    pub many_to_many: bool,
    pub related_model: Option<String>,
    pub required: bool,
    pub choices: Vec<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        Self {
            verbose_name: humanize(&name),
            name,
            kind,
            auto_created: false,
            one_to_one: false,
            many_to_many: false,
            related_model: None,
            required: false,
            choices: Vec::new(),
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub fn decimal(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Decimal)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Date)
    }

    pub fn date_time(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::DateTime)
    }

    pub fn json(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Json)
    }

    pub fn choice<I, S>(name: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut field = Self::new(name, FieldKind::Choice);
        field.choices = choices.into_iter().map(Into::into).collect();
        field
    }

    pub fn foreign_key(name: impl Into<String>, related_model: impl Into<String>) -> Self {
        let mut field = Self::new(name, FieldKind::ForeignKey);
        field.related_model = Some(related_model.into());
        field
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn verbose(mut self, verbose_name: impl Into<String>) -> Self {
        self.verbose_name = verbose_name.into();
        self
    }

    pub fn auto_created(mut self) -> Self {
        self.auto_created = true;
        self
    }

    pub fn one_to_one(mut self) -> Self {
        self.one_to_one = true;
        self
    }

    pub fn many_to_many(mut self) -> Self {
        self.many_to_many = true;
        self
    }

    pub fn is_relation(&self) -> bool {
        self.related_model.is_some() || self.one_to_one || self.many_to_many
    }

    /// Whether the field can take part in generated forms and lists at all.
    pub fn is_configurable(&self) -> bool {
        !(self.auto_created || self.one_to_one || self.many_to_many)
    }

    /// Fields every entity carries, maintained by the record store.
    pub fn base_fields() -> Vec<Self> {
        vec![
            Self::integer("id").verbose("ID").auto_created(),
            Self::date_time("created_at"),
            Self::date_time("updated_at"),
            Self::boolean("is_deleted"),
        ]
    }
}

/// `stock_quantity` -> `stock quantity`, `PartVendor` -> `part vendor`.
pub fn humanize(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch == '_' {
            out.push(' ');
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() {
            if prev_lower {
                out.push(' ');
            }
            out.extend(ch.to_lowercase());
            prev_lower = false;
        } else {
            out.push(ch);
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_handles_snake_and_camel_case() {
        assert_eq!(humanize("stock_quantity"), "stock quantity");
        assert_eq!(humanize("PartVendor"), "part vendor");
        assert_eq!(humanize("LogMessage"), "log message");
        assert_eq!(humanize("id"), "id");
    }

    #[test]
    fn relation_flags_exclude_from_configuration() {
        assert!(!FieldDescriptor::integer("id").auto_created().is_configurable());
        assert!(!FieldDescriptor::foreign_key("profile", "Profile").one_to_one().is_configurable());
        assert!(FieldDescriptor::foreign_key("part", "Part").is_configurable());
        assert!(FieldDescriptor::foreign_key("part", "Part").is_relation());
    }
}
