use crate::domain::entity::FieldKind;
use crate::domain::record::entity::format_timestamp;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Number, Value};

/// Blank submissions: null, or a string with nothing but whitespace.
pub(super) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Convert a submitted value into the stored representation for `kind`.
/// Blank input must be handled by the caller.
pub(super) fn coerce(kind: FieldKind, choices: &[String], value: &Value) -> Result<Value, String> {
    match kind {
        FieldKind::Text => match value {
            Value::String(s) => Ok(Value::String(s.clone())),
            Value::Number(n) => Ok(Value::String(n.to_string())),
            _ => Err("Enter a text value.".into()),
        },
        FieldKind::Integer => integer(value).map(Value::from),
        FieldKind::ForeignKey => {
            let id = integer(value).map_err(|_| "Select a valid choice.".to_string())?;
            if id <= 0 {
                return Err("Select a valid choice.".into());
            }
            Ok(Value::from(id))
        }
        FieldKind::Decimal => {
            let parsed = match value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            };
            parsed
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| "Enter a number.".to_string())
        }
        FieldKind::Boolean => match value {
            Value::Bool(b) => Ok(Value::Bool(*b)),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "on" | "true" | "1" | "yes" => Ok(Value::Bool(true)),
                "off" | "false" | "0" | "no" => Ok(Value::Bool(false)),
                _ => Err("Enter a boolean value.".into()),
            },
            Value::Number(n) => match n.as_i64() {
                Some(0) => Ok(Value::Bool(false)),
                Some(1) => Ok(Value::Bool(true)),
                _ => Err("Enter a boolean value.".into()),
            },
            _ => Err("Enter a boolean value.".into()),
        },
        FieldKind::Date => value
            .as_str()
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
            .map(|d| Value::String(d.format("%Y-%m-%d").to_string()))
            .ok_or_else(|| "Enter a valid date.".to_string()),
        FieldKind::DateTime => value
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
            .map(|dt| Value::String(format_timestamp(dt.with_timezone(&Utc))))
            .ok_or_else(|| "Enter a valid date/time.".to_string()),
        FieldKind::Choice => match value.as_str() {
            Some(s) if choices.iter().any(|c| c == s) => Ok(Value::String(s.to_string())),
            _ => Err("Select a valid choice.".into()),
        },
        FieldKind::Json => Ok(value.clone()),
    }
}

fn integer(value: &Value) -> Result<i64, String> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| "Enter a whole number.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn checkbox_on_is_true() {
        assert_eq!(coerce(FieldKind::Boolean, &[], &json!("on")), Ok(json!(true)));
        assert_eq!(coerce(FieldKind::Boolean, &[], &json!("off")), Ok(json!(false)));
        assert!(coerce(FieldKind::Boolean, &[], &json!("maybe")).is_err());
    }

    #[test]
    fn numeric_strings_are_parsed() {
        assert_eq!(coerce(FieldKind::Integer, &[], &json!(" 12 ")), Ok(json!(12)));
        assert_eq!(coerce(FieldKind::Decimal, &[], &json!("2.50")), Ok(json!(2.5)));
        assert!(coerce(FieldKind::Integer, &[], &json!("1.5")).is_err());
        assert!(coerce(FieldKind::ForeignKey, &[], &json!(0)).is_err());
    }

    #[test]
    fn choices_and_dates_are_checked() {
        let choices = vec!["hardware".to_string(), "software".to_string()];
        assert!(coerce(FieldKind::Choice, &choices, &json!("hardware")).is_ok());
        assert!(coerce(FieldKind::Choice, &choices, &json!("food")).is_err());
        assert_eq!(
            coerce(FieldKind::Date, &[], &json!("2024-02-29")),
            Ok(json!("2024-02-29"))
        );
        assert!(coerce(FieldKind::Date, &[], &json!("2023-02-29")).is_err());
    }

    #[test]
    fn whitespace_only_is_blank() {
        assert!(is_blank(&json!("   ")));
        assert!(is_blank(&Value::Null));
        assert!(!is_blank(&json!(0)));
    }
}
