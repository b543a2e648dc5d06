use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::record::RecordId;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};

/// Keyset position in the newest-first log listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessageCursor {
    pub created_at: DateTime<Utc>,
    pub id: RecordId,
}

impl LogMessageCursor {
    pub fn new(created_at: DateTime<Utc>, id: RecordId) -> Self {
        Self { created_at, id }
    }

    pub fn encode(&self) -> String {
        let raw = format!("{}|{}", self.created_at.to_rfc3339(), self.id.0);
        URL_SAFE_NO_PAD.encode(raw.as_bytes())
    }

    pub fn decode(token: &str) -> DomainResult<Self> {
        let invalid = || DomainError::Validation("invalid cursor token".into());
        let bytes = URL_SAFE_NO_PAD.decode(token).map_err(|_| invalid())?;
        let raw = String::from_utf8(bytes).map_err(|_| invalid())?;
        let (created_at, id) = raw.split_once('|').ok_or_else(invalid)?;
        let created_at = DateTime::parse_from_rfc3339(created_at)
            .map_err(|_| invalid())?
            .with_timezone(&Utc);
        let id = id.parse::<i64>().map_err(|_| invalid())?;
        Ok(Self::new(created_at, RecordId(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn decode_reverses_encode() {
        let at = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let cursor = LogMessageCursor::new(at, RecordId(42));
        let decoded = LogMessageCursor::decode(&cursor.encode()).unwrap();
        assert_eq!(decoded, cursor);
    }

    #[test]
    fn garbage_is_a_validation_error() {
        for token in ["***", "bm9waXBl", ""] {
            assert!(matches!(
                LogMessageCursor::decode(token),
                Err(DomainError::Validation(_))
            ));
        }
    }
}
