use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Record identifier: milliseconds since the Unix epoch at creation time.
///
/// Two records created in the same millisecond get the same id; nothing
/// checks for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(RecordId)
    }
}

/// A stored record: the id plus the entity's own fields, serialized flat as
/// `{"id": ..., "field": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: T,
}

impl<T> Record<T> {
    pub fn new(id: RecordId, fields: T) -> Self {
        Self { id, fields }
    }
}

impl<T> Deref for Record<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.fields
    }
}

impl<T> DerefMut for Record<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Note {
        title: String,
        page_count: u32,
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = Record::new(
            RecordId(1718000000000),
            Note {
                title: "Gram Sabha minutes".to_string(),
                page_count: 4,
            },
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1718000000000i64, "title": "Gram Sabha minutes", "pageCount": 4})
        );
    }

    #[test]
    fn test_record_ignores_unknown_fields() {
        let record: Record<Note> =
            serde_json::from_str(r#"{"id":5,"title":"x","pageCount":1,"legacy":true}"#).unwrap();
        assert_eq!(record.id, RecordId(5));
        assert_eq!(record.title, "x");
    }

    #[test]
    fn test_record_id_parse() {
        assert_eq!(" 42 ".parse::<RecordId>().unwrap(), RecordId(42));
        assert!("abc".parse::<RecordId>().is_err());
    }
}
