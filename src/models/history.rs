use rusqlite::types::Type;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::de::deserialize_text;
use super::FromSqliteRow;

/// One completed workout session. `workout_details` is kept as the client sent it.
///
/// `createdAt` is stored verbatim, so `2024-05-01T07:30:00`,
/// `2024-05-01 07:30:00` and full RFC 3339 strings all export unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(default, skip_deserializing)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub action: Option<String>,
    #[serde(rename = "createdAt", default, deserialize_with = "deserialize_text")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub workout_details: Value,
}

impl HistoryRecord {
    /// JSON text for the `workout_details` column; `null` is stored as SQL NULL.
    pub fn details_column(&self) -> Result<Option<String>, serde_json::Error> {
        match &self.workout_details {
            Value::Null => Ok(None),
            details => serde_json::to_string(details).map(Some),
        }
    }
}

impl FromSqliteRow for HistoryRecord {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let details: Option<String> = row.get("workout_details")?;
        let workout_details = match details {
            None => Value::Null,
            Some(text) => serde_json::from_str(&text).map_err(|e| {
                let idx = row.as_ref().column_index("workout_details").unwrap_or_default();
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })?,
        };

        Ok(Self {
            id: row.get("id")?,
            action: row.get("action")?,
            created_at: row.get("created_at")?,
            workout_details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_created_at_uses_camel_case() {
        let record: HistoryRecord = serde_json::from_value(json!({
            "action": "completed",
            "createdAt": "2024-03-01T08:30:00Z",
            "workout_details": { "name": "Push Day" }
        }))
        .unwrap();

        assert_eq!(record.created_at.as_deref(), Some("2024-03-01T08:30:00Z"));
        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["createdAt"], "2024-03-01T08:30:00Z");
        assert!(out.get("created_at").is_none());
    }

    #[test]
    fn test_created_at_is_not_reformatted() {
        for stamp in ["2024-05-01T07:30:00", "2024-05-01 07:30:00"] {
            let record: HistoryRecord =
                serde_json::from_value(json!({ "action": "completed", "createdAt": stamp }))
                    .unwrap();
            assert_eq!(record.created_at.as_deref(), Some(stamp));
        }
    }

    #[test]
    fn test_details_column() {
        let mut record = HistoryRecord::default();
        assert_eq!(record.details_column().unwrap(), None);

        record.workout_details = json!({ "exercises": [] });
        assert_eq!(
            record.details_column().unwrap().as_deref(),
            Some(r#"{"exercises":[]}"#)
        );
    }

    #[test]
    fn test_unparseable_details_are_an_error() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let mut stmt = conn
            .prepare(
                "SELECT 1 AS id, 'completed' AS action, '2024-05-01' AS created_at,
                        'not json' AS workout_details",
            )
            .unwrap();
        let result = stmt.query_row([], |row| HistoryRecord::from_row(row));

        assert!(matches!(
            result,
            Err(rusqlite::Error::FromSqlConversionFailure(_, Type::Text, _))
        ));
    }
}
