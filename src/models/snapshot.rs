use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::de::null_as_empty;
use super::{HistoryRecord, ScanHistoryRecord, Template};
use crate::error::{AppError, Result};

/// A user's complete workout state. Export produces it and import replaces
/// the stored state with it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub templates: Vec<Template>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub history: Vec<HistoryRecord>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub scan_history: Vec<ScanHistoryRecord>,
}

impl Snapshot {
    /// Parses an uploaded document. The top level must be an object; any of
    /// the three arrays may be missing.
    pub fn from_json_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(AppError::Validation(
                "Import data must be a JSON object".to_string(),
            ));
        }

        serde_json::from_value(value)
            .map_err(|e| AppError::Validation(format!("Invalid import data: {}", e)))
    }

    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| AppError::Validation(format!("Invalid JSON: {}", e)))?;
        Self::from_json_value(value)
    }
}

/// Row counts written by a successful import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub templates: usize,
    pub exercises: usize,
    pub sets: usize,
    pub history: usize,
    pub scan_history: usize,
}

impl ImportSummary {
    pub fn of(snapshot: &Snapshot) -> Self {
        let exercises = snapshot.templates.iter().flat_map(|t| &t.exercises);
        Self {
            templates: snapshot.templates.len(),
            exercises: exercises.clone().count(),
            sets: exercises.map(|e| e.sets.len()).sum(),
            history: snapshot.history.len(),
            scan_history: snapshot.scan_history.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_is_empty_snapshot() {
        let snapshot = Snapshot::from_json_value(json!({})).unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn test_null_arrays_are_empty() {
        let snapshot = Snapshot::from_json_value(json!({
            "templates": null,
            "history": null,
            "scan_history": null
        }))
        .unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn test_non_object_is_rejected() {
        for value in [json!([]), json!("text"), json!(42), json!(null), json!(true)] {
            let err = Snapshot::from_json_value(value).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let err = Snapshot::from_slice(b"{not json").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_empty_export_shape() {
        let value = serde_json::to_value(Snapshot::default()).unwrap();
        assert_eq!(
            value,
            json!({ "templates": [], "history": [], "scan_history": [] })
        );
    }

    #[test]
    fn test_summary_counts_nested_rows() {
        let snapshot = Snapshot::from_json_value(json!({
            "templates": [
                { "name": "A", "exercises": [
                    { "exercise_name": "x", "order_num": 0, "sets": [{}, {}] },
                    { "exercise_name": "y", "order_num": 1, "sets": [{}] }
                ]},
                { "name": "B" }
            ],
            "history": [{ "action": "done" }],
            "scan_history": []
        }))
        .unwrap();

        assert_eq!(
            ImportSummary::of(&snapshot),
            ImportSummary {
                templates: 2,
                exercises: 2,
                sets: 3,
                history: 1,
                scan_history: 0,
            }
        );
    }
}
