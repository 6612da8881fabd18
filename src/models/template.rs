use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::de::{deserialize_flag, deserialize_text, null_as_empty};
use super::{FromSqliteRow, Scalar};

/// A reusable workout plan. `id` is assigned by storage and never read from input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default, skip_deserializing)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub exercises: Vec<NamedExercise>,
}

impl FromSqliteRow for Template {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            exercises: Vec::new(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedExercise {
    #[serde(default, skip_deserializing)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub exercise_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub notes: Option<String>,
    #[serde(default)]
    pub order_num: Option<Scalar>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sets: Vec<ExerciseSet>,
}

impl FromSqliteRow for NamedExercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            exercise_name: row.get("exercise_name")?,
            notes: row.get("notes")?,
            order_num: row.get("order_num")?,
            sets: Vec::new(),
        })
    }
}

/// Weight and reps are stored as sent; the column affinity decides the storage class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    #[serde(default, skip_deserializing)]
    pub id: Option<i64>,
    #[serde(default)]
    pub set_order: Option<Scalar>,
    #[serde(default)]
    pub kg: Option<Scalar>,
    #[serde(default)]
    pub reps: Option<Scalar>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub completed: bool,
}

impl FromSqliteRow for ExerciseSet {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            set_order: row.get("set_order")?,
            kg: row.get("kg")?,
            reps: row.get("reps")?,
            completed: row.get("completed")?,
        })
    }
}
