use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::de::deserialize_text;
use super::{FromSqliteRow, Scalar};

/// A scanned food product. Nutrient values are per 100g.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanHistoryRecord {
    #[serde(default, skip_deserializing)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub barcode: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub calories: Option<Scalar>,
    #[serde(default)]
    pub protein: Option<Scalar>,
    #[serde(default)]
    pub carbohydrates: Option<Scalar>,
    #[serde(default)]
    pub fat: Option<Scalar>,
    #[serde(default)]
    pub fiber: Option<Scalar>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub scanned_at: Option<String>,
}

impl FromSqliteRow for ScanHistoryRecord {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            barcode: row.get("barcode")?,
            product_name: row.get("product_name")?,
            image_url: row.get("image_url")?,
            calories: row.get("calories")?,
            protein: row.get("protein")?,
            carbohydrates: row.get("carbohydrates")?,
            fat: row.get("fat")?,
            fiber: row.get("fiber")?,
            scanned_at: row.get("scanned_at")?,
        })
    }
}
