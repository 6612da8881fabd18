use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection};

use crate::models::{FromSqliteRow, ScanHistoryRecord};

pub fn find_by_user(conn: &Connection, user_id: i64) -> rusqlite::Result<Vec<ScanHistoryRecord>> {
    let mut stmt = conn.prepare("SELECT * FROM scan_history WHERE user_id = ? ORDER BY id")?;
    let records = stmt
        .query_map([user_id], ScanHistoryRecord::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(records)
}

pub fn delete_by_user(conn: &Connection, user_id: i64) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM scan_history WHERE user_id = ?", [user_id])
}

pub fn insert(conn: &Connection, user_id: i64, record: &ScanHistoryRecord) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO scan_history (
            user_id, barcode, product_name, image_url,
            calories, protein, carbohydrates, fat, fiber, scanned_at
         ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            user_id,
            record.barcode,
            record.product_name,
            record.image_url,
            record.calories,
            record.protein,
            record.carbohydrates,
            record.fat,
            record.fiber,
            record
                .scanned_at
                .clone()
                .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
