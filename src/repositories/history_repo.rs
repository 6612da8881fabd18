use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection};

use crate::models::{FromSqliteRow, HistoryRecord};

pub fn find_by_user(conn: &Connection, user_id: i64) -> rusqlite::Result<Vec<HistoryRecord>> {
    let mut stmt = conn.prepare("SELECT * FROM history WHERE user_id = ? ORDER BY id")?;
    let records = stmt
        .query_map([user_id], HistoryRecord::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(records)
}

pub fn delete_by_user(conn: &Connection, user_id: i64) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM history WHERE user_id = ?", [user_id])
}

/// Keeps the supplied `createdAt` text as is; records without one are stamped now.
pub fn insert(conn: &Connection, user_id: i64, record: &HistoryRecord) -> rusqlite::Result<i64> {
    let details = record
        .details_column()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    conn.execute(
        "INSERT INTO history (user_id, action, created_at, workout_details) VALUES (?, ?, ?, ?)",
        params![
            user_id,
            record.action,
            record
                .created_at
                .clone()
                .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            details
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
