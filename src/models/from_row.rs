use rusqlite::Row;

/// Builds a model from a row selected by name, so column order does not matter.
pub trait FromSqliteRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}
