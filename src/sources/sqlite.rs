use rusqlite::{types::Value, Connection, OpenFlags};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::provider::RecordSource;
use crate::error::LoadError;
use crate::records::{Column, RawRow, RawTable, RawValue};

/// Record source backed by one table of an SQLite file, opened read-only.
pub struct SqliteSource {
    model: String,
    path: PathBuf,
    table: String,
}

impl SqliteSource {
    pub fn new(model: impl Into<String>, path: impl Into<PathBuf>, table: impl Into<String>) -> Self {
        SqliteSource {
            model: model.into(),
            path: path.into(),
            table: table.into(),
        }
    }
}

impl RecordSource for SqliteSource {
    fn model(&self) -> &str {
        &self.model
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<RawTable, LoadError> {
        if !self.path.exists() {
            return Err(LoadError::SourceMissing {
                model: self.model.clone(),
                path: self.path.clone(),
            });
        }
        debug!(
            "Reading SQLite source {} (table '{}')",
            self.path.display(),
            self.table
        );
        let conn = Connection::open_with_flags(&self.path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| LoadError::unreadable(&self.model, &self.path, e))?;
        read_sqlite(&self.model, &conn, &self.table)
            .map_err(|e| LoadError::unreadable(&self.model, &self.path, e))
    }
}

/// Read every row of `table`. Column names are matched like CSV headers.
pub fn read_sqlite(model: &str, conn: &Connection, table: &str) -> rusqlite::Result<RawTable> {
    let sql = format!("SELECT * FROM \"{}\"", table.replace('"', "\"\""));
    let mut stmt = conn.prepare(&sql)?;
    let columns: Vec<Option<Column>> = stmt
        .column_names()
        .into_iter()
        .map(Column::from_header)
        .collect();
    let mut raw = RawTable::new(model, columns.iter().flatten().copied());

    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let mut cells = RawRow::new();
        for (idx, column) in columns.iter().enumerate() {
            if let Some(column) = column {
                let value: Value = row.get(idx)?;
                cells.insert(*column, map_value(value));
            }
        }
        raw.rows.push(cells);
    }
    Ok(raw)
}

fn map_value(value: Value) -> RawValue {
    match value {
        Value::Null | Value::Blob(_) => RawValue::Empty,
        Value::Integer(n) => RawValue::Number(n as f64),
        Value::Real(f) if f.is_finite() => RawValue::Number(f),
        Value::Real(_) => RawValue::Empty,
        Value::Text(s) => RawValue::from_field(&s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE "in" (
                "bet"             TEXT,
                "win probability" REAL,
                "dtm"             INTEGER,
                "bet result"      TEXT,
                "model_version"   TEXT
            );
            INSERT INTO "in" VALUES ('Lakers HOME -3.5', 61.5, 4, 'WIN', 'v2');
            INSERT INTO "in" VALUES (NULL, NULL, -12, 'LOSS', 'v2');
            INSERT INTO "in" VALUES ('Over 220', '57', NULL, NULL, NULL);
            "#,
        )
        .unwrap();
        conn
    }

    #[test]
    fn reads_rows_and_recognised_columns() {
        let conn = sheet();
        let table = read_sqlite("Jebron Lames", &conn, "in").unwrap();
        assert_eq!(table.model_name, "Jebron Lames");
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.columns.len(), 4);
        assert!(table.has(Column::BetText));
        assert!(!table.has(Column::HomeAway));

        assert_eq!(table.rows[0].text(Column::BetText).as_deref(), Some("Lakers HOME -3.5"));
        assert_eq!(table.rows[0].number(Column::WinProbability), Some(61.5));
        assert_eq!(table.rows[1].text(Column::BetText), None);
        assert_eq!(table.rows[1].number(Column::Dtm), Some(-12.0));
        assert_eq!(table.rows[2].number(Column::WinProbability), Some(57.0));
        assert_eq!(table.rows[2].text(Column::BetResult), None);
    }

    #[test]
    fn missing_table_is_an_error() {
        let conn = sheet();
        assert!(read_sqlite("Jebron Lames", &conn, "out").is_err());
    }

    #[test]
    fn missing_file_is_source_missing() {
        let source = SqliteSource::new("Nobody", "/nonexistent/dir/nobody.db", "in");
        assert!(matches!(
            source.read_table(),
            Err(LoadError::SourceMissing { .. })
        ));
    }
}
