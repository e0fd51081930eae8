use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::provider::RecordSource;
use crate::error::LoadError;
use crate::records::{Column, RawRow, RawTable, RawValue};

/// Record source backed by a CSV export with a header row.
pub struct CsvSource {
    model: String,
    path: PathBuf,
}

impl CsvSource {
    pub fn new(model: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        CsvSource {
            model: model.into(),
            path: path.into(),
        }
    }
}

impl RecordSource for CsvSource {
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
        debug!("Reading CSV source {}", self.path.display());
        let file = File::open(&self.path)
            .map_err(|e| LoadError::unreadable(&self.model, &self.path, e))?;
        read_csv(&self.model, file).map_err(|e| LoadError::unreadable(&self.model, &self.path, e))
    }
}

/// Parse CSV text into a table. Unrecognised columns are dropped; short rows
/// simply lack the trailing cells.
pub fn read_csv<R: Read>(model: &str, reader: R) -> csv::Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let columns: Vec<Option<Column>> = rdr.headers()?.iter().map(Column::from_header).collect();
    let mut table = RawTable::new(model, columns.iter().flatten().copied());

    for result in rdr.records() {
        let record = result?;
        let mut row = RawRow::new();
        for (column, field) in columns.iter().zip(record.iter()) {
            if let Some(column) = column {
                row.insert(*column, RawValue::from_field(field));
            }
        }
        table.rows.push(row);
    }
    Ok(table)
}
