pub mod csv_file;
pub mod provider;
pub mod sqlite;

pub use csv_file::CsvSource;
pub use provider::RecordSource;
pub use sqlite::SqliteSource;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{error, info};

use crate::error::LoadError;
use crate::records::RawTable;

/// A configured source: `NAME=PATH`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub model: String,
    pub path: PathBuf,
}

impl FromStr for SourceSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (model, path) = s
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=PATH, got '{}'", s))?;
        let (model, path) = (model.trim(), path.trim());
        if model.is_empty() || path.is_empty() {
            return Err(format!("expected NAME=PATH, got '{}'", s));
        }
        Ok(SourceSpec {
            model: model.to_string(),
            path: PathBuf::from(path),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadedSource {
    pub model: String,
    pub rows: usize,
}

/// Outcome of loading all configured sources.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub loaded: Vec<LoadedSource>,
    pub failures: Vec<String>,
    pub loaded_at: DateTime<Utc>,
}

/// Pick a source implementation by file extension.
pub fn source_for(spec: &SourceSpec, sheet: &str) -> Result<Box<dyn RecordSource>, LoadError> {
    let ext = spec
        .path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("csv") => Ok(Box::new(CsvSource::new(&spec.model, &spec.path))),
        Some("db" | "sqlite" | "sqlite3") => {
            Ok(Box::new(SqliteSource::new(&spec.model, &spec.path, sheet)))
        }
        _ => Err(LoadError::unreadable(
            &spec.model,
            &spec.path,
            "unsupported file type (expected .csv, .db, .sqlite or .sqlite3)",
        )),
    }
}

/// Load every configured source, skipping the ones that fail.
pub fn load_all(specs: &[SourceSpec], sheet: &str) -> Result<(Vec<RawTable>, LoadReport), LoadError> {
    collect_tables(specs.iter().map(|spec| {
        let source = source_for(spec, sheet)?;
        info!("Loading '{}' from {}", source.model(), source.path().display());
        source.read_table()
    }))
}

/// Partial-success aggregation: failures are logged and reported, and only
/// an outcome with no loaded table at all is an error.
pub fn collect_tables(
    results: impl IntoIterator<Item = Result<RawTable, LoadError>>,
) -> Result<(Vec<RawTable>, LoadReport), LoadError> {
    let mut tables = Vec::new();
    let mut loaded = Vec::new();
    let mut failures = Vec::new();

    for result in results {
        match result {
            Ok(table) => {
                info!("Loaded {} row(s) for '{}'", table.rows.len(), table.model_name);
                loaded.push(LoadedSource {
                    model: table.model_name.clone(),
                    rows: table.rows.len(),
                });
                tables.push(table);
            }
            Err(e) => {
                error!("{}", e);
                failures.push(e.to_string());
            }
        }
    }

    if tables.is_empty() {
        return Err(LoadError::NoSourcesLoaded);
    }
    Ok((
        tables,
        LoadReport {
            loaded,
            failures,
            loaded_at: Utc::now(),
        },
    ))
}
