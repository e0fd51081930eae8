use std::path::PathBuf;
use thiserror::Error;

/// Failures loading record sources. Only fatal when every source fails.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("source '{model}' not found at {}", path.display())]
    SourceMissing { model: String, path: PathBuf },

    #[error("source '{model}' at {} could not be read: {reason}", path.display())]
    SourceUnreadable {
        model: String,
        path: PathBuf,
        reason: String,
    },

    #[error("no record source could be loaded")]
    NoSourcesLoaded,
}

impl LoadError {
    pub fn unreadable(model: &str, path: &std::path::Path, reason: impl ToString) -> Self {
        LoadError::SourceUnreadable {
            model: model.to_string(),
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}
