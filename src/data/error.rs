use std::path::PathBuf;

use thiserror::Error;

use super::model::FilterSelection;

/// Failures surfaced by the data layer to the UI.
#[derive(Debug, Error)]
pub enum DataError {
    /// The source file cannot be read or does not match the expected schema.
    #[error("dataset unavailable ({}): {reason}", .path.display())]
    DataUnavailable { path: PathBuf, reason: String },

    /// The selection matched no games; metrics cannot be derived.
    #[error("no games match {selection}")]
    EmptySelection { selection: String },
}

impl DataError {
    pub fn unavailable(path: impl Into<PathBuf>, err: &anyhow::Error) -> Self {
        DataError::DataUnavailable {
            path: path.into(),
            reason: format!("{err:#}"),
        }
    }

    pub fn empty(selection: Option<&FilterSelection>) -> Self {
        DataError::EmptySelection {
            selection: selection
                .map(|s| s.to_string())
                .unwrap_or_else(|| "the current selection".to_string()),
        }
    }
}
