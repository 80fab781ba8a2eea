use savant_core::dataset::DatasetError;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("spreadsheet error in {path}: {source}")]
    Spreadsheet {
        path: PathBuf,
        source: calamine::Error,
    },

    #[error("unsupported file format: {path} (upload a .csv, .xls or .xlsx export)")]
    UnsupportedFormat { path: PathBuf },

    #[error("{path} has no header row")]
    EmptyFile { path: String },

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

impl IngestError {
    /// Attach the source path to errors raised while parsing in-memory bytes.
    pub(crate) fn with_path(self, path: &Path) -> Self {
        let shown = path.display().to_string();
        match self {
            IngestError::Csv { source, .. } => IngestError::Csv {
                path: shown,
                source,
            },
            IngestError::EmptyFile { .. } => IngestError::EmptyFile { path: shown },
            other => other,
        }
    }
}
