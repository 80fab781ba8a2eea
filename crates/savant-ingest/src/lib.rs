// Dataset ingestion: turn an uploaded file into the core's `Dataset`.
//
// CSV is decoded as UTF-8 first; bytes that are not valid UTF-8 fall back to
// Windows-1252 (the WHATWG superset of Latin-1), which covers the exports
// produced by Excel on Windows. Workbooks are read from their first sheet.

pub mod csv_reader;
pub mod error;
pub mod spreadsheet_reader;

pub use csv_reader::{parse_csv_bytes, parse_csv_str};
pub use error::IngestError;
pub use spreadsheet_reader::parse_workbook;

use savant_core::Dataset;
use std::path::Path;
use tracing::info;

/// File formats recognised by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Spreadsheet,
}

impl SourceFormat {
    /// Detect the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" | "txt" => Some(SourceFormat::Csv),
            "xls" | "xlsx" => Some(SourceFormat::Spreadsheet),
            _ => None,
        }
    }
}

/// Load a dataset from disk, dispatching on the file extension.
pub fn load_dataset(path: &Path) -> Result<Dataset, IngestError> {
    let format = SourceFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let dataset = match format {
        SourceFormat::Csv => load_csv(path)?,
        SourceFormat::Spreadsheet => parse_workbook(path)?,
    };
    info!(
        "loaded {}: {} columns, {} rows",
        path.display(),
        dataset.columns().len(),
        dataset.row_count()
    );
    Ok(dataset)
}

fn load_csv(path: &Path) -> Result<Dataset, IngestError> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    parse_csv_bytes(&bytes).map_err(|e| e.with_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_detection() {
        assert_eq!(SourceFormat::from_path(Path::new("a.csv")), Some(SourceFormat::Csv));
        assert_eq!(SourceFormat::from_path(Path::new("a.CSV")), Some(SourceFormat::Csv));
        assert_eq!(
            SourceFormat::from_path(Path::new("b.xlsx")),
            Some(SourceFormat::Spreadsheet)
        );
        assert_eq!(SourceFormat::from_path(Path::new("c.json")), None);
        assert_eq!(SourceFormat::from_path(Path::new("noext")), None);
    }
}
