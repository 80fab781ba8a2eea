// CSV -> Dataset with UTF-8 / Windows-1252 decoding.

use crate::error::IngestError;
use savant_core::{Cell, Column, Dataset};
use std::borrow::Cow;
use tracing::{debug, warn};

/// Label used for in-memory input in error messages.
const IN_MEMORY: &str = "<memory>";

/// Decode raw bytes: UTF-8 (BOM stripped), else Windows-1252.
pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(e) => {
            warn!("input is not valid UTF-8 ({e}), decoding as Windows-1252");
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            text
        }
    }
}

/// Parse CSV bytes into a dataset.
pub fn parse_csv_bytes(bytes: &[u8]) -> Result<Dataset, IngestError> {
    parse_csv_str(&decode(bytes))
}

/// Parse CSV text into a dataset.
///
/// Short rows are padded with empty cells and surplus fields are dropped so
/// every column keeps the header row's width.
pub fn parse_csv_str(text: &str) -> Result<Dataset, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() {
        return Err(IngestError::EmptyFile {
            path: IN_MEMORY.into(),
        });
    }

    let mut columns: Vec<Vec<Cell>> = vec![Vec::new(); headers.len()];
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        if record.len() != headers.len() {
            debug!(
                "row {} has {} fields, expected {}",
                line + 2,
                record.len(),
                headers.len()
            );
        }
        for (i, cells) in columns.iter_mut().enumerate() {
            cells.push(record.get(i).map_or(Cell::Empty, infer_cell));
        }
    }

    let columns = headers
        .into_iter()
        .zip(columns)
        .map(|(name, cells)| Column::new(name, cells))
        .collect();

    Ok(Dataset::new(columns)?)
}

/// Blank -> Empty, finite number -> Number, anything else -> Text.
pub(crate) fn infer_cell(raw: &str) -> Cell {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Cell::Empty;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Cell::Number(v),
        _ => Cell::Text(trimmed.to_string()),
    }
}

fn csv_error(source: csv::Error) -> IngestError {
    IngestError::Csv {
        path: IN_MEMORY.into(),
        source,
    }
}
