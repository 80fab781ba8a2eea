// Spreadsheet ingestion: first worksheet of an .xls/.xlsx workbook.

use crate::csv_reader::infer_cell;
use crate::error::IngestError;
use calamine::{open_workbook_auto, Data, Range, Reader};
use savant_core::{Cell, Column, Dataset};
use std::path::Path;
use tracing::debug;

/// Read the first worksheet of the workbook at `path`.
///
/// The first row of the used range is the header row. Numeric cells become
/// `Number`; string cells go through the same inference as CSV fields.
pub fn parse_workbook(path: &Path) -> Result<Dataset, IngestError> {
    let spreadsheet_error = |source| IngestError::Spreadsheet {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(spreadsheet_error)?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(spreadsheet_error)?,
        None => {
            return Err(IngestError::EmptyFile {
                path: path.display().to_string(),
            })
        }
    };

    range_to_dataset(&range).map_err(|e| e.with_path(path))
}

fn range_to_dataset(range: &Range<Data>) -> Result<Dataset, IngestError> {
    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(|c| c.to_string().trim().to_string()).collect(),
        None => {
            return Err(IngestError::EmptyFile {
                path: String::new(),
            })
        }
    };
    debug!("worksheet headers: {headers:?}");

    let mut columns: Vec<Vec<Cell>> = vec![Vec::new(); headers.len()];
    for row in rows {
        for (i, cells) in columns.iter_mut().enumerate() {
            cells.push(row.get(i).map_or(Cell::Empty, to_cell));
        }
    }

    let columns = headers
        .into_iter()
        .zip(columns)
        .map(|(name, cells)| Column::new(name, cells))
        .collect();

    Ok(Dataset::new(columns)?)
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Float(v) if v.is_finite() => Cell::Number(*v),
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Empty => Cell::Empty,
        Data::String(s) => infer_cell(s),
        other => infer_cell(&other.to_string()),
    }
}
