use crate::error::IngestError;
use crate::table::{RawTable, TableReader};
use calamine::{Data, Reader, open_workbook_auto};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Which reader handles a file, decided by its extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Parquet,
    Spreadsheet,
}

impl FileFormat {
    /// Detects the format from the (case-insensitive) file extension.
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(FileFormat::Csv),
            "parquet" => Ok(FileFormat::Parquet),
            "xls" | "xlsx" => Ok(FileFormat::Spreadsheet),
            _ => Err(IngestError::UnsupportedFormat(
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            )),
        }
    }

    pub fn reader(self) -> Box<dyn TableReader> {
        match self {
            FileFormat::Csv => Box::new(CsvTableReader),
            FileFormat::Parquet => Box::new(ParquetTableReader),
            FileFormat::Spreadsheet => Box::new(SpreadsheetTableReader),
        }
    }
}

/// Delimited text with a header row, read through polars.
///
/// Every column is read as text. Typing happens during cleaning, so a late
/// decimal amount or a zero-padded product code survives the read unchanged.
#[derive(Debug, Default)]
pub struct CsvTableReader;

impl TableReader for CsvTableReader {
    fn read(&self, path: &Path) -> Result<RawTable, IngestError> {
        let df = CsvReader::from_path(path)?
            .has_header(true)
            .infer_schema(Some(0))
            .finish()?;
        frame_to_table(&df)
    }
}

#[derive(Debug, Default)]
pub struct ParquetTableReader;

impl TableReader for ParquetTableReader {
    fn read(&self, path: &Path) -> Result<RawTable, IngestError> {
        let file = File::open(path)?;
        let df = ParquetReader::new(file).finish()?;
        frame_to_table(&df)
    }
}

/// The first worksheet of an Excel workbook. Row one is the header.
#[derive(Debug, Default)]
pub struct SpreadsheetTableReader;

impl TableReader for SpreadsheetTableReader {
    fn read(&self, path: &Path) -> Result<RawTable, IngestError> {
        let mut workbook = open_workbook_auto(path)?;
        let range = match workbook.worksheet_range_at(0) {
            Some(range) => range?,
            None => return Ok(RawTable::default()),
        };

        let mut rows = range.rows();
        let headers = match rows.next() {
            Some(header_row) => header_row
                .iter()
                .map(|c| cell_text(c).unwrap_or_default())
                .collect(),
            None => return Ok(RawTable::default()),
        };
        let body = rows
            .map(|row| row.iter().map(cell_text).collect())
            .collect();

        Ok(RawTable::from_rows(headers, body))
    }
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Flattens a DataFrame into string cells, column by column, then transposes to rows.
fn frame_to_table(df: &DataFrame) -> Result<RawTable, IngestError> {
    let headers: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let mut columns: Vec<Vec<Option<String>>> = Vec::with_capacity(df.width());
    for series in df.get_columns() {
        let as_text = series.cast(&DataType::String)?;
        let values = as_text
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect();
        columns.push(values);
    }

    let rows = (0..df.height())
        .map(|i| columns.iter().map(|col| col[i].clone()).collect())
        .collect();

    tracing::debug!(rows = df.height(), columns = df.width(), "Read data frame");
    Ok(RawTable::from_rows(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_are_matched_case_insensitively() {
        assert_eq!(FileFormat::from_path(Path::new("deals.CSV")).unwrap(), FileFormat::Csv);
        assert_eq!(
            FileFormat::from_path(Path::new("q3/deals.xlsx")).unwrap(),
            FileFormat::Spreadsheet
        );
        assert_eq!(FileFormat::from_path(Path::new("deals.xls")).unwrap(), FileFormat::Spreadsheet);
        assert_eq!(
            FileFormat::from_path(Path::new("deals.parquet")).unwrap(),
            FileFormat::Parquet
        );
    }

    #[test]
    fn unknown_extensions_are_rejected_by_name() {
        let err = FileFormat::from_path(Path::new("/tmp/deals.json")).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat(ref name) if name == "deals.json"));
        assert!(FileFormat::from_path(Path::new("deals")).is_err());
    }
}
