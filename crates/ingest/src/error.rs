use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Unsupported file type '{0}': please provide a CSV, Parquet or Excel file")]
    UnsupportedFormat(String),

    #[error("The file is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Row {row}: amount '{value}' is not numeric")]
    InvalidAmount { row: usize, value: String },

    #[error("The file contains no sales records")]
    Empty,

    #[error("Failed to read table: {0}")]
    Table(#[from] polars::prelude::PolarsError),

    #[error("Failed to read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
