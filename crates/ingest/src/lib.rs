//! # Sales Log Ingestion
//!
//! Turns an uploaded file into a validated, ordered `SalesLog`.
//!
//! - `readers`: picks a `TableReader` by file extension (CSV and Parquet via polars,
//!   Excel via calamine) and produces an untyped `RawTable`.
//! - `clean`: drops duplicate rows, renames the unnamed index column, checks the
//!   required columns and types every row.
//!
//! Every failure here is terminal for the session; nothing reaches the analytics
//! engine unless the whole file validated.

pub mod clean;
pub mod error;
pub mod readers;
pub mod table;

pub use clean::{REQUIRED_COLUMNS, clean_table};
pub use error::IngestError;
pub use readers::FileFormat;
pub use table::{RawRow, RawTable, TableReader};

use configuration::IngestionSettings;
use core_types::SalesLog;
use std::path::Path;

/// Loads and validates sales files according to the ingestion settings.
#[derive(Debug, Clone, Default)]
pub struct Ingestor {
    settings: IngestionSettings,
}

impl Ingestor {
    pub fn new(settings: IngestionSettings) -> Self {
        Self { settings }
    }

    /// Reads `path` with the reader its extension selects, then cleans and validates it.
    pub fn load(&self, path: &Path) -> Result<SalesLog, IngestError> {
        let format = FileFormat::from_path(path)?;
        tracing::info!(path = %path.display(), ?format, "Reading sales file");

        let table = format.reader().read(path)?;
        clean_table(table, &self.settings)
    }
}
