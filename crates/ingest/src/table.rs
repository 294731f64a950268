use crate::error::IngestError;
use std::collections::HashSet;
use std::path::Path;

/// A single data row as read from the file, before any typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based position among the file's data rows (the header is not counted).
    pub number: usize,
    pub cells: Vec<Option<String>>,
}

/// A rectangular, untyped view of an uploaded file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Builds a table from row-major cells, numbering rows from 1.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, cells)| RawRow { number: i + 1, cells })
            .collect();
        Self { headers, rows }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Removes rows whose cells exactly repeat an earlier row. Returns how many were dropped.
    pub fn drop_duplicates(&mut self) -> usize {
        let before = self.rows.len();
        let mut seen: HashSet<Vec<Option<String>>> = HashSet::with_capacity(before);
        self.rows.retain(|row| seen.insert(row.cells.clone()));
        before - self.rows.len()
    }

    /// Renames the first header found in `aliases` to `to`. Returns whether a rename happened.
    pub fn rename_first_of(&mut self, aliases: &[String], to: &str) -> bool {
        if self.column_index(to).is_some() {
            return false;
        }
        match self.headers.iter_mut().find(|h| aliases.contains(h)) {
            Some(header) => {
                *header = to.to_string();
                true
            }
            None => false,
        }
    }
}

/// A source that can turn a file on disk into a `RawTable`.
pub trait TableReader {
    fn read(&self, path: &Path) -> Result<RawTable, IngestError>;
}
