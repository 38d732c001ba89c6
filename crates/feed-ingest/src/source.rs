use std::collections::BTreeMap;

use crate::error::{IngestError, Result};

/// A named rectangular grid of string cells, header row included.
///
/// Cells keep their whitespace exactly as exported; downstream availability
/// checks treat a whitespace-only cell as filled, so trimming here would
/// change feed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetGrid {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl SheetGrid {
    /// Rows below the header. A header-only or empty sheet has none.
    pub fn data_rows(&self) -> &[Vec<String>] {
        if self.rows.len() <= 1 { &[] } else { &self.rows[1..] }
    }
}

/// Boundary to the external tabular provider.
///
/// Implementations return the raw grid for a named sheet. The first row is
/// the header and is discarded downstream; failure to obtain a sheet at all
/// is fatal to the run.
pub trait SheetSource {
    fn fetch_grid(&self, name: &str) -> Result<SheetGrid>;
}

/// Sheet source backed by in-memory grids, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sheets: BTreeMap<String, Vec<Vec<String>>>,
}

impl MemorySource {
    pub fn new() -> Self {
        MemorySource::default()
    }

    #[must_use]
    pub fn with_sheet(mut self, name: &str, rows: Vec<Vec<String>>) -> Self {
        self.sheets.insert(name.to_string(), rows);
        self
    }
}

impl SheetSource for MemorySource {
    fn fetch_grid(&self, name: &str) -> Result<SheetGrid> {
        match self.sheets.get(name) {
            Some(rows) => Ok(SheetGrid {
                name: name.to_string(),
                rows: rows.clone(),
            }),
            None => Err(IngestError::SheetNotFound {
                name: name.to_string(),
                location: "in-memory source".to_string(),
            }),
        }
    }
}
