use std::path::PathBuf;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::source::{SheetGrid, SheetSource};

/// Sheet source reading per-sheet CSV exports from one directory.
///
/// Sheet `name` maps to `<dir>/<name>.csv`. Rows may have ragged widths;
/// the mapper resolves short rows itself. Cells pass through untouched apart
/// from BOM stripping, and rows with no content at all are skipped.
#[derive(Debug, Clone)]
pub struct CsvDirSource {
    dir: PathBuf,
}

impl CsvDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        CsvDirSource { dir: dir.into() }
    }
}

impl SheetSource for CsvDirSource {
    fn fetch_grid(&self, name: &str) -> Result<SheetGrid> {
        let path = self.dir.join(format!("{name}.csv"));
        if !path.is_file() {
            return Err(IngestError::SheetNotFound {
                name: name.to_string(),
                location: path.display().to_string(),
            });
        }
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)
            .map_err(|source| IngestError::SheetRead {
                name: name.to_string(),
                source,
            })?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|source| IngestError::SheetRead {
                name: name.to_string(),
                source,
            })?;
            let row: Vec<String> = record.iter().map(strip_bom).collect();
            if row.iter().all(|cell| cell.is_empty()) {
                continue;
            }
            rows.push(row);
        }
        debug!(sheet = %name, path = %path.display(), rows = rows.len(), "sheet read");
        Ok(SheetGrid {
            name: name.to_string(),
            rows,
        })
    }
}

fn strip_bom(cell: &str) -> String {
    cell.trim_matches('\u{feff}').to_string()
}
