use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug)]
pub struct RunResult {
    pub output: PathBuf,
    pub written: bool,
    pub bytes: usize,
    pub sheets: Vec<SheetSummary>,
    pub offers: usize,
    pub categories: usize,
    pub dropped_bindings: usize,
    pub duplicate_ids: Vec<String>,
    pub corrections: BTreeMap<String, usize>,
}

#[derive(Debug)]
pub struct SheetSummary {
    pub sheet: String,
    pub rows: usize,
    pub offers: usize,
    pub available: usize,
    pub filtered: usize,
}
