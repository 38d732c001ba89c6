//! Sheet ingestion for the feed generator.
//!
//! The pipeline reads whole sheets as grids of strings and leaves all
//! interpretation to the transform layer. Sources implement [`SheetSource`];
//! the shipping implementation reads per-sheet CSV exports from a directory.

pub mod csv_dir;
pub mod error;
pub mod source;

pub use csv_dir::CsvDirSource;
pub use error::{IngestError, Result};
pub use source::{MemorySource, SheetGrid, SheetSource};
