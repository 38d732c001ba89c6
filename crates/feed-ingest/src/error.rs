//! Error types for sheet ingestion.

use thiserror::Error;

/// Errors that can occur while fetching a sheet from a source.
///
/// Any of these is fatal to the run: the pipeline refuses to publish a feed
/// built from a partial source.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The named sheet has no backing data at the source.
    #[error("sheet '{name}' not found at {location}")]
    SheetNotFound { name: String, location: String },

    /// The sheet exists but its CSV export could not be read.
    #[error("failed to read sheet '{name}': {source}")]
    SheetRead {
        name: String,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
