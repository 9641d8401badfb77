use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Load-time failures
// ---------------------------------------------------------------------------

/// Structural failures while loading a streams file.
///
/// Only these abort a render. Per-cell problems (unparseable dates,
/// non-numeric counts) never surface as errors; they degrade to
/// missing values inside the dataset.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File missing or unreadable.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The delimited text itself could not be parsed.
    #[error("malformed delimited text: {0}")]
    Csv(#[from] csv::Error),

    /// Header row 0 (artists) or row 1 (songs) is absent.
    #[error("header row {row} is missing")]
    MissingHeaderRow { row: usize },

    /// A row does not have the same number of columns as the artist header.
    #[error("line {line} has {found} columns, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// The header has no columns besides the date column.
    #[error("no artist columns found after the date column")]
    NoArtistColumns,
}
