//! # Load Error Types
//!
//! Errors raised while loading the extracts.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / csv::Error                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LoadError (this module) ← Names the extract and path                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CliError (in app) ← Fatal: no report runs                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every `LoadError` is fatal for the session. Column problems that only
//! affect some reports are `ReportError`s and surface later, per report.

use std::path::PathBuf;
use thiserror::Error;

use stocklens_core::types::TableKind;

/// Extract loading errors.
#[derive(Debug, Error)]
pub enum LoadError {
    /// An extract file does not exist.
    ///
    /// ## When This Occurs
    /// - Wrong data directory
    /// - Extract not exported yet
    #[error("{table} extract not found: {}", path.display())]
    SourceMissing { table: TableKind, path: PathBuf },

    /// The file exists but could not be read.
    #[error("cannot read {table} extract: {source}")]
    Io {
        table: TableKind,
        #[source]
        source: std::io::Error,
    },

    /// The file is not well-formed CSV.
    ///
    /// ## When This Occurs
    /// - A row has more or fewer fields than the header
    /// - Invalid UTF-8
    #[error("{table} extract is not valid CSV: {message}")]
    Csv { table: TableKind, message: String },

    /// A dated extract has no `Entry Date` header.
    #[error("{table} extract has no 'Entry Date' column")]
    MissingDateColumn { table: TableKind },
}

impl LoadError {
    /// The extract the error is about.
    pub fn table(&self) -> TableKind {
        match self {
            LoadError::SourceMissing { table, .. }
            | LoadError::Io { table, .. }
            | LoadError::Csv { table, .. }
            | LoadError::MissingDateColumn { table } => *table,
        }
    }
}

/// Result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;
