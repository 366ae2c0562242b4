//! # Error Types
//!
//! Domain-specific error types for stocklens-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stocklens-core errors (this file)                                     │
//! │  ├── ReportError      - A single report could not be produced          │
//! │  └── ValidationError  - Intake form input failures                     │
//! │                                                                         │
//! │  stocklens-data errors (separate crate)                                │
//! │  └── LoadError        - A source extract could not be loaded (fatal)   │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ReportError → CliError → stderr (other reports keep running)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Arithmetic edge cases (division by zero, null operands) are NOT errors.
//! They resolve to [`crate::types::Metric::Undefined`].

use thiserror::Error;

use crate::types::TableKind;

// =============================================================================
// Report Error
// =============================================================================

/// Errors local to one report.
///
/// A report that hits one of these yields no output; every other report
/// still runs against the same loaded tables.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    /// A column the report needs is not in the extract.
    ///
    /// ## When This Occurs
    /// - The extract was exported with a different column layout
    /// - A header was renamed (e.g. `SALE QTY` → `Sale Qty`)
    #[error("{table} extract has no '{column}' column")]
    MissingColumn { table: TableKind, column: String },

    /// A cell could not be read as the column's type.
    ///
    /// `row` is the 1-based data row (header excluded).
    #[error("{table} extract, column '{column}', row {row}: cannot read '{value}' as a number")]
    MalformedValue {
        table: TableKind,
        column: String,
        row: usize,
        value: String,
    },
}

impl ReportError {
    /// Creates a MissingColumn error.
    pub fn missing_column(table: TableKind, column: impl Into<String>) -> Self {
        ReportError::MissingColumn {
            table,
            column: column.into(),
        }
    }

    /// The extract the error is about.
    pub fn table(&self) -> TableKind {
        match self {
            ReportError::MissingColumn { table, .. } | ReportError::MalformedValue { table, .. } => {
                *table
            }
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for the product-intake form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is not in allowed set.
    #[error("{field} '{value}' is not one of the allowed values")]
    NotAllowed { field: String, value: String },

    /// A list must contain at least one element.
    #[error("at least one {field} entry is required")]
    AtLeastOne { field: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for report results.
pub type ReportResult<T> = Result<T, ReportError>;
