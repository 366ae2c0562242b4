//! # CLI Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in StockLens                              │
//! │                                                                         │
//! │  LoadError ──────────► SOURCE_MISSING / INVALID_DATA   (fatal)          │
//! │  ReportError ────────► REPORT_FAILED   (one report; `all` carries on)   │
//! │  ValidationError ────► VALIDATION_ERROR (intake form)                   │
//! │  toml / io / json ───► CONFIG_ERROR / IO_ERROR                          │
//! │                               │                                         │
//! │                               ▼                                         │
//! │                 main: "error: <message>", non-zero exit                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::fmt;
use std::process::ExitCode;

use stocklens_core::{ReportError, ValidationError};
use stocklens_data::LoadError;

/// Error returned from commands.
///
/// ## Serialization
/// `stocklens all --format json` embeds failed reports as:
/// ```json
/// {
///   "code": "REPORT_FAILED",
///   "message": "stock extract has no 'MRP' column"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes, one per failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// An extract file is absent
    SourceMissing,

    /// An extract is present but unusable
    InvalidData,

    /// A report could not be computed
    ReportFailed,

    /// Intake input failed validation
    ValidationError,

    /// Config file or overrides are invalid
    ConfigError,

    /// Reading or writing failed
    IoError,
}

impl ErrorCode {
    /// Process exit status for this failure class.
    pub fn exit_status(self) -> u8 {
        match self {
            ErrorCode::IoError => 1,
            ErrorCode::ConfigError => 2,
            ErrorCode::SourceMissing | ErrorCode::InvalidData => 3,
            ErrorCode::ReportFailed => 4,
            ErrorCode::ValidationError => 5,
        }
    }
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates a config error.
    pub fn config(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ConfigError, message)
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code.exit_status())
    }
}

impl From<LoadError> for CliError {
    fn from(err: LoadError) -> Self {
        let code = match err {
            LoadError::SourceMissing { .. } => ErrorCode::SourceMissing,
            LoadError::Io { .. } => ErrorCode::IoError,
            LoadError::Csv { .. } | LoadError::MissingDateColumn { .. } => ErrorCode::InvalidData,
        };
        CliError::new(code, err.to_string())
    }
}

impl From<ReportError> for CliError {
    fn from(err: ReportError) -> Self {
        CliError::new(ErrorCode::ReportFailed, err.to_string())
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::new(ErrorCode::ValidationError, err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::new(ErrorCode::IoError, err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON rendering failed: {}", err);
        CliError::new(ErrorCode::IoError, format!("cannot write JSON: {}", err))
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::config(format!("invalid config file: {}", err))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for commands.
pub type CliResult<T> = Result<T, CliError>;
