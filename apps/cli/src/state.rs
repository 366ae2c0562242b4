//! # Session State
//!
//! One `Session` per process. It owns the resolved config, the extracts
//! (loaded on first use, then read-only) and the product-intake accumulator.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Session                                         │
//! │                                                                         │
//! │  config  ── AppConfig (sources, params, format)                         │
//! │  data    ── None ──dataset()──► Some(Dataset)   loaded at most once     │
//! │  intake  ── IntakeSession (pending sizes, accepted entries)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use stocklens_core::reports::ReportParams;
use stocklens_core::{Dataset, IntakeSession};
use stocklens_data::load_dataset;

use crate::config::{AppConfig, OutputFormat};
use crate::error::CliResult;

/// Per-process state passed by reference to every command.
#[derive(Debug)]
pub struct Session {
    config: AppConfig,
    data: Option<Dataset>,
    pub intake: IntakeSession,
}

impl Session {
    /// Creates a session; nothing is read from disk yet.
    pub fn new(config: AppConfig) -> Self {
        Session {
            config,
            data: None,
            intake: IntakeSession::new(),
        }
    }

    /// Creates a session over an already loaded dataset.
    pub fn with_dataset(config: AppConfig, data: Dataset) -> Self {
        Session {
            config,
            data: Some(data),
            intake: IntakeSession::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn params(&self) -> ReportParams {
        self.config.params
    }

    pub fn format(&self) -> OutputFormat {
        self.config.format
    }

    /// Returns the extracts, loading them on first call.
    ///
    /// A load failure leaves the session without data; it is fatal to the
    /// calling command.
    pub fn dataset(&mut self) -> CliResult<&Dataset> {
        let data = match self.data.take() {
            Some(data) => data,
            None => load_dataset(&self.config.sources)?,
        };
        Ok(self.data.insert(data))
    }
}
