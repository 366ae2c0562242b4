//! # stocklens-core: Pure Inventory Analytics
//!
//! This crate holds every report computation and the product-intake session
//! as pure functions over in-memory tables. It never touches the file
//! system; loading the extracts is the job of `stocklens-data`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        StockLens Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    stocklens (CLI)                              │   │
//! │  │    report ──► all ──► reports ──► intake                        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    stocklens-data                               │   │
//! │  │        CSV extracts ──► Table ──► Dataset (Entry Date parsed)   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stocklens-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  dataset  │  │  reports  │  │   money   │  │  intake   │  │   │
//! │  │   │  Table    │  │ registry  │  │   Money   │  │  Session  │  │   │
//! │  │   │  Dataset  │  │ 11 kinds  │  │  bps math │  │  palette  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO FILES • NO NETWORK • NO TERMINAL OUTPUT                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Extract records, `Metric`, `Period`, `DiscountStrategy`
//! - [`dataset`] - Column-tolerant tables and the three-table `Dataset`
//! - [`dates`] - Day-first `Entry Date` parsing
//! - [`money`] - Integer minor-unit money for the discount calculator
//! - [`reports`] - The report registry and every report
//! - [`intake`] - Product-intake session
//! - [`validation`] - Intake form rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use stocklens_core::reports::{run_report, ReportKind, ReportParams};
//! use stocklens_core::types::StockRecord;
//! use stocklens_core::Dataset;
//!
//! let stock = vec![StockRecord {
//!     name: "Oxford Shirt".to_string(),
//!     category: "Shirts".to_string(),
//!     brand: "Acme".to_string(),
//!     stock: Some(40.0),
//!     sale_rate_value: Some(100.0),
//!     mrp: Some(150.0),
//! }];
//! let data = Dataset::from_records(&[], &[], &stock);
//!
//! let output = run_report(ReportKind::InventoryReduction, &data, &ReportParams::default())
//!     .unwrap();
//! assert_eq!(output.title, "Strategies to Reduce Inventory of Low-Performing Items");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dataset;
pub mod dates;
pub mod error;
pub mod intake;
pub mod money;
pub mod reports;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use dataset::{Dataset, Table};
pub use error::{ReportError, ReportResult, ValidationError};
pub use intake::{IntakeForm, IntakeSession};
pub use money::Money;
pub use reports::{run_report, ReportKind, ReportOutput, ReportParams};
pub use types::*;
