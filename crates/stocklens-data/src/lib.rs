//! # stocklens-data: Extract Loading for StockLens
//!
//! Turns the three CSV extracts exported by the point-of-sale back office
//! into a [`stocklens_core::Dataset`].
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        StockLens Data Flow                              │
//! │                                                                         │
//! │  Purchase_deatils_converted.csv ─┐                                      │
//! │  saved_sales_csv.csv ... .csv ───┼──► stocklens-data (THIS CRATE)       │
//! │  Stock_deatils_converted.csv ────┘         │                            │
//! │                                            ▼                            │
//! │                                  Dataset { purchases, sales, stock }    │
//! │                                            │                            │
//! │                                            ▼                            │
//! │                                  stocklens-core reports                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`loader`] - Source paths, CSV parsing, dataset assembly
//! - [`error`] - Load error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stocklens_data::{load_dataset, SourcePaths};
//!
//! let data = load_dataset(&SourcePaths::in_dir("./exports"))?;
//! println!("{} stock rows", data.stock.len());
//! # Ok::<(), stocklens_data::LoadError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod loader;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{LoadError, LoadResult};
pub use loader::{
    assemble, load_dataset, load_table, load_table_file, SourcePaths, DEFAULT_PURCHASES_FILE,
    DEFAULT_SALES_FILE, DEFAULT_STOCK_FILE,
};
