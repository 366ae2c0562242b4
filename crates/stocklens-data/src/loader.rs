//! # Extract Loader
//!
//! Reads the purchase, sales and stock extracts into a [`Dataset`].
//!
//! ## Load Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      load_dataset(&paths)                               │
//! │                                                                         │
//! │  1. every source exists?        no → SourceMissing (nothing parsed)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. CSV → Table (per extract)   bad row → Csv { table, message }        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. Dataset::new                parse Entry Date on purchases + sales   │
//! │       │                         no header → MissingDateColumn           │
//! │       ▼                         bad date  → None (logged, not fatal)    │
//! │  Dataset (read-only for the rest of the session)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use stocklens_core::types::{columns, TableKind};
use stocklens_core::{Dataset, Table};

use crate::error::{LoadError, LoadResult};

// =============================================================================
// Source Paths
// =============================================================================

/// Default file name of the purchase extract.
pub const DEFAULT_PURCHASES_FILE: &str = "Purchase_deatils_converted.csv";

/// Default file name of the sales extract.
pub const DEFAULT_SALES_FILE: &str = "saved_sales_csv.csv 12-50-23-663.csv";

/// Default file name of the stock extract.
pub const DEFAULT_STOCK_FILE: &str = "Stock_deatils_converted.csv";

/// Where the three extracts live.
///
/// ## Example
/// ```rust
/// use stocklens_data::SourcePaths;
///
/// let paths = SourcePaths::in_dir("/srv/exports")
///     .stock("/srv/exports/stock-latest.csv");
/// assert!(paths.purchases.ends_with("Purchase_deatils_converted.csv"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePaths {
    pub purchases: PathBuf,
    pub sales: PathBuf,
    pub stock: PathBuf,
}

impl Default for SourcePaths {
    /// The exported file names, relative to the working directory.
    fn default() -> Self {
        SourcePaths {
            purchases: PathBuf::from(DEFAULT_PURCHASES_FILE),
            sales: PathBuf::from(DEFAULT_SALES_FILE),
            stock: PathBuf::from(DEFAULT_STOCK_FILE),
        }
    }
}

impl SourcePaths {
    /// The default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        SourcePaths {
            purchases: dir.join(DEFAULT_PURCHASES_FILE),
            sales: dir.join(DEFAULT_SALES_FILE),
            stock: dir.join(DEFAULT_STOCK_FILE),
        }
    }

    /// Sets the purchase extract path.
    pub fn purchases(mut self, path: impl Into<PathBuf>) -> Self {
        self.purchases = path.into();
        self
    }

    /// Sets the sales extract path.
    pub fn sales(mut self, path: impl Into<PathBuf>) -> Self {
        self.sales = path.into();
        self
    }

    /// Sets the stock extract path.
    pub fn stock(mut self, path: impl Into<PathBuf>) -> Self {
        self.stock = path.into();
        self
    }

    pub fn path(&self, table: TableKind) -> &Path {
        match table {
            TableKind::Purchases => &self.purchases,
            TableKind::Sales => &self.sales,
            TableKind::Stock => &self.stock,
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Parses one extract from any reader.
///
/// Headers and cells are trimmed. Every row must have as many fields as
/// the header.
pub fn load_table<R: Read>(table: TableKind, reader: R) -> LoadResult<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let csv_error = |e: csv::Error| LoadError::Csv {
        table,
        message: e.to_string(),
    };

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(String::from)
        .collect();

    let mut rows = Vec::new();
    for (line_num, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| LoadError::Csv {
            table,
            message: format!("line {}: {}", line_num + 2, e),
        })?;
        rows.push(record.iter().map(String::from).collect());
    }

    debug!(%table, columns = headers.len(), rows = rows.len(), "Extract parsed");
    Ok(Table::new(table, headers, rows))
}

/// Opens and parses one extract file.
pub fn load_table_file(table: TableKind, path: &Path) -> LoadResult<Table> {
    let file = File::open(path).map_err(|source| LoadError::Io { table, source })?;
    load_table(table, file)
}

/// Loads all three extracts.
///
/// ## Errors
/// - `SourceMissing` for the first absent extract, before any is parsed
/// - `Io` / `Csv` if an extract cannot be read
/// - `MissingDateColumn` if purchases or sales has no `Entry Date`
pub fn load_dataset(paths: &SourcePaths) -> LoadResult<Dataset> {
    for table in TableKind::ALL {
        let path = paths.path(table);
        if !path.is_file() {
            return Err(LoadError::SourceMissing {
                table,
                path: path.to_path_buf(),
            });
        }
    }

    let purchases = load_table_file(TableKind::Purchases, &paths.purchases)?;
    let sales = load_table_file(TableKind::Sales, &paths.sales)?;
    let stock = load_table_file(TableKind::Stock, &paths.stock)?;

    let data = assemble(purchases, sales, stock)?;
    info!(
        purchases = data.purchases.len(),
        sales = data.sales.len(),
        stock = data.stock.len(),
        "Extracts loaded"
    );
    Ok(data)
}

/// Builds the dataset and reports dates that were coerced to null.
pub fn assemble(purchases: Table, sales: Table, stock: Table) -> LoadResult<Dataset> {
    // Dataset::new only fails on an absent Entry Date header
    let data = Dataset::new(purchases, sales, stock)
        .map_err(|e| LoadError::MissingDateColumn { table: e.table() })?;

    for table in [&data.purchases, &data.sales] {
        let coerced = table.unreadable_dates(columns::ENTRY_DATE).unwrap_or(0);
        if coerced > 0 {
            warn!(table = %table.kind(), coerced, "Unreadable entry dates loaded as null");
        }
    }

    Ok(data)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PURCHASES: &str = "\
Entry No.,Category,Size,SALE QTY,Current Stock(Unit1),Qty(Unit1),Entry Date
101, Shirts ,M,0,12,12,03/04/2024
102,Shirts,L,3,7,10,pending
";

    const SALES: &str = "\
Entry No.,Brand,Category,Qty(Unit1),Amount,Entry Date
S1,Acme,Shirts,2,200,05/04/2024
";

    const STOCK: &str = "\
NameToDisplay,Category,Brand,Stock(Unit1),Sale Rate Value,MRP
Oxford,Shirts,Acme,40,100,150
";

    fn write_sources(dir: &TempDir) -> SourcePaths {
        let paths = SourcePaths::in_dir(dir.path());
        fs::write(&paths.purchases, PURCHASES).unwrap();
        fs::write(&paths.sales, SALES).unwrap();
        fs::write(&paths.stock, STOCK).unwrap();
        paths
    }

    #[test]
    fn test_load_table_trims_cells() {
        let table = load_table(TableKind::Purchases, PURCHASES.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.text("Category").unwrap(), vec!["Shirts", "Shirts"]);
    }

    #[test]
    fn test_ragged_row_is_fatal() {
        let csv = "Entry No.,Brand\nS1,Acme,extra\n";
        let err = load_table(TableKind::Sales, csv.as_bytes()).unwrap_err();
        match err {
            LoadError::Csv { table, message } => {
                assert_eq!(table, TableKind::Sales);
                assert!(message.starts_with("line 2"));
            }
            other => panic!("expected Csv error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_paths_use_export_names() {
        let paths = SourcePaths::default();
        assert_eq!(paths.sales, PathBuf::from("saved_sales_csv.csv 12-50-23-663.csv"));
        let overridden = paths.stock("elsewhere.csv");
        assert_eq!(overridden.path(TableKind::Stock), Path::new("elsewhere.csv"));
    }

    #[test]
    fn test_load_dataset_parses_entry_dates() {
        let dir = TempDir::new().unwrap();
        let data = load_dataset(&write_sources(&dir)).unwrap();

        let dates = data.purchases.dates(columns::ENTRY_DATE).unwrap();
        assert_eq!(dates[0].map(|d| d.to_string()).as_deref(), Some("2024-04-03"));
        assert_eq!(dates[1], None);
        assert_eq!(data.purchases.unreadable_dates(columns::ENTRY_DATE).unwrap(), 1);
        assert_eq!(data.stock.len(), 1);
    }

    #[test]
    fn test_missing_source_fails_before_parsing() {
        let dir = TempDir::new().unwrap();
        let paths = write_sources(&dir);
        fs::remove_file(&paths.sales).unwrap();
        // A broken purchase file would fail to parse, but existence is checked first
        fs::write(&paths.purchases, "Entry No.,Category\n1,2,3\n").unwrap();

        match load_dataset(&paths).unwrap_err() {
            LoadError::SourceMissing { table, path } => {
                assert_eq!(table, TableKind::Sales);
                assert_eq!(path, paths.sales);
            }
            other => panic!("expected SourceMissing, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_entry_date_header_is_fatal() {
        let dir = TempDir::new().unwrap();
        let paths = write_sources(&dir);
        fs::write(&paths.sales, "Entry No.,Brand\nS1,Acme\n").unwrap();

        let err = load_dataset(&paths).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingDateColumn { table: TableKind::Sales }
        ));
    }
}
