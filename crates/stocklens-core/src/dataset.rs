//! # Dataset
//!
//! In-memory form of the three extracts.
//!
//! ## Column-Tolerant Tables
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How a report reads a table                           │
//! │                                                                         │
//! │  Table (headers + raw cells, parsed Entry Date)                         │
//! │       │                                                                 │
//! │       ├── text("Category")        → Vec<&str>                           │
//! │       ├── numbers("SALE QTY")     → Vec<Option<f64>>                    │
//! │       └── dates("Entry Date")     → Vec<Option<NaiveDate>>              │
//! │                │                                                        │
//! │                └── missing header / bad number → ReportError            │
//! │                    (only THIS report fails)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cells are kept as loaded; a column is typed only when a report asks for
//! it. That keeps a missing or malformed column local to the reports that
//! actually use it.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::dates::parse_day_first;
use crate::error::{ReportError, ReportResult};
use crate::types::{columns, PurchaseRecord, SalesRecord, StockRecord, TableKind};

// =============================================================================
// Table
// =============================================================================

/// One extract: headers, raw cells, and any date columns parsed at load.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    kind: TableKind,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    parsed_dates: BTreeMap<String, Vec<Option<NaiveDate>>>,
}

impl Table {
    /// Creates a table from trimmed headers and rows.
    ///
    /// Rows shorter than the header read as blank in the missing cells.
    pub fn new(kind: TableKind, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Table {
            kind,
            headers: headers.into_iter().map(|h| h.trim().to_string()).collect(),
            rows,
            parsed_dates: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    fn column_index(&self, name: &str) -> ReportResult<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ReportError::missing_column(self.kind, name))
    }

    fn cells(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|c| c.trim()).unwrap_or(""))
    }

    /// Returns a column as trimmed text.
    pub fn text(&self, name: &str) -> ReportResult<Vec<&str>> {
        let index = self.column_index(name)?;
        Ok(self.cells(index).collect())
    }

    /// Returns a column as numbers; blank cells are `None`.
    ///
    /// ## Errors
    /// - `MissingColumn` if the header is absent
    /// - `MalformedValue` for the first non-blank cell that is not a number
    pub fn numbers(&self, name: &str) -> ReportResult<Vec<Option<f64>>> {
        let index = self.column_index(name)?;
        self.cells(index)
            .enumerate()
            .map(|(row, cell)| {
                if cell.is_empty() {
                    return Ok(None);
                }
                cell.parse::<f64>()
                    // "nan" and "inf" read as blank
                    .map(|v| v.is_finite().then_some(v))
                    .map_err(|_| ReportError::MalformedValue {
                        table: self.kind,
                        column: name.to_string(),
                        row: row + 1,
                        value: cell.to_string(),
                    })
            })
            .collect()
    }

    /// Returns a date column, preferring the values parsed at load.
    pub fn dates(&self, name: &str) -> ReportResult<Vec<Option<NaiveDate>>> {
        if let Some(parsed) = self.parsed_dates.get(name) {
            return Ok(parsed.clone());
        }
        let index = self.column_index(name)?;
        Ok(self.cells(index).map(parse_day_first).collect())
    }

    /// Parses a date column once and keeps the result.
    pub fn parse_dates(&mut self, name: &str) -> ReportResult<()> {
        let index = self.column_index(name)?;
        let parsed = self.cells(index).map(parse_day_first).collect();
        self.parsed_dates.insert(name.to_string(), parsed);
        Ok(())
    }

    /// Number of non-blank cells in a date column that could not be read
    /// and were coerced to `None`.
    pub fn unreadable_dates(&self, name: &str) -> ReportResult<usize> {
        let index = self.column_index(name)?;
        let dates = self.dates(name)?;
        Ok(self
            .cells(index)
            .zip(dates)
            .filter(|(cell, date)| !cell.is_empty() && date.is_none())
            .count())
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// The three extracts of one session. Read-only once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub purchases: Table,
    pub sales: Table,
    pub stock: Table,
}

impl Dataset {
    /// Bundles three tables, parsing the `Entry Date` of purchases and sales.
    ///
    /// ## Errors
    /// `MissingColumn` if either dated extract lacks `Entry Date`.
    pub fn new(mut purchases: Table, mut sales: Table, stock: Table) -> ReportResult<Self> {
        purchases.parse_dates(columns::ENTRY_DATE)?;
        sales.parse_dates(columns::ENTRY_DATE)?;
        Ok(Dataset {
            purchases,
            sales,
            stock,
        })
    }

    /// Builds a dataset from typed records.
    pub fn from_records(
        purchases: &[PurchaseRecord],
        sales: &[SalesRecord],
        stock: &[StockRecord],
    ) -> Self {
        Dataset {
            purchases: purchase_table(purchases),
            sales: sales_table(sales),
            stock: stock_table(stock),
        }
    }

    pub fn table(&self, kind: TableKind) -> &Table {
        match kind {
            TableKind::Purchases => &self.purchases,
            TableKind::Sales => &self.sales,
            TableKind::Stock => &self.stock,
        }
    }

    /// Typed view of the purchase extract. Needs every purchase column.
    pub fn purchase_records(&self) -> ReportResult<Vec<PurchaseRecord>> {
        let t = &self.purchases;
        let entry_no = t.text(columns::ENTRY_NO)?;
        let category = t.text(columns::CATEGORY)?;
        let size = t.text(columns::SIZE)?;
        let sale_qty = t.numbers(columns::SALE_QTY)?;
        let current_stock = t.numbers(columns::CURRENT_STOCK)?;
        let qty = t.numbers(columns::QTY)?;
        let entry_date = t.dates(columns::ENTRY_DATE)?;

        (0..t.len())
            .map(|i| {
                Ok(PurchaseRecord {
                    entry_no: entry_no[i].to_string(),
                    category: category[i].to_string(),
                    size: size[i].to_string(),
                    sale_qty: whole_number(t, columns::SALE_QTY, i, sale_qty[i])?,
                    current_stock: current_stock[i],
                    qty: qty[i],
                    entry_date: entry_date[i],
                })
            })
            .collect()
    }

    /// Typed view of the sales extract. Needs every sales column.
    pub fn sales_records(&self) -> ReportResult<Vec<SalesRecord>> {
        let t = &self.sales;
        let entry_no = t.text(columns::ENTRY_NO)?;
        let brand = t.text(columns::BRAND)?;
        let category = t.text(columns::CATEGORY)?;
        let qty = t.numbers(columns::QTY)?;
        let amount = t.numbers(columns::AMOUNT)?;
        let entry_date = t.dates(columns::ENTRY_DATE)?;

        Ok((0..t.len())
            .map(|i| SalesRecord {
                entry_no: entry_no[i].to_string(),
                brand: brand[i].to_string(),
                category: category[i].to_string(),
                qty: qty[i],
                amount: amount[i],
                entry_date: entry_date[i],
            })
            .collect())
    }

    /// Typed view of the stock extract. Needs every stock column.
    pub fn stock_records(&self) -> ReportResult<Vec<StockRecord>> {
        let t = &self.stock;
        let name = t.text(columns::NAME_TO_DISPLAY)?;
        let category = t.text(columns::CATEGORY)?;
        let brand = t.text(columns::BRAND)?;
        let stock = t.numbers(columns::STOCK)?;
        let sale_rate_value = t.numbers(columns::SALE_RATE_VALUE)?;
        let mrp = t.numbers(columns::MRP)?;

        Ok((0..t.len())
            .map(|i| StockRecord {
                name: name[i].to_string(),
                category: category[i].to_string(),
                brand: brand[i].to_string(),
                stock: stock[i],
                sale_rate_value: sale_rate_value[i],
                mrp: mrp[i],
            })
            .collect())
    }
}

fn whole_number(
    table: &Table,
    column: &str,
    index: usize,
    value: Option<f64>,
) -> ReportResult<Option<i64>> {
    match value {
        None => Ok(None),
        Some(v) if v.fract() == 0.0 => Ok(Some(v as i64)),
        Some(v) => Err(ReportError::MalformedValue {
            table: table.kind(),
            column: column.to_string(),
            row: index + 1,
            value: v.to_string(),
        }),
    }
}

// =============================================================================
// Record → Table
// =============================================================================

fn number_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn date_cell(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

fn owned_headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|h| h.to_string()).collect()
}

fn purchase_table(records: &[PurchaseRecord]) -> Table {
    let headers = owned_headers(&[
        columns::ENTRY_NO,
        columns::CATEGORY,
        columns::SIZE,
        columns::SALE_QTY,
        columns::CURRENT_STOCK,
        columns::QTY,
        columns::ENTRY_DATE,
    ]);
    let rows = records
        .iter()
        .map(|r| {
            vec![
                r.entry_no.clone(),
                r.category.clone(),
                r.size.clone(),
                r.sale_qty.map(|q| q.to_string()).unwrap_or_default(),
                number_cell(r.current_stock),
                number_cell(r.qty),
                date_cell(r.entry_date),
            ]
        })
        .collect();
    let mut table = Table::new(TableKind::Purchases, headers, rows);
    table
        .parsed_dates
        .insert(columns::ENTRY_DATE.to_string(), records.iter().map(|r| r.entry_date).collect());
    table
}

fn sales_table(records: &[SalesRecord]) -> Table {
    let headers = owned_headers(&[
        columns::ENTRY_NO,
        columns::BRAND,
        columns::CATEGORY,
        columns::QTY,
        columns::AMOUNT,
        columns::ENTRY_DATE,
    ]);
    let rows = records
        .iter()
        .map(|r| {
            vec![
                r.entry_no.clone(),
                r.brand.clone(),
                r.category.clone(),
                number_cell(r.qty),
                number_cell(r.amount),
                date_cell(r.entry_date),
            ]
        })
        .collect();
    let mut table = Table::new(TableKind::Sales, headers, rows);
    table
        .parsed_dates
        .insert(columns::ENTRY_DATE.to_string(), records.iter().map(|r| r.entry_date).collect());
    table
}

fn stock_table(records: &[StockRecord]) -> Table {
    let headers = owned_headers(&[
        columns::NAME_TO_DISPLAY,
        columns::CATEGORY,
        columns::BRAND,
        columns::STOCK,
        columns::SALE_RATE_VALUE,
        columns::MRP,
    ]);
    let rows = records
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                r.category.clone(),
                r.brand.clone(),
                number_cell(r.stock),
                number_cell(r.sale_rate_value),
                number_cell(r.mrp),
            ]
        })
        .collect();
    Table::new(TableKind::Stock, headers, rows)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn table(kind: TableKind, headers: &[&str], rows: &[&[&str]]) -> Table {
        Table::new(
            kind,
            owned_headers(headers),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_numbers_blank_is_none() {
        let t = table(TableKind::Stock, &["MRP"], &[&["10"], &[""], &[" 2.5 "]]);
        assert_eq!(t.numbers("MRP").unwrap(), vec![Some(10.0), None, Some(2.5)]);
    }

    #[test]
    fn test_numbers_malformed_reports_row() {
        let t = table(TableKind::Stock, &["MRP"], &[&["10"], &["ten"]]);
        let err = t.numbers("MRP").unwrap_err();
        assert_eq!(
            err,
            ReportError::MalformedValue {
                table: TableKind::Stock,
                column: "MRP".to_string(),
                row: 2,
                value: "ten".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_column() {
        let t = table(TableKind::Sales, &["Brand"], &[&["X"]]);
        assert!(matches!(
            t.text("Category"),
            Err(ReportError::MissingColumn { table: TableKind::Sales, .. })
        ));
    }

    #[test]
    fn test_short_rows_read_blank() {
        let t = table(TableKind::Stock, &["A", "B"], &[&["1"]]);
        assert_eq!(t.text("B").unwrap(), vec![""]);
        assert_eq!(t.numbers("B").unwrap(), vec![None]);
    }

    #[test]
    fn test_parse_dates_counts_coerced() {
        let mut t = table(
            TableKind::Sales,
            &["Entry Date"],
            &[&["03/04/2024"], &["garbage"], &[""]],
        );
        t.parse_dates("Entry Date").unwrap();
        assert_eq!(t.unreadable_dates("Entry Date").unwrap(), 1);
        assert_eq!(
            t.dates("Entry Date").unwrap(),
            vec![NaiveDate::from_ymd_opt(2024, 4, 3), None, None]
        );
    }

    #[test]
    fn test_dataset_requires_entry_date() {
        let purchases = table(TableKind::Purchases, &["Entry No."], &[]);
        let sales = table(TableKind::Sales, &["Entry Date"], &[]);
        let stock = table(TableKind::Stock, &[], &[]);
        let err = Dataset::new(purchases, sales, stock).unwrap_err();
        assert_eq!(
            err,
            ReportError::missing_column(TableKind::Purchases, "Entry Date")
        );
    }

    #[test]
    fn test_records_survive_table_form() {
        let purchases = vec![PurchaseRecord {
            entry_no: "101".to_string(),
            category: "Shirts".to_string(),
            size: "M".to_string(),
            sale_qty: Some(3),
            current_stock: Some(7.0),
            qty: Some(10.0),
            entry_date: NaiveDate::from_ymd_opt(2024, 1, 15),
        }];
        let stock = vec![StockRecord {
            name: "Oxford Shirt".to_string(),
            category: "Shirts".to_string(),
            brand: "Acme".to_string(),
            stock: Some(40.0),
            sale_rate_value: None,
            mrp: Some(999.0),
        }];
        let data = Dataset::from_records(&purchases, &[], &stock);
        assert_eq!(data.purchase_records().unwrap(), purchases);
        assert_eq!(data.stock_records().unwrap(), stock);
        assert!(data.sales_records().unwrap().is_empty());
    }

    #[test]
    fn test_fractional_sale_qty_is_malformed() {
        let mut t = table(
            TableKind::Purchases,
            &[
                "Entry No.",
                "Category",
                "Size",
                "SALE QTY",
                "Current Stock(Unit1)",
                "Qty(Unit1)",
                "Entry Date",
            ],
            &[&["1", "C", "S", "1.5", "1", "1", ""]],
        );
        t.parse_dates("Entry Date").unwrap();
        let data = Dataset {
            purchases: t,
            sales: table(TableKind::Sales, &[], &[]),
            stock: table(TableKind::Stock, &[], &[]),
        };
        assert!(matches!(
            data.purchase_records(),
            Err(ReportError::MalformedValue { row: 1, .. })
        ));
    }
}
