//! # Variance & Turnaround Analyzer
//!
//! Per-entry quantity variance on the purchase extract, plus the two
//! return-line reports on the sales extract.
//!
//! A return (or exchange) is any sales line with a negative `Qty(Unit1)`.
//!
//! ## Turnaround
//! ```text
//! returns sorted by Entry Date (stable, null dates last)
//!
//!   Entry Date   2024-01-01   2024-01-03   2024-01-10   (null)
//!   Turnaround   null         2            7            null
//! ```
//! The first return has no predecessor, so its turnaround is null rather
//! than zero.

use chrono::NaiveDate;
use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::ReportResult;
use crate::reports::output::{Cell, Tabular};
use crate::types::columns;

// =============================================================================
// Variance
// =============================================================================

/// Received minus on-hand for one purchase entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarianceRow {
    pub entry_no: String,
    pub category: String,
    pub variance: Option<f64>,
}

impl Tabular for VarianceRow {
    fn columns() -> &'static [&'static str] {
        &["Entry No.", "Category", "Variance"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.entry_no.as_str().into(),
            self.category.as_str().into(),
            self.variance.into(),
        ]
    }
}

/// `Qty(Unit1) − Current Stock(Unit1)` for every purchase entry.
pub fn variances(data: &Dataset) -> ReportResult<Vec<VarianceRow>> {
    let purchases = &data.purchases;
    let entry_nos = purchases.text(columns::ENTRY_NO)?;
    let categories = purchases.text(columns::CATEGORY)?;
    let qty = purchases.numbers(columns::QTY)?;
    let current_stock = purchases.numbers(columns::CURRENT_STOCK)?;

    Ok((0..purchases.len())
        .map(|i| VarianceRow {
            entry_no: entry_nos[i].to_string(),
            category: categories[i].to_string(),
            variance: match (qty[i], current_stock[i]) {
                (Some(received), Some(on_hand)) => Some(received - on_hand),
                _ => None,
            },
        })
        .collect())
}

// =============================================================================
// Turnaround
// =============================================================================

/// One return line with the days since the previous return.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnaroundRow {
    pub entry_no: String,
    pub entry_date: Option<NaiveDate>,
    pub turnaround_days: Option<i64>,
}

impl Tabular for TurnaroundRow {
    fn columns() -> &'static [&'static str] {
        &["Entry No.", "Entry Date", "TurnaroundTime"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.entry_no.as_str().into(),
            self.entry_date.into(),
            self.turnaround_days.into(),
        ]
    }
}

/// Whole days between consecutive returns.
pub fn turnaround(data: &Dataset) -> ReportResult<Vec<TurnaroundRow>> {
    let sales = &data.sales;
    let qty = sales.numbers(columns::QTY)?;
    let entry_nos = sales.text(columns::ENTRY_NO)?;
    let dates = sales.dates(columns::ENTRY_DATE)?;

    let mut returns: Vec<(usize, Option<NaiveDate>)> = qty
        .iter()
        .enumerate()
        .filter(|(_, q)| q.is_some_and(|q| q < 0.0))
        .map(|(i, _)| (i, dates[i]))
        .collect();
    returns.sort_by_key(|(_, date)| (date.is_none(), *date));

    let mut previous: Option<Option<NaiveDate>> = None;
    Ok(returns
        .into_iter()
        .map(|(i, date)| {
            let turnaround_days = match (previous, date) {
                (Some(Some(before)), Some(current)) => Some((current - before).num_days()),
                _ => None,
            };
            previous = Some(date);
            TurnaroundRow {
                entry_no: entry_nos[i].to_string(),
                entry_date: date,
                turnaround_days,
            }
        })
        .collect())
}

// =============================================================================
// Rejections
// =============================================================================

/// A rejected or returned sales line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectionRow {
    pub entry_no: String,
    pub brand: String,
    pub category: String,
    pub qty: Option<f64>,
    pub amount: Option<f64>,
}

impl Tabular for RejectionRow {
    fn columns() -> &'static [&'static str] {
        &["Entry No.", "Brand", "Category", "Qty(Unit1)", "Amount"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.entry_no.as_str().into(),
            self.brand.as_str().into(),
            self.category.as_str().into(),
            self.qty.into(),
            self.amount.into(),
        ]
    }
}

/// Every return line, in extract order.
pub fn rejections(data: &Dataset) -> ReportResult<Vec<RejectionRow>> {
    let returns: Vec<_> = data
        .sales_records()?
        .into_iter()
        .filter(|record| record.is_return())
        .map(|record| RejectionRow {
            entry_no: record.entry_no,
            brand: record.brand,
            category: record.category,
            qty: record.qty,
            amount: record.amount,
        })
        .collect();
    Ok(returns)
}

// =============================================================================
// Unit Tests
// =============================================================================
