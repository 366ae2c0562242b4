//! # Movement Classifier
//!
//! Purchase entries that have not sold at all, and (Category, Size) pairs
//! where sales trail receipts.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::dataset::Dataset;
use crate::error::ReportResult;
use crate::reports::output::{Cell, Tabular};
use crate::types::columns;

/// A purchase entry with zero units sold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NonMovingRow {
    pub entry_no: String,
    pub category: String,
    pub current_stock: Option<f64>,
}

impl Tabular for NonMovingRow {
    fn columns() -> &'static [&'static str] {
        &["Entry No.", "Category", "Current Stock(Unit1)"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.entry_no.as_str().into(),
            self.category.as_str().into(),
            self.current_stock.into(),
        ]
    }
}

/// A (Category, Size) group selling less than was received.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlowSizeRow {
    pub category: String,
    pub size: String,
    pub sale_qty: f64,
    pub qty: f64,
}

impl Tabular for SlowSizeRow {
    fn columns() -> &'static [&'static str] {
        &["Category", "Size", "SALE QTY", "Qty(Unit1)"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.category.as_str().into(),
            self.size.as_str().into(),
            self.sale_qty.into(),
            self.qty.into(),
        ]
    }
}

/// Purchase entries whose `SALE QTY` is exactly zero, in extract order.
///
/// A blank `SALE QTY` is unknown, not zero, and is not listed.
pub fn non_moving(data: &Dataset) -> ReportResult<Vec<NonMovingRow>> {
    let purchases = &data.purchases;
    let sale_qty = purchases.numbers(columns::SALE_QTY)?;
    let entry_nos = purchases.text(columns::ENTRY_NO)?;
    let categories = purchases.text(columns::CATEGORY)?;
    let current_stock = purchases.numbers(columns::CURRENT_STOCK)?;

    Ok(sale_qty
        .iter()
        .enumerate()
        .filter(|(_, sold)| **sold == Some(0.0))
        .map(|(i, _)| NonMovingRow {
            entry_no: entry_nos[i].to_string(),
            category: categories[i].to_string(),
            current_stock: current_stock[i],
        })
        .collect())
}

/// (Category, Size) groups where Σ `SALE QTY` < Σ `Qty(Unit1)`.
///
/// Groups come back in (Category, Size) order. Rows with a blank category
/// or size belong to no group.
pub fn slow_sizes(data: &Dataset) -> ReportResult<Vec<SlowSizeRow>> {
    let purchases = &data.purchases;
    let categories = purchases.text(columns::CATEGORY)?;
    let sizes = purchases.text(columns::SIZE)?;
    let sale_qty = purchases.numbers(columns::SALE_QTY)?;
    let qty = purchases.numbers(columns::QTY)?;

    let mut groups: BTreeMap<(&str, &str), (f64, f64)> = BTreeMap::new();
    for i in 0..purchases.len() {
        if categories[i].is_empty() || sizes[i].is_empty() {
            continue;
        }
        let totals = groups.entry((categories[i], sizes[i])).or_default();
        totals.0 += sale_qty[i].unwrap_or(0.0);
        totals.1 += qty[i].unwrap_or(0.0);
    }

    Ok(groups
        .into_iter()
        .filter(|(_, (sold, received))| sold < received)
        .map(|((category, size), (sale_qty, qty))| SlowSizeRow {
            category: category.to_string(),
            size: size.to_string(),
            sale_qty,
            qty,
        })
        .collect())
}
