//! # Sales Aggregator
//!
//! Best-selling orders per period.
//!
//! ## Grouping
//! ```text
//! sales rows ──► (bucket_end(Entry Date), Entry No.) ──► Σ Qty, Σ Amount
//!                                                           │
//!                      stable sort by Σ Qty descending ◄────┘
//!                                   │
//!                                   ▼
//!                                top 10
//! ```
//!
//! Groups are visited in key order (period end, then entry number) before
//! the stable sort, so ties keep that order and the result does not depend
//! on the row order of the extract.

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::dataset::Dataset;
use crate::error::ReportResult;
use crate::reports::output::{Cell, Tabular};
use crate::types::{columns, Period};

/// Number of groups kept.
pub const TOP_N: usize = 10;

// =============================================================================
// Entry Key
// =============================================================================

/// An `Entry No.` that groups and orders numerically when it is a number.
///
/// Numeric entry numbers are normalized, so `1`, `01` and `1.0` are the
/// same order and display as `1`. Numbers sort before text; text sorts
/// lexicographically and groups on its exact (trimmed) spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryKey(String);

impl EntryKey {
    pub fn new(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v.fract() == 0.0 => EntryKey(format!("{:.0}", v + 0.0)),
            Ok(v) if v.is_finite() => EntryKey(v.to_string()),
            _ => EntryKey(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric(&self) -> Option<f64> {
        self.0.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

impl Ord for EntryKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.total_cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for EntryKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// =============================================================================
// Sales Summary
// =============================================================================

/// One (period, order) group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    pub period_end: NaiveDate,
    pub entry_no: String,
    pub qty: f64,
    /// `None` when the extract has no `Amount` column.
    pub amount: Option<f64>,
}

impl Tabular for SalesSummary {
    fn columns() -> &'static [&'static str] {
        &["Entry Date", "Entry No.", "Qty(Unit1)", "Amount"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Date(self.period_end),
            self.entry_no.as_str().into(),
            self.qty.into(),
            self.amount.into(),
        ]
    }
}

#[derive(Default)]
struct Totals {
    qty: f64,
    amount: f64,
}

/// Top 10 (period, order) groups by summed quantity.
///
/// ## Rules
/// - Rows with a null entry date belong to no period and are skipped
/// - Blank quantities and amounts are skipped by the sums
/// - Ties keep group order (period end, then entry number)
///
/// ## Columns Read
/// sales: `Entry Date`, `Entry No.`, `Qty(Unit1)`, `Amount` (optional)
pub fn best_sellers(data: &Dataset, period: Period) -> ReportResult<Vec<SalesSummary>> {
    let sales = &data.sales;
    let dates = sales.dates(columns::ENTRY_DATE)?;
    let entry_nos = sales.text(columns::ENTRY_NO)?;
    let qty = sales.numbers(columns::QTY)?;
    let amount = if sales.has_column(columns::AMOUNT) {
        Some(sales.numbers(columns::AMOUNT)?)
    } else {
        None
    };

    let mut groups: BTreeMap<(NaiveDate, EntryKey), Totals> = BTreeMap::new();
    for (i, date) in dates.iter().enumerate() {
        let Some(date) = date else { continue };
        let totals = groups
            .entry((period.bucket_end(*date), EntryKey::new(entry_nos[i])))
            .or_default();
        totals.qty += qty[i].unwrap_or(0.0);
        if let Some(amount) = &amount {
            totals.amount += amount[i].unwrap_or(0.0);
        }
    }

    let mut summaries: Vec<SalesSummary> = groups
        .into_iter()
        .map(|((period_end, entry_no), totals)| SalesSummary {
            period_end,
            entry_no: entry_no.0,
            qty: totals.qty,
            amount: amount.as_ref().map(|_| totals.amount),
        })
        .collect();

    summaries.sort_by(|a, b| b.qty.total_cmp(&a.qty));
    summaries.truncate(TOP_N);

    tracing::debug!(period = %period, groups = summaries.len(), "Best sellers ranked");
    Ok(summaries)
}

// =============================================================================
// Unit Tests
// =============================================================================
