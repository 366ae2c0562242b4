//! # Stock Alert Engine
//!
//! Percent sold and projected days to sell out per stock item, bucketed
//! into two alert tiers.
//!
//! ## Formulas
//! ```text
//! percent_sold     = (stock_qty − current_stock) / stock_qty × 100
//! days_to_sell_out = stock_qty / recent_sales_qty
//!
//! stock_qty        ← stock extract     "Stock(Unit1)"          row i
//! current_stock    ← purchase extract  "Current Stock(Unit1)"  row i
//! recent_sales_qty ← sales extract     "Qty(Unit1)"            row i
//! ```
//!
//! ## Positional Alignment
//! The three extracts share no key, so row i of each is combined. A stock
//! row with no counterpart row in purchases or sales reads a blank value and
//! its metric is `Undefined`. Percentages are not clipped: restocks push
//! them below 0, returns can push them above 100.

use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::ReportResult;
use crate::reports::output::{Cell, Tabular};
use crate::types::{columns, Metric};

/// Lower bound of the upper alert tier (inclusive).
pub const HIGH_TIER_PERCENT: f64 = 75.0;

/// Lower bound of the lower alert tier (inclusive).
pub const LOW_TIER_PERCENT: f64 = 50.0;

/// Which alert bucket a percent-sold value falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertTier {
    /// `[50, 75)`
    HalfSold,
    /// `[75, ∞)`
    MostlySold,
}

impl AlertTier {
    /// Classifies a percent-sold value. Undefined values are in no tier.
    pub fn classify(percent_sold: Metric) -> Option<AlertTier> {
        match percent_sold.value()? {
            p if p >= HIGH_TIER_PERCENT => Some(AlertTier::MostlySold),
            p if p >= LOW_TIER_PERCENT => Some(AlertTier::HalfSold),
            _ => None,
        }
    }
}

/// One alerted stock item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRow {
    pub name: String,
    pub percent_sold: Metric,
    pub days_to_sell_out: Metric,
}

impl Tabular for AlertRow {
    fn columns() -> &'static [&'static str] {
        &["NameToDisplay", "StockPercentSold", "DaysToSellOut"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.name.as_str().into(),
            self.percent_sold.into(),
            self.days_to_sell_out.into(),
        ]
    }
}

/// Both alert tiers, each in stock-extract order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StockAlerts {
    pub mostly_sold: Vec<AlertRow>,
    pub half_sold: Vec<AlertRow>,
}

/// `(stock_qty − current_stock) / stock_qty × 100`.
pub fn percent_sold(stock_qty: Option<f64>, current_stock: Option<f64>) -> Metric {
    let sold = match (stock_qty, current_stock) {
        (Some(stock), Some(current)) => Some(stock - current),
        _ => None,
    };
    Metric::ratio(sold, stock_qty).map(|fraction| fraction * 100.0)
}

/// `stock_qty / recent_sales_qty`.
pub fn days_to_sell_out(stock_qty: Option<f64>, recent_sales_qty: Option<f64>) -> Metric {
    Metric::ratio(stock_qty, recent_sales_qty)
}

/// Computes both alert tiers.
///
/// ## Columns Read
/// - stock: `NameToDisplay`, `Stock(Unit1)`
/// - purchases: `Current Stock(Unit1)`
/// - sales: `Qty(Unit1)`
pub fn notify_item_sales(data: &Dataset) -> ReportResult<StockAlerts> {
    let names = data.stock.text(columns::NAME_TO_DISPLAY)?;
    let stock_qty = data.stock.numbers(columns::STOCK)?;
    let current_stock = data.purchases.numbers(columns::CURRENT_STOCK)?;
    let recent_sales = data.sales.numbers(columns::QTY)?;

    let mut alerts = StockAlerts::default();
    for (i, name) in names.iter().enumerate() {
        let stock = stock_qty[i];
        let percent = percent_sold(stock, current_stock.get(i).copied().flatten());
        let row = AlertRow {
            name: name.to_string(),
            percent_sold: percent,
            days_to_sell_out: days_to_sell_out(stock, recent_sales.get(i).copied().flatten()),
        };
        match AlertTier::classify(percent) {
            Some(AlertTier::MostlySold) => alerts.mostly_sold.push(row),
            Some(AlertTier::HalfSold) => alerts.half_sold.push(row),
            None => {}
        }
    }

    Ok(alerts)
}

// =============================================================================
// Unit Tests
// =============================================================================
