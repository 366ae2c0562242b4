//! # Domain Types
//!
//! Core domain types used throughout StockLens.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ PurchaseRecord  │   │   SalesRecord   │   │   StockRecord   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  entry_no       │   │  entry_no       │   │  name           │       │
//! │  │  category/size  │   │  brand          │   │  stock          │       │
//! │  │  sale_qty       │   │  qty (signed)   │   │  sale_rate_value│       │
//! │  │  entry_date     │   │  entry_date     │   │  mrp            │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌──────────────────┐      │
//! │  │     Metric      │   │     Period      │   │ DiscountStrategy │      │
//! │  │  Value(f64)     │   │  Weekly         │   │  FlatThirtyOff   │      │
//! │  │  Undefined      │   │  Monthly        │   │  SaleDay         │      │
//! │  └─────────────────┘   │  Quarterly      │   │  BuyOneGetOne    │      │
//! │                        └─────────────────┘   └──────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Numeric fields are `Option` because extract cells may be blank. A blank
//! cell is skipped by sums and makes any arithmetic it feeds undefined.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Column Names
// =============================================================================

/// Column headers of the three extracts, exactly as exported.
pub mod columns {
    pub const ENTRY_NO: &str = "Entry No.";
    pub const CATEGORY: &str = "Category";
    pub const SIZE: &str = "Size";
    pub const SALE_QTY: &str = "SALE QTY";
    pub const CURRENT_STOCK: &str = "Current Stock(Unit1)";
    pub const QTY: &str = "Qty(Unit1)";
    pub const ENTRY_DATE: &str = "Entry Date";
    pub const BRAND: &str = "Brand";
    pub const AMOUNT: &str = "Amount";
    pub const NAME_TO_DISPLAY: &str = "NameToDisplay";
    pub const STOCK: &str = "Stock(Unit1)";
    pub const SALE_RATE_VALUE: &str = "Sale Rate Value";
    pub const MRP: &str = "MRP";
}

// =============================================================================
// Table Kind
// =============================================================================

/// Which of the three extracts a table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Purchases,
    Sales,
    Stock,
}

impl TableKind {
    /// All extracts in load order.
    pub const ALL: [TableKind; 3] = [TableKind::Purchases, TableKind::Sales, TableKind::Stock];
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Purchases => write!(f, "purchases"),
            TableKind::Sales => write!(f, "sales"),
            TableKind::Stock => write!(f, "stock"),
        }
    }
}

// =============================================================================
// Records
// =============================================================================

/// One row of the purchase extract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub entry_no: String,
    pub category: String,
    pub size: String,
    /// Units sold out of this purchase entry.
    pub sale_qty: Option<i64>,
    pub current_stock: Option<f64>,
    /// Units received. Never negative in a well-formed extract.
    pub qty: Option<f64>,
    pub entry_date: Option<NaiveDate>,
}

/// One row of the sales extract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub entry_no: String,
    pub brand: String,
    pub category: String,
    /// Signed quantity; negative means a return or exchange.
    pub qty: Option<f64>,
    pub amount: Option<f64>,
    pub entry_date: Option<NaiveDate>,
}

impl SalesRecord {
    /// Returns true for return/exchange lines.
    pub fn is_return(&self) -> bool {
        self.qty.is_some_and(|q| q < 0.0)
    }
}

/// One row of the stock extract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub name: String,
    pub category: String,
    pub brand: String,
    pub stock: Option<f64>,
    pub sale_rate_value: Option<f64>,
    pub mrp: Option<f64>,
}

// =============================================================================
// Metric
// =============================================================================

/// A derived number that may be undefined.
///
/// ## Why not NaN?
/// An undefined ratio (stock of zero, no recent sales, blank cell) must be
/// visible as such in every output. `Undefined` serializes to JSON `null`
/// and renders as `undefined`; it never compares into a threshold tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "Option<f64>")]
pub enum Metric {
    Value(f64),
    Undefined,
}

impl Metric {
    /// Divides `numerator` by `denominator`.
    ///
    /// Undefined when either operand is missing, the denominator is zero,
    /// or the quotient is not finite.
    pub fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Metric {
        match (numerator, denominator) {
            (Some(n), Some(d)) if d != 0.0 => Metric::from_f64(n / d),
            _ => Metric::Undefined,
        }
    }

    /// Wraps a float, mapping NaN and infinities to `Undefined`.
    pub fn from_f64(value: f64) -> Metric {
        if value.is_finite() {
            Metric::Value(value)
        } else {
            Metric::Undefined
        }
    }

    /// Applies `f` to a defined value.
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Metric {
        match self {
            Metric::Value(v) => Metric::from_f64(f(v)),
            Metric::Undefined => Metric::Undefined,
        }
    }

    /// Returns the value if defined.
    pub fn value(self) -> Option<f64> {
        match self {
            Metric::Value(v) => Some(v),
            Metric::Undefined => None,
        }
    }
}

impl From<Metric> for Option<f64> {
    fn from(metric: Metric) -> Self {
        metric.value()
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Value(v) => write!(f, "{:.2}", v),
            Metric::Undefined => write!(f, "undefined"),
        }
    }
}

// =============================================================================
// Period
// =============================================================================

/// Bucket width for the best-seller aggregation.
///
/// Buckets are labelled by their last day: the Sunday closing a Monday–Sunday
/// week, the last day of the month, or the last day of the calendar quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    #[default]
    Weekly,
    Monthly,
    Quarterly,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Weekly, Period::Monthly, Period::Quarterly];

    /// Returns the label date of the bucket containing `date`.
    pub fn bucket_end(self, date: NaiveDate) -> NaiveDate {
        match self {
            Period::Weekly => {
                let days_to_sunday = (7 - date.weekday().num_days_from_sunday()) % 7;
                date + Duration::days(i64::from(days_to_sunday))
            }
            Period::Monthly => last_day_of_month(date.year(), date.month()).unwrap_or(date),
            Period::Quarterly => {
                let quarter_end_month = (date.month() - 1) / 3 * 3 + 3;
                last_day_of_month(date.year(), quarter_end_month).unwrap_or(date)
            }
        }
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            Period::Weekly => "Weekly",
            Period::Monthly => "Monthly",
            Period::Quarterly => "Quarterly",
        }
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Weekly => write!(f, "weekly"),
            Period::Monthly => write!(f, "monthly"),
            Period::Quarterly => write!(f, "quarterly"),
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" | "w" => Ok(Period::Weekly),
            "monthly" | "month" | "m" => Ok(Period::Monthly),
            "quarterly" | "quarter" | "q" => Ok(Period::Quarterly),
            other => Err(format!(
                "Unknown period: '{}'. Valid options: weekly, monthly, quarterly",
                other
            )),
        }
    }
}

// =============================================================================
// Discount Strategy
// =============================================================================

/// Promotion applied to low-performing items.
///
/// Only the flat markdown computes anything; the other strategies are
/// recommendations for the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DiscountStrategy {
    #[default]
    #[serde(rename = "flat-30")]
    FlatThirtyOff,
    #[serde(rename = "sale-day")]
    SaleDay,
    #[serde(rename = "bogo")]
    BuyOneGetOne,
}

impl DiscountStrategy {
    pub const ALL: [DiscountStrategy; 3] = [
        DiscountStrategy::FlatThirtyOff,
        DiscountStrategy::SaleDay,
        DiscountStrategy::BuyOneGetOne,
    ];

    /// Markdown in basis points, for strategies that compute a price.
    pub fn discount_bps(self) -> Option<u32> {
        match self {
            DiscountStrategy::FlatThirtyOff => Some(3000),
            DiscountStrategy::SaleDay | DiscountStrategy::BuyOneGetOne => None,
        }
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            DiscountStrategy::FlatThirtyOff => "Flat 30% Off",
            DiscountStrategy::SaleDay => "Sale Day",
            DiscountStrategy::BuyOneGetOne => "Buy 1 Get 1 Free",
        }
    }

    /// Operator-facing recommendation text.
    pub fn recommendation(self) -> &'static str {
        match self {
            DiscountStrategy::FlatThirtyOff => {
                "Apply a flat 30% discount on these items to boost sales."
            }
            DiscountStrategy::SaleDay => {
                "Organize a sale day to promote these low-performing items."
            }
            DiscountStrategy::BuyOneGetOne => {
                "Implement a buy-one-get-one-free promotion for these items."
            }
        }
    }
}

impl fmt::Display for DiscountStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DiscountStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "flat-30" | "flat30" | "flat 30% off" => Ok(DiscountStrategy::FlatThirtyOff),
            "sale-day" | "sale day" => Ok(DiscountStrategy::SaleDay),
            "bogo" | "buy 1 get 1 free" => Ok(DiscountStrategy::BuyOneGetOne),
            _ => Err(format!(
                "Unknown strategy: '{}'. Valid options: flat-30, sale-day, bogo",
                s.trim()
            )),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_metric_ratio() {
        assert_eq!(Metric::ratio(Some(10.0), Some(4.0)), Metric::Value(2.5));
        assert_eq!(Metric::ratio(Some(10.0), Some(0.0)), Metric::Undefined);
        assert_eq!(Metric::ratio(Some(0.0), Some(0.0)), Metric::Undefined);
        assert_eq!(Metric::ratio(None, Some(3.0)), Metric::Undefined);
        assert_eq!(Metric::ratio(Some(3.0), None), Metric::Undefined);
    }

    #[test]
    fn test_metric_serializes_undefined_as_null() {
        let json = serde_json::to_string(&vec![Metric::Value(1.5), Metric::Undefined]).unwrap();
        assert_eq!(json, "[1.5,null]");
    }

    #[test]
    fn test_metric_display() {
        assert_eq!(Metric::Value(87.5).to_string(), "87.50");
        assert_eq!(Metric::Undefined.to_string(), "undefined");
    }

    #[test]
    fn test_weekly_bucket_ends_on_sunday() {
        // 2024-03-06 is a Wednesday
        assert_eq!(Period::Weekly.bucket_end(date(2024, 3, 6)), date(2024, 3, 10));
        // A Sunday is its own bucket end
        assert_eq!(Period::Weekly.bucket_end(date(2024, 3, 10)), date(2024, 3, 10));
        // Monday starts the next week
        assert_eq!(Period::Weekly.bucket_end(date(2024, 3, 11)), date(2024, 3, 17));
    }

    #[test]
    fn test_monthly_and_quarterly_bucket_ends() {
        assert_eq!(Period::Monthly.bucket_end(date(2024, 2, 10)), date(2024, 2, 29));
        assert_eq!(Period::Monthly.bucket_end(date(2023, 12, 1)), date(2023, 12, 31));
        assert_eq!(Period::Quarterly.bucket_end(date(2024, 5, 2)), date(2024, 6, 30));
        assert_eq!(Period::Quarterly.bucket_end(date(2024, 11, 30)), date(2024, 12, 31));
        assert_eq!(Period::Quarterly.bucket_end(date(2024, 1, 1)), date(2024, 3, 31));
    }

    #[test]
    fn test_period_parsing() {
        assert_eq!("weekly".parse::<Period>().unwrap(), Period::Weekly);
        assert_eq!("Monthly".parse::<Period>().unwrap(), Period::Monthly);
        assert_eq!("q".parse::<Period>().unwrap(), Period::Quarterly);
        assert!("yearly".parse::<Period>().is_err());
    }

    #[test]
    fn test_strategy_parsing_accepts_labels_and_slugs() {
        for strategy in DiscountStrategy::ALL {
            assert_eq!(strategy.label().parse::<DiscountStrategy>().unwrap(), strategy);
        }
        assert_eq!(
            "bogo".parse::<DiscountStrategy>().unwrap(),
            DiscountStrategy::BuyOneGetOne
        );
        assert!("half off".parse::<DiscountStrategy>().is_err());
    }

    #[test]
    fn test_only_flat_strategy_computes() {
        assert_eq!(DiscountStrategy::FlatThirtyOff.discount_bps(), Some(3000));
        assert_eq!(DiscountStrategy::SaleDay.discount_bps(), None);
        assert_eq!(DiscountStrategy::BuyOneGetOne.discount_bps(), None);
    }

    #[test]
    fn test_is_return() {
        let mut record = SalesRecord {
            entry_no: "1".to_string(),
            brand: "B".to_string(),
            category: "C".to_string(),
            qty: Some(-1.0),
            amount: None,
            entry_date: None,
        };
        assert!(record.is_return());
        record.qty = Some(2.0);
        assert!(!record.is_return());
        record.qty = None;
        assert!(!record.is_return());
    }
}
