//! # Reports
//!
//! The eleven canned reports and the registry that dispatches to them.
//!
//! ## Dispatch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  menu choice ("Identify Top Products" / "top-products")                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ReportKind::from_str ──► ReportKind::TopProducts                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  run_report(kind, &dataset, &params)                                    │
//! │       │  kind.handler()(&dataset, &params)                              │
//! │       │                                                                 │
//! │       ├── Ok(ReportOutput)  → display collaborator                      │
//! │       └── Err(ReportError)  → message for THIS report only              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every handler reads the already-loaded tables and computes a fresh
//! derived table. No report depends on another's output.

pub mod movement;
pub mod output;
pub mod ranking;
pub mod sales;
pub mod stock_alerts;
pub mod variance;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::dataset::Dataset;
use crate::error::ReportResult;
use crate::types::{DiscountStrategy, Period};

pub use output::{Cell, DisplayTable, ReportOutput, Section, Tabular};

// =============================================================================
// Report Kind
// =============================================================================

/// One entry of the report menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    NotifyItemSales,
    BestSellingItems,
    NonMovingProducts,
    SlowMovingSizes,
    VarianceInsights,
    TurnaroundTime,
    RejectedGoods,
    OnlineSales,
    UniqueProducts,
    TopProducts,
    InventoryReduction,
}

impl ReportKind {
    /// Menu order.
    pub const ALL: [ReportKind; 11] = [
        ReportKind::NotifyItemSales,
        ReportKind::BestSellingItems,
        ReportKind::NonMovingProducts,
        ReportKind::SlowMovingSizes,
        ReportKind::VarianceInsights,
        ReportKind::TurnaroundTime,
        ReportKind::RejectedGoods,
        ReportKind::OnlineSales,
        ReportKind::UniqueProducts,
        ReportKind::TopProducts,
        ReportKind::InventoryReduction,
    ];

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            ReportKind::NotifyItemSales => "Notify Item Sales",
            ReportKind::BestSellingItems => "Identify Best-Selling Items",
            ReportKind::NonMovingProducts => "Track Non-Moving Products",
            ReportKind::SlowMovingSizes => "Identify Slow-Moving Sizes",
            ReportKind::VarianceInsights => "Provide Insights on Variances",
            ReportKind::TurnaroundTime => "Analyze Turnaround Time",
            ReportKind::RejectedGoods => "Generate Reports on Rejected Goods",
            ReportKind::OnlineSales => "Recommend Products for Online Sales",
            ReportKind::UniqueProducts => "Identify Unique Products",
            ReportKind::TopProducts => "Identify Top Products",
            ReportKind::InventoryReduction => "Suggest Inventory Reduction Strategies",
        }
    }

    /// Command-line identifier.
    pub fn slug(self) -> &'static str {
        match self {
            ReportKind::NotifyItemSales => "notify-item-sales",
            ReportKind::BestSellingItems => "best-selling-items",
            ReportKind::NonMovingProducts => "non-moving-products",
            ReportKind::SlowMovingSizes => "slow-moving-sizes",
            ReportKind::VarianceInsights => "variance-insights",
            ReportKind::TurnaroundTime => "turnaround-time",
            ReportKind::RejectedGoods => "rejected-goods",
            ReportKind::OnlineSales => "online-sales",
            ReportKind::UniqueProducts => "unique-products",
            ReportKind::TopProducts => "top-products",
            ReportKind::InventoryReduction => "inventory-reduction",
        }
    }

    /// Report header.
    pub fn title(self) -> &'static str {
        match self {
            ReportKind::NotifyItemSales => "Notification for Items Reaching 75% and 50% Sold",
            ReportKind::BestSellingItems => "Best Selling Items",
            ReportKind::NonMovingProducts => "Non-Moving Products and Aging Quantities",
            ReportKind::SlowMovingSizes => "Slow-Moving Sizes within Specific Categories",
            ReportKind::VarianceInsights => {
                "Insights on Variances and Suggestions for Improvement"
            }
            ReportKind::TurnaroundTime => "Turnaround Time for Exchanges and Returns",
            ReportKind::RejectedGoods => "Reports on Rejected Goods and Returns",
            ReportKind::OnlineSales => "Products to Prioritize for Online Sales",
            ReportKind::UniqueProducts => "Unique Products to Enhance Online Portfolio",
            ReportKind::TopProducts => "Top 20% Products Contributing to 80% of Sales",
            ReportKind::InventoryReduction => {
                "Strategies to Reduce Inventory of Low-Performing Items"
            }
        }
    }

    /// Returns the function computing this report.
    pub fn handler(self) -> ReportFn {
        match self {
            ReportKind::NotifyItemSales => notify_item_sales,
            ReportKind::BestSellingItems => best_selling_items,
            ReportKind::NonMovingProducts => non_moving_products,
            ReportKind::SlowMovingSizes => slow_moving_sizes,
            ReportKind::VarianceInsights => variance_insights,
            ReportKind::TurnaroundTime => turnaround_time,
            ReportKind::RejectedGoods => rejected_goods,
            ReportKind::OnlineSales => online_sales,
            ReportKind::UniqueProducts => unique_products,
            ReportKind::TopProducts => top_products,
            ReportKind::InventoryReduction => inventory_reduction,
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    /// Accepts a slug or a menu label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ReportKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == wanted || kind.label().to_lowercase() == wanted)
            .ok_or_else(|| {
                format!(
                    "Unknown report: '{}'. Run `stocklens reports` for the list",
                    s.trim()
                )
            })
    }
}

// =============================================================================
// Parameters & Dispatch
// =============================================================================

/// Per-report selections. Reports ignore the fields they do not use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportParams {
    /// Bucket width for best-sellers.
    pub period: Period,
    /// Promotion for the inventory-reduction report.
    pub strategy: DiscountStrategy,
}

/// A report computation.
pub type ReportFn = fn(&Dataset, &ReportParams) -> ReportResult<ReportOutput>;

/// Runs one report and logs the outcome.
///
/// An error here belongs to this report alone; callers keep the dataset
/// and may run any other report.
pub fn run_report(
    kind: ReportKind,
    data: &Dataset,
    params: &ReportParams,
) -> ReportResult<ReportOutput> {
    let result = kind.handler()(data, params);
    match &result {
        Ok(output) => {
            let rows: usize = output
                .sections
                .iter()
                .filter_map(|s| s.table.as_ref())
                .map(DisplayTable::len)
                .sum();
            tracing::info!(report = kind.slug(), rows, "Report computed");
        }
        Err(e) => tracing::warn!(report = kind.slug(), error = %e, "Report failed"),
    }
    result
}

// =============================================================================
// Handlers
// =============================================================================

fn table_of<T: Tabular>(rows: &[T]) -> Section {
    Section::table(DisplayTable::from_rows(rows))
}

fn notify_item_sales(data: &Dataset, _: &ReportParams) -> ReportResult<ReportOutput> {
    let alerts = stock_alerts::notify_item_sales(data)?;
    Ok(ReportOutput::new(
        ReportKind::NotifyItemSales,
        vec![
            table_of(&alerts.mostly_sold).with_heading("Items Reaching 75% Sold"),
            table_of(&alerts.half_sold).with_heading("Items Reaching 50% Sold"),
        ],
    ))
}

fn best_selling_items(data: &Dataset, params: &ReportParams) -> ReportResult<ReportOutput> {
    let top = sales::best_sellers(data, params.period)?;
    Ok(ReportOutput::new(
        ReportKind::BestSellingItems,
        vec![table_of(&top).with_heading(format!("{} top {}", params.period.label(), sales::TOP_N))],
    ))
}

fn non_moving_products(data: &Dataset, _: &ReportParams) -> ReportResult<ReportOutput> {
    let rows = movement::non_moving(data)?;
    Ok(ReportOutput::new(ReportKind::NonMovingProducts, vec![table_of(&rows)]))
}

fn slow_moving_sizes(data: &Dataset, _: &ReportParams) -> ReportResult<ReportOutput> {
    let rows = movement::slow_sizes(data)?;
    Ok(ReportOutput::new(ReportKind::SlowMovingSizes, vec![table_of(&rows)]))
}

fn variance_insights(data: &Dataset, _: &ReportParams) -> ReportResult<ReportOutput> {
    let rows = variance::variances(data)?;
    Ok(ReportOutput::new(ReportKind::VarianceInsights, vec![table_of(&rows)]))
}

fn turnaround_time(data: &Dataset, _: &ReportParams) -> ReportResult<ReportOutput> {
    let rows = variance::turnaround(data)?;
    Ok(ReportOutput::new(ReportKind::TurnaroundTime, vec![table_of(&rows)]))
}

fn rejected_goods(data: &Dataset, _: &ReportParams) -> ReportResult<ReportOutput> {
    let rows = variance::rejections(data)?;
    Ok(ReportOutput::new(ReportKind::RejectedGoods, vec![table_of(&rows)]))
}

fn online_sales(data: &Dataset, _: &ReportParams) -> ReportResult<ReportOutput> {
    let rows = ranking::online_candidates(data)?;
    Ok(ReportOutput::new(ReportKind::OnlineSales, vec![table_of(&rows)]))
}

fn unique_products(data: &Dataset, _: &ReportParams) -> ReportResult<ReportOutput> {
    let rows = ranking::unique_products(data)?;
    Ok(ReportOutput::new(ReportKind::UniqueProducts, vec![table_of(&rows)]))
}

fn top_products(data: &Dataset, _: &ReportParams) -> ReportResult<ReportOutput> {
    let rows = ranking::top_products(data)?;
    Ok(ReportOutput::new(ReportKind::TopProducts, vec![table_of(&rows)]))
}

fn inventory_reduction(data: &Dataset, params: &ReportParams) -> ReportResult<ReportOutput> {
    let plan = ranking::reduction_plan(data, params.strategy)?;

    let heading = format!("Suggested Strategies: {}", plan.strategy.label());
    let suggestion = if plan.strategy.discount_bps().is_some() {
        let mut section = table_of(&plan.discounted).with_heading(heading);
        section.note = Some(plan.recommendation.to_string());
        section
    } else {
        Section::note(plan.recommendation).with_heading(heading)
    };

    Ok(ReportOutput::new(
        ReportKind::InventoryReduction,
        vec![table_of(&plan.low_performers), suggestion],
    ))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PurchaseRecord, SalesRecord, StockRecord};

    fn sample() -> Dataset {
        let purchases = vec![PurchaseRecord {
            entry_no: "1".to_string(),
            category: "Shirts".to_string(),
            size: "M".to_string(),
            sale_qty: Some(0),
            current_stock: Some(20.0),
            qty: Some(100.0),
            entry_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 2),
        }];
        let sales = vec![SalesRecord {
            entry_no: "S1".to_string(),
            brand: "Acme".to_string(),
            category: "Shirts".to_string(),
            qty: Some(4.0),
            amount: Some(400.0),
            entry_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 3),
        }];
        let stock = vec![StockRecord {
            name: "Oxford".to_string(),
            category: "Shirts".to_string(),
            brand: "Acme".to_string(),
            stock: Some(100.0),
            sale_rate_value: Some(100.0),
            mrp: Some(150.0),
        }];
        Dataset::from_records(&purchases, &sales, &stock)
    }

    #[test]
    fn test_parse_from_slug_and_label() {
        for kind in ReportKind::ALL {
            assert_eq!(kind.slug().parse::<ReportKind>().unwrap(), kind);
            assert_eq!(kind.label().parse::<ReportKind>().unwrap(), kind);
        }
        assert_eq!(
            "identify top products".parse::<ReportKind>().unwrap(),
            ReportKind::TopProducts
        );
        assert!("monthly totals".parse::<ReportKind>().is_err());
    }

    #[test]
    fn test_slug_matches_serde_name() {
        for kind in ReportKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.slug()));
        }
    }

    #[test]
    fn test_every_report_runs_on_complete_data() {
        let data = sample();
        let params = ReportParams::default();
        for kind in ReportKind::ALL {
            let output = run_report(kind, &data, &params).unwrap();
            assert_eq!(output.kind, kind);
            assert_eq!(output.title, kind.title());
            assert!(!output.sections.is_empty());
        }
    }

    #[test]
    fn test_missing_column_fails_only_its_reports() {
        let mut data = sample();
        data.stock = crate::dataset::Table::new(
            crate::types::TableKind::Stock,
            vec!["NameToDisplay".to_string(), "Category".to_string(), "Brand".to_string()],
            vec![vec!["Oxford".to_string(), "Shirts".to_string(), "Acme".to_string()]],
        );
        let params = ReportParams::default();

        assert!(run_report(ReportKind::OnlineSales, &data, &params).is_err());
        assert!(run_report(ReportKind::NotifyItemSales, &data, &params).is_err());
        assert!(run_report(ReportKind::UniqueProducts, &data, &params).is_ok());
        assert!(run_report(ReportKind::NonMovingProducts, &data, &params).is_ok());
        assert!(run_report(ReportKind::TurnaroundTime, &data, &params).is_ok());
    }

    #[test]
    fn test_notify_sections() {
        let output = run_report(ReportKind::NotifyItemSales, &sample(), &ReportParams::default())
            .unwrap();
        assert_eq!(output.sections.len(), 2);
        assert_eq!(output.sections[0].heading.as_deref(), Some("Items Reaching 75% Sold"));
        let mostly = output.sections[0].table.as_ref().unwrap();
        assert_eq!(mostly.len(), 1);
        assert_eq!(mostly.rows[0][0], Cell::Text("Oxford".to_string()));
    }

    #[test]
    fn test_reduction_sections_follow_strategy() {
        let data = sample();

        let flat = run_report(ReportKind::InventoryReduction, &data, &ReportParams::default())
            .unwrap();
        let suggestion = &flat.sections[1];
        let discounted = suggestion.table.as_ref().unwrap();
        assert_eq!(discounted.columns[3], "Discounted Price");
        assert_eq!(discounted.rows[0][3].to_string(), "70.00");
        assert_eq!(
            suggestion.note.as_deref(),
            Some(DiscountStrategy::FlatThirtyOff.recommendation())
        );

        let params = ReportParams {
            strategy: DiscountStrategy::SaleDay,
            ..ReportParams::default()
        };
        let sale_day = run_report(ReportKind::InventoryReduction, &data, &params).unwrap();
        assert!(sale_day.sections[1].table.is_none());
        assert_eq!(
            sale_day.sections[1].note.as_deref(),
            Some(DiscountStrategy::SaleDay.recommendation())
        );
    }
}
