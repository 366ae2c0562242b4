//! # Ranking & Recommendation Reports
//!
//! Stock-extract reports: online-sale candidates, catalog uniqueness, the
//! Pareto ranking and the discount calculator for low performers.
//!
//! ## Pareto Cut
//! ```text
//! SalesPercentage = Sale Rate Value / Σ Sale Rate Value × 100
//! keep            = floor(rows × 0.2)      (count-based, not cumulative)
//! ```
//! The cut counts every stock row, including rows whose percentage is
//! undefined; undefined rows are never ranked.

use serde::Serialize;
use std::collections::HashSet;

use crate::dataset::Dataset;
use crate::error::{ReportError, ReportResult};
use crate::money::Money;
use crate::reports::output::{money_as_decimal, Cell, Tabular};
use crate::types::{columns, DiscountStrategy, Metric, TableKind};

/// Number of online-sale candidates.
pub const ONLINE_CANDIDATES: usize = 10;

/// Stable descending ranking of `(value, item)` pairs, keeping `n`.
pub(crate) fn rank_descending<T>(mut items: Vec<(f64, T)>, n: usize) -> Vec<(f64, T)> {
    items.sort_by(|a, b| b.0.total_cmp(&a.0));
    items.truncate(n);
    items
}

// =============================================================================
// Online Candidates
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnlineCandidateRow {
    pub name: String,
    pub sale_rate_value: f64,
}

impl Tabular for OnlineCandidateRow {
    fn columns() -> &'static [&'static str] {
        &["NameToDisplay", "Sale Rate Value"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![self.name.as_str().into(), self.sale_rate_value.into()]
    }
}

/// Top 10 stock items by `Sale Rate Value`. Blank values are not ranked.
pub fn online_candidates(data: &Dataset) -> ReportResult<Vec<OnlineCandidateRow>> {
    let names = data.stock.text(columns::NAME_TO_DISPLAY)?;
    let rates = data.stock.numbers(columns::SALE_RATE_VALUE)?;

    let rated = rates
        .iter()
        .zip(names)
        .filter_map(|(rate, name)| rate.map(|r| (r, name)))
        .collect();

    Ok(rank_descending(rated, ONLINE_CANDIDATES)
        .into_iter()
        .map(|(sale_rate_value, name)| OnlineCandidateRow {
            name: name.to_string(),
            sale_rate_value,
        })
        .collect())
}

// =============================================================================
// Unique Products
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniqueProductRow {
    pub name: String,
    pub category: String,
    pub brand: String,
}

impl Tabular for UniqueProductRow {
    fn columns() -> &'static [&'static str] {
        &["NameToDisplay", "Category", "Brand"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.name.as_str().into(),
            self.category.as_str().into(),
            self.brand.as_str().into(),
        ]
    }
}

/// One row per distinct display name; the first occurrence wins.
pub fn unique_products(data: &Dataset) -> ReportResult<Vec<UniqueProductRow>> {
    let names = data.stock.text(columns::NAME_TO_DISPLAY)?;
    let categories = data.stock.text(columns::CATEGORY)?;
    let brands = data.stock.text(columns::BRAND)?;

    let mut seen = HashSet::new();
    Ok(names
        .iter()
        .enumerate()
        .filter(|(_, name)| seen.insert(**name))
        .map(|(i, name)| UniqueProductRow {
            name: name.to_string(),
            category: categories[i].to_string(),
            brand: brands[i].to_string(),
        })
        .collect())
}

// =============================================================================
// Pareto
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParetoRow {
    pub name: String,
    pub sales_percentage: Metric,
}

impl Tabular for ParetoRow {
    fn columns() -> &'static [&'static str] {
        &["NameToDisplay", "SalesPercentage"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![self.name.as_str().into(), self.sales_percentage.into()]
    }
}

/// Number of rows the Pareto cut keeps: `floor(rows × 0.2)`.
pub fn pareto_count(rows: usize) -> usize {
    rows / 5
}

/// The top fifth of stock rows by share of total `Sale Rate Value`.
///
/// A zero or blank total leaves every share undefined and the result empty.
pub fn top_products(data: &Dataset) -> ReportResult<Vec<ParetoRow>> {
    let names = data.stock.text(columns::NAME_TO_DISPLAY)?;
    let rates = data.stock.numbers(columns::SALE_RATE_VALUE)?;

    let total: f64 = rates.iter().flatten().sum();
    let total = rates.iter().any(Option::is_some).then_some(total);

    let shares = rates
        .iter()
        .zip(names)
        .filter_map(|(rate, name)| {
            let share = Metric::ratio(*rate, total).map(|fraction| fraction * 100.0);
            share.value().map(|s| (s, name))
        })
        .collect();

    Ok(rank_descending(shares, pareto_count(data.stock.len()))
        .into_iter()
        .map(|(share, name)| ParetoRow {
            name: name.to_string(),
            sales_percentage: Metric::Value(share),
        })
        .collect())
}

// =============================================================================
// Low Performers & Discounts
// =============================================================================

/// A stock item selling below its MRP.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LowPerformerRow {
    /// 1-based data row in the stock extract.
    #[serde(skip)]
    pub row: usize,
    pub name: String,
    pub category: String,
    pub sale_rate_value: f64,
    pub mrp: f64,
}

impl Tabular for LowPerformerRow {
    fn columns() -> &'static [&'static str] {
        &["NameToDisplay", "Category", "Sale Rate Value", "MRP"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.name.as_str().into(),
            self.category.as_str().into(),
            self.sale_rate_value.into(),
            self.mrp.into(),
        ]
    }
}

/// A low performer with its markdown applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscountedRow {
    pub name: String,
    pub category: String,
    pub sale_rate_value: f64,
    #[serde(serialize_with = "money_as_decimal")]
    pub discounted_price: Money,
}

impl Tabular for DiscountedRow {
    fn columns() -> &'static [&'static str] {
        &["NameToDisplay", "Category", "Sale Rate Value", "Discounted Price"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.name.as_str().into(),
            self.category.as_str().into(),
            self.sale_rate_value.into(),
            self.discounted_price.into(),
        ]
    }
}

/// The low performers and what to do about them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReductionPlan {
    pub strategy: DiscountStrategy,
    pub low_performers: Vec<LowPerformerRow>,
    /// Empty unless the strategy computes a price.
    pub discounted: Vec<DiscountedRow>,
    pub recommendation: &'static str,
}

/// Stock items whose `Sale Rate Value` is below `MRP`, in extract order.
///
/// Items with either price blank are not compared.
pub fn low_performers(data: &Dataset) -> ReportResult<Vec<LowPerformerRow>> {
    let names = data.stock.text(columns::NAME_TO_DISPLAY)?;
    let categories = data.stock.text(columns::CATEGORY)?;
    let rates = data.stock.numbers(columns::SALE_RATE_VALUE)?;
    let mrps = data.stock.numbers(columns::MRP)?;

    Ok((0..data.stock.len())
        .filter_map(|i| match (rates[i], mrps[i]) {
            (Some(rate), Some(mrp)) if rate < mrp => Some(LowPerformerRow {
                row: i + 1,
                name: names[i].to_string(),
                category: categories[i].to_string(),
                sale_rate_value: rate,
                mrp,
            }),
            _ => None,
        })
        .collect())
}

/// Applies a markdown in basis points to each low performer's sale rate.
///
/// ## Errors
/// `MalformedValue` when a sale rate is too large to price in minor units.
pub fn apply_discount(rows: &[LowPerformerRow], discount_bps: u32) -> ReportResult<Vec<DiscountedRow>> {
    rows.iter()
        .map(|row| {
            let price = Money::from_decimal(row.sale_rate_value).ok_or_else(|| {
                ReportError::MalformedValue {
                    table: TableKind::Stock,
                    column: columns::SALE_RATE_VALUE.to_string(),
                    row: row.row,
                    value: row.sale_rate_value.to_string(),
                }
            })?;
            Ok(DiscountedRow {
                name: row.name.clone(),
                category: row.category.clone(),
                sale_rate_value: row.sale_rate_value,
                discounted_price: price.apply_percentage_discount(discount_bps),
            })
        })
        .collect()
}

/// Low performers plus the chosen strategy's outcome.
pub fn reduction_plan(data: &Dataset, strategy: DiscountStrategy) -> ReportResult<ReductionPlan> {
    let low_performers = low_performers(data)?;
    let discounted = match strategy.discount_bps() {
        Some(bps) => apply_discount(&low_performers, bps)?,
        None => Vec::new(),
    };

    Ok(ReductionPlan {
        strategy,
        low_performers,
        discounted,
        recommendation: strategy.recommendation(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StockRecord;

    fn item(name: &str, rate: Option<f64>, mrp: Option<f64>) -> StockRecord {
        StockRecord {
            name: name.to_string(),
            category: "Shirts".to_string(),
            brand: format!("{} Co", name),
            stock: Some(10.0),
            sale_rate_value: rate,
            mrp,
        }
    }

    fn stock(items: &[StockRecord]) -> Dataset {
        Dataset::from_records(&[], &[], items)
    }

    #[test]
    fn test_online_candidates_top_ten() {
        let mut items: Vec<StockRecord> = (1..=12)
            .map(|n| item(&format!("P{}", n), Some(n as f64 * 10.0), None))
            .collect();
        items.push(item("Blank", None, None));

        let rows = online_candidates(&stock(&items)).unwrap();

        assert_eq!(rows.len(), ONLINE_CANDIDATES);
        assert_eq!(rows[0].name, "P12");
        assert_eq!(rows[0].sale_rate_value, 120.0);
        assert_eq!(rows[9].name, "P3");
    }

    #[test]
    fn test_online_candidates_ties_keep_extract_order() {
        let rows = online_candidates(&stock(&[
            item("First", Some(50.0), None),
            item("Second", Some(50.0), None),
        ]))
        .unwrap();
        assert_eq!(rows[0].name, "First");
        assert_eq!(rows[1].name, "Second");
    }

    #[test]
    fn test_unique_products_first_wins() {
        let mut dup = item("Oxford", Some(1.0), None);
        dup.brand = "Other".to_string();
        let rows = unique_products(&stock(&[
            item("Oxford", Some(1.0), None),
            item("Polo", Some(1.0), None),
            dup,
        ]))
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Oxford");
        assert_eq!(rows[0].brand, "Oxford Co");
        assert_eq!(rows[1].name, "Polo");
    }

    #[test]
    fn test_pareto_count_is_floor_of_fifth() {
        assert_eq!(pareto_count(0), 0);
        assert_eq!(pareto_count(4), 0);
        assert_eq!(pareto_count(5), 1);
        assert_eq!(pareto_count(14), 2);
    }

    #[test]
    fn test_top_products_share_of_total() {
        let items: Vec<StockRecord> = [40.0, 10.0, 30.0, 10.0, 10.0]
            .iter()
            .enumerate()
            .map(|(i, rate)| item(&format!("P{}", i), Some(*rate), None))
            .collect();

        let rows = top_products(&stock(&items)).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "P0");
        let share = rows[0].sales_percentage.value().unwrap();
        assert!((share - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_products_zero_total_is_empty() {
        let items: Vec<StockRecord> = (0..5)
            .map(|i| item(&format!("P{}", i), Some(0.0), None))
            .collect();
        assert!(top_products(&stock(&items)).unwrap().is_empty());
    }

    #[test]
    fn test_low_performers_below_mrp() {
        let rows = low_performers(&stock(&[
            item("Cheap", Some(80.0), Some(100.0)),
            item("Full", Some(100.0), Some(100.0)),
            item("Unknown", None, Some(100.0)),
        ]))
        .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Cheap");
        assert_eq!(rows[0].row, 1);
    }

    #[test]
    fn test_flat_thirty_off_is_exact() {
        let plan = reduction_plan(
            &stock(&[item("Tee", Some(100.0), Some(150.0))]),
            DiscountStrategy::FlatThirtyOff,
        )
        .unwrap();

        assert_eq!(plan.discounted.len(), 1);
        assert_eq!(plan.discounted[0].discounted_price.as_decimal(), 70.0);
        assert_eq!(plan.discounted[0].discounted_price.minor(), 7000);
    }

    #[test]
    fn test_flat_thirty_off_negative_rates() {
        let plan = reduction_plan(
            &stock(&[
                item("Credit", Some(-100.0), Some(150.0)),
                item("Rebate", Some(-1.0), Some(150.0)),
                item("Tee", Some(100.0), Some(150.0)),
            ]),
            DiscountStrategy::FlatThirtyOff,
        )
        .unwrap();

        let prices: Vec<String> = plan
            .discounted
            .iter()
            .map(|row| row.discounted_price.to_string())
            .collect();
        assert_eq!(prices, vec!["-70.00", "-0.70", "70.00"]);
    }

    #[test]
    fn test_recommendation_only_strategies() {
        let data = stock(&[item("Tee", Some(100.0), Some(150.0))]);
        for strategy in [DiscountStrategy::SaleDay, DiscountStrategy::BuyOneGetOne] {
            let plan = reduction_plan(&data, strategy).unwrap();
            assert_eq!(plan.low_performers.len(), 1);
            assert!(plan.discounted.is_empty());
            assert_eq!(plan.recommendation, strategy.recommendation());
        }
    }

    #[test]
    fn test_unpriceable_rate_is_malformed() {
        let result = reduction_plan(
            &stock(&[item("Huge", Some(1e300), Some(f64::MAX))]),
            DiscountStrategy::FlatThirtyOff,
        );
        assert!(matches!(
            result,
            Err(ReportError::MalformedValue { table: TableKind::Stock, row: 1, .. })
        ));
    }
}
