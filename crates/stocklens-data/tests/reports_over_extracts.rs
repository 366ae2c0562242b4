//! Loads a small set of extracts from disk and runs every report over them.

use std::fs;

use chrono::NaiveDate;
use stocklens_core::reports::{run_report, Cell, ReportKind, ReportParams};
use stocklens_core::types::{DiscountStrategy, Period, TableKind};
use stocklens_data::{load_dataset, LoadError, SourcePaths};
use tempfile::TempDir;

const PURCHASES: &str = "\
Entry No.,Category,Size,SALE QTY,Current Stock(Unit1),Qty(Unit1),Entry Date
101,Shirts,M,0,10,12,01/04/2024
102,Shirts,L,8,40,10,02/04/2024
103,Jeans,32,1,0,5,03/04/2024
104,Jeans,30,6,95,6,04/04/2024
105,Shirts,M,2,100,3,not a date
";

const SALES: &str = "\
Entry No.,Brand,Category,Qty(Unit1),Amount,Entry Date
S1,Acme,Shirts,5,500,01/04/2024
S2,Acme,Shirts,4,400,02/04/2024
S1,Acme,Shirts,3,300,03/04/2024
R1,Acme,Shirts,-1,-100,05/04/2024
R2,Denim Co,Jeans,-2,-300,08/04/2024
";

const STOCK: &str = "\
NameToDisplay,Category,Brand,Stock(Unit1),Sale Rate Value,MRP
Oxford Shirt,Shirts,Acme,100,100,150
Linen Shirt,Shirts,Acme,100,200,200
Slim Jeans,Jeans,Denim Co,0,300,280
Oxford Shirt,Shirts,Acme,100,100,150
Chino,Pants,Acme,100,400,500
";

fn extracts() -> (TempDir, SourcePaths) {
    let dir = TempDir::new().unwrap();
    let paths = SourcePaths::in_dir(dir.path());
    fs::write(&paths.purchases, PURCHASES).unwrap();
    fs::write(&paths.sales, SALES).unwrap();
    fs::write(&paths.stock, STOCK).unwrap();
    (dir, paths)
}

#[test]
fn every_report_runs_over_loaded_extracts() {
    let (_dir, paths) = extracts();
    let data = load_dataset(&paths).unwrap();

    for kind in ReportKind::ALL {
        let output = run_report(kind, &data, &ReportParams::default()).unwrap();
        assert_eq!(output.title, kind.title());
        // Every report renders to JSON
        serde_json::to_string(&output).unwrap();
    }
}

#[test]
fn stock_alert_tiers_use_row_alignment() {
    let (_dir, paths) = extracts();
    let data = load_dataset(&paths).unwrap();

    let output = run_report(ReportKind::NotifyItemSales, &data, &ReportParams::default()).unwrap();

    // Row 1: (100 - 10) / 100 = 90%; row 2: 60%; row 3: stock 0 → undefined
    let mostly = output.sections[0].table.as_ref().unwrap();
    let half = output.sections[1].table.as_ref().unwrap();
    assert_eq!(mostly.rows.len(), 1);
    assert_eq!(mostly.rows[0][0], Cell::Text("Oxford Shirt".to_string()));
    assert_eq!(mostly.rows[0][2].to_string(), "20.00");
    assert_eq!(half.rows.len(), 1);
    assert_eq!(half.rows[0][0], Cell::Text("Linen Shirt".to_string()));
}

#[test]
fn best_sellers_group_by_week() {
    let (_dir, paths) = extracts();
    let data = load_dataset(&paths).unwrap();
    let params = ReportParams {
        period: Period::Weekly,
        ..ReportParams::default()
    };

    let output = run_report(ReportKind::BestSellingItems, &data, &params).unwrap();
    let table = output.sections[0].table.as_ref().unwrap();

    // S1 on 1 and 3 April (same Mon-Sun week ending 7 April) sums to 8
    let sunday = NaiveDate::from_ymd_opt(2024, 4, 7).unwrap();
    assert_eq!(table.rows[0][0], Cell::Date(sunday));
    assert_eq!(table.rows[0][1], Cell::Text("S1".to_string()));
    assert_eq!(table.rows[0][2], Cell::Number(8.0));
}

#[test]
fn turnaround_between_returns() {
    let (_dir, paths) = extracts();
    let data = load_dataset(&paths).unwrap();

    let output = run_report(ReportKind::TurnaroundTime, &data, &ReportParams::default()).unwrap();
    let table = output.sections[0].table.as_ref().unwrap();

    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0][2], Cell::Empty);
    assert_eq!(table.rows[1][2], Cell::Integer(3));
}

#[test]
fn flat_discount_prices_are_exact() {
    let (_dir, paths) = extracts();
    let data = load_dataset(&paths).unwrap();
    let params = ReportParams {
        strategy: DiscountStrategy::FlatThirtyOff,
        ..ReportParams::default()
    };

    let output = run_report(ReportKind::InventoryReduction, &data, &params).unwrap();
    let discounted = output.sections[1].table.as_ref().unwrap();

    // Oxford Shirt twice (100 < 150) and Chino (400 < 500)
    let prices: Vec<String> = discounted.rows.iter().map(|r| r[3].to_string()).collect();
    assert_eq!(prices, vec!["70.00", "70.00", "280.00"]);
}

#[test]
fn missing_column_fails_one_report_only() {
    let (_dir, paths) = extracts();
    fs::write(
        &paths.stock,
        "NameToDisplay,Category,Brand,Stock(Unit1),MRP\nOxford Shirt,Shirts,Acme,100,150\n",
    )
    .unwrap();
    let data = load_dataset(&paths).unwrap();
    let params = ReportParams::default();

    let err = run_report(ReportKind::OnlineSales, &data, &params).unwrap_err();
    assert_eq!(err.table(), TableKind::Stock);
    assert!(err.to_string().contains("Sale Rate Value"));

    assert!(run_report(ReportKind::UniqueProducts, &data, &params).is_ok());
    assert!(run_report(ReportKind::NotifyItemSales, &data, &params).is_ok());
    assert!(run_report(ReportKind::RejectedGoods, &data, &params).is_ok());
}

#[test]
fn absent_source_stops_the_session() {
    let (_dir, paths) = extracts();
    fs::remove_file(&paths.stock).unwrap();

    let err = load_dataset(&paths).unwrap_err();
    assert!(matches!(err, LoadError::SourceMissing { table: TableKind::Stock, .. }));
    assert!(err.to_string().contains("Stock_deatils_converted.csv"));
}
