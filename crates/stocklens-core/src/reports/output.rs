//! # Report Output
//!
//! The display-neutral shape every report hands to the display collaborator.
//!
//! ```text
//! ReportOutput
//! ├── kind / title          "Best Selling Items"
//! └── sections[]
//!     ├── heading           "Items Reaching 75% Sold"
//!     ├── table?            columns + rows of Cell
//!     └── note?             "Apply a flat 30% discount ..."
//! ```
//!
//! Typed report rows implement [`Tabular`] so they convert into a
//! [`DisplayTable`] without the renderer knowing any report.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::money::Money;
use crate::reports::ReportKind;
use crate::types::Metric;

// =============================================================================
// Cell
// =============================================================================

/// One rendered value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(f64),
    Integer(i64),
    Metric(Metric),
    Date(NaiveDate),
    Money(#[serde(serialize_with = "money_as_decimal")] Money),
    Empty,
}

pub(crate) fn money_as_decimal<S: serde::Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(money.as_decimal())
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map(Cell::Number).unwrap_or(Cell::Empty)
    }
}

impl From<Option<i64>> for Cell {
    fn from(value: Option<i64>) -> Self {
        value.map(Cell::Integer).unwrap_or(Cell::Empty)
    }
}

impl From<Metric> for Cell {
    fn from(value: Metric) -> Self {
        Cell::Metric(value)
    }
}

impl From<Option<NaiveDate>> for Cell {
    fn from(value: Option<NaiveDate>) -> Self {
        value.map(Cell::Date).unwrap_or(Cell::Empty)
    }
}

impl From<Money> for Cell {
    fn from(value: Money) -> Self {
        Cell::Money(value)
    }
}

/// Whole numbers print without decimals; everything else with two.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) if n.fract() == 0.0 => write!(f, "{:.0}", n),
            Cell::Number(n) => write!(f, "{:.2}", n),
            Cell::Integer(i) => write!(f, "{}", i),
            Cell::Metric(m) => write!(f, "{}", m),
            Cell::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Cell::Money(m) => write!(f, "{}", m),
            Cell::Empty => Ok(()),
        }
    }
}

// =============================================================================
// Display Table
// =============================================================================

/// Rows that know their own column layout.
pub trait Tabular {
    fn columns() -> &'static [&'static str];
    fn cells(&self) -> Vec<Cell>;
}

/// A rendered table: column headers plus rows of cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl DisplayTable {
    /// Builds a table from typed rows.
    pub fn from_rows<T: Tabular>(rows: &[T]) -> Self {
        DisplayTable {
            columns: T::columns().iter().map(|c| c.to_string()).collect(),
            rows: rows.iter().map(Tabular::cells).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Sections & Output
// =============================================================================

/// A titled block inside a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub heading: Option<String>,
    pub table: Option<DisplayTable>,
    pub note: Option<String>,
}

impl Section {
    /// A section holding only a table.
    pub fn table(table: DisplayTable) -> Self {
        Section {
            heading: None,
            table: Some(table),
            note: None,
        }
    }

    /// Adds a heading.
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    /// A section holding only text.
    pub fn note(text: impl Into<String>) -> Self {
        Section {
            heading: None,
            table: None,
            note: Some(text.into()),
        }
    }
}

/// The result of one successful report run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportOutput {
    pub kind: ReportKind,
    pub title: String,
    pub sections: Vec<Section>,
}

impl ReportOutput {
    /// Creates an output titled after its report.
    pub fn new(kind: ReportKind, sections: Vec<Section>) -> Self {
        ReportOutput {
            kind,
            title: kind.title().to_string(),
            sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: &'static str,
        qty: Option<f64>,
    }

    impl Tabular for Row {
        fn columns() -> &'static [&'static str] {
            &["Name", "Qty"]
        }

        fn cells(&self) -> Vec<Cell> {
            vec![self.name.into(), self.qty.into()]
        }
    }

    #[test]
    fn test_from_rows() {
        let table = DisplayTable::from_rows(&[
            Row { name: "A", qty: Some(3.0) },
            Row { name: "B", qty: None },
        ]);
        assert_eq!(table.columns, vec!["Name", "Qty"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1][1], Cell::Empty);
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Number(12.0).to_string(), "12");
        assert_eq!(Cell::Number(12.346).to_string(), "12.35");
        assert_eq!(Cell::Number(-3.0).to_string(), "-3");
        assert_eq!(Cell::Metric(Metric::Undefined).to_string(), "undefined");
        assert_eq!(Cell::Money(Money::from_minor(7000)).to_string(), "70.00");
        assert_eq!(
            Cell::Date(NaiveDate::from_ymd_opt(2024, 4, 3).unwrap()).to_string(),
            "2024-04-03"
        );
        assert_eq!(Cell::Empty.to_string(), "");
    }

    #[test]
    fn test_cell_json() {
        let cells = vec![
            Cell::from("x"),
            Cell::from(Some(1.5)),
            Cell::Metric(Metric::Undefined),
            Cell::Money(Money::from_minor(7000)),
            Cell::Empty,
        ];
        assert_eq!(
            serde_json::to_string(&cells).unwrap(),
            r#"["x",1.5,null,70.0,null]"#
        );
    }
}
