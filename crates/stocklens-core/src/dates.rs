//! # Entry Date Parsing
//!
//! Day-first date parsing for the `Entry Date` columns.
//!
//! Extract dates come from a point-of-sale export in day-first locale:
//! `03/04/2024` is the 3rd of April. Anything that cannot be read becomes
//! `None` instead of failing the load.
//!
//! ## Accepted Shapes
//! ```text
//! 03/04/2024   03-04-2024   03.04.2024   03/04/24
//! 03/04/2024 14:25          03-Apr-2024  2024-04-03 (year first, ISO)
//! ```
//! When the day-first reading is impossible but the month-first one is
//! valid (`12/25/2024`), the month-first reading is used.

use chrono::{NaiveDate, NaiveDateTime};

/// Day-first formats, tried in order. Two-digit years come first because
/// `%Y` also accepts `24` as the year 24; chrono's `%y` maps 00–68 to the
/// 2000s and 69–99 to the 1900s.
const DAY_FIRST: &[&str] = &[
    "%d/%m/%y", "%d-%m-%y", "%d.%m.%y", "%d-%b-%y", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y",
    "%d-%b-%Y", "%Y-%m-%d",
];

const MONTH_FIRST: &[&str] = &[
    "%m/%d/%y", "%m-%d-%y", "%m.%d.%y", "%m/%d/%Y", "%m-%d-%Y", "%m.%d.%Y",
];

/// Time components that may trail any date format.
const TIME_SUFFIXES: &[&str] = &[" %H:%M:%S", " %H:%M", "T%H:%M:%S", "T%H:%M"];

/// Parses a day-first date, returning `None` for blank or unreadable input.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use stocklens_core::dates::parse_day_first;
///
/// assert_eq!(parse_day_first("03/04/2024"), NaiveDate::from_ymd_opt(2024, 4, 3));
/// assert_eq!(parse_day_first("not a date"), None);
/// ```
pub fn parse_day_first(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    parse_with(raw, DAY_FIRST).or_else(|| parse_with(raw, MONTH_FIRST))
}

fn parse_with(raw: &str, formats: &[&str]) -> Option<NaiveDate> {
    formats
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
        .or_else(|| {
            formats.iter().find_map(|f| {
                TIME_SUFFIXES.iter().find_map(|time| {
                    NaiveDateTime::parse_from_str(raw, &format!("{f}{time}"))
                        .ok()
                        .map(|dt| dt.date())
                })
            })
        })
}
