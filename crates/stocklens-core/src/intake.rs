//! # Product Intake Session
//!
//! Accumulates product-intake submissions for one operator session.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Intake Session Operations                            │
//! │                                                                         │
//! │  Operator Action          Method                  State Change          │
//! │  ───────────────          ──────                  ────────────          │
//! │                                                                         │
//! │  Enter size + qty ───────► add_size() ──────────► pending.push(pair)   │
//! │                                                                         │
//! │  Clear sizes ────────────► clear_sizes() ───────► pending.clear()      │
//! │                                                                         │
//! │  Save form ──────────────► submit(form) ────────► entries.push(entry)  │
//! │                                                   pending.clear()       │
//! │                                                                         │
//! │  Export ─────────────────► export_rows(now) ────► (read only)          │
//! │                                                                         │
//! │  Start over ─────────────► reset() ─────────────► entries.clear()      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writing the exported rows to a spreadsheet is left to the caller.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::reports::output::{Cell, Tabular};
use crate::validation::{
    validate_color, validate_photo_ref, validate_product_code, validate_quantity, validate_size,
    ValidationResult,
};

/// The fixed color palette offered by the intake form.
pub const COLOR_PALETTE: [&str; 77] = [
    "Oq", "Qora", "Qizil", "Ko'k", "Yashil", "Sariq", "Jigarrang", "Pushti", "Binafsha",
    "To'q ko'k", "Och ko'k", "To'q yashil", "Och yashil", "To'q qizil", "Och qizil", "Kulrang",
    "Kumush", "Oltin", "Bronza", "Mis", "Zangori", "Moviy", "Qaymoq", "Qahva", "Shampan",
    "Marjon", "Kul", "Grafit", "Payvasta", "Sabzi", "Limon", "Apelsin", "Mango", "Malina",
    "Olcha", "Olxo'ri", "Nok", "Olma", "Zumrad", "Yoqut", "Sapfir", "Ametist", "Topaz",
    "Marvarid", "Feruza", "Sadaf", "Xaki", "Terak", "Farfor", "Qum", "Shaftoli", "Bo'z",
    "Qamish", "Indigo", "Lavanda", "Bej", "Kapuchino", "Shokolad", "Asal", "Burg",
    "Ochiq binafsha", "To'q binafsha", "Dengiz", "Turkuaz", "Burgund", "Xino", "Qovoq",
    "Kamalak", "Elektrik", "Smalt", "Oliv", "Karamel", "Neytral", "Jasmin", "Krem", "Antik",
    "Metallik",
];

/// Timestamp layout of exported rows.
pub const EXPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Form & Entries
// =============================================================================

/// One size and how many units of it arrived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeQuantity {
    pub size: String,
    pub quantity: i64,
}

/// The single-product fields of the intake form.
///
/// Sizes are not part of the form; they accumulate on the session through
/// [`IntakeSession::add_size`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeForm {
    pub code: String,
    /// Reference to the captured photo (path, URL or upload id).
    pub photo: String,
    pub color: String,
}

/// An accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeEntry {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub code: String,
    pub color: String,
    pub photo: String,
    pub sizes: Vec<SizeQuantity>,
}

impl IntakeEntry {
    /// Sizes as operators write them: `S-3ta, M-2ta`.
    pub fn sizes_text(&self) -> String {
        self.sizes
            .iter()
            .map(|s| format!("{}-{}ta", s.size, s.quantity))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One exported row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeRow {
    #[serde(rename = "Product Code")]
    pub code: String,
    #[serde(rename = "Color")]
    pub color: String,
    #[serde(rename = "Sizes")]
    pub sizes: String,
    #[serde(rename = "Photo")]
    pub photo: String,
    #[serde(rename = "Entered At")]
    pub entered_at: String,
}

impl Tabular for IntakeRow {
    fn columns() -> &'static [&'static str] {
        &["Product Code", "Color", "Sizes", "Photo", "Entered At"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.code.as_str().into(),
            self.color.as_str().into(),
            self.sizes.as_str().into(),
            self.photo.as_str().into(),
            self.entered_at.as_str().into(),
        ]
    }
}

// =============================================================================
// Session
// =============================================================================

/// Per-session intake state.
///
/// ## Invariants
/// - Every pending size has a non-empty label and a positive quantity
/// - Every entry passed validation when it was submitted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntakeSession {
    pending: Vec<SizeQuantity>,
    entries: Vec<IntakeEntry>,
}

impl IntakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a size/quantity pair for the next submission.
    pub fn add_size(&mut self, size: &str, quantity: i64) -> ValidationResult<()> {
        validate_size(size)?;
        validate_quantity(quantity)?;
        self.pending.push(SizeQuantity {
            size: size.trim().to_string(),
            quantity,
        });
        Ok(())
    }

    /// Drops every pending size.
    pub fn clear_sizes(&mut self) {
        self.pending.clear();
    }

    pub fn pending_sizes(&self) -> &[SizeQuantity] {
        &self.pending
    }

    /// Validates the form against the pending sizes and records an entry.
    ///
    /// ## Checks (first failure wins)
    /// 1. product code present
    /// 2. photo present
    /// 3. color present and in [`COLOR_PALETTE`]
    /// 4. at least one pending size
    ///
    /// On failure the session is unchanged.
    pub fn submit(&mut self, form: &IntakeForm) -> ValidationResult<&IntakeEntry> {
        validate_product_code(&form.code)?;
        validate_photo_ref(&form.photo)?;
        validate_color(&form.color)?;
        if self.pending.is_empty() {
            return Err(ValidationError::AtLeastOne {
                field: "size".to_string(),
            });
        }

        let entry = IntakeEntry {
            id: Uuid::new_v4().to_string(),
            code: form.code.trim().to_string(),
            color: form.color.trim().to_string(),
            photo: form.photo.trim().to_string(),
            sizes: std::mem::take(&mut self.pending),
        };
        tracing::info!(id = %entry.id, code = %entry.code, sizes = entry.sizes.len(), "Intake entry recorded");

        self.entries.push(entry);
        let recorded = self.entries.len() - 1;
        Ok(&self.entries[recorded])
    }

    pub fn entries(&self) -> &[IntakeEntry] {
        &self.entries
    }

    /// Rows for every entry, all stamped with `now`.
    pub fn export_rows(&self, now: NaiveDateTime) -> Vec<IntakeRow> {
        let entered_at = now.format(EXPORT_TIMESTAMP_FORMAT).to_string();
        self.entries
            .iter()
            .map(|entry| IntakeRow {
                code: entry.code.clone(),
                color: entry.color.clone(),
                sizes: entry.sizes_text(),
                photo: entry.photo.clone(),
                entered_at: entered_at.clone(),
            })
            .collect()
    }

    /// Drops every entry and pending size.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.pending.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn form() -> IntakeForm {
        IntakeForm {
            code: "KR-1042".to_string(),
            photo: "photos/kr-1042.jpg".to_string(),
            color: "Qora".to_string(),
        }
    }

    #[test]
    fn test_palette_has_no_duplicates() {
        let mut names = COLOR_PALETTE.to_vec();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), COLOR_PALETTE.len());
    }

    #[test]
    fn test_add_size_validates() {
        let mut session = IntakeSession::new();
        assert!(session.add_size("S", 3).is_ok());
        assert!(session.add_size("", 3).is_err());
        assert!(session.add_size("M", 0).is_err());
        assert_eq!(session.pending_sizes().len(), 1);
    }

    #[test]
    fn test_submit_records_entry_and_clears_sizes() {
        let mut session = IntakeSession::new();
        session.add_size("S", 3).unwrap();
        session.add_size(" M ", 2).unwrap();

        let entry = session.submit(&form()).unwrap().clone();

        assert_eq!(entry.code, "KR-1042");
        assert_eq!(entry.sizes_text(), "S-3ta, M-2ta");
        assert!(Uuid::parse_str(&entry.id).is_ok());
        assert!(session.pending_sizes().is_empty());
        assert_eq!(session.entries().len(), 1);
    }

    #[test]
    fn test_submit_checks_in_order() {
        let mut session = IntakeSession::new();

        // Everything missing: the code is reported first
        let err = session.submit(&IntakeForm::default()).unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "product code".to_string() });

        let mut partial = form();
        partial.photo.clear();
        let err = session.submit(&partial).unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "photo".to_string() });

        let mut partial = form();
        partial.color = "Magenta".to_string();
        assert!(matches!(
            session.submit(&partial),
            Err(ValidationError::NotAllowed { .. })
        ));

        let err = session.submit(&form()).unwrap_err();
        assert_eq!(err, ValidationError::AtLeastOne { field: "size".to_string() });

        assert!(session.entries().is_empty());
    }

    #[test]
    fn test_failed_submit_keeps_pending_sizes() {
        let mut session = IntakeSession::new();
        session.add_size("L", 1).unwrap();
        let mut bad = form();
        bad.code.clear();
        assert!(session.submit(&bad).is_err());
        assert_eq!(session.pending_sizes().len(), 1);
    }

    #[test]
    fn test_export_rows_and_reset() {
        let mut session = IntakeSession::new();
        session.add_size("XL", 5).unwrap();
        session.submit(&form()).unwrap();

        let now = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        let rows = session.export_rows(now);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sizes, "XL-5ta");
        assert_eq!(rows[0].color, "Qora");
        assert_eq!(rows[0].entered_at, "2024-06-01 09:05:00");

        session.reset();
        assert!(session.entries().is_empty());
        assert!(session.export_rows(now).is_empty());
    }
}
