//! # Intake Command
//!
//! Validates one product-intake submission and writes its export row.

use chrono::NaiveDateTime;
use std::io::Write;

use stocklens_core::reports::DisplayTable;
use stocklens_core::IntakeForm;

use crate::config::OutputFormat;
use crate::error::CliResult;
use crate::render;
use crate::state::Session;

/// Form fields plus the sizes entered for them.
#[derive(Debug, Clone, Default)]
pub struct IntakeRequest {
    pub form: IntakeForm,
    pub sizes: Vec<(String, i64)>,
}

/// Parses a `SIZE=QTY` argument.
pub fn parse_size(arg: &str) -> Result<(String, i64), String> {
    let (size, qty) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected SIZE=QTY, got '{}'", arg))?;
    let qty = qty
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("quantity for size '{}' is not a whole number", size.trim()))?;
    Ok((size.trim().to_string(), qty))
}

/// Queues the sizes, submits the form and writes every export row.
///
/// The first invalid size or form field stops the command; nothing is
/// recorded in that case.
pub fn intake<W: Write>(
    session: &mut Session,
    request: &IntakeRequest,
    now: NaiveDateTime,
    out: &mut W,
) -> CliResult<()> {
    session.intake.clear_sizes();
    for (size, qty) in &request.sizes {
        session.intake.add_size(size, *qty)?;
    }
    session.intake.submit(&request.form)?;

    let rows = session.intake.export_rows(now);
    match session.format() {
        OutputFormat::Text => render::write_table(out, &DisplayTable::from_rows(&rows))?,
        OutputFormat::Json => render::write_json(out, &rows)?,
    }
    Ok(())
}
