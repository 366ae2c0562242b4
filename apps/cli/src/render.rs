//! # Rendering
//!
//! Writes report output to any `io::Write`, as aligned text or JSON.
//!
//! ## Text Layout
//! ```text
//! Best Selling Items
//! ==================
//!
//! Weekly top 10
//! Entry Date  Entry No.  Qty(Unit1)  Amount
//! ----------  ---------  ----------  ------
//! 2024-04-07  S1                  8     800
//! ```
//!
//! Columns whose cells are all numeric are right-aligned.

use serde::Serialize;
use std::io::{self, Write};

use stocklens_core::reports::{Cell, DisplayTable, ReportKind, ReportOutput};

use crate::error::{CliError, CliResult};

/// Writes one report as text.
pub fn write_report<W: Write>(out: &mut W, output: &ReportOutput) -> io::Result<()> {
    write_title(out, &output.title)?;
    for section in &output.sections {
        writeln!(out)?;
        if let Some(heading) = &section.heading {
            writeln!(out, "{}", heading)?;
        }
        if let Some(table) = &section.table {
            write_table(out, table)?;
        }
        if let Some(note) = &section.note {
            if section.table.is_some() {
                writeln!(out)?;
            }
            writeln!(out, "{}", note)?;
        }
    }
    Ok(())
}

/// Writes a failed report in place of its output.
pub fn write_report_error<W: Write>(
    out: &mut W,
    kind: ReportKind,
    err: &CliError,
) -> io::Result<()> {
    write_title(out, kind.title())?;
    writeln!(out)?;
    writeln!(out, "error: {}", err)
}

fn write_title<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "=".repeat(title.chars().count()))
}

/// Writes an aligned table, or `(no rows)`.
pub fn write_table<W: Write>(out: &mut W, table: &DisplayTable) -> io::Result<()> {
    if table.is_empty() {
        return writeln!(out, "(no rows)");
    }

    let rendered: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(Cell::to_string).collect())
        .collect();

    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rendered
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let numeric: Vec<bool> = (0..table.columns.len())
        .map(|i| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(i))
                .all(|cell| !matches!(cell, Cell::Text(_) | Cell::Date(_)))
        })
        .collect();

    write_line(out, &table.columns, &widths, &vec![false; widths.len()])?;
    let rules: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_line(out, &rules, &widths, &numeric)?;
    for row in &rendered {
        write_line(out, row, &widths, &numeric)?;
    }
    Ok(())
}

fn write_line<W: Write>(
    out: &mut W,
    cells: &[String],
    widths: &[usize],
    right_align: &[bool],
) -> io::Result<()> {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .zip(right_align)
        .map(|((cell, width), right)| {
            if *right {
                format!("{:>width$}", cell, width = width)
            } else {
                format!("{:<width$}", cell, width = width)
            }
        })
        .collect();
    writeln!(out, "{}", padded.join("  ").trim_end())
}

/// Writes any serializable value as pretty JSON plus a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Lists the report menu: slug then label.
pub fn write_menu<W: Write>(out: &mut W) -> io::Result<()> {
    let width = ReportKind::ALL
        .iter()
        .map(|kind| kind.slug().len())
        .max()
        .unwrap_or(0);
    for kind in ReportKind::ALL {
        writeln!(out, "{:<width$}  {}", kind.slug(), kind.label(), width = width)?;
    }
    Ok(())
}
