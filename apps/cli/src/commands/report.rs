//! # Report Commands
//!
//! ```text
//! stocklens report <REPORT>   one report; a failure is the command's error
//! stocklens reports           the menu
//! stocklens all               every report; failures are printed in place
//! ```

use serde::Serialize;
use std::io::Write;
use tracing::{info, warn};

use stocklens_core::reports::{run_report, ReportKind, ReportOutput};

use crate::config::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::render;
use crate::state::Session;

/// Runs one report and writes it.
pub fn report<W: Write>(session: &mut Session, kind: ReportKind, out: &mut W) -> CliResult<()> {
    let params = session.params();
    let format = session.format();
    let output = run_report(kind, session.dataset()?, &params)?;

    match format {
        OutputFormat::Text => render::write_report(out, &output)?,
        OutputFormat::Json => render::write_json(out, &output)?,
    }
    Ok(())
}

/// One menu entry in JSON form.
#[derive(Debug, Serialize)]
struct MenuEntry {
    slug: &'static str,
    label: &'static str,
    title: &'static str,
}

/// Lists the reports. Needs no extracts.
pub fn list<W: Write>(format: OutputFormat, out: &mut W) -> CliResult<()> {
    match format {
        OutputFormat::Text => render::write_menu(out)?,
        OutputFormat::Json => {
            let entries: Vec<MenuEntry> = ReportKind::ALL
                .into_iter()
                .map(|kind| MenuEntry {
                    slug: kind.slug(),
                    label: kind.label(),
                    title: kind.title(),
                })
                .collect();
            render::write_json(out, &entries)?;
        }
    }
    Ok(())
}

/// Outcome of one report inside `all`.
#[derive(Debug, Serialize)]
struct Outcome {
    report: ReportKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<ReportOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<CliError>,
}

/// Counts from an `all` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Runs every report in menu order.
///
/// A report error is written in place of that report's output and the run
/// continues. Failing to load the extracts stops the run.
pub fn all<W: Write>(session: &mut Session, out: &mut W) -> CliResult<RunSummary> {
    let params = session.params();
    let format = session.format();
    let data = session.dataset()?;

    let outcomes: Vec<Outcome> = ReportKind::ALL
        .into_iter()
        .map(|kind| match run_report(kind, data, &params) {
            Ok(output) => Outcome {
                report: kind,
                output: Some(output),
                error: None,
            },
            Err(e) => Outcome {
                report: kind,
                output: None,
                error: Some(e.into()),
            },
        })
        .collect();

    match format {
        OutputFormat::Text => {
            for (i, outcome) in outcomes.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                match (&outcome.output, &outcome.error) {
                    (Some(output), _) => render::write_report(out, output)?,
                    (None, Some(err)) => render::write_report_error(out, outcome.report, err)?,
                    (None, None) => {}
                }
            }
        }
        OutputFormat::Json => render::write_json(out, &outcomes)?,
    }

    let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
    let summary = RunSummary {
        succeeded: outcomes.len() - failed,
        failed,
    };
    if failed > 0 {
        warn!(failed, succeeded = summary.succeeded, "Some reports failed");
    } else {
        info!(reports = summary.succeeded, "All reports computed");
    }
    Ok(summary)
}
