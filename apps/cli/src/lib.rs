//! # StockLens CLI Library
//!
//! Argument parsing, configuration and command dispatch for the `stocklens`
//! binary.
//!
//! ## Module Organization
//! ```text
//! stocklens_cli/
//! ├── lib.rs          ◄─── You are here (arguments, logging, dispatch)
//! ├── config.rs       ◄─── AppConfig: file → env → flags
//! ├── state.rs        ◄─── Session: dataset + intake accumulator
//! ├── commands/
//! │   ├── report.rs   ◄─── report, reports, all
//! │   └── intake.rs   ◄─── intake
//! ├── render.rs       ◄─── text tables and JSON
//! └── error.rs        ◄─── CliError for every command
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod state;

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use stocklens_core::reports::ReportKind;
use stocklens_core::types::{DiscountStrategy, Period};
use stocklens_core::IntakeForm;

use commands::intake::{parse_size, IntakeRequest};
use config::{AppConfig, ConfigLayer, OutputFormat};
use error::CliResult;
use state::Session;

/// Inventory and sales reports over point-of-sale CSV extracts.
#[derive(Debug, Parser)]
#[command(name = "stocklens", version)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding all three extracts under their exported names
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Purchase extract
    #[arg(long, global = true, value_name = "PATH")]
    pub purchases: Option<PathBuf>,

    /// Sales extract
    #[arg(long, global = true, value_name = "PATH")]
    pub sales: Option<PathBuf>,

    /// Stock extract
    #[arg(long, global = true, value_name = "PATH")]
    pub stock: Option<PathBuf>,

    /// Output format: text or json
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one report
    Report {
        /// Report slug or menu label (see `stocklens reports`)
        report: ReportKind,

        /// Best-seller bucket: weekly, monthly or quarterly
        #[arg(long)]
        period: Option<Period>,

        /// Inventory-reduction promotion: flat-30, sale-day or bogo
        #[arg(long)]
        strategy: Option<DiscountStrategy>,
    },

    /// List the available reports
    Reports,

    /// Run every report; failed reports do not stop the others
    All {
        #[arg(long)]
        period: Option<Period>,

        #[arg(long)]
        strategy: Option<DiscountStrategy>,
    },

    /// Validate one product-intake submission and print its export row
    Intake {
        /// Product code
        #[arg(long)]
        code: String,

        /// Color name from the palette
        #[arg(long)]
        color: String,

        /// Photo reference (path or URL)
        #[arg(long)]
        photo: String,

        /// Size and quantity, repeatable: --size S=3 --size M=2
        #[arg(long = "size", value_name = "SIZE=QTY", value_parser = parse_size)]
        sizes: Vec<(String, i64)>,
    },
}

impl Cli {
    /// The flag layer of the configuration.
    pub fn config_layer(&self) -> ConfigLayer {
        let (period, strategy) = match &self.command {
            Command::Report {
                period, strategy, ..
            }
            | Command::All { period, strategy } => (*period, *strategy),
            Command::Reports | Command::Intake { .. } => (None, None),
        };
        ConfigLayer {
            data_dir: self.data_dir.clone(),
            purchases: self.purchases.clone(),
            sales: self.sales.clone(),
            stock: self.stock.clone(),
            period,
            strategy,
            format: self.format,
        }
    }
}

/// Parses arguments, runs the command and maps failure to an exit code.
pub fn run() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let config = match AppConfig::resolve(cli.config.as_deref(), cli.config_layer()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return e.exit_code();
        }
    };

    let mut stdout = std::io::stdout().lock();
    match execute(cli.command, config, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = ?e.code, "{}", e.message);
            eprintln!("error: {}", e);
            e.exit_code()
        }
    }
}

/// Runs one command against a fresh session.
pub fn execute<W: Write>(command: Command, config: AppConfig, out: &mut W) -> CliResult<()> {
    let mut session = Session::new(config);
    info!(sources = ?session.config().sources, "Session started");

    match command {
        Command::Report { report, .. } => commands::report::report(&mut session, report, out),
        Command::Reports => commands::report::list(session.format(), out),
        Command::All { .. } => commands::report::all(&mut session, out).map(|_| ()),
        Command::Intake {
            code,
            color,
            photo,
            sizes,
        } => {
            let request = IntakeRequest {
                form: IntakeForm { code, photo, color },
                sizes,
            };
            let now = chrono::Local::now().naive_local();
            commands::intake::intake(&mut session, &request, now, out)
        }
    }
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - Default: INFO
/// - `RUST_LOG=debug` - Show extract parsing details
/// - `RUST_LOG=warn` - Only failures and coerced dates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
