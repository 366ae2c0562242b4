//! # StockLens Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging to stderr)
//! 2. Parse arguments
//! 3. Resolve configuration
//! 4. Run the command, loading the extracts only if it needs them

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for testability
    stocklens_cli::run()
}
