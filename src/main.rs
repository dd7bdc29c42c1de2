//! # Ledgerlens Entry Point
//!
//! One-shot batch runs only: parse the command line, run the requested
//! analysis, exit. A failed run propagates its error to the Rust runtime,
//! which prints the message and exits non-zero; no report files are
//! written for an analysis that did not complete.
//!
//! ```bash
//! ledgerlens summary
//! ledgerlens benford --column Amount
//! ```

#![warn(clippy::all, rust_2018_idioms)]

use clap::Parser as _;
use ledgerlens::{cli, logging};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG=debug to see detailed logs
    logging::init()?;

    let cli = cli::Cli::parse();
    cli::run_command(cli.command)?;
    Ok(())
}
