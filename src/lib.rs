//! # Ledgerlens - Journal Entry Analysis
//!
//! Ledgerlens is a one-shot batch tool that computes descriptive statistics
//! and a Benford's-Law leading-digit analysis over a tabular journal-entry
//! dataset, then writes human-readable and machine-readable reports plus an
//! SVG chart.
//!
//! The run is a straight line: load the table once, compute aggregate
//! records, render every report from those records, write the files.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ledgerlens::{benford, loader, report};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let df = loader::load_df(Path::new("data/je_samples.csv"))?;
//! let analysis = benford::analyse(&df, "data/je_samples.csv", None, 10)?;
//! println!("{}", report::render_benford_markdown(&analysis));
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`loader`]: table loading (CSV, JSON, Parquet) into a Polars `DataFrame`
//! - [`summary`]: missing values, date ranges, numeric descriptive statistics
//! - [`benford`]: column selection, leading-digit extraction, digit frequencies
//! - [`report`]: Markdown / JSON / CSV renderers over the computed records
//! - [`chart`]: SVG bar chart for the Benford comparison
//! - [`cli`]: command-line entry points
//! - [`error`]: error types and handling utilities

#![warn(clippy::all, rust_2018_idioms)]

pub mod benford;
pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod report;
pub mod summary;
