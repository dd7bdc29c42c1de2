//! Command-line surface.
//!
//! Two independent entry points share one binary: `summary` renders the
//! descriptive reports, `benford` renders the leading-digit comparison.
//! Each handler computes its records and renders every output string
//! before the first file write, so a failed analysis writes nothing.

use crate::config::{self, AppConfig};
use crate::{benford, chart, loader, report, summary};
use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "ledgerlens",
    about = "Journal entry summary statistics and Benford's Law analysis"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Descriptive summary of the journal entry table
    Summary {
        /// Path to the input table (CSV, JSON, Parquet). Defaults to the configured sample file.
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Directory the report files are written into
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Benford's Law leading-digit analysis of a numeric column
    Benford {
        /// Path to the input table (CSV, JSON, Parquet). Defaults to the configured sample file.
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Column header to analyse. Defaults to the first qualifying numeric column.
        #[arg(short, long)]
        column: Option<String>,

        /// Minimum count of non-missing, non-zero values a column needs to qualify
        #[arg(long, default_value_t = 10)]
        min_count: usize,

        /// Directory the report files are written into
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn run_command(command: Commands) -> Result<()> {
    let config = config::load_app_config();
    match command {
        Commands::Summary { file, output } => handle_summary(&config, file, output),
        Commands::Benford {
            file,
            column,
            min_count,
            output,
        } => handle_benford(&config, file, column, min_count, output),
    }
}

fn handle_summary(
    config: &AppConfig,
    file: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let input = file.unwrap_or_else(|| config.input_path.clone());
    let output_dir = output.unwrap_or_else(|| config.output_dir.clone());

    let df = load_input(&input)?;
    let table_summary = summary::analyse_table(
        &df,
        &input.display().to_string(),
        config.date_ratio_threshold,
    )?;

    let markdown = report::render_summary_markdown(&table_summary, config.top_missing);
    let json = report::render_summary_json(&table_summary)?;
    let csv = report::render_numeric_summary_csv(&table_summary)?;

    std::fs::create_dir_all(&output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            output_dir.display()
        )
    })?;
    write_report(&output_dir.join("summary.md"), &markdown)?;
    write_report(&output_dir.join("summary.json"), &json)?;
    write_report(&output_dir.join("numeric_summary.csv"), &csv)?;

    println!(
        "Summarised {} rows x {} columns; reports written to {}",
        table_summary.row_count,
        table_summary.column_count,
        output_dir.display()
    );
    Ok(())
}

fn handle_benford(
    config: &AppConfig,
    file: Option<PathBuf>,
    column: Option<String>,
    min_count: usize,
    output: Option<PathBuf>,
) -> Result<()> {
    let input = file.unwrap_or_else(|| config.input_path.clone());
    let output_dir = output.unwrap_or_else(|| config.output_dir.clone());

    let df = load_input(&input)?;
    let analysis = benford::analyse(
        &df,
        &input.display().to_string(),
        column.as_deref(),
        min_count,
    )?;

    let markdown = report::render_benford_markdown(&analysis);
    let json = report::render_benford_json(&analysis)?;
    let csv = report::render_benford_csv(&analysis)?;
    let svg = chart::render_benford_chart(&analysis);

    std::fs::create_dir_all(&output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            output_dir.display()
        )
    })?;
    write_report(&output_dir.join("benford_summary.md"), &markdown)?;
    write_report(&output_dir.join("benford_summary.json"), &json)?;
    write_report(&output_dir.join("benford_summary.csv"), &csv)?;
    write_report(&output_dir.join("benford_chart.svg"), &svg)?;

    println!(
        "Analysed column '{}' ({} usable values); reports written to {}",
        analysis.column,
        analysis.total_values,
        output_dir.display()
    );
    Ok(())
}

fn load_input(path: &Path) -> Result<DataFrame> {
    tracing::info!("Loading {}", path.display());
    let df = loader::load_df(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    tracing::info!("Loaded {} rows x {} columns", df.height(), df.width());
    Ok(df)
}

fn write_report(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
