//! Report rendering.
//!
//! Renderers are pure functions from the computed records to output text.
//! They never recompute statistics and they are total: a zero-row table or
//! a zero-total digit distribution renders as well-formed output with
//! proportions of 0, never as an error or NaN.

use crate::benford::BenfordAnalysis;
use crate::error::{LedgerlensError, Result};
use crate::summary::{TableSummary, round4};
use polars::prelude::*;

/// Render the readable summary report as Markdown.
///
/// `top_missing` caps the missing-values section: columns are listed by
/// missing count descending, ties broken by original column order.
pub fn render_summary_markdown(summary: &TableSummary, top_missing: usize) -> String {
    let mut md = String::new();

    md.push_str("# Journal Entry Summary\n\n");
    md.push_str(&format!("**File:** `{}`  \n", summary.file));
    md.push_str(&format!("**Row count:** {}  \n", summary.row_count));
    md.push_str(&format!("**Column count:** {}  \n\n", summary.column_count));

    md.push_str("## Columns\n\n");
    for column in &summary.columns {
        md.push_str(&format!("- {column}\n"));
    }
    md.push('\n');

    md.push_str(&format!("## Missing Values (Top {top_missing})\n\n"));
    let mut by_missing = summary.missing_values.clone();
    // Stable sort keeps declaration order for equal counts
    by_missing.sort_by(|a, b| b.missing.cmp(&a.missing));
    for entry in by_missing.iter().take(top_missing) {
        md.push_str(&format!("- {}: {}\n", entry.column, entry.missing));
    }
    md.push('\n');

    md.push_str("## Date Ranges\n\n");
    if summary.date_columns.is_empty() {
        md.push_str("- No date columns detected.\n");
    } else {
        for date in &summary.date_columns {
            md.push_str(&format!(
                "- {}: {} to {} (non-null ratio {})\n",
                date.column, date.min, date.max, date.non_null_ratio
            ));
        }
    }
    md.push('\n');

    md.push_str("## Numeric Summary\n\n");
    md.push_str("See `numeric_summary.csv` for full descriptive statistics.\n");

    md
}

/// Render the structured summary report as pretty-printed JSON.
pub fn render_summary_json(summary: &TableSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

/// Render the numeric-statistics table as CSV, one row per numeric column.
pub fn render_numeric_summary_csv(summary: &TableSummary) -> Result<String> {
    let stats = &summary.numeric_summary;
    let mut df = df!(
        "column" => stats.iter().map(|s| s.column.clone()).collect::<Vec<_>>(),
        "count" => stats.iter().map(|s| s.count as u32).collect::<Vec<_>>(),
        "mean" => stats.iter().map(|s| s.mean).collect::<Vec<_>>(),
        "std" => stats.iter().map(|s| s.std).collect::<Vec<_>>(),
        "min" => stats.iter().map(|s| s.min).collect::<Vec<_>>(),
        "q1" => stats.iter().map(|s| s.q1).collect::<Vec<_>>(),
        "median" => stats.iter().map(|s| s.median).collect::<Vec<_>>(),
        "q3" => stats.iter().map(|s| s.q3).collect::<Vec<_>>(),
        "max" => stats.iter().map(|s| s.max).collect::<Vec<_>>(),
    )?;
    write_csv(&mut df)
}

/// Render the readable Benford report as Markdown.
pub fn render_benford_markdown(analysis: &BenfordAnalysis) -> String {
    let mut md = String::new();

    md.push_str("# Benford's Law Analysis\n\n");
    md.push_str(&format!("**File:** `{}`  \n", analysis.file));
    md.push_str(&format!("**Column:** `{}`  \n", analysis.column));
    md.push_str(&format!(
        "**Total values analyzed:** {}  \n\n",
        analysis.total_values
    ));

    md.push_str("| Digit | Observed | Observed % | Expected % |\n");
    md.push_str("|------:|---------:|-----------:|-----------:|\n");
    for bucket in &analysis.digits {
        md.push_str(&format!(
            "| {} | {} | {:.2}% | {:.2}% |\n",
            bucket.digit,
            bucket.observed_count,
            bucket.observed_percent * 100.0,
            bucket.expected_percent * 100.0,
        ));
    }
    md.push('\n');

    md.push_str("Outputs:\n");
    md.push_str("- `benford_summary.json`\n");
    md.push_str("- `benford_summary.csv`\n");
    md.push_str("- `benford_chart.svg`\n");

    md
}

/// Render the structured Benford report as pretty-printed JSON.
///
/// Derived values are rounded to 4 places; counts stay exact.
pub fn render_benford_json(analysis: &BenfordAnalysis) -> Result<String> {
    let rounded = BenfordAnalysis {
        file: analysis.file.clone(),
        column: analysis.column.clone(),
        total_values: analysis.total_values,
        digits: analysis
            .digits
            .iter()
            .map(|d| crate::benford::DigitFrequency {
                digit: d.digit,
                observed_count: d.observed_count,
                expected_count: round4(d.expected_count),
                observed_percent: round4(d.observed_percent),
                expected_percent: round4(d.expected_percent),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&rounded)?)
}

/// Render the tabular Benford report as CSV, one row per digit.
pub fn render_benford_csv(analysis: &BenfordAnalysis) -> Result<String> {
    let digits = &analysis.digits;
    let mut df = df!(
        "digit" => digits.iter().map(|d| u32::from(d.digit)).collect::<Vec<_>>(),
        "observed_count" => digits.iter().map(|d| d.observed_count as u32).collect::<Vec<_>>(),
        "expected_count" => digits.iter().map(|d| round4(d.expected_count)).collect::<Vec<_>>(),
        "observed_percent" => digits.iter().map(|d| round4(d.observed_percent)).collect::<Vec<_>>(),
        "expected_percent" => digits.iter().map(|d| round4(d.expected_percent)).collect::<Vec<_>>(),
    )?;
    write_csv(&mut df)
}

fn write_csv(df: &mut DataFrame) -> Result<String> {
    let mut buf = Vec::new();
    CsvWriter::new(&mut buf).include_header(true).finish(df)?;
    String::from_utf8(buf)
        .map_err(|e| LedgerlensError::Other(format!("CSV buffer was not valid UTF-8: {e}")))
}
