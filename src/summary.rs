//! Descriptive summary of a loaded table.
//!
//! Three per-column views share one walk over the frame: missing-value
//! counts, date-range bounds for date-typed columns, and descriptive
//! statistics for numeric columns. Everything is computed once into a
//! [`TableSummary`] record; the renderers in [`crate::report`] never touch
//! the frame again.

use crate::error::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::*;
use serde::Serialize;

/// Formats accepted when sniffing date columns out of string data.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%Y/%m/%d"];

/// Complete summary record for one table.
#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub file: String,
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<String>,
    pub missing_values: Vec<MissingCount>,
    pub date_columns: Vec<DateColumnSummary>,
    pub numeric_summary: Vec<NumericColumnSummary>,
}

/// Missing cells of one column, in declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct MissingCount {
    pub column: String,
    pub missing: usize,
}

/// Range bounds of a date-typed column.
#[derive(Debug, Clone, Serialize)]
pub struct DateColumnSummary {
    pub column: String,
    pub min: String,
    pub max: String,
    /// Fraction of rows with a present value, rounded to 4 places.
    pub non_null_ratio: f64,
}

/// Descriptive statistics of a numeric column with at least one value.
#[derive(Debug, Clone, Serialize)]
pub struct NumericColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Summarise a table: missing values, date ranges, numeric statistics.
///
/// `date_ratio_threshold` is the fraction of a string column's present
/// values that must parse as dates before the column counts as date-typed.
pub fn analyse_table(df: &DataFrame, file: &str, date_ratio_threshold: f64) -> Result<TableSummary> {
    let row_count = df.height();
    let mut columns = Vec::new();
    let mut missing_values = Vec::new();
    let mut date_columns = Vec::new();
    let mut numeric_summary = Vec::new();

    for col in df.get_columns() {
        let name = col.name().to_string();
        let missing = count_missing(col)?;

        let dtype = col.dtype();
        if dtype.is_temporal() {
            if let Some(range) = temporal_range(col, row_count, missing)? {
                date_columns.push(range);
            }
        } else if dtype.is_string() {
            if let Some(range) = string_date_range(col, row_count, missing, date_ratio_threshold)? {
                date_columns.push(range);
            }
        }

        if dtype.is_primitive_numeric()
            && let Some(stats) = numeric_stats(col)?
        {
            numeric_summary.push(stats);
        }

        columns.push(name.clone());
        missing_values.push(MissingCount {
            column: name,
            missing,
        });
    }

    Ok(TableSummary {
        file: file.to_owned(),
        row_count,
        column_count: df.width(),
        columns,
        missing_values,
        date_columns,
        numeric_summary,
    })
}

/// Missing cells: nulls plus, for string columns, empty strings.
fn count_missing(col: &Column) -> Result<usize> {
    let mut missing = col.null_count();
    if col.dtype().is_string() {
        let series = col.as_materialized_series();
        let ca = series.str()?;
        missing += ca.into_iter().flatten().filter(|s| s.is_empty()).count();
    }
    Ok(missing)
}

fn non_null_ratio(row_count: usize, missing: usize) -> f64 {
    if row_count == 0 {
        return 0.0;
    }
    round4(row_count.saturating_sub(missing) as f64 / row_count as f64)
}

pub(crate) fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

/// Range bounds of a Polars temporal column.
fn temporal_range(
    col: &Column,
    row_count: usize,
    missing: usize,
) -> Result<Option<DateColumnSummary>> {
    let series = col.as_materialized_series();
    let ca = series.cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;
    let ca = ca.datetime()?;

    let (Some(min), Some(max)) = (ca.min(), ca.max()) else {
        return Ok(None);
    };

    Ok(Some(DateColumnSummary {
        column: col.name().to_string(),
        min: format_timestamp_ms(min),
        max: format_timestamp_ms(max),
        non_null_ratio: non_null_ratio(row_count, missing),
    }))
}

fn format_timestamp_ms(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string())
        .unwrap_or_else(|| ms.to_string())
}

/// Date-range detection for string columns the loader could not type.
///
/// The column counts as a date column when at least `ratio_threshold` of
/// its present values parse against the accepted formats.
fn string_date_range(
    col: &Column,
    row_count: usize,
    missing: usize,
    ratio_threshold: f64,
) -> Result<Option<DateColumnSummary>> {
    let series = col.as_materialized_series();
    let ca = series.str()?;

    let mut parsed = Vec::new();
    let mut present = 0usize;
    for value in ca.into_iter().flatten() {
        if value.is_empty() {
            continue;
        }
        present += 1;
        if let Some(dt) = parse_date(value) {
            parsed.push(dt);
        }
    }

    if present == 0 || (parsed.len() as f64 / present as f64) < ratio_threshold {
        return Ok(None);
    }
    let (Some(&min), Some(&max)) = (parsed.iter().min(), parsed.iter().max()) else {
        return Ok(None);
    };

    Ok(Some(DateColumnSummary {
        column: col.name().to_string(),
        min: min.format("%Y-%m-%dT%H:%M:%S").to_string(),
        max: max.format("%Y-%m-%dT%H:%M:%S").to_string(),
        non_null_ratio: non_null_ratio(row_count, missing),
    }))
}

fn parse_date(value: &str) -> Option<NaiveDateTime> {
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    // Year-month values ("2024-03") carry an implicit first of month
    if value.len() == 7
        && let Ok(d) = NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d")
    {
        return Some(d.and_time(NaiveTime::MIN));
    }
    None
}

/// Descriptive statistics for a numeric column; `None` when every value is
/// missing (such columns are omitted from the numeric summary).
fn numeric_stats(col: &Column) -> Result<Option<NumericColumnSummary>> {
    let series = col.as_materialized_series();
    let ca = series.cast(&DataType::Float64)?;
    let ca = ca.f64()?;

    let count = ca.len() - ca.null_count();
    if count == 0 {
        return Ok(None);
    }

    let (Some(min), Some(max), Some(mean)) = (ca.min(), ca.max(), ca.mean()) else {
        return Ok(None);
    };

    // Sample standard deviation; a single observation has no spread
    let std = ca.std(1).filter(|v| v.is_finite()).unwrap_or(0.0);
    let q1 = ca.quantile(0.25, QuantileMethod::Linear)?.unwrap_or(min);
    let median = ca.median().unwrap_or(min);
    let q3 = ca.quantile(0.75, QuantileMethod::Linear)?.unwrap_or(max);

    Ok(Some(NumericColumnSummary {
        column: col.name().to_string(),
        count,
        mean,
        std,
        min,
        q1,
        median,
        q3,
        max,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        df! {
            "EntryId" => &["JE-1", "JE-2", "JE-3", "JE-4", "JE-5"],
            "PostingDate" => &["2024-01-03", "2024-02-14", "2024-03-01", "2024-03-28", "2024-04-09"],
            "Amount" => &[Some(120.5), Some(80.0), None, Some(40.25), Some(310.0)],
            "SortOrder" => &[None::<f64>, None, None, None, None],
            "Memo" => &["cash", "", "accrual", "", "cash"],
        }
        .expect("valid frame")
    }

    #[test]
    fn test_missing_counts_include_empty_strings() -> anyhow::Result<()> {
        let summary = analyse_table(&sample_frame(), "sample.csv", 0.8)?;

        let missing: Vec<(&str, usize)> = summary
            .missing_values
            .iter()
            .map(|m| (m.column.as_str(), m.missing))
            .collect();

        assert_eq!(
            missing,
            vec![
                ("EntryId", 0),
                ("PostingDate", 0),
                ("Amount", 1),
                ("SortOrder", 5),
                ("Memo", 2),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_all_missing_column_counts_every_row() -> anyhow::Result<()> {
        let summary = analyse_table(&sample_frame(), "sample.csv", 0.8)?;
        let sort_order = summary
            .missing_values
            .iter()
            .find(|m| m.column == "SortOrder")
            .expect("SortOrder reported");
        assert_eq!(sort_order.missing, summary.row_count);
        Ok(())
    }

    #[test]
    fn test_string_date_column_detected() -> anyhow::Result<()> {
        let summary = analyse_table(&sample_frame(), "sample.csv", 0.8)?;

        let posting = summary
            .date_columns
            .iter()
            .find(|d| d.column == "PostingDate")
            .expect("PostingDate detected as date column");
        assert_eq!(posting.min, "2024-01-03T00:00:00");
        assert_eq!(posting.max, "2024-04-09T00:00:00");
        assert!((posting.non_null_ratio - 1.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_mostly_non_date_strings_not_detected() -> anyhow::Result<()> {
        let df = df! {
            "Mixed" => &["2024-01-03", "cash", "accrual", "wire", "cheque"],
        }?;
        let summary = analyse_table(&df, "sample.csv", 0.8)?;
        assert!(summary.date_columns.is_empty());
        Ok(())
    }

    #[test]
    fn test_numeric_summary_ordering_invariant() -> anyhow::Result<()> {
        let summary = analyse_table(&sample_frame(), "sample.csv", 0.8)?;

        let amount = summary
            .numeric_summary
            .iter()
            .find(|n| n.column == "Amount")
            .expect("Amount summarised");
        assert_eq!(amount.count, 4);
        assert!(amount.min <= amount.q1);
        assert!(amount.q1 <= amount.median);
        assert!(amount.median <= amount.q3);
        assert!(amount.q3 <= amount.max);
        assert!((amount.min - 40.25).abs() < 1e-9);
        assert!((amount.max - 310.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_numeric_summary_skips_all_null_column() -> anyhow::Result<()> {
        let summary = analyse_table(&sample_frame(), "sample.csv", 0.8)?;
        assert!(
            summary
                .numeric_summary
                .iter()
                .all(|n| n.column != "SortOrder")
        );
        Ok(())
    }

    #[test]
    fn test_single_value_column_has_zero_std() -> anyhow::Result<()> {
        let df = df! {
            "Lonely" => &[Some(42.0), None, None],
        }?;
        let summary = analyse_table(&df, "sample.csv", 0.8)?;
        let lonely = &summary.numeric_summary[0];
        assert_eq!(lonely.count, 1);
        assert!((lonely.std - 0.0).abs() < f64::EPSILON);
        assert!((lonely.mean - 42.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_date("2024-01-03").is_some());
        assert!(parse_date("01/03/2024").is_some());
        assert!(parse_date("2024/01/03").is_some());
        assert!(parse_date("2024-01-03 14:15:16").is_some());
        assert!(parse_date("2024-01").is_some());
        assert!(parse_date("not a date").is_none());
        assert!(parse_date("123.45").is_none());
    }
}
