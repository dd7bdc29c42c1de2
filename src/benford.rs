//! Benford's-Law leading-digit analysis.
//!
//! Benford's Law predicts that in naturally occurring numeric datasets the
//! leading significant digit d (1 to 9) appears with probability
//! log10(1 + 1/d). Journal-entry amounts that deviate strongly from the
//! prediction are a classic audit flag.
//!
//! The analysis is descriptive: observed digit frequencies are presented
//! side by side with the theoretical distribution. No significance test is
//! applied.

use crate::error::{LedgerlensError, Result};
use polars::prelude::*;
use serde::Serialize;

/// The digit buckets of the analysis, ascending.
pub const DIGITS: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];

/// Theoretical Benford proportion for a leading digit: log10(1 + 1/d).
pub fn expected_proportion(digit: u8) -> f64 {
    (1.0 + 1.0 / f64::from(digit)).log10()
}

/// Observed and expected frequencies for one digit bucket.
#[derive(Debug, Clone, Serialize)]
pub struct DigitFrequency {
    pub digit: u8,
    pub observed_count: usize,
    pub expected_count: f64,
    pub observed_percent: f64,
    pub expected_percent: f64,
}

/// Complete Benford comparison for one column of one file.
#[derive(Debug, Clone, Serialize)]
pub struct BenfordAnalysis {
    pub file: String,
    pub column: String,
    pub total_values: usize,
    pub digits: Vec<DigitFrequency>,
}

/// Resolve the column to analyse.
///
/// An explicit request is validated and never falls back: the name must
/// exist and the column must be numeric-typed. Without a request, columns
/// are scanned in declaration order and the first one with at least
/// `min_count` non-missing, non-zero numeric values wins. The first-in-order
/// tie-break is a deliberate, reproducible default, not a statistical
/// choice.
pub fn select_column(df: &DataFrame, requested: Option<&str>, min_count: usize) -> Result<String> {
    if let Some(name) = requested {
        let col = df.column(name).map_err(|_| {
            LedgerlensError::ColumnNotFound(format!(
                "'{name}' is not a column of the table (headers: {:?})",
                df.get_column_names()
            ))
        })?;
        if !col.dtype().is_primitive_numeric() {
            return Err(LedgerlensError::ColumnNotNumeric(format!(
                "'{name}' has type {}, expected a numeric column",
                col.dtype()
            )));
        }
        return Ok(name.to_owned());
    }

    for col in df.get_columns() {
        if !col.dtype().is_primitive_numeric() {
            continue;
        }
        let series = col.as_materialized_series();
        let ca = series.cast(&DataType::Float64)?;
        let ca = ca.f64()?;
        let usable = ca.into_iter().flatten().filter(|&v| v != 0.0).count();
        if usable >= min_count {
            return Ok(col.name().to_string());
        }
    }

    Err(LedgerlensError::Selection(format!(
        "no numeric column has at least {min_count} non-missing, non-zero values"
    )))
}

/// Extract the leading significant decimal digit of a value.
///
/// Returns `None` for zero and non-finite values; they carry no leading
/// digit and are excluded from the multiset. Extraction is string-based:
/// `{:e}` renders the mantissa already normalised to [1, 10), so the first
/// character is the digit, with no repeated multiply/divide that could
/// drift a value across a power-of-ten boundary (0.0034 stays 3, 45230
/// stays 4).
pub fn leading_digit(value: f64) -> Option<u8> {
    if !value.is_finite() {
        return None;
    }
    let magnitude = value.abs();
    if magnitude == 0.0 {
        return None;
    }

    let repr = format!("{magnitude:e}");
    let first = repr.as_bytes().first().copied()?;
    let digit = first.wrapping_sub(b'0');

    // A degenerate rendering must still land in a valid bucket.
    Some(digit.clamp(1, 9))
}

/// Collect the leading-digit multiset of a numeric column.
pub fn extract_leading_digits(col: &Column) -> Result<Vec<u8>> {
    let series = col.as_materialized_series();
    let ca = series.cast(&DataType::Float64)?;
    let ca = ca.f64()?;
    Ok(ca.into_iter().flatten().filter_map(leading_digit).collect())
}

/// Compare a leading-digit multiset against the theoretical distribution.
///
/// Total over its input: an empty multiset yields observed counts and
/// proportions of 0 for every digit, while the theoretical proportions stay
/// the fixed Benford constants.
pub fn distribution(leading: &[u8]) -> Vec<DigitFrequency> {
    let total = leading.len();
    let mut counts = [0usize; 9];
    for &digit in leading {
        counts[usize::from(digit.clamp(1, 9)) - 1] += 1;
    }

    DIGITS
        .iter()
        .map(|&digit| {
            let observed_count = counts[usize::from(digit) - 1];
            let expected_percent = expected_proportion(digit);
            let (observed_percent, expected_count) = if total == 0 {
                (0.0, 0.0)
            } else {
                (
                    observed_count as f64 / total as f64,
                    total as f64 * expected_percent,
                )
            };
            DigitFrequency {
                digit,
                observed_count,
                expected_count,
                observed_percent,
                expected_percent,
            }
        })
        .collect()
}

/// Run the full Benford analysis against a loaded table.
///
/// # Errors
///
/// Selection errors per [`select_column`]; `EmptyColumn` when the selected
/// column yields zero usable leading digits.
pub fn analyse(
    df: &DataFrame,
    file: &str,
    requested: Option<&str>,
    min_count: usize,
) -> Result<BenfordAnalysis> {
    let column = select_column(df, requested, min_count)?;
    let leading = extract_leading_digits(df.column(&column)?)?;

    if leading.is_empty() {
        return Err(LedgerlensError::EmptyColumn(format!(
            "column '{column}' has no usable leading digits"
        )));
    }

    tracing::info!(
        "Benford analysis over column '{column}': {} usable values",
        leading.len()
    );

    Ok(BenfordAnalysis {
        file: file.to_owned(),
        column,
        total_values: leading.len(),
        digits: distribution(&leading),
    })
}
