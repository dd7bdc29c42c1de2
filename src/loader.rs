//! Table loading.
//!
//! The loader is glue around Polars' readers: the file extension picks the
//! reader, CSV gets schema inference with date parsing, and JSON string
//! columns that cast cleanly to datetime are converted after the fact. The
//! resulting `DataFrame` is treated as immutable for the rest of the run.

use crate::error::{LedgerlensError, Result, ResultExt as _};
use polars::prelude::*;
use std::path::Path;

/// Load a tabular file into an eager `DataFrame`.
///
/// Supported extensions: `csv`, `json`, `jsonl`/`ndjson`, `parquet`.
///
/// # Errors
///
/// `InputNotFound` when the path does not exist; `DataProcessing` for an
/// unsupported extension or a reader failure.
pub fn load_df(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(LedgerlensError::InputNotFound(
            path.display().to_string(),
        ));
    }

    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    let df = match ext.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_has_header(true)
            .with_try_parse_dates(true)
            .finish()?
            .collect()
            .context("Failed to read CSV")?,
        "parquet" => ParquetReader::new(std::fs::File::open(path)?)
            .finish()
            .context("Failed to read Parquet")?,
        "json" => {
            let df = JsonReader::new(std::fs::File::open(path)?)
                .finish()
                .context("Failed to read JSON")?;
            try_parse_temporal_columns(df)?
        }
        "jsonl" | "ndjson" => {
            let df = JsonLineReader::from_path(path)
                .context("Failed to open NDJSON")?
                .finish()
                .context("Failed to read NDJSON")?;
            try_parse_temporal_columns(df)?
        }
        _ => {
            return Err(LedgerlensError::DataProcessing(format!(
                "Unsupported file extension: {ext}"
            )));
        }
    };

    Ok(df)
}

/// Upgrade string columns that are actually datetimes.
///
/// JSON has no date type, so date columns arrive as strings. A column is
/// converted only when casting introduces almost no new nulls.
pub fn try_parse_temporal_columns(df: DataFrame) -> Result<DataFrame> {
    let mut df = df;
    let schema = df.schema().clone();

    for (name, dtype) in schema.iter() {
        if dtype.is_primitive_numeric() || dtype.is_temporal() || dtype.is_bool() {
            continue;
        }

        if let Ok(s) = df.column(name) {
            let s = s.as_materialized_series();
            if let Ok(casted) = s.cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
                && casted.null_count() < s.len() / 2
            {
                let _ = df.replace(name, casted);
            }
        }
    }
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_input_not_found() {
        let err = load_df(Path::new("testdata/does_not_exist.csv")).unwrap_err();
        assert!(matches!(err, LedgerlensError::InputNotFound(_)));
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        // Any path that exists but has an unknown extension
        let err = load_df(Path::new("Cargo.toml")).unwrap_err();
        assert!(matches!(err, LedgerlensError::DataProcessing(_)));
    }
}
