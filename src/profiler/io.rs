use crate::error::{ChartError, Result};
use anyhow::Context as _;
use polars::prelude::*;
use std::path::Path;

/// Loads the file behind `path` into a dataset.
///
/// Missing files, unreadable content and unsupported extensions all surface
/// as [`ChartError::DatasetLoad`].
pub fn load_dataset(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(ChartError::DatasetLoad(format!(
            "file not found: {}",
            path.display()
        )));
    }

    let df = read_frame(path).map_err(|e| ChartError::DatasetLoad(format!("{e:#}")))?;
    let df = try_parse_temporal_columns(df);

    tracing::info!(
        "Loaded {} ({} rows x {} columns)",
        path.display(),
        df.height(),
        df.width()
    );
    Ok(df)
}

fn read_frame(path: &Path) -> anyhow::Result<DataFrame> {
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
        "json" => JsonReader::new(std::fs::File::open(path)?)
            .finish()
            .context("Failed to read JSON")?,
        "ndjson" | "jsonl" => JsonReader::new(std::fs::File::open(path)?)
            .with_json_format(JsonFormat::JsonLines)
            .finish()
            .context("Failed to read NDJSON")?,
        _ => anyhow::bail!("Unsupported file extension: '{ext}'"),
    };
    Ok(df)
}

/// Converts string columns that mostly hold dates into datetime columns.
pub fn try_parse_temporal_columns(df: DataFrame) -> DataFrame {
    let mut df = df;
    let candidates: Vec<PlSmallStr> = df
        .get_columns()
        .iter()
        .filter(|c| c.dtype() == &DataType::String)
        .map(|c| c.name().clone())
        .collect();

    for name in candidates {
        let Ok(col) = df.column(&name) else { continue };
        let series = col.as_materialized_series();
        let present = series.len() - series.null_count();
        if present == 0 {
            continue;
        }

        if let Ok(casted) = series.cast(&DataType::Datetime(TimeUnit::Milliseconds, None)) {
            let parsed = casted.len() - casted.null_count();
            if parsed * 2 >= present && df.replace(&name, casted).is_ok() {
                tracing::debug!("Column '{name}' parsed as datetime");
            }
        }
    }
    df
}
