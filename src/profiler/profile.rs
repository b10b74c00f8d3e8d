use super::classify::{classify, numeric_columns};
use super::describe::{describe, distinct_count, temporal_range};
use super::types::{ColumnType, DatasetProfile};
use crate::error::Result;
use crate::utils::any_value_to_json;
use polars::prelude::*;
use std::collections::BTreeMap;

/// Number of leading rows included in a profile.
pub const SAMPLE_ROWS: usize = 3;

/// Builds the profile for one request's dataset.
///
/// The sample is always the first rows in original order, so identical input
/// yields an identical profile.
pub fn build_profile(df: &DataFrame) -> Result<DatasetProfile> {
    let types = classify(df)?;
    let descriptive_stats = describe(df, &numeric_columns(&types))?;

    let mut column_types = BTreeMap::new();
    let mut dtypes = BTreeMap::new();
    let mut null_counts = BTreeMap::new();
    let mut distinct_counts = BTreeMap::new();
    let mut temporal_ranges = BTreeMap::new();

    for (col, (name, kind)) in df.get_columns().iter().zip(&types) {
        column_types.insert(name.clone(), *kind);
        dtypes.insert(name.clone(), col.dtype().to_string());
        null_counts.insert(name.clone(), col.null_count());
        match kind {
            ColumnType::Categorical => {
                distinct_counts.insert(name.clone(), distinct_count(col)?);
            }
            ColumnType::Temporal => {
                temporal_ranges.insert(name.clone(), temporal_range(col)?);
            }
            ColumnType::Numeric => {}
        }
    }

    let profile = DatasetProfile {
        row_count: df.height(),
        column_count: df.width(),
        column_names: types.into_iter().map(|(name, _)| name).collect(),
        column_types,
        dtypes,
        null_counts,
        descriptive_stats,
        distinct_counts,
        temporal_ranges,
        sample_rows: sample_rows(df, SAMPLE_ROWS)?,
    };

    tracing::debug!(
        "Profiled dataset: {} rows, {} columns, {} numeric",
        profile.row_count,
        profile.column_count,
        profile.descriptive_stats.len()
    );

    Ok(profile)
}

/// First `n` rows as column → value maps.
pub fn sample_rows(
    df: &DataFrame,
    n: usize,
) -> Result<Vec<serde_json::Map<String, serde_json::Value>>> {
    let mut rows = Vec::new();
    for idx in 0..df.height().min(n) {
        let mut row = serde_json::Map::new();
        for col in df.get_columns() {
            let value = col.as_materialized_series().get(idx)?;
            row.insert(col.name().to_string(), any_value_to_json(&value));
        }
        rows.push(row);
    }
    Ok(rows)
}
