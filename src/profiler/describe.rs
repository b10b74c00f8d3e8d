//! Descriptive statistics and per-type column summaries.
//!
//! Numeric statistics follow the usual definitions: sample mean, sample standard
//! deviation with an `n - 1` denominator, and quartiles by linear interpolation
//! between order statistics. Missing values are skipped; a column with no values
//! produces `None` everywhere instead of an error.

use super::types::{NumericStats, TemporalRange};
use crate::error::{ChartError, Result};
use polars::prelude::*;
use std::collections::BTreeMap;

/// Statistics for each of `numeric_columns`.
pub fn describe(
    df: &DataFrame,
    numeric_columns: &[String],
) -> Result<BTreeMap<String, NumericStats>> {
    let mut stats = BTreeMap::new();
    for name in numeric_columns {
        let col = df
            .column(name)
            .map_err(|_not_found| ChartError::ColumnNotFound(name.clone()))?;
        stats.insert(name.clone(), numeric_stats(col)?);
    }
    Ok(stats)
}

pub fn numeric_stats(col: &Column) -> Result<NumericStats> {
    let series = col.as_materialized_series().cast(&DataType::Float64)?;
    let ca = series.f64()?;

    let count = ca.len() - ca.null_count();
    if count == 0 {
        return Ok(NumericStats::default());
    }

    Ok(NumericStats {
        count,
        mean: ca.mean(),
        std: ca.std(1).filter(|v| v.is_finite()),
        min: ca.min(),
        q1: ca.quantile(0.25, QuantileMethod::Linear)?,
        median: ca.quantile(0.5, QuantileMethod::Linear)?,
        q3: ca.quantile(0.75, QuantileMethod::Linear)?,
        max: ca.max(),
    })
}

/// Earliest/latest value of a temporal column and whether it is ordered.
pub fn temporal_range(col: &Column) -> Result<TemporalRange> {
    let series = col.as_materialized_series();
    let physical = series.to_physical_repr().cast(&DataType::Int64)?;
    let ca = physical.i64()?;

    let mut first: Option<(usize, i64)> = None;
    let mut last: Option<(usize, i64)> = None;
    let mut previous: Option<i64> = None;
    let mut monotonic = true;

    for (idx, value) in ca.into_iter().enumerate() {
        let Some(v) = value else { continue };
        if first.is_none_or(|(_, min)| v < min) {
            first = Some((idx, v));
        }
        if last.is_none_or(|(_, max)| v > max) {
            last = Some((idx, v));
        }
        if previous.is_some_and(|p| v < p) {
            monotonic = false;
        }
        previous = Some(v);
    }

    let render = |pos: Option<(usize, i64)>| -> Result<Option<String>> {
        match pos {
            Some((idx, _)) => Ok(Some(series.get(idx)?.to_string())),
            None => Ok(None),
        }
    };

    Ok(TemporalRange {
        start: render(first)?,
        end: render(last)?,
        monotonic,
    })
}

/// Number of distinct non-missing values.
pub fn distinct_count(col: &Column) -> Result<usize> {
    let series = col.as_materialized_series().drop_nulls();
    Ok(series.n_unique()?)
}
