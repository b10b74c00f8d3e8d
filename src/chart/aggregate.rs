//! Grouping and aggregation of a dataset into chart payloads.
//!
//! Grouped families (bar, line, pie) use a stable polars group-by, so groups
//! come out in order of first appearance. Bar, line and scatter need a
//! numeric y column. For sum, mean, max and min the value column is cast to
//! `Float64` non-strictly first: anything that does not read as a number turns
//! into a missing value and drops out of the aggregate instead of counting as
//! zero. Count works on the raw column, so any column type can be counted.

use super::types::{
    Aggregation, ChartPayload, ChartSpec, ChartType, GroupedPayload, Point, PointsPayload,
};
use crate::error::{ChartError, Result};
use crate::profiler::ColumnType;
use crate::profiler::classify::classify_dtype;
use crate::utils::{any_value_to_json, chart_number, label_text};
use polars::prelude::*;

/// Value name used in pie rows when no y axis was requested.
pub const COUNT_COLUMN: &str = "Count";

const KEY: &str = "__chartwise_key";
const VALUE: &str = "__chartwise_value";

pub fn aggregate(df: &DataFrame, spec: &ChartSpec) -> Result<ChartPayload> {
    let x = find_column(df, &spec.x_axis)?;
    let y = spec
        .y_axis
        .as_deref()
        .map(|name| find_column(df, name))
        .transpose()?;

    if let Some(y) = y.filter(|_| spec.chart_type.requires_numeric_y()) {
        require_numeric(y)?;
    }

    let payload = match (spec.chart_type, y) {
        (ChartType::Scatter, Some(y)) => ChartPayload::Points(scatter(x, y)?),
        (ChartType::Pie, y) => ChartPayload::Grouped(grouped(x, y, spec)?),
        (ChartType::Bar | ChartType::Line, Some(y)) => {
            ChartPayload::Grouped(grouped(x, Some(y), spec)?)
        }
        (_, None) => {
            return Err(ChartError::MissingParameter(format!(
                "y_axis (required for {} charts)",
                spec.chart_type.as_str()
            )));
        }
    };

    tracing::info!(
        "Aggregated {} chart on '{}' ({} points)",
        spec.chart_type.as_str(),
        spec.x_axis,
        payload_len(&payload)
    );
    Ok(payload)
}

fn find_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_not_found| ChartError::ColumnNotFound(name.to_owned()))
}

fn require_numeric(column: &Column) -> Result<()> {
    match classify_dtype(column.dtype()) {
        ColumnType::Numeric => Ok(()),
        ColumnType::Categorical | ColumnType::Temporal => {
            Err(ChartError::NonNumericColumn(column.name().to_string()))
        }
    }
}

fn payload_len(payload: &ChartPayload) -> usize {
    match payload {
        ChartPayload::Grouped(g) => g.labels.len(),
        ChartPayload::Points(p) => p.data.len(),
    }
}

fn grouped(x: &Column, y: Option<&Column>, spec: &ChartSpec) -> Result<GroupedPayload> {
    let keys = x.as_materialized_series().clone().with_name(KEY.into());
    let mut columns = vec![Column::from(keys)];

    // Pie without a y axis always counts rows, whatever aggregation was asked for.
    let value_expr = match y {
        Some(y) => {
            let raw = y.as_materialized_series();
            let values = match spec.aggregation {
                Aggregation::Count => raw.clone(),
                _ => raw.cast(&DataType::Float64)?,
            };
            columns.push(Column::from(values.with_name(VALUE.into())));
            aggregation_expr(spec.aggregation)
        }
        None => len(),
    };

    let out = DataFrame::new(columns)?
        .lazy()
        .filter(col(KEY).is_not_null())
        .group_by_stable([col(KEY)])
        .agg([value_expr.cast(DataType::Float64).alias(VALUE)])
        .collect()?;

    let key_series = out.column(KEY)?.as_materialized_series();
    let value_series = out.column(VALUE)?.as_materialized_series();
    let values: Vec<Option<f64>> = value_series.f64()?.into_iter().collect();

    let value_name = value_column_name(spec);
    let mut labels = Vec::with_capacity(out.height());
    let mut data = Vec::with_capacity(out.height());
    for (idx, value) in values.iter().enumerate() {
        let key = any_value_to_json(&key_series.get(idx)?);
        labels.push(label_text(&key));

        let mut row = serde_json::Map::new();
        row.insert(spec.x_axis.clone(), key);
        row.insert(value_name.clone(), chart_number(*value));
        data.push(row);
    }

    Ok(GroupedPayload {
        labels,
        values,
        data,
    })
}

fn aggregation_expr(aggregation: Aggregation) -> Expr {
    let value = col(VALUE);
    match aggregation {
        Aggregation::Sum => value.sum(),
        Aggregation::Mean => value.mean(),
        Aggregation::Count => value.count(),
        Aggregation::Max => value.max(),
        Aggregation::Min => value.min(),
    }
}

fn value_column_name(spec: &ChartSpec) -> String {
    match spec.y_axis.as_deref() {
        None => COUNT_COLUMN.to_owned(),
        Some(y) if y == spec.x_axis => format!("{}_{y}", spec.aggregation.as_str()),
        Some(y) => y.to_owned(),
    }
}

fn scatter(x: &Column, y: &Column) -> Result<PointsPayload> {
    let xs = x.as_materialized_series();
    let ys = y.as_materialized_series();

    let mut data = Vec::with_capacity(xs.len());
    let mut x_values = Vec::with_capacity(xs.len());
    let mut y_values = Vec::with_capacity(xs.len());
    for idx in 0..xs.len() {
        let xv = any_value_to_json(&xs.get(idx)?);
        let yv = any_value_to_json(&ys.get(idx)?);
        data.push(Point {
            x: xv.clone(),
            y: yv.clone(),
        });
        x_values.push(xv);
        y_values.push(yv);
    }

    Ok(PointsPayload {
        data,
        x_values,
        y_values,
    })
}
