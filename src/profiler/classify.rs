use super::types::{ColumnType, ColumnTypes};
use crate::error::{ChartError, Result};
use polars::prelude::*;

/// Classify every column of `df`, in column order.
///
/// Temporal storage wins over numeric, numeric over everything else; strings,
/// booleans and nested types are categorical.
pub fn classify(df: &DataFrame) -> Result<ColumnTypes> {
    if df.width() == 0 {
        return Err(ChartError::InvalidDataset(
            "dataset has no columns".to_owned(),
        ));
    }

    Ok(df
        .get_columns()
        .iter()
        .map(|col| (col.name().to_string(), classify_dtype(col.dtype())))
        .collect())
}

pub fn classify_dtype(dtype: &DataType) -> ColumnType {
    if dtype.is_temporal() {
        ColumnType::Temporal
    } else if dtype.is_primitive_numeric() {
        ColumnType::Numeric
    } else {
        ColumnType::Categorical
    }
}

/// Names of the numeric columns in `types`, preserving order.
pub fn numeric_columns(types: &ColumnTypes) -> Vec<String> {
    types
        .iter()
        .filter(|(_, kind)| *kind == ColumnType::Numeric)
        .map(|(name, _)| name.clone())
        .collect()
}
