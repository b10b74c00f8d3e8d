use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic type assigned to each column for one profiling pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    Categorical,
    Temporal,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
            Self::Temporal => "temporal",
        }
    }
}

/// Ordered column → type mapping, in the dataset's column order.
pub type ColumnTypes = Vec<(String, ColumnType)>;

/// Descriptive statistics for one numeric column.
///
/// Fields are `None` when the column has no usable values (all missing), and
/// serialize as `null`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub q1: Option<f64>,
    #[serde(rename = "50%")]
    pub median: Option<f64>,
    #[serde(rename = "75%")]
    pub q3: Option<f64>,
    pub max: Option<f64>,
}

impl NumericStats {
    /// Ratio of standard deviation to the absolute mean.
    pub fn coefficient_of_variation(&self) -> Option<f64> {
        match (self.mean, self.std) {
            (Some(mean), Some(std)) if mean.abs() > f64::EPSILON => Some(std / mean.abs()),
            _ => None,
        }
    }
}

/// Earliest and latest value of a temporal column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalRange {
    pub start: Option<String>,
    pub end: Option<String>,
    /// Non-missing values never decrease in row order.
    pub monotonic: bool,
}

/// Shape of a dataset, as reported to clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub rows: usize,
    pub columns: usize,
}

/// Structured description of a dataset used to drive recommendations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub row_count: usize,
    pub column_count: usize,
    pub column_names: Vec<String>,
    pub column_types: BTreeMap<String, ColumnType>,
    pub dtypes: BTreeMap<String, String>,
    pub null_counts: BTreeMap<String, usize>,
    pub descriptive_stats: BTreeMap<String, NumericStats>,
    pub distinct_counts: BTreeMap<String, usize>,
    pub temporal_ranges: BTreeMap<String, TemporalRange>,
    pub sample_rows: Vec<serde_json::Map<String, serde_json::Value>>,
}

impl DatasetProfile {
    pub fn shape(&self) -> Shape {
        Shape {
            rows: self.row_count,
            columns: self.column_count,
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_types.contains_key(name)
    }

    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.column_types.get(name).copied()
    }

    /// Column names of the given type, in dataset order.
    pub fn columns_of(&self, kind: ColumnType) -> Vec<&str> {
        self.column_names
            .iter()
            .filter(|name| self.column_type(name) == Some(kind))
            .map(String::as_str)
            .collect()
    }
}
