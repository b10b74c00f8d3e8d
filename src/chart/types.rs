use crate::error::{ChartError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Chart family; decides the aggregation and payload shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Pie,
    Scatter,
}

impl ChartType {
    pub const ALL: [Self; 4] = [Self::Bar, Self::Line, Self::Pie, Self::Scatter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Pie => "pie",
            Self::Scatter => "scatter",
        }
    }

    /// Every family except pie needs a y axis.
    pub fn requires_y_axis(&self) -> bool {
        !matches!(self, Self::Pie)
    }

    /// Bar, line and scatter plot y as a number; pie may aggregate any column.
    pub fn requires_numeric_y(&self) -> bool {
        self.requires_y_axis()
    }
}

impl FromStr for ChartType {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ChartError::InvalidChartType(s.to_owned()))
    }
}

/// Aggregation applied per group for bar, line and pie charts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    #[default]
    Sum,
    Mean,
    Count,
    Max,
    Min,
}

impl Aggregation {
    pub const ALL: [Self; 5] = [Self::Sum, Self::Mean, Self::Count, Self::Max, Self::Min];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Mean => "mean",
            Self::Count => "count",
            Self::Max => "max",
            Self::Min => "min",
        }
    }
}

impl FromStr for Aggregation {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ChartError::InvalidAggregation(s.to_owned()))
    }
}

/// Axis column selection shared by suggestions and requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisParameters {
    pub x_axis: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<String>,
}

/// Untyped chart-data request as received from a client.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChartRequest {
    pub filepath: String,
    pub chart_type: String,
    #[serde(default)]
    pub parameters: RequestParameters,
    #[serde(default)]
    pub aggregation: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RequestParameters {
    #[serde(default)]
    pub x_axis: Option<String>,
    #[serde(default)]
    pub y_axis: Option<String>,
}

impl ChartRequest {
    /// Checks the request values without touching any data.
    ///
    /// Order: chart type, aggregation, then the presence of the axes the chart
    /// family needs. Column existence is checked later against the dataset.
    pub fn validate(&self) -> Result<ChartSpec> {
        let chart_type: ChartType = self.chart_type.parse()?;
        let aggregation = match self.aggregation.as_deref() {
            Some(value) => value.parse()?,
            None => Aggregation::default(),
        };

        let x_axis = non_empty(self.parameters.x_axis.as_deref())
            .ok_or_else(|| ChartError::MissingParameter("x_axis".to_owned()))?;
        let y_axis = non_empty(self.parameters.y_axis.as_deref());
        if chart_type.requires_y_axis() && y_axis.is_none() {
            return Err(ChartError::MissingParameter(format!(
                "y_axis (required for {} charts)",
                chart_type.as_str()
            )));
        }

        Ok(ChartSpec {
            chart_type,
            x_axis,
            y_axis,
            aggregation,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_owned)
}

/// Validated chart request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartSpec {
    pub chart_type: ChartType,
    pub x_axis: String,
    pub y_axis: Option<String>,
    pub aggregation: Aggregation,
}

impl ChartSpec {
    pub fn parameters(&self) -> AxisParameters {
        AxisParameters {
            x_axis: self.x_axis.clone(),
            y_axis: self.y_axis.clone(),
        }
    }
}

/// Chart-ready data, shaped per chart family.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartPayload {
    /// Bar, line and pie.
    Grouped(GroupedPayload),
    /// Scatter.
    Points(PointsPayload),
}

/// Whole-number values serialize as JSON integers (`[2, 1]`, not `[2.0, 1.0]`).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GroupedPayload {
    pub labels: Vec<String>,
    #[serde(serialize_with = "crate::utils::serialize_chart_numbers")]
    pub values: Vec<Option<f64>>,
    pub data: Vec<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PointsPayload {
    pub data: Vec<Point>,
    pub x_values: Vec<serde_json::Value>,
    pub y_values: Vec<serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: serde_json::Value,
    pub y: serde_json::Value,
}

/// Response envelope echoing the request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartResponse {
    pub chart_type: ChartType,
    pub data: ChartPayload,
    pub parameters: AxisParameters,
    pub aggregation: Aggregation,
}
