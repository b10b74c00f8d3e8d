use crate::chart::{AxisParameters, ChartType};
use crate::profiler::{ColumnType, DatasetProfile};
use serde::{Deserialize, Serialize};

/// Fewest suggestions a complete response carries.
pub const MIN_SUGGESTIONS: usize = 3;
/// Most suggestions a response carries.
pub const MAX_SUGGESTIONS: usize = 5;

/// One suggested visualization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSuggestion {
    pub title: String,
    pub chart_type: ChartType,
    pub parameters: AxisParameters,
    pub insight: String,
}

impl ChartSuggestion {
    /// Checks the suggestion against the profile it was derived from.
    ///
    /// Returns the reason on failure, for logging.
    pub fn check(&self, profile: &DatasetProfile) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("empty title".to_owned());
        }
        if self.insight.trim().is_empty() {
            return Err("empty insight".to_owned());
        }
        if !profile.has_column(&self.parameters.x_axis) {
            return Err(format!("unknown x_axis '{}'", self.parameters.x_axis));
        }
        match self.parameters.y_axis.as_deref() {
            Some(y) if !profile.has_column(y) => Err(format!("unknown y_axis '{y}'")),
            Some(y)
                if self.chart_type.requires_numeric_y()
                    && profile.column_type(y) != Some(ColumnType::Numeric) =>
            {
                Err(format!("non-numeric y_axis '{y}'"))
            }
            None if self.chart_type.requires_y_axis() => Err(format!(
                "{} chart without y_axis",
                self.chart_type.as_str()
            )),
            _ => Ok(()),
        }
    }

    /// Identity used to avoid emitting the same chart twice.
    pub fn key(&self) -> (ChartType, &str, Option<&str>) {
        (
            self.chart_type,
            self.parameters.x_axis.as_str(),
            self.parameters.y_axis.as_deref(),
        )
    }
}
