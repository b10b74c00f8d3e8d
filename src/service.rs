//! Request-level operations combining loading, profiling, recommendation and
//! aggregation into client-facing responses.

use crate::chart::{ChartRequest, ChartResponse, ChartSpec, aggregate};
use crate::error::Result;
use crate::profiler::io::load_dataset;
use crate::profiler::{ColumnType, DatasetProfile, Shape, build_profile};
use crate::recommend::{ChartSuggestion, RecommendationStrategy};
use polars::prelude::DataFrame;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Dataset overview returned alongside recommendations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DataSummary {
    pub shape: Shape,
    pub columns: Vec<String>,
    pub column_types: BTreeMap<String, ColumnType>,
}

impl From<&DatasetProfile> for DataSummary {
    fn from(profile: &DatasetProfile) -> Self {
        Self {
            shape: profile.shape(),
            columns: profile.column_names.clone(),
            column_types: profile.column_types.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<ChartSuggestion>,
    pub data_summary: DataSummary,
}

pub fn profile_file(path: &Path) -> Result<DatasetProfile> {
    let df = load_dataset(path)?;
    let profile = build_profile(&df)?;
    tracing::info!(
        "Profiled {}: {} rows, {} columns",
        path.display(),
        profile.row_count,
        profile.column_count
    );
    Ok(profile)
}

/// Profiles `df` and asks `strategy` for suggestions.
///
/// Only profiling can fail; recommendation always yields a list.
pub async fn recommend_dataset<S>(df: &DataFrame, strategy: &S) -> Result<RecommendationResponse>
where
    S: RecommendationStrategy + Sync,
{
    let profile = build_profile(df)?;
    let recommendations = strategy.recommend(&profile).await;
    Ok(RecommendationResponse {
        recommendations,
        data_summary: DataSummary::from(&profile),
    })
}

pub async fn recommend_file<S>(path: &Path, strategy: &S) -> Result<RecommendationResponse>
where
    S: RecommendationStrategy + Sync,
{
    let df = load_dataset(path)?;
    recommend_dataset(&df, strategy).await
}

/// Validates the request, then loads the dataset and aggregates it.
///
/// Invalid chart types, aggregations and missing axes are rejected before
/// the file is read.
pub fn chart_data(request: &ChartRequest) -> Result<ChartResponse> {
    let spec = request.validate()?;
    let df = load_dataset(Path::new(&request.filepath))?;
    chart_dataset(&df, &spec)
}

pub fn chart_dataset(df: &DataFrame, spec: &ChartSpec) -> Result<ChartResponse> {
    let data = aggregate(df, spec)?;
    Ok(ChartResponse {
        chart_type: spec.chart_type,
        data,
        parameters: spec.parameters(),
        aggregation: spec.aggregation,
    })
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used)]
    use super::*;
    use crate::recommend::HeuristicStrategy;
    use polars::prelude::*;

    #[tokio::test]
    async fn test_recommendation_response_shape() -> anyhow::Result<()> {
        let df = df!(
            "Region" => &["N", "S", "N"],
            "Sales" => &[10i64, 20, 5]
        )?;
        let response = recommend_dataset(&df, &HeuristicStrategy).await?;
        let json = serde_json::to_value(&response)?;

        assert_eq!(json["data_summary"]["shape"]["rows"], 3);
        assert_eq!(json["data_summary"]["shape"]["columns"], 2);
        assert_eq!(json["data_summary"]["columns"], serde_json::json!(["Region", "Sales"]));
        assert_eq!(json["data_summary"]["column_types"]["Sales"], "numeric");
        assert_eq!(json["recommendations"][0]["chart_type"], "bar");
        assert!(json["recommendations"][2]["parameters"].get("y_axis").is_none());
        Ok(())
    }

    #[test]
    fn test_invalid_request_rejected_before_loading() {
        let request = ChartRequest {
            filepath: "/no/such/file.csv".to_owned(),
            chart_type: "radar".to_owned(),
            ..ChartRequest::default()
        };
        assert_eq!(chart_data(&request).unwrap_err().code(), "invalid_chart_type");
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let request: ChartRequest = serde_json::from_value(serde_json::json!({
            "filepath": "/no/such/file.csv",
            "chart_type": "pie",
            "parameters": {"x_axis": "Region"}
        }))
        .unwrap();
        assert_eq!(chart_data(&request).unwrap_err().code(), "dataset_load_error");
    }
}
