use chartwise::chart::{ChartRequest, RequestParameters};
use chartwise::config::Settings;
use chartwise::error::{ChartError, Result};
use chartwise::recommend::Recommender;
use chartwise::service;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "chartwise",
    version,
    about = "Profile datasets, recommend charts and compute chart data"
)]
pub struct Cli {
    /// JSON settings file. Defaults to `<data dir>/chartwise/config.json` when present.
    #[arg(long, global = true, value_name = "FILE", env = "CHARTWISE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the dataset profile: column types, statistics and sample rows
    Profile {
        /// Dataset file (CSV, JSON, NDJSON or Parquet)
        file: PathBuf,
    },
    /// Recommend 3 to 5 charts for a dataset
    Recommend {
        /// Dataset file (CSV, JSON, NDJSON or Parquet)
        file: PathBuf,

        /// Skip the text-generation service even when it is configured
        #[arg(long)]
        heuristic: bool,
    },
    /// Compute the data for one chart
    Chart {
        /// Dataset file (CSV, JSON, NDJSON or Parquet)
        #[arg(required_unless_present = "request")]
        file: Option<PathBuf>,

        /// Chart type: bar, line, pie or scatter
        #[arg(long = "type", value_name = "TYPE", required_unless_present = "request")]
        chart_type: Option<String>,

        /// Column for the x axis
        #[arg(long, value_name = "COLUMN")]
        x: Option<String>,

        /// Column for the y axis (optional for pie charts)
        #[arg(long, value_name = "COLUMN")]
        y: Option<String>,

        /// Aggregation: sum, mean, count, max or min
        #[arg(long, value_name = "AGG")]
        agg: Option<String>,

        /// JSON chart request file, instead of the flags above
        #[arg(long, value_name = "FILE", conflicts_with_all = ["file", "chart_type", "x", "y", "agg"])]
        request: Option<PathBuf>,
    },
}

/// Runs one command and returns its pretty-printed JSON output.
pub async fn run_command(cli: Cli) -> Result<String> {
    match cli.command {
        Commands::Profile { file } => to_json(&service::profile_file(&file)?),
        Commands::Recommend { file, heuristic } => {
            let recommender = if heuristic {
                Recommender::heuristic()
            } else {
                let settings = Settings::load(cli.config.as_deref())?;
                Recommender::from_config(&settings.generation)
            };
            to_json(&service::recommend_file(&file, &recommender).await?)
        }
        Commands::Chart {
            file,
            chart_type,
            x,
            y,
            agg,
            request,
        } => {
            let request = match request {
                Some(path) => read_request(&path)?,
                None => ChartRequest {
                    filepath: file
                        .map(|f| f.display().to_string())
                        .unwrap_or_default(),
                    chart_type: chart_type.unwrap_or_default(),
                    parameters: RequestParameters {
                        x_axis: x,
                        y_axis: y,
                    },
                    aggregation: agg,
                },
            };
            to_json(&service::chart_data(&request)?)
        }
    }
}

fn read_request(path: &Path) -> Result<ChartRequest> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ChartError::DatasetLoad(format!("Cannot read request {}: {e}", path.display()))
    })?;
    serde_json::from_str(&content)
        .map_err(|e| ChartError::DataProcessing(format!("Invalid chart request: {e}")))
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_parse_chart_flags() {
        let cli = Cli::parse_from([
            "chartwise", "chart", "sales.csv", "--type", "bar", "--x", "Region", "--y", "Sales",
        ]);
        let Commands::Chart {
            chart_type, x, agg, ..
        } = cli.command
        else {
            panic!("Expected chart command");
        };
        assert_eq!(chart_type.as_deref(), Some("bar"));
        assert_eq!(x.as_deref(), Some("Region"));
        assert!(agg.is_none());
    }

    #[test]
    fn test_request_conflicts_with_flags() {
        let result = Cli::try_parse_from([
            "chartwise", "chart", "--request", "req.json", "--type", "bar",
        ]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from(["chartwise", "chart", "--request", "req.json"]).unwrap();
        assert!(matches!(cli.command, Commands::Chart { request: Some(_), .. }));
    }

    #[test]
    fn test_global_config_flag() {
        let cli =
            Cli::try_parse_from(["chartwise", "recommend", "d.csv", "--config", "c.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("c.json")));
    }

    #[tokio::test]
    async fn test_chart_request_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let data = dir.path().join("sales.csv");
        std::fs::write(&data, "Region,Sales\nN,10\nS,20\nN,5\n")?;
        let request = dir.path().join("request.json");
        std::fs::write(
            &request,
            serde_json::json!({
                "filepath": data.display().to_string(),
                "chart_type": "pie",
                "parameters": {"x_axis": "Region"}
            })
            .to_string(),
        )?;

        let request_arg = request.display().to_string();
        let cli = Cli::try_parse_from(["chartwise", "chart", "--request", request_arg.as_str()])?;
        let output: serde_json::Value = serde_json::from_str(&run_command(cli).await?)?;
        assert_eq!(output["data"]["values"], serde_json::json!([2, 1]));
        assert_eq!(output["data"]["data"][0]["Count"], 2);
        Ok(())
    }
}
