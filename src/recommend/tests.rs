#![expect(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]
use super::*;
use crate::chart::ChartType;
use crate::profiler::build_profile;
use anyhow::Result;
use polars::prelude::*;
use std::time::Duration;

fn sales_profile() -> Result<DatasetProfile> {
    let mut df = df!(
        "Region" => &["N", "S", "N", "E"],
        "Sales" => &[10i64, 20, 5, 40],
        "Margin" => &[0.5f64, 0.25, 0.75, 0.1]
    )?;
    let dates =
        Series::new("Date".into(), &[19723i32, 19724, 19725, 19726]).cast(&DataType::Date)?;
    df.with_column(dates)?;
    Ok(build_profile(&df)?)
}

fn numbers_profile() -> Result<DatasetProfile> {
    let df = df!(
        "a" => &[1.0f64, 2.0, 3.0],
        "b" => &[3i64, 1, 2]
    )?;
    Ok(build_profile(&df)?)
}

fn summary(suggestions: &[ChartSuggestion]) -> Vec<(ChartType, &str, Option<&str>)> {
    suggestions.iter().map(ChartSuggestion::key).collect()
}

struct Canned(String);

impl TextGenerator for Canned {
    async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
        Ok(self.0.clone())
    }
}

struct Failing;

impl TextGenerator for Failing {
    async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
        anyhow::bail!("connection refused")
    }
}

struct Sleeping(Duration);

impl TextGenerator for Sleeping {
    async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
        tokio::time::sleep(self.0).await;
        Ok("[]".to_owned())
    }
}

const VALID_REPLY: &str = r#"```json
[
  {"title": "Sales by region", "chart_type": "bar",
   "parameters": {"x_axis": "Region", "y_axis": "Sales"},
   "insight": "The east region sells the most."},
  {"title": "Sales over time", "chart_type": "line",
   "parameters": {"x_axis": "Date", "y_axis": "Sales"},
   "insight": "Sales grow towards the end of the period."},
  {"title": "Region share", "chart_type": "pie",
   "parameters": {"x_axis": "Region"},
   "insight": "North has the most rows."}
]
```"#;

#[test]
fn test_heuristic_mixes_patterns_in_rounds() -> Result<()> {
    let profile = sales_profile()?;
    let suggestions = HeuristicStrategy.suggest(&profile);

    assert_eq!(
        summary(&suggestions),
        vec![
            (ChartType::Bar, "Region", Some("Sales")),
            (ChartType::Line, "Date", Some("Sales")),
            (ChartType::Pie, "Region", None),
            (ChartType::Scatter, "Sales", Some("Margin")),
            (ChartType::Bar, "Region", Some("Margin")),
        ]
    );
    Ok(())
}

#[test]
fn test_heuristic_suggestions_reference_real_columns() -> Result<()> {
    let profile = sales_profile()?;
    let suggestions = HeuristicStrategy.suggest(&profile);

    assert!((MIN_SUGGESTIONS..=MAX_SUGGESTIONS).contains(&suggestions.len()));
    for suggestion in &suggestions {
        suggestion.check(&profile).expect("valid suggestion");
    }
    Ok(())
}

#[test]
fn test_heuristic_is_idempotent() -> Result<()> {
    let profile = sales_profile()?;
    let first = serde_json::to_string(&HeuristicStrategy.suggest(&profile))?;
    let second = serde_json::to_string(&HeuristicStrategy.suggest(&profile))?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_heuristic_insights_use_profile_values() -> Result<()> {
    let profile = sales_profile()?;
    let suggestions = HeuristicStrategy.suggest(&profile);

    assert_eq!(suggestions[0].title, "Sales by Region");
    assert!(suggestions[0].insight.contains("3 categories"));
    assert!(suggestions[0].insight.contains("5.00 to 40.00"));
    assert!(suggestions[1].insight.contains("2024-01-01 to 2024-01-04"));
    assert!(suggestions[1].insight.contains("date order"));
    Ok(())
}

#[test]
fn test_heuristic_backfills_numeric_only_dataset() -> Result<()> {
    let profile = numbers_profile()?;
    let suggestions = HeuristicStrategy.suggest(&profile);

    assert_eq!(
        summary(&suggestions),
        vec![
            (ChartType::Scatter, "a", Some("b")),
            (ChartType::Pie, "b", None),
            (ChartType::Bar, "a", Some("b")),
        ]
    );
    Ok(())
}

#[test]
fn test_heuristic_single_column_may_return_fewer() -> Result<()> {
    let df = df!("only" => &["x", "y", "x"])?;
    let profile = build_profile(&df)?;
    let suggestions = HeuristicStrategy.suggest(&profile);

    assert_eq!(summary(&suggestions), vec![(ChartType::Pie, "only", None)]);
    Ok(())
}

#[test]
fn test_strip_code_fences() {
    assert_eq!(strip_code_fences("```json\n[1]\n```"), "[1]");
    assert_eq!(strip_code_fences("Here you go:\n```\n{\"a\": 1}\n```\nEnjoy"), "{\"a\": 1}");
    assert_eq!(strip_code_fences("```[2]```"), "[2]");
    assert_eq!(strip_code_fences("  [3]  "), "[3]");
}

#[test]
fn test_parse_accepts_fenced_array() -> Result<()> {
    let profile = sales_profile()?;
    let suggestions = parse_suggestions(VALID_REPLY, &profile)?;
    assert_eq!(
        summary(&suggestions),
        vec![
            (ChartType::Bar, "Region", Some("Sales")),
            (ChartType::Line, "Date", Some("Sales")),
            (ChartType::Pie, "Region", None),
        ]
    );
    Ok(())
}

#[test]
fn test_parse_accepts_wrapped_object() -> Result<()> {
    let profile = sales_profile()?;
    let body = strip_code_fences(VALID_REPLY);
    let wrapped = format!("{{\"recommendations\": {body}}}");
    assert_eq!(parse_suggestions(&wrapped, &profile)?.len(), 3);
    Ok(())
}

#[test]
fn test_parse_drops_invalid_entries_and_truncates() -> Result<()> {
    let profile = sales_profile()?;
    let entry = |chart: &str, x: &str, y: Option<&str>| {
        serde_json::json!({
            "title": format!("{chart} of {x}"),
            "chart_type": chart,
            "parameters": {"x_axis": x, "y_axis": y},
            "insight": "Worth a look."
        })
    };
    let reply = serde_json::json!([
        entry("bar", "Region", Some("Revenue")),
        entry("radar", "Region", Some("Sales")),
        entry("bar", "Sales", Some("Region")),
        entry("line", "Date", None),
        entry("bar", "Region", Some("Sales")),
        entry("Line", "Date", Some("Sales")),
        entry("pie", "Region", None),
        entry("scatter", "Sales", Some("Margin")),
        entry("bar", "Region", Some("Margin")),
        entry("line", "Date", Some("Margin")),
        {"title": "", "chart_type": "pie", "parameters": {"x_axis": "Region"}, "insight": "x"},
    ]);

    let suggestions = parse_suggestions(&reply.to_string(), &profile)?;
    assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
    assert_eq!(
        summary(&suggestions),
        vec![
            (ChartType::Bar, "Region", Some("Sales")),
            (ChartType::Line, "Date", Some("Sales")),
            (ChartType::Pie, "Region", None),
            (ChartType::Scatter, "Sales", Some("Margin")),
            (ChartType::Bar, "Region", Some("Margin")),
        ]
    );
    Ok(())
}

#[test]
fn test_parse_rejects_too_few_or_garbage() -> Result<()> {
    let profile = sales_profile()?;
    let single = r#"{"title": "t", "chart_type": "pie", "parameters": {"x_axis": "Region"}, "insight": "i"}"#;

    let err = parse_suggestions(single, &profile).unwrap_err();
    assert_eq!(err.code(), "generation_service_error");
    assert!(parse_suggestions("I cannot help with that.", &profile).is_err());
    assert!(parse_suggestions("42", &profile).is_err());
    Ok(())
}

#[test]
fn test_prompt_sections_in_order() -> Result<()> {
    let profile = sales_profile()?;
    let prompt = build_prompt(&profile)?;

    let positions: Vec<usize> = [
        "expert data analyst",
        "4 rows x 4 columns",
        "  - Region: str (categorical)",
        "STATISTICAL SUMMARY",
        "SAMPLE ROWS",
        "TASK",
        "OUTPUT FORMAT",
    ]
    .iter()
    .map(|needle| prompt.find(needle).expect(needle))
    .collect();

    assert!(positions.windows(2).all(|w| w[0] < w[1]), "sections out of order");
    assert!(prompt.contains("\"25%\""));
    assert!(prompt.contains("  - Date: date (temporal)"));
    Ok(())
}

#[tokio::test]
async fn test_generated_suggestions_used_when_valid() -> Result<()> {
    let profile = sales_profile()?;
    let strategy = GenerationStrategy::new(Canned(VALID_REPLY.to_owned()), Duration::from_secs(5));

    let suggestions = strategy.recommend(&profile).await;
    assert_eq!(suggestions.len(), 3);
    assert_eq!(suggestions[0].title, "Sales by region");
    assert_eq!(strategy.name(), "generated");
    Ok(())
}

#[tokio::test]
async fn test_transport_failure_falls_back_to_heuristic() -> Result<()> {
    let profile = sales_profile()?;
    let strategy = GenerationStrategy::new(Failing, Duration::from_secs(5));

    let err = strategy.try_generate(&profile).await.unwrap_err();
    assert!(err.to_string().contains("connection refused"));
    assert_eq!(strategy.recommend(&profile).await, HeuristicStrategy.suggest(&profile));
    Ok(())
}

#[tokio::test]
async fn test_timeout_falls_back_to_heuristic() -> Result<()> {
    let profile = sales_profile()?;
    let strategy =
        GenerationStrategy::new(Sleeping(Duration::from_secs(10)), Duration::from_millis(50));

    let started = std::time::Instant::now();
    let suggestions = strategy.recommend(&profile).await;

    assert!(started.elapsed() < Duration::from_secs(5), "timeout not applied");
    assert!(!suggestions.is_empty());
    assert_eq!(suggestions, HeuristicStrategy.suggest(&profile));
    Ok(())
}

#[tokio::test]
async fn test_too_few_valid_generated_never_mixed() -> Result<()> {
    let profile = sales_profile()?;
    let reply = r#"[
      {"title": "Sales by region", "chart_type": "bar",
       "parameters": {"x_axis": "Region", "y_axis": "Sales"}, "insight": "Good."},
      {"title": "Ghost", "chart_type": "bar",
       "parameters": {"x_axis": "Nope", "y_axis": "Sales"}, "insight": "Bad."},
      {"title": "Ghost 2", "chart_type": "line",
       "parameters": {"x_axis": "Date", "y_axis": "Nope"}, "insight": "Bad."}
    ]"#;
    let strategy = GenerationStrategy::new(Canned(reply.to_owned()), Duration::from_secs(5));

    let suggestions = strategy.recommend(&profile).await;
    assert_eq!(suggestions, HeuristicStrategy.suggest(&profile));
    assert!(suggestions.iter().all(|s| s.title != "Sales by region"));
    Ok(())
}

#[tokio::test]
async fn test_recommender_without_key_is_heuristic() -> Result<()> {
    let profile = numbers_profile()?;
    let recommender = Recommender::from_config(&crate::config::GenerationConfig::default());

    assert_eq!(recommender.name(), "heuristic");
    assert_eq!(recommender.recommend(&profile).await.len(), 3);
    Ok(())
}
