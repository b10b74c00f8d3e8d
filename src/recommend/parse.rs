//! Parsing and validation of generated recommendation replies.

use super::types::{ChartSuggestion, MAX_SUGGESTIONS, MIN_SUGGESTIONS};
use crate::chart::{AxisParameters, ChartType};
use crate::error::{ChartError, Result};
use crate::profiler::DatasetProfile;
use serde::Deserialize;
use serde_json::Value;

const FENCE: &str = "```";

#[derive(Debug, Deserialize)]
struct RawSuggestion {
    #[serde(default)]
    title: String,
    chart_type: String,
    parameters: RawParameters,
    #[serde(default)]
    insight: String,
}

#[derive(Debug, Deserialize)]
struct RawParameters {
    x_axis: String,
    #[serde(default)]
    y_axis: Option<String>,
}

/// Returns the contents of the first fenced block, or the trimmed text when
/// there is none.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let Some((_, after)) = text.split_once(FENCE) else {
        return text;
    };

    // An info string such as `json` sits on the fence line.
    let body = if after.trim_start().starts_with(['[', '{']) {
        after
    } else {
        after.split_once('\n').map_or("", |(_, rest)| rest)
    };
    let body = body.split_once(FENCE).map_or(body, |(inner, _)| inner);

    tracing::debug!("Stripped code fences from generated reply");
    body.trim()
}

/// Parses a generated reply into validated suggestions.
///
/// Accepts a JSON array, an object with a `recommendations` array, or a single
/// suggestion object. Entries that fail validation against `profile` are
/// dropped; the survivors are capped at five. Fewer than three survivors is an
/// error so the caller can fall back as a whole.
pub fn parse_suggestions(text: &str, profile: &DatasetProfile) -> Result<Vec<ChartSuggestion>> {
    let body = strip_code_fences(text);
    let value: Value = serde_json::from_str(body).map_err(|e| {
        ChartError::GenerationService(format!("Reply is not valid JSON: {e}"))
    })?;

    let entries = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("recommendations") {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(ChartError::GenerationService(
                    "'recommendations' is not an array".to_owned(),
                ));
            }
            None => vec![Value::Object(map)],
        },
        other => {
            return Err(ChartError::GenerationService(format!(
                "Unexpected reply shape: {other}"
            )));
        }
    };

    let total = entries.len();
    let mut suggestions: Vec<ChartSuggestion> = Vec::with_capacity(total.min(MAX_SUGGESTIONS));
    for (idx, entry) in entries.into_iter().enumerate() {
        match to_suggestion(entry).and_then(|s| s.check(profile).map(|()| s)) {
            Ok(suggestion) if suggestions.iter().any(|s| s.key() == suggestion.key()) => {
                tracing::debug!("Dropping generated entry {idx}: duplicate chart");
            }
            Ok(suggestion) => suggestions.push(suggestion),
            Err(reason) => tracing::debug!("Dropping generated entry {idx}: {reason}"),
        }
    }

    if suggestions.len() < MIN_SUGGESTIONS {
        return Err(ChartError::GenerationService(format!(
            "Only {} of {total} generated suggestions were usable",
            suggestions.len()
        )));
    }
    suggestions.truncate(MAX_SUGGESTIONS);
    Ok(suggestions)
}

fn to_suggestion(entry: Value) -> std::result::Result<ChartSuggestion, String> {
    let raw: RawSuggestion = serde_json::from_value(entry).map_err(|e| e.to_string())?;
    let chart_type = raw
        .chart_type
        .trim()
        .to_lowercase()
        .parse::<ChartType>()
        .map_err(|e| e.to_string())?;

    Ok(ChartSuggestion {
        title: raw.title.trim().to_owned(),
        chart_type,
        parameters: AxisParameters {
            x_axis: raw.parameters.x_axis,
            y_axis: raw.parameters.y_axis.filter(|y| !y.trim().is_empty()),
        },
        insight: raw.insight.trim().to_owned(),
    })
}
