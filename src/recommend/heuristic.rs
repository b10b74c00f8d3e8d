//! Deterministic chart suggestions from column-type patterns.
//!
//! Patterns, in priority order:
//!
//! 1. categorical x numeric: bar chart of the numeric total per category
//! 2. temporal x numeric: line chart of the numeric value over time
//! 3. categorical alone: pie chart of category frequency
//! 4. numeric x numeric: scatter chart of the pair
//!
//! Candidates for each pattern follow the dataset's column order. Selection runs
//! in rounds: every pattern offers its next unseen candidate per round, so the
//! list mixes chart families before it repeats one.

use super::types::{ChartSuggestion, MAX_SUGGESTIONS, MIN_SUGGESTIONS};
use crate::chart::{AxisParameters, ChartType};
use crate::profiler::{ColumnType, DatasetProfile};
use crate::utils::fmt_opt;
use std::collections::HashSet;

/// Coefficient of variation above which a column is described as widely spread.
const WIDE_SPREAD_CV: f64 = 1.0;
/// Category count above which a pie is flagged as crowded.
const CROWDED_PIE: usize = 8;

#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicStrategy;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Template {
    CategoryTotals,
    Trend,
    Frequency,
    Correlation,
    GenericFrequency,
    GenericTotals,
}

#[derive(Clone, Copy, Debug)]
struct Candidate<'a> {
    template: Template,
    x: &'a str,
    y: Option<&'a str>,
}

impl Candidate<'_> {
    fn chart_type(&self) -> ChartType {
        match self.template {
            Template::CategoryTotals | Template::GenericTotals => ChartType::Bar,
            Template::Trend => ChartType::Line,
            Template::Frequency | Template::GenericFrequency => ChartType::Pie,
            Template::Correlation => ChartType::Scatter,
        }
    }

    fn key(&self) -> (ChartType, String, Option<String>) {
        (
            self.chart_type(),
            self.x.to_owned(),
            self.y.map(str::to_owned),
        )
    }
}

impl HeuristicStrategy {
    /// Suggestions for `profile`; identical profiles give identical output.
    #[expect(clippy::unused_self)]
    pub fn suggest(&self, profile: &DatasetProfile) -> Vec<ChartSuggestion> {
        let categorical = profile.columns_of(ColumnType::Categorical);
        let temporal = profile.columns_of(ColumnType::Temporal);
        let numeric = profile.columns_of(ColumnType::Numeric);

        let mut patterns = vec![
            pairs(&categorical, &numeric, Template::CategoryTotals).into_iter(),
            pairs(&temporal, &numeric, Template::Trend).into_iter(),
            singles(&categorical, Template::Frequency).into_iter(),
            numeric_pairs(&numeric).into_iter(),
        ];

        let mut seen = HashSet::new();
        let mut picked: Vec<Candidate<'_>> = Vec::new();

        'rounds: loop {
            let mut progressed = false;
            for pattern in &mut patterns {
                if picked.len() >= MAX_SUGGESTIONS {
                    break 'rounds;
                }
                if let Some(candidate) = pattern.find(|c| seen.insert(c.key())) {
                    picked.push(candidate);
                    progressed = true;
                }
            }
            if !progressed {
                break;
            }
        }

        if picked.len() < MIN_SUGGESTIONS {
            backfill(profile, &numeric, &mut picked, &mut seen);
        }

        tracing::debug!("Heuristic strategy produced {} suggestions", picked.len());

        picked
            .into_iter()
            .map(|candidate| render(profile, candidate))
            .collect()
    }
}

fn pairs<'a>(xs: &[&'a str], ys: &[&'a str], template: Template) -> Vec<Candidate<'a>> {
    xs.iter()
        .flat_map(|&x| {
            ys.iter().map(move |&y| Candidate {
                template,
                x,
                y: Some(y),
            })
        })
        .collect()
}

fn singles<'a>(xs: &[&'a str], template: Template) -> Vec<Candidate<'a>> {
    xs.iter()
        .map(|&x| Candidate { template, x, y: None })
        .collect()
}

fn numeric_pairs<'a>(numeric: &[&'a str]) -> Vec<Candidate<'a>> {
    numeric
        .iter()
        .enumerate()
        .flat_map(|(i, &x)| {
            numeric.iter().skip(i + 1).map(move |&y| Candidate {
                template: Template::Correlation,
                x,
                y: Some(y),
            })
        })
        .collect()
}

/// Tops the list up to the minimum with the most generic charts.
///
/// First a frequency pie for every column not yet on an x axis, then totals of
/// each numeric column against any other column.
fn backfill<'a>(
    profile: &'a DatasetProfile,
    numeric: &[&'a str],
    picked: &mut Vec<Candidate<'a>>,
    seen: &mut HashSet<(ChartType, String, Option<String>)>,
) {
    let columns: Vec<&str> = profile.column_names.iter().map(String::as_str).collect();
    let unused: Vec<&str> = columns
        .iter()
        .copied()
        .filter(|name| !picked.iter().any(|c| c.x == *name))
        .collect();

    let generic = singles(&unused, Template::GenericFrequency)
        .into_iter()
        .chain(
            pairs(&columns, numeric, Template::GenericTotals)
                .into_iter()
                .filter(|c| Some(c.x) != c.y),
        );

    for candidate in generic {
        if picked.len() >= MIN_SUGGESTIONS {
            break;
        }
        if seen.insert(candidate.key()) {
            picked.push(candidate);
        }
    }
}

fn render(profile: &DatasetProfile, candidate: Candidate<'_>) -> ChartSuggestion {
    let Candidate { template, x, y } = candidate;
    let y_name = y.unwrap_or_default();

    let (title, insight) = match template {
        Template::CategoryTotals => (
            format!("{y_name} by {x}"),
            format!(
                "Compares total {y_name} across {}.{}{}",
                categories_phrase(profile, x),
                range_sentence(profile, y_name),
                spread_sentence(profile, y_name, "a few categories may dominate the total"),
            ),
        ),
        Template::Trend => (
            format!("{y_name} over {x}"),
            format!(
                "Tracks how {y_name} changes over {x}.{}{}",
                date_sentence(profile, x),
                spread_sentence(profile, y_name, "expect sharp peaks and dips"),
            ),
        ),
        Template::Frequency => {
            let crowded = profile
                .distinct_counts
                .get(x)
                .is_some_and(|&n| n > CROWDED_PIE);
            (
                format!("Distribution of {x}"),
                format!(
                    "Shows how rows are split across {}.{}",
                    categories_phrase(profile, x),
                    if crowded {
                        " With this many categories, consider merging the smallest slices."
                    } else {
                        ""
                    }
                ),
            )
        }
        Template::Correlation => (
            format!("{y_name} vs {x}"),
            format!(
                "Explores the relationship between {x} and {y_name} to reveal correlation, clusters or outliers.{}",
                spread_sentence(profile, y_name, "outliers will stand out"),
            ),
        ),
        Template::GenericFrequency => (
            format!("Distribution of {x}"),
            format!("Shows how often each value of {x} occurs in the dataset."),
        ),
        Template::GenericTotals => (
            format!("{y_name} by {x}"),
            format!(
                "Compares total {y_name} for each value of {x}.{}",
                range_sentence(profile, y_name),
            ),
        ),
    };

    ChartSuggestion {
        title,
        chart_type: candidate.chart_type(),
        parameters: AxisParameters {
            x_axis: x.to_owned(),
            y_axis: y.map(str::to_owned),
        },
        insight,
    }
}

fn categories_phrase(profile: &DatasetProfile, column: &str) -> String {
    match profile.distinct_counts.get(column) {
        Some(1) => format!("the single category of {column}"),
        Some(n) => format!("the {n} categories of {column}"),
        None => format!("the categories of {column}"),
    }
}

fn range_sentence(profile: &DatasetProfile, column: &str) -> String {
    match profile.descriptive_stats.get(column) {
        Some(stats) if stats.count > 0 => format!(
            " {column} ranges from {} to {} with a mean of {}.",
            fmt_opt(stats.min),
            fmt_opt(stats.max),
            fmt_opt(stats.mean)
        ),
        _ => String::new(),
    }
}

fn spread_sentence(profile: &DatasetProfile, column: &str, consequence: &str) -> String {
    let wide = profile
        .descriptive_stats
        .get(column)
        .and_then(|s| s.coefficient_of_variation())
        .is_some_and(|cv| cv > WIDE_SPREAD_CV);
    if wide {
        format!(" {column} is widely spread, so {consequence}.")
    } else {
        String::new()
    }
}

fn date_sentence(profile: &DatasetProfile, column: &str) -> String {
    let Some(range) = profile.temporal_ranges.get(column) else {
        return String::new();
    };
    match (&range.start, &range.end) {
        (Some(start), Some(end)) if range.monotonic => {
            format!(" The data runs in date order from {start} to {end}.")
        }
        (Some(start), Some(end)) => format!(
            " Dates span {start} to {end} but rows are not in date order, so sort by {column} before reading trends."
        ),
        _ => String::new(),
    }
}
