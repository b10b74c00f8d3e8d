//! Chart recommendation engine.
//!
//! Two strategies produce [`ChartSuggestion`]s from a [`DatasetProfile`]:
//!
//! - [`HeuristicStrategy`]: deterministic rules over column-type patterns,
//!   always available.
//! - [`GenerationStrategy`]: asks a text-generation service, validates the
//!   reply against the profile, and falls back to the heuristic result as a
//!   whole on any failure.
//!
//! Recommendation never fails; the worst case is the heuristic list.

pub mod generated;
pub mod heuristic;
pub mod parse;
pub mod prompt;
pub mod types;

pub use generated::{GenerationStrategy, TextGenerator};
pub use heuristic::HeuristicStrategy;
pub use parse::{parse_suggestions, strip_code_fences};
pub use prompt::build_prompt;
pub use types::{ChartSuggestion, MAX_SUGGESTIONS, MIN_SUGGESTIONS};

use crate::ai::OpenAiGenerator;
use crate::config::GenerationConfig;
use crate::profiler::DatasetProfile;
use std::future::Future;

pub trait RecommendationStrategy {
    fn name(&self) -> &'static str;

    fn recommend(
        &self,
        profile: &DatasetProfile,
    ) -> impl Future<Output = Vec<ChartSuggestion>> + Send;
}

impl RecommendationStrategy for HeuristicStrategy {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    async fn recommend(&self, profile: &DatasetProfile) -> Vec<ChartSuggestion> {
        self.suggest(profile)
    }
}

impl<G: TextGenerator> RecommendationStrategy for GenerationStrategy<G> {
    fn name(&self) -> &'static str {
        "generated"
    }

    async fn recommend(&self, profile: &DatasetProfile) -> Vec<ChartSuggestion> {
        self.suggest(profile).await
    }
}

/// Strategy chosen from configuration at startup.
pub enum Recommender {
    Heuristic(HeuristicStrategy),
    Generated(GenerationStrategy<OpenAiGenerator>),
}

impl Recommender {
    /// Uses the generation service when it is enabled and has a key.
    pub fn from_config(config: &GenerationConfig) -> Self {
        if !config.is_usable() {
            if config.enabled {
                tracing::warn!("No API key configured, using heuristic recommendations");
            } else {
                tracing::info!("Generation disabled, using heuristic recommendations");
            }
            return Self::Heuristic(HeuristicStrategy);
        }

        match OpenAiGenerator::new(config) {
            Ok(generator) => {
                tracing::info!("Using generated recommendations (model {})", generator.model());
                Self::Generated(GenerationStrategy::new(generator, config.timeout()))
            }
            Err(e) => {
                tracing::warn!("Generation client unavailable, using heuristic recommendations: {e:#}");
                Self::Heuristic(HeuristicStrategy)
            }
        }
    }

    pub fn heuristic() -> Self {
        Self::Heuristic(HeuristicStrategy)
    }
}

impl RecommendationStrategy for Recommender {
    fn name(&self) -> &'static str {
        match self {
            Self::Heuristic(s) => s.name(),
            Self::Generated(s) => s.name(),
        }
    }

    async fn recommend(&self, profile: &DatasetProfile) -> Vec<ChartSuggestion> {
        let suggestions = match self {
            Self::Heuristic(s) => s.recommend(profile).await,
            Self::Generated(s) => s.recommend(profile).await,
        };
        tracing::info!(
            "Recommended {} charts for {} columns ({} strategy)",
            suggestions.len(),
            profile.column_count,
            self.name()
        );
        suggestions
    }
}

#[cfg(test)]
mod tests;
