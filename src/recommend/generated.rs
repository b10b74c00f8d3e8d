use super::heuristic::HeuristicStrategy;
use super::parse::parse_suggestions;
use super::prompt::build_prompt;
use super::types::ChartSuggestion;
use crate::error::{ChartError, Result};
use crate::profiler::DatasetProfile;
use std::future::Future;
use std::time::Duration;

/// Source of free-form text for a prompt.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> impl Future<Output = anyhow::Result<String>> + Send;
}

/// Asks a [`TextGenerator`] for suggestions and falls back to the heuristic
/// strategy, as a whole, whenever the reply is late or unusable.
pub struct GenerationStrategy<G> {
    generator: G,
    fallback: HeuristicStrategy,
    timeout: Duration,
}

impl<G: TextGenerator> GenerationStrategy<G> {
    pub fn new(generator: G, timeout: Duration) -> Self {
        Self {
            generator,
            fallback: HeuristicStrategy,
            timeout,
        }
    }

    /// One generation attempt, without fallback.
    ///
    /// # Errors
    ///
    /// [`ChartError::GenerationService`] on transport failure, timeout, or a
    /// reply with fewer than three usable suggestions.
    pub async fn try_generate(&self, profile: &DatasetProfile) -> Result<Vec<ChartSuggestion>> {
        let prompt = build_prompt(profile)?;

        let reply = tokio::time::timeout(self.timeout, self.generator.generate(&prompt))
            .await
            .map_err(|_elapsed| {
                ChartError::GenerationService(format!(
                    "No reply within {}s",
                    self.timeout.as_secs_f64()
                ))
            })?
            .map_err(|e| ChartError::GenerationService(format!("{e:#}")))?;

        parse_suggestions(&reply, profile)
    }

    pub async fn suggest(&self, profile: &DatasetProfile) -> Vec<ChartSuggestion> {
        match self.try_generate(profile).await {
            Ok(suggestions) => {
                tracing::info!("Generated {} chart suggestions", suggestions.len());
                suggestions
            }
            Err(e) => {
                tracing::warn!("Generation failed, using heuristic suggestions: {e}");
                self.fallback.suggest(profile)
            }
        }
    }
}
