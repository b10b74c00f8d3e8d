//! OpenAI-compatible chat-completions client used for generated recommendations.

use crate::config::GenerationConfig;
use crate::recommend::TextGenerator;
use anyhow::{Context as _, Result};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
};
use secrecy::ExposeSecret as _;

/// Sends recommendation prompts to a chat-completions endpoint.
pub struct OpenAiGenerator {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiGenerator {
    /// Creates a client from the generation settings.
    ///
    /// # Errors
    ///
    /// Fails when no API key is configured.
    pub fn new(config: &GenerationConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_ref()
            .context("No API key configured for the generation service")?;

        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key.expose_secret())
            .with_api_base(&config.api_base);
        let client = Client::with_config(openai_config);

        Ok(Self {
            client,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(Self::system_prompt())
                .build()
                .context("Failed to build system message")?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .context("Failed to build user message")?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .context("Failed to build chat completion request")?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| anyhow::anyhow!("OpenAI API error: {e}"))?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("No response content received"))
    }

    fn system_prompt() -> String {
        "You are an expert data analyst specialising in data visualization. \
         You always answer with valid JSON only, with no explanations or markdown around it."
            .to_owned()
    }
}

impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.complete(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_asks_for_json() {
        let prompt = OpenAiGenerator::system_prompt();

        assert!(prompt.contains("data analyst"));
        assert!(prompt.contains("valid JSON"));
    }

    #[test]
    fn test_requires_api_key() {
        let config = GenerationConfig::default();
        assert!(OpenAiGenerator::new(&config).is_err());
    }

    #[test]
    fn test_builds_with_key() -> Result<()> {
        let config = GenerationConfig {
            api_key: Some(secrecy::SecretString::new("sk-test".into())),
            model: "gpt-test".to_owned(),
            ..GenerationConfig::default()
        };
        let generator = OpenAiGenerator::new(&config)?;
        assert_eq!(generator.model(), "gpt-test");
        Ok(())
    }
}
