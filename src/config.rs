//! Runtime settings.
//!
//! Settings are layered: built-in defaults, then an optional JSON settings file,
//! then a `.env` file in the working directory, then the process environment.
//! Later layers win.

use crate::error::{ChartError, Result, ResultExt as _};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_API_KEY: &str = "LLM_API_KEY";
pub const ENV_API_URL: &str = "LLM_API_URL";
pub const ENV_MODEL: &str = "LLM_MODEL";
pub const ENV_TIMEOUT: &str = "LLM_TIMEOUT";
pub const ENV_USE_MOCK: &str = "USE_MOCK_RECOMMENDATIONS";

/// Text-generation service configuration.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GenerationConfig {
    pub enabled: bool,
    /// Never written back out.
    #[serde(skip_serializing, deserialize_with = "deserialize_api_key")]
    pub api_key: Option<SecretString>,
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: None,
            api_base: "https://api.openai.com/v1".to_owned(),
            model: "gpt-4o-mini".to_owned(),
            temperature: 0.7,
            max_tokens: 2000,
            timeout_secs: 30,
        }
    }
}

impl GenerationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Generation is attempted only when enabled and a key is present.
    pub fn is_usable(&self) -> bool {
        self.enabled && self.api_key.is_some()
    }
}

fn deserialize_api_key<'de, D>(deserializer: D) -> std::result::Result<Option<SecretString>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let key = Option::<String>::deserialize(deserializer)?;
    Ok(key
        .filter(|k| !k.trim().is_empty())
        .map(|k| SecretString::new(k.into())))
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
    pub generation: GenerationConfig,
}

impl Settings {
    /// Loads every layer. `path` replaces the default settings file location.
    ///
    /// # Errors
    ///
    /// Fails with [`ChartError::Config`] when an explicit settings file is
    /// missing or any layer holds an invalid value.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        if let Err(e) = dotenv::dotenv() {
            tracing::debug!("No .env file loaded: {e}");
        }
        settings.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ChartError::Config(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid settings file {}", path.display()))
    }

    /// Applies environment-style overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let generation = &mut self.generation;

        if let Some(key) = lookup(ENV_API_KEY).filter(|k| !k.trim().is_empty()) {
            generation.api_key = Some(SecretString::new(key.into()));
        }
        if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
            generation.api_base = url;
        }
        if let Some(model) = lookup(ENV_MODEL).filter(|m| !m.trim().is_empty()) {
            generation.model = model;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT) {
            generation.timeout_secs = timeout.trim().parse().map_err(|e| {
                ChartError::Config(format!(
                    "{ENV_TIMEOUT} must be whole seconds, got '{timeout}': {e}"
                ))
            })?;
        }
        if lookup(ENV_USE_MOCK).is_some_and(|v| v.trim().eq_ignore_ascii_case("true")) {
            generation.enabled = false;
        }
        Ok(())
    }
}

/// `<data dir>/chartwise/config.json`, when the platform has a data directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("chartwise").join("config.json"))
}
