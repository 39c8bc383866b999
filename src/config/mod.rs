use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::providers::GroqProvider;
use crate::traits::CallOptions;

/// Settings for a conversation stack: provider credentials and generation
/// options plus the execution loop's round budget. Everything has a default
/// so a partial TOML file is enough.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub agent: AgentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProviderConfig {
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub max_rounds: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self { max_rounds: 10 }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "failed to parse {}: {}",
                path.as_ref().display(),
                e
            ))
        })
    }
}

impl ProviderConfig {
    /// Construct the provider, falling back to `GROQ_API_KEY` when the file
    /// carries no key.
    pub fn build_provider(&self) -> Result<GroqProvider, Error> {
        let mut provider = if self.api_key.is_empty() {
            GroqProvider::from_env()?
        } else {
            GroqProvider::new(&self.api_key)
        };

        if let Some(model) = &self.model {
            provider = provider.with_model(model);
        }
        if let Some(base_url) = &self.base_url {
            provider = provider.with_base_url(base_url);
        }

        Ok(provider)
    }

    pub fn call_options(&self) -> CallOptions {
        let mut options = CallOptions::default();
        if let Some(temperature) = self.temperature {
            options = options.with_temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            options = options.with_max_tokens(max_tokens);
        }
        options
    }
}
