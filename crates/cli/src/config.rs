//! Configuration loading from toolloop.toml.

use std::path::Path;
use std::time::Duration;

use runtime::{
    AnthropicBackend, DEFAULT_ANTHROPIC_MODEL, DEFAULT_GEMINI_MODEL, DEFAULT_MAX_ITERATIONS,
    DEFAULT_QUERY, GeminiBackend, ProviderBackend, SessionConfig,
};
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text-generation backend.
    pub backend: BackendConfig,

    /// MCP server to spawn.
    pub server: ServerConfig,

    /// Loop settings.
    pub session: SessionSettings,
}

/// Supported text-generation providers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Gemini,
    Anthropic,
}

impl Provider {
    /// Environment variable holding the credential for this provider.
    pub fn api_key_var(self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    fn default_model(self) -> &'static str {
        match self {
            Self::Gemini => DEFAULT_GEMINI_MODEL,
            Self::Anthropic => DEFAULT_ANTHROPIC_MODEL,
        }
    }
}

/// Backend provider configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub provider: Provider,

    /// Model to use; defaults per provider.
    pub model: Option<String>,

    /// API key. Falls back to the provider's environment variable.
    pub api_key: Option<String>,

    /// Override the provider endpoint.
    pub base_url: Option<String>,

    /// Response token cap (anthropic only).
    pub max_tokens: Option<u32>,
}

/// How to launch the MCP tool server.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            command: "python".to_string(),
            args: vec!["example2_gmail.py".to_string()],
        }
    }
}

/// Iteration loop settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub max_iterations: usize,
    pub generation_timeout_secs: f64,
    pub query: String,
    pub transcript_limit: Option<usize>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            generation_timeout_secs: 10.0,
            query: DEFAULT_QUERY.to_string(),
            transcript_limit: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Load the file if it exists, otherwise use defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Resolve the API key from config, then the environment.
    pub fn api_key(&self, env: impl Fn(&str) -> Option<String>) -> Result<String, ConfigError> {
        let provider = self.backend.provider;
        self.backend
            .api_key
            .clone()
            .or_else(|| env(provider.api_key_var()))
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey {
                var: provider.api_key_var(),
            })
    }

    /// Model name, falling back to the provider default.
    pub fn model(&self) -> &str {
        self.backend
            .model
            .as_deref()
            .unwrap_or_else(|| self.backend.provider.default_model())
    }

    /// Build the configured backend.
    pub fn build_backend(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<ProviderBackend, ConfigError> {
        let api_key = self.api_key(env)?;
        let model = self.model();
        let base_url = self.backend.base_url.clone();

        Ok(match self.backend.provider {
            Provider::Gemini => {
                let builder = GeminiBackend::builder(api_key, model);
                let builder = match base_url {
                    Some(url) => builder.base_url(url),
                    None => builder,
                };
                ProviderBackend::Gemini(builder.build())
            }
            Provider::Anthropic => {
                let builder = AnthropicBackend::builder(api_key, model);
                let builder = match base_url {
                    Some(url) => builder.base_url(url),
                    None => builder,
                };
                let builder = match self.backend.max_tokens {
                    Some(max_tokens) => builder.max_tokens(max_tokens),
                    None => builder,
                };
                ProviderBackend::Anthropic(builder.build())
            }
        })
    }

    /// Translate the `[session]` table into loop settings.
    pub fn session_config(&self) -> Result<SessionConfig, ConfigError> {
        let settings = &self.session;
        let generation_timeout = Duration::try_from_secs_f64(settings.generation_timeout_secs)
            .ok()
            .filter(|d| !d.is_zero())
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "session.generation_timeout_secs must be positive, got {}",
                    settings.generation_timeout_secs
                ))
            })?;

        Ok(SessionConfig {
            max_iterations: settings.max_iterations,
            generation_timeout,
            query: settings.query.clone(),
            transcript_limit: settings.transcript_limit,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("api key not configured: set backend.api_key or {var}")]
    MissingApiKey { var: &'static str },

    #[error("invalid config: {0}")]
    Invalid(String),
}
