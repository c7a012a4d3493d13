//! Text-generation provider adapters.
//!
//! Each provider implements [`Backend`] for its specific API.

mod anthropic;
mod gemini;

pub use anthropic::{AnthropicBackend, AnthropicBackendBuilder, DEFAULT_ANTHROPIC_MODEL};
pub use gemini::{DEFAULT_GEMINI_MODEL, GeminiBackend, GeminiBackendBuilder};

use crate::model::{Backend, ModelError};

/// A backend chosen at runtime from configuration.
pub enum ProviderBackend {
    Gemini(GeminiBackend),
    Anthropic(AnthropicBackend),
}

impl std::fmt::Display for ProviderBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gemini(b) => std::fmt::Display::fmt(b, f),
            Self::Anthropic(b) => std::fmt::Display::fmt(b, f),
        }
    }
}

impl Backend for ProviderBackend {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        match self {
            Self::Gemini(b) => b.generate(prompt).await,
            Self::Anthropic(b) => b.generate(prompt).await,
        }
    }
}
