//! Timed text generation.

use std::time::Duration;

use tracing::{debug, error};

use crate::model::Backend;
use crate::{Error, Result};

/// Default deadline for a single generation.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Send `prompt` to `backend`, racing it against `timeout`.
///
/// Returns the trimmed response text. Nothing is retried.
pub async fn generate<B: Backend>(backend: &B, prompt: &str, timeout: Duration) -> Result<String> {
    debug!(chars = prompt.len(), "starting generation");
    match tokio::time::timeout(timeout, backend.generate(prompt)).await {
        Ok(Ok(text)) => {
            debug!("generation completed");
            Ok(text.trim().to_string())
        }
        Ok(Err(e)) => {
            error!(error = %e, "generation failed");
            Err(Error::Generation(e))
        }
        Err(_) => {
            error!(?timeout, "generation timed out");
            Err(Error::GenerationTimeout(timeout))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelError;
    use crate::model::types::testing::ScriptedBackend;

    #[tokio::test]
    async fn trims_response() {
        let backend = ScriptedBackend::new(["  FINAL_ANSWER: [1]\n\n"]);
        let text = generate(&backend, "p", Duration::from_secs(1)).await.unwrap();
        assert_eq!(text, "FINAL_ANSWER: [1]");
        assert_eq!(backend.prompts(), ["p"]);
    }

    #[tokio::test]
    async fn slow_backend_times_out() {
        let backend = ScriptedBackend::new(["late"]).with_delay(Duration::from_secs(5));
        let err = generate(&backend, "p", Duration::from_millis(20))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::GenerationTimeout(d) if d == Duration::from_millis(20)));
    }

    #[tokio::test]
    async fn backend_error_is_propagated() {
        let backend = ScriptedBackend::failing(ModelError::Api("429".into()));
        let err = generate(&backend, "p", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Generation(ModelError::Api(_))));
    }
}
