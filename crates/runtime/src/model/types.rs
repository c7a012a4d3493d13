use super::errors::ModelError;
use std::future::Future;

/// Trait for text-generation backends.
///
/// A backend takes one fully composed prompt and returns the model's raw
/// text. Timeouts are enforced by the caller, not the backend.
pub trait Backend: Send + Sync {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, ModelError>> + Send;
}
