use thiserror::Error;

/// Errors that can occur while talking to a tool host.
#[derive(Debug, Clone, Error)]
pub enum ToolError {
    #[error("tool host unavailable: {0}")]
    Transport(String),
    #[error("invalid input schema for {tool}: {reason}")]
    InvalidSchema { tool: String, reason: String },
    #[error("execution failed: {0}")]
    Execution(String),
}
