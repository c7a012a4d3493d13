//! CLI error types.

use thiserror::Error;

use crate::config::ConfigError;

/// CLI errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Configuration is invalid or missing required fields.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The MCP server could not be started or stopped.
    #[error("MCP server {command}")]
    Mcp {
        command: String,
        #[source]
        source: runtime::McpError,
    },

    /// The session ended early.
    #[error(transparent)]
    Runtime(#[from] runtime::Error),
}

impl Error {
    /// Session failures are logged by the runtime when the run aborts.
    pub fn already_logged(&self) -> bool {
        matches!(self, Self::Runtime(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
