use std::time::Duration;

use thiserror::Error;

use crate::model::ModelError;
use crate::tools::ToolError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("generation timed out after {0:?}")]
    GenerationTimeout(Duration),

    #[error(transparent)]
    Generation(#[from] ModelError),

    #[error("no FUNCTION_CALL or FINAL_ANSWER line in model response")]
    NoValidResponseLine,

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("not enough parameters provided for {tool}: needs {needed}, got {given}")]
    InsufficientArguments {
        tool: String,
        needed: usize,
        given: usize,
    },

    #[error("cannot convert {value:?} for parameter {parameter} to {expected}")]
    ArgumentCoercion {
        parameter: String,
        expected: &'static str,
        value: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl Error {
    /// Whether this failure happened while dispatching a tool call.
    ///
    /// Dispatch failures are written into the transcript before the
    /// session exits; generation and parse failures are not.
    pub fn is_dispatch(&self) -> bool {
        matches!(
            self,
            Self::UnknownTool(_)
                | Self::InsufficientArguments { .. }
                | Self::ArgumentCoercion { .. }
                | Self::Tool(_)
        )
    }
}

/// Render an error with its full `source()` chain on one line.
pub fn report(error: &(dyn std::error::Error + 'static)) -> String {
    let mut out = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

pub type Result<T> = std::result::Result<T, Error>;
