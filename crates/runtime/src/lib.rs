//! toolloop runtime — a bounded model/tool orchestration loop.
//!
//! The runtime prompts a language model to pick one of the tools exposed by
//! an MCP server, calls that tool, folds the result back into the next
//! prompt, and repeats until the iteration budget is spent.
//!
//! # Overview
//!
//! - **Session**: owns one run's state and drives the loop.
//! - **Backend**: a trait over text-generation providers (Gemini, Anthropic).
//! - **ToolHost**: a trait over tool catalogs; [`McpToolHost`] talks MCP.
//! - **Reply**: the decoded `FUNCTION_CALL:` / `FINAL_ANSWER:` line.
//!
//! # Example
//!
//! ```ignore
//! use runtime::{GeminiBackend, McpToolHost, Session};
//!
//! # async fn example() -> Result<(), runtime::McpError> {
//! let backend = GeminiBackend::builder("api-key", "gemini-2.0-flash").build();
//! let host = McpToolHost::spawn("python", ["example2_gmail.py"]).await?;
//!
//! let mut session = Session::new(backend, host);
//! let report = session.run().await;
//! println!("{} iterations", report.iterations);
//!
//! let (_, host) = session.into_parts();
//! host.shutdown().await?;
//! # Ok(())
//! # }
//! ```

mod coerce;
mod error;
pub mod generation;
pub mod model;
pub mod prompt;
mod providers;
mod reply;
mod session;
pub mod tools;
mod transcript;

// Error types
pub use error::{Error, Result, report};

// Generation
pub use generation::{DEFAULT_GENERATION_TIMEOUT, generate};
pub use model::{Backend, ModelError};
pub use providers::{
    AnthropicBackend, AnthropicBackendBuilder, DEFAULT_ANTHROPIC_MODEL, DEFAULT_GEMINI_MODEL,
    GeminiBackend, GeminiBackendBuilder, ProviderBackend,
};

// Tools
pub use coerce::coerce_arguments;
pub use tools::{
    McpError, McpToolHost, ParamType, Parameter, ToolDescriptor, ToolError, ToolHost,
    ToolOutput, render_catalog,
};

// Loop
pub use prompt::DEFAULT_QUERY;
pub use reply::{Reply, parse_reply};
pub use session::{DEFAULT_MAX_ITERATIONS, RunReport, Session, SessionConfig, SessionState};
pub use transcript::{IterationRecord, LastResult, TranscriptEntry};
