//! Tool catalog, tool host trait, and MCP integration.

mod catalog;
pub mod errors;
mod host;
mod mcp_host;
mod types;

pub use catalog::render_catalog;
pub use errors::ToolError;
pub use host::ToolHost;
pub use mcp_host::{McpError, McpToolHost};
pub use types::{ParamType, Parameter, ToolDescriptor, ToolOutput};

#[cfg(test)]
pub(crate) use host::testing;
